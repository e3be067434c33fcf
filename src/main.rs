// Entrypoint for the marketplace CLI.
// - Keeps `main` small: set up logging, create the API client and hand it
//   to the UI loop.
// - Returns `anyhow::Result` so setup failures are reported with context.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use ubmager_cli::{api::ApiClient, config::Config, ui};

fn main() -> anyhow::Result<()> {
    init_logging();

    // Configured by `UBMAGER_API_URL` / `UBMAGER_HTTP_TIMEOUT_SECS`,
    // see `config::Config::from_env`.
    let config = Config::from_env();
    tracing::debug!(api = %config.api_base_url, "starting");
    let api = ApiClient::new(&config).context("Failed to set up API client")?;

    // Start the interactive app. This call blocks until the user exits.
    ui::run(api)
}

/// Log to stderr so prompts on stdout stay readable. `RUST_LOG` overrides
/// the default `warn` level.
fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
