// Config module: settings resolved from the environment at startup.

use std::time::Duration;

use tracing::warn;

/// Backend used when `UBMAGER_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "https://api.ubmager.shop/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const API_URL_VAR: &str = "UBMAGER_API_URL";
pub const TIMEOUT_VAR: &str = "UBMAGER_HTTP_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL without a trailing slash; endpoints are appended to it.
    pub api_base_url: String,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Read `UBMAGER_API_URL` and `UBMAGER_HTTP_TIMEOUT_SECS`, falling back
    /// to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_base_url = lookup(API_URL_VAR)
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout_secs = match lookup(TIMEOUT_VAR) {
            None => DEFAULT_TIMEOUT_SECS,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    warn!(value = %raw, "ignoring invalid {}, using default", TIMEOUT_VAR);
                    DEFAULT_TIMEOUT_SECS
                }
            },
        };

        Config {
            api_base_url,
            request_timeout: Duration::from_secs(timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(Config::from_lookup(lookup(&[])), Config::default());
    }

    #[test]
    fn url_override_drops_trailing_slash() {
        let config = Config::from_lookup(lookup(&[(API_URL_VAR, "http://localhost:8000/api/")]));
        assert_eq!(config.api_base_url, "http://localhost:8000/api");
    }

    #[test]
    fn timeout_override_and_fallback() {
        let config = Config::from_lookup(lookup(&[(TIMEOUT_VAR, "5")]));
        assert_eq!(config.request_timeout, Duration::from_secs(5));

        for bad in ["0", "soon", "-1"] {
            let config = Config::from_lookup(lookup(&[(TIMEOUT_VAR, bad)]));
            assert_eq!(config.request_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        }
    }
}
