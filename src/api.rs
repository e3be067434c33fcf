// API client module: a small blocking HTTP client that talks to the
// marketplace backend. It owns the session (bearer token) so nothing else
// in the app has to know about credentials.

use anyhow::{Context, Result};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::ACCEPT;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, trace};

use crate::config::Config;

/// Backend endpoints used by the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    Register,
    User,
}

impl Endpoint {
    /// Path relative to the API base URL.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Login => "login",
            Endpoint::Register => "register",
            Endpoint::User => "user",
        }
    }

    fn method(self) -> Method {
        match self {
            Endpoint::Login | Endpoint::Register => Method::POST,
            Endpoint::User => Method::GET,
        }
    }

    /// Login and register are always sent without the bearer token.
    pub fn sends_bearer(self) -> bool {
        match self {
            Endpoint::Login | Endpoint::Register => false,
            Endpoint::User => true,
        }
    }
}

/// Bearer token of the logged-in user. Started by a successful login and
/// ended by logout.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    /// Begin a session with the token returned by login.
    pub fn start(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Forget the token.
    pub fn end(&mut self) {
        self.token = None;
    }

    /// The bearer token, while a session is active.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Whether a login has happened since the last logout.
    pub fn is_active(&self) -> bool {
        self.token.is_some()
    }
}

/// Response of `POST /login`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of `POST /register`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

/// Profile returned by `GET /user` and embedded in register responses.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub email: String,
}

#[derive(Serialize)]
struct LoginForm<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterForm<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
    password_confirmation: &'a str,
}

/// Failures of the auth client. The UI shows one generic message per
/// action; the variants exist for logs and tests.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Rejected { status: StatusCode, body: String },
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("not logged in")]
    NotLoggedIn,
}

/// Blocking client for the marketplace backend, holding the current session.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    /// Build a client for `config.api_base_url` with the configured timeout.
    /// No session is active until [`ApiClient::login`] succeeds.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session: Session::default(),
        })
    }

    /// Create an ApiClient configured from `UBMAGER_API_URL` and
    /// `UBMAGER_HTTP_TIMEOUT_SECS`. See [`Config::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::new(&Config::from_env())
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Whether authenticated calls will carry a bearer token.
    pub fn is_logged_in(&self) -> bool {
        self.session.is_active()
    }

    /// Drop the bearer token. Later authenticated calls fail with
    /// [`AuthError::NotLoggedIn`].
    pub fn logout(&mut self) {
        if self.session.is_active() {
            info!("session ended");
        }
        self.session.end();
    }

    /// Log in and start a session with the returned token.
    pub fn login(&mut self, email: &str, password: &str) -> Result<LoginResponse, AuthError> {
        let req = self.login_request(email, password);
        let resp: LoginResponse = self.send(Endpoint::Login, req)?;
        self.session.start(resp.token.clone());
        info!("session started");
        Ok(resp)
    }

    /// Register a new account. Does not log in.
    pub fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        password_confirmation: &str,
    ) -> Result<RegisterResponse, AuthError> {
        let req = self.register_request(name, email, password, password_confirmation);
        self.send(Endpoint::Register, req)
    }

    /// Fetch the logged-in user's profile.
    pub fn current_user(&self) -> Result<User, AuthError> {
        if !self.session.is_active() {
            return Err(AuthError::NotLoggedIn);
        }
        self.send(Endpoint::User, self.prepare(Endpoint::User))
    }

    fn login_request(&self, email: &str, password: &str) -> RequestBuilder {
        self.prepare(Endpoint::Login)
            .form(&LoginForm { email, password })
    }

    fn register_request(
        &self,
        name: &str,
        email: &str,
        password: &str,
        password_confirmation: &str,
    ) -> RequestBuilder {
        self.prepare(Endpoint::Register).form(&RegisterForm {
            name,
            email,
            password,
            password_confirmation,
        })
    }

    /// Request builder with the headers every call needs: JSON `Accept`,
    /// plus the bearer token where the endpoint allows it.
    fn prepare(&self, endpoint: Endpoint) -> RequestBuilder {
        let mut req = self
            .client
            .request(endpoint.method(), self.endpoint_url(endpoint))
            .header(ACCEPT, "application/json");
        if endpoint.sends_bearer() {
            if let Some(token) = self.session.token() {
                req = req.bearer_auth(token);
            }
        }
        req
    }

    /// Full URL of `endpoint`. Carries no credentials, so it is safe to log.
    fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }

    fn send<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        req: RequestBuilder,
    ) -> Result<T, AuthError> {
        debug!(
            method = %endpoint.method(),
            url = %self.endpoint_url(endpoint),
            "sending request"
        );
        let res = req.send()?;
        let status = res.status();
        let body = res.text()?;
        debug!(endpoint = endpoint.path(), %status, bytes = body.len(), "response received");
        // the login body carries the token
        if endpoint != Endpoint::Login {
            trace!(endpoint = endpoint.path(), %body, "response body");
        }

        if !status.is_success() {
            return Err(AuthError::Rejected { status, body });
        }
        Ok(serde_json::from_str(&body)?)
    }
}
