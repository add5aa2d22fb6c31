//! Client configuration and login credentials.
//!
//! Both can be built by hand or read from the environment:
//!
//! - `TALEO_API_URL` (required) - Base URL of the company's API endpoint
//! - `TALEO_TIMEOUT_SECS` (optional) - Per-request timeout, defaults to 300
//! - `TALEO_AUTH_COOKIE` (optional) - Session cookie name, defaults to `authToken`
//! - `TALEO_ORG_CODE`, `TALEO_USERNAME`, `TALEO_PASSWORD` - Login credentials

use std::env;
use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::error::{Result, TaleoError};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Cookie carrying the session token, as issued by Taleo.
pub const DEFAULT_AUTH_COOKIE: &str = "authToken";

const USER_AGENT: &str = concat!("taleo/", env!("CARGO_PKG_VERSION"));

/// How the session token is attached to authenticated requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthScheme {
    /// `Cookie: <name>=<token>`
    Cookie(String),
    /// `<name>: <token>`
    Header(String),
    /// `Authorization: Bearer <token>`
    Bearer,
}

impl Default for AuthScheme {
    fn default() -> Self {
        Self::Cookie(DEFAULT_AUTH_COOKIE.to_string())
    }
}

/// Settings used to build a [`TaleoClient`](crate::TaleoClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for all relative API paths.
    pub base_url: String,
    /// Timeout applied to every request, downloads included.
    pub timeout: Duration,
    /// Session token placement.
    pub auth_scheme: AuthScheme,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl ClientConfig {
    /// Configuration with defaults for everything but the base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            auth_scheme: AuthScheme::default(),
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// Read configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `TALEO_API_URL` is not set or `TALEO_TIMEOUT_SECS`
    /// is not a number.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("TALEO_API_URL").map_err(|_| {
            TaleoError::ConfigMissing("TALEO_API_URL environment variable not set".to_string())
        })?;

        let mut config = Self::new(base_url);

        if let Ok(secs) = env::var("TALEO_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                TaleoError::ConfigMissing(format!("TALEO_TIMEOUT_SECS is not a number: {secs}"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Ok(cookie) = env::var("TALEO_AUTH_COOKIE") {
            config.auth_scheme = AuthScheme::Cookie(cookie);
        }

        Ok(config)
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set how the session token is attached.
    #[must_use]
    pub fn with_auth_scheme(mut self, scheme: AuthScheme) -> Self {
        self.auth_scheme = scheme;
        self
    }
}

/// Login credentials, serialized as the `login` request body.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// Company code.
    pub org_code: String,
    /// API user name.
    pub user_name: String,
    /// API user password.
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("org_code", &self.org_code)
            .field("user_name", &self.user_name)
            .finish_non_exhaustive()
    }
}

impl Credentials {
    pub fn new(
        org_code: impl Into<String>,
        user_name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            org_code: org_code.into(),
            user_name: user_name.into(),
            password: password.into(),
        }
    }

    /// Read credentials from `TALEO_ORG_CODE`, `TALEO_USERNAME` and
    /// `TALEO_PASSWORD`.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first variable that is not set.
    pub fn from_env() -> Result<Self> {
        let var = |name: &str| {
            env::var(name).map_err(|_| {
                TaleoError::ConfigMissing(format!("{name} environment variable not set"))
            })
        };

        Ok(Self::new(
            var("TALEO_ORG_CODE")?,
            var("TALEO_USERNAME")?,
            var("TALEO_PASSWORD")?,
        ))
    }
}
