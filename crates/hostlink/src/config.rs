//! Client configuration.
//!
//! Everything has a sensible default except the credentials. Front-ends
//! either build a [`ClientConfig`] by hand or read it from the process
//! environment with [`ClientConfig::from_env`].

use std::time::Duration;

use hostlink_session::Credentials;
use hostlink_transport::ReqwestConnector;

/// Site the client talks to unless told otherwise.
pub const DEFAULT_BASE_URL: &str = "https://aternos.org";

/// Per-request timeout unless told otherwise.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variables read by [`ClientConfig::from_env`].
pub mod env {
    pub const USER: &str = "ATERNOS_USER";
    pub const PASSWORD: &str = "ATERNOS_PASS";
    pub const SERVER_NAME: &str = "ATERNOS_SERVER_NAME";
    pub const BASE_URL: &str = "ATERNOS_BASE_URL";
    pub const TIMEOUT_SECS: &str = "ATERNOS_TIMEOUT_SECS";
}

/// Errors raised while loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("missing required setting {0}")]
    Missing(&'static str),

    /// A variable is set but unusable.
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Settings for a [`ServerClient`](crate::ServerClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Account and target server.
    pub credentials: Credentials,

    /// Root URL of the hosting site, without a trailing slash.
    pub base_url: String,

    /// Applied to every request; a timeout surfaces as a transport error.
    pub request_timeout: Duration,

    /// Overrides the default `User-Agent`.
    pub user_agent: Option<String>,
}

impl ClientConfig {
    /// Creates a config for `credentials` with default settings.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            user_agent: None,
        }
    }

    /// Reads the config from the process environment (see [`env`]).
    ///
    /// # Errors
    /// [`ConfigError::Missing`] if a required variable is unset or empty,
    /// [`ConfigError::Invalid`] if the timeout is not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), but reads variables through
    /// `lookup`.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require =
            |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let credentials = Credentials::new(
            require(env::USER)?,
            require(env::PASSWORD)?,
            require(env::SERVER_NAME)?,
        );
        let mut config = Self::new(credentials);

        if let Some(url) = get(env::BASE_URL) {
            config.base_url = url.trim_end_matches('/').to_string();
        }

        if let Some(raw) = get(env::TIMEOUT_SECS) {
            let secs: u64 =
                raw.trim().parse().map_err(|e| ConfigError::Invalid {
                    var: env::TIMEOUT_SECS,
                    reason: format!("{e}"),
                })?;
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    var: env::TIMEOUT_SECS,
                    reason: "must be at least 1".into(),
                });
            }
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Builds the HTTP connector these settings describe.
    pub fn connector(&self) -> ReqwestConnector {
        let connector = ReqwestConnector::new(self.base_url.as_str())
            .timeout(self.request_timeout);
        match &self.user_agent {
            Some(ua) => connector.user_agent(ua.as_str()),
            None => connector,
        }
    }
}
