//! HTTP transport implementation using `reqwest`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::{ConnectionId, Connector, HttpConnection, TransportError};

/// Counter for generating unique connection IDs.
static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A `reqwest`-based [`Connector`].
///
/// Each [`connect`](Connector::connect) builds a new `reqwest::Client`
/// with its own cookie store, so a failed login never leaks cookies into
/// the next attempt.
#[derive(Debug, Clone)]
pub struct ReqwestConnector {
    base_url: String,
    timeout: Duration,
    user_agent: String,
}

impl ReqwestConnector {
    /// Creates a connector for the site rooted at `base_url`
    /// (e.g. `https://aternos.org`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("hostlink/", env!("CARGO_PKG_VERSION"))
                .to_string(),
        }
    }

    /// Sets the timeout applied to every request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the `User-Agent` header sent with every request.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Returns the base URL requests are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Connector for ReqwestConnector {
    type Connection = ReqwestConnection;

    fn connect(&self) -> Result<Self::Connection, TransportError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str())
            .build()
            .map_err(|e| TransportError::ClientBuild(e.to_string()))?;

        let id = ConnectionId::new(
            NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed),
        );
        tracing::debug!(%id, base_url = %self.base_url, "opened HTTP connection");

        Ok(ReqwestConnection {
            id,
            client,
            base_url: self.base_url.clone(),
        })
    }
}

/// A single `reqwest` client and its cookie jar.
#[derive(Debug, Clone)]
pub struct ReqwestConnection {
    id: ConnectionId,
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestConnection {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<String, TransportError> {
        let response =
            request.send().await.map_err(|e| request_failed(url, &e))?;

        let status = response.status();
        tracing::debug!(id = %self.id, url, status = status.as_u16(), "response");
        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| request_failed(url, &e))
    }
}

impl HttpConnection for ReqwestConnection {
    async fn get(&self, path: &str) -> Result<String, TransportError> {
        let url = self.url(path);
        self.send(self.client.get(&url), &url).await
    }

    async fn post_form(
        &self,
        path: &str,
        fields: &[(&str, &str)],
    ) -> Result<String, TransportError> {
        let url = self.url(path);
        self.send(self.client.post(&url).form(fields), &url).await
    }

    fn id(&self) -> ConnectionId {
        self.id
    }
}

fn request_failed(url: &str, err: &reqwest::Error) -> TransportError {
    let message = if err.is_timeout() {
        "timed out".to_string()
    } else {
        err.to_string()
    };
    TransportError::RequestFailed {
        url: url.to_string(),
        message,
    }
}
