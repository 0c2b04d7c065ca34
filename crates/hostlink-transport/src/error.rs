/// Errors that can occur in the transport layer.
///
/// Timeouts are reported as [`TransportError::RequestFailed`] with a
/// "timed out" message rather than as a variant of their own.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request never produced a response (connection refused, DNS,
    /// TLS, timeout, body read failure).
    #[error("request to {url} failed: {message}")]
    RequestFailed { url: String, message: String },

    /// The site answered with a non-2xx status code.
    #[error("unexpected HTTP status {status} from {url}")]
    Status { url: String, status: u16 },

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}
