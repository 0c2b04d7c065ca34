//! Error types for the client layer, plus the unified [`HostlinkError`].

use hostlink_protocol::ProtocolError;
use hostlink_session::AuthError;
use hostlink_transport::TransportError;

use crate::config::ConfigError;

/// Errors from resolving the configured display name to a server id.
#[derive(Debug, thiserror::Error)]
pub enum LocateError {
    /// No server element on the listing carries this title.
    #[error("no server named {0:?} on this account")]
    NotFound(String),

    /// Several different servers carry this title; picking one would be
    /// a guess.
    #[error("{count} servers are named {name:?}; rename one to disambiguate")]
    Ambiguous { name: String, count: usize },

    /// The site served its login page instead of the server list. The
    /// stored session is dropped; the next command logs in again.
    #[error("session expired; the site asked to log in again")]
    SessionExpired,

    /// The listing could not be fetched.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Errors from reading a server's status.
#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    /// The reply was not JSON, or lacked a field we need, or had one of
    /// the wrong type.
    #[error("malformed status response: {0}")]
    MalformedResponse(#[source] ProtocolError),

    /// The status endpoint could not be reached.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Errors from a start/stop request.
///
/// The site answering `{"success": false}` is *not* an error; it comes
/// back as a [`ControlOutcome`](crate::ControlOutcome) with
/// `accepted == false`.
#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    /// The control endpoint could not be reached.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The site answered with something that is not a JSON object.
    #[error("undecodable control response: {0}")]
    InvalidReply(#[source] ProtocolError),
}

/// Top-level error that wraps every layer's errors.
///
/// The `#[from]` attribute on each variant auto-generates `From` impls,
/// so the `?` operator converts sub-errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum HostlinkError {
    /// Configuration was missing or invalid at startup.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Logging in failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The configured server could not be found.
    #[error(transparent)]
    Locate(#[from] LocateError),

    /// Reading the status failed.
    #[error(transparent)]
    Status(#[from] StatusError),

    /// A start/stop request failed.
    #[error(transparent)]
    Control(#[from] ControlError),
}
