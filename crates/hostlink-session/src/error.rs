//! Error types for the session layer.

use hostlink_transport::TransportError;

/// Errors that can occur while logging in.
///
/// A failed login never populates the [`SessionStore`](crate::SessionStore),
/// so the next acquisition starts the handshake from scratch.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The login page carried no anti-forgery token. Usually means the
    /// site changed its markup or served a maintenance/challenge page.
    #[error("login token not found on the login page")]
    TokenNotFound,

    /// The site answered the login submission without a success marker
    /// (wrong credentials, expired token, or a non-JSON answer).
    #[error("login rejected: {0}")]
    LoginRejected(String),

    /// The login page or the submission never got a usable response.
    #[error(transparent)]
    Transport(#[from] TransportError),
}
