//! Error types for the protocol layer.
//!
//! Each crate in Hostlink defines its own error enum. A `ProtocolError`
//! means the bytes arrived fine but could not be turned into (or made
//! from) the shape the site uses.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust type).
    ///
    /// Common causes: an HTML error page where JSON was expected,
    /// missing required fields, or wrong data types.
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),
}
