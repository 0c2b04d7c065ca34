//! Codec trait and implementations for serializing/deserializing replies.
//!
//! A "codec" (coder/decoder) converts between Rust types and raw bytes.
//! The site answers its `.json` and `.ajax` endpoints with JSON, so
//! [`JsonCodec`] is the one implementation. Front-ends also use it to
//! render results as JSON.

use serde::{de::DeserializeOwned, Serialize};

use crate::ProtocolError;

/// Turns reply bodies into typed values, and values into bytes.
///
/// Decoding yields owned values (`DeserializeOwned`), so the response
/// body can be dropped as soon as it has been read.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// ## Example
///
/// ```rust
/// use hostlink_protocol::{Codec, ControlReply, JsonCodec};
///
/// let reply: ControlReply = JsonCodec.decode(br#"{"success":true}"#).unwrap();
/// assert!(reply.success);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
