//! Error types for the protocol layer.
//!
//! Each crate in Ariane defines its own error enum. A `ProtocolError`
//! always means the problem is in serialization/deserialization, not in
//! networking or room state.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust type).
    ///
    /// Common causes: malformed JSON, an unknown event name, missing
    /// required fields, or truncated frames.
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The frame decoded fine but is invalid at the protocol level.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
