//! Unified error type for the server crate.

use ariane_hub::HubError;
use ariane_protocol::ProtocolError;

/// Top-level error wrapping the layer-specific errors.
///
/// The `#[from]` attributes auto-generate `From` impls, so `?` converts
/// sub-crate errors on the way up.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// A substrate-level error (bind, accept, handshake).
    #[error(transparent)]
    Hub(#[from] HubError),

    /// A protocol-level error (encode, decode).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// An I/O error from the HTTP listener.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
