//! WebSocket acceptor using `tokio-tungstenite`.

use std::net::SocketAddr;

use tokio::net::{TcpListener, TcpStream};

use crate::HubError;

/// The stream type a connection lives on.
///
/// Handed to the server's per-connection handler, which splits it into a
/// read half (inbound client events) and a write half (draining the
/// connection's [`EventReceiver`](crate::EventReceiver)).
pub type WsStream = tokio_tungstenite::WebSocketStream<TcpStream>;

/// Listens for incoming WebSocket connections.
pub struct WsListener {
    listener: TcpListener,
}

impl WsListener {
    /// Binds the listener to the given address.
    pub async fn bind(addr: &str) -> Result<Self, HubError> {
        let listener =
            TcpListener::bind(addr).await.map_err(HubError::Bind)?;
        tracing::info!(addr, "WebSocket listener bound");
        Ok(Self { listener })
    }

    /// Returns the local address the listener is bound to.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Waits for and upgrades the next incoming connection.
    pub async fn accept(&self) -> Result<(WsStream, SocketAddr), HubError> {
        let (stream, addr) =
            self.listener.accept().await.map_err(HubError::Accept)?;

        let ws = tokio_tungstenite::accept_async(stream)
            .await
            .map_err(|e| HubError::Handshake(e.to_string()))?;

        tracing::debug!(%addr, "accepted WebSocket connection");
        Ok((ws, addr))
    }
}
