//! Server state and the WebSocket accept loop.

use std::sync::Arc;

use ariane_hub::{ChannelHub, WsListener};
use ariane_room::Coordinator;
use tokio::sync::Mutex;

use crate::ServerError;
use crate::handler::handle_connection;

/// The hub and coordinator, always mutated together.
///
/// Keeping both behind one lock is what serializes every operation: no
/// coordinator mutation can interleave with another, and a broadcast is
/// always consistent with the state that produced it.
pub struct Core {
    pub hub: ChannelHub,
    pub coordinator: Coordinator,
}

/// Shared handle to the server core, cloned into every connection task
/// and into the HTTP ingestion router.
#[derive(Clone)]
pub struct SharedState {
    pub core: Arc<Mutex<Core>>,
}

impl SharedState {
    /// Creates fresh state: empty hub, empty coordinator.
    pub fn new() -> Self {
        Self {
            core: Arc::new(Mutex::new(Core {
                hub: ChannelHub::new(),
                coordinator: Coordinator::new(),
            })),
        }
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

/// The WebSocket side of the server.
///
/// Accepts connections and spawns a handler task per connection. The HTTP
/// ingestion router runs separately (see [`crate::ingest`]) against the
/// same [`SharedState`].
pub struct ArianeServer {
    listener: WsListener,
    state: SharedState,
}

impl ArianeServer {
    /// Binds the WebSocket listener.
    pub async fn bind(addr: &str) -> Result<Self, ServerError> {
        let listener = WsListener::bind(addr).await?;
        Ok(Self {
            listener,
            state: SharedState::new(),
        })
    }

    /// Returns a handle to the shared state, for wiring the ingestion
    /// router (and for tests).
    pub fn state(&self) -> SharedState {
        self.state.clone()
    }

    /// Returns the local address the listener is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }

    /// Runs the accept loop until the process is terminated.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("Ariane server running");

        loop {
            match self.listener.accept().await {
                Ok((ws, addr)) => {
                    let state = self.state.clone();
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(ws, state).await {
                            tracing::debug!(
                                %addr,
                                error = %e,
                                "connection ended with error"
                            );
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
