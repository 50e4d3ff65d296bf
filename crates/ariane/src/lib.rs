//! # Ariane
//!
//! Room coordination server for PIN-keyed multiplayer sessions: one
//! `unity` client creates a room, `guide` clients join it by PIN, and the
//! server keeps rosters, display names, live positions, and obstacle
//! assignments consistent across joins, renames, and disconnects. WebRTC
//! and chat signaling is relayed blindly; victory and timer events are
//! injected over HTTP and re-broadcast to every connection.
//!
//! The layers underneath:
//!
//! - [`ariane_protocol`] — wire events and codecs
//! - [`ariane_hub`] — connection identity, named channels, fan-out
//! - [`ariane_room`] — the coordinator and its registries
//!
//! This crate wires them together: config, the WebSocket accept loop, the
//! per-connection dispatcher, the signaling relay, and the HTTP ingestion
//! router.

pub mod config;
mod error;
mod handler;
pub mod ingest;
mod relay;
mod server;

pub use config::Config;
pub use error::ServerError;
pub use server::{ArianeServer, Core, SharedState};
