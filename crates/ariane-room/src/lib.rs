//! Room lifecycle and coordination for Ariane.
//!
//! This is the core of the server: PIN-keyed room lifecycle, the player
//! registry, name-uniqueness enforcement, role-gated game start, and the
//! fair partition of the obstacle catalog across a room's guides.
//!
//! # Key types
//!
//! - [`Coordinator`] — owns all mutable state and exposes every operation
//!   players invoke; takes the channel substrate by handle so it can be
//!   unit-tested without a live transport
//! - [`RoomRegistry`] — the set of currently valid PINs
//! - [`PlayerRegistry`] — connection identity → player record
//! - [`GuideDirectory`] — the voice/chat guide announcements
//! - [`RoomError`] — the operation error taxonomy (and wire messages)

mod coordinator;
mod error;
mod guides;
mod obstacles;
mod players;
mod rooms;

pub use coordinator::Coordinator;
pub use error::RoomError;
pub use guides::GuideDirectory;
pub use obstacles::partition;
pub use players::{Player, PlayerRegistry};
pub use rooms::RoomRegistry;
