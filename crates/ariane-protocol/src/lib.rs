//! Wire protocol for Ariane.
//!
//! This crate defines the "language" that clients and the server speak:
//!
//! - **Types** ([`ClientId`], [`RoomId`], [`Role`], [`PlayerView`], etc.) —
//!   the identities and room/player views that travel on the wire.
//! - **Events** ([`ClientEvent`], [`ServerEvent`]) — every named event a
//!   client can send and the server can push, with their exact wire names.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how events are converted
//!   to/from bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong during
//!   encoding/decoding.
//!
//! # Architecture
//!
//! The protocol layer sits between the channel substrate (raw frames) and
//! the room core (coordinator state). It doesn't know about connections or
//! rooms — it only knows how to name and serialize messages.
//!
//! ```text
//! Hub (frames) → Protocol (events) → Room core (coordinator)
//! ```

mod codec;
mod error;
mod events;
mod types;

pub use codec::{Codec, JsonCodec};
pub use error::ProtocolError;
pub use events::{
    ClientEvent, GameLaunchReply, PlayerCreateReply, RoomCreateReply,
    RoomJoinReply, ServerEvent,
};
pub use types::{
    ClientId, ObstacleKind, PlayerView, Position, Role, RoomId,
};
