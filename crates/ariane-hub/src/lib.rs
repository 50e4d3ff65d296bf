//! Identity and channel substrate for Ariane.
//!
//! The room core never talks to sockets. It talks to a [`Channels`]
//! implementation: something that can group connections into named
//! channels and fan an event out to "everyone in channel C", "everyone
//! except the sender", or one specific connection. This crate provides:
//!
//! - the [`Channels`] trait — the capability the core consumes,
//! - [`ChannelHub`] — the in-process implementation backed by one
//!   unbounded mpsc sender per connection,
//! - [`WsListener`] — the WebSocket acceptor that produces the raw
//!   streams connections live on (behind the `websocket` feature).
//!
//! Sends are fire-and-forget: pushing onto an unbounded sender never
//! blocks and never fails loudly — a closed receiver just means the
//! connection is already gone and its disconnect cleanup is in flight.

#![allow(async_fn_in_trait)]

mod channels;
mod error;
#[cfg(feature = "websocket")]
mod websocket;

pub use channels::{ChannelHub, Channels, EventReceiver};
pub use error::HubError;
#[cfg(feature = "websocket")]
pub use websocket::{WsListener, WsStream};
