//! Named channels and event fan-out over per-connection mpsc senders.

use std::collections::HashMap;

use ariane_protocol::{ClientId, ServerEvent};
use tokio::sync::mpsc;

/// The receiving half handed to a connection's writer task.
pub type EventReceiver = mpsc::UnboundedReceiver<ServerEvent>;

/// The channel capability the room core consumes.
///
/// Everything the coordinator needs from the transport is here: channel
/// membership and three fan-out shapes. Keeping this a trait lets the
/// core be exercised in unit tests against a recording fake, with no
/// socket in sight.
pub trait Channels {
    /// Subscribes a connection to a named channel.
    fn join(&mut self, id: ClientId, channel: &str);

    /// Removes a connection from a named channel.
    fn leave(&mut self, id: ClientId, channel: &str);

    /// Returns `true` if the channel currently has any member.
    fn occupied(&self, channel: &str) -> bool;

    /// Sends an event to every member of a channel.
    fn send_to(&mut self, channel: &str, event: ServerEvent);

    /// Sends an event to every live connection.
    fn send_to_all(&mut self, event: ServerEvent);

    /// Sends an event to every live connection except `sender`.
    fn send_to_all_except(&mut self, sender: ClientId, event: ServerEvent);

    /// Sends an event to one specific connection.
    fn send_to_one(&mut self, id: ClientId, event: ServerEvent);
}

/// In-process [`Channels`] implementation.
///
/// Issues connection identities, owns one unbounded sender per live
/// connection, and tracks channel membership in insertion order. All
/// methods are synchronous; delivery happens on each connection's writer
/// task, which drains the matching [`EventReceiver`].
pub struct ChannelHub {
    peers: HashMap<ClientId, mpsc::UnboundedSender<ServerEvent>>,
    /// Channel name → members, in subscription order.
    channels: HashMap<String, Vec<ClientId>>,
    next_id: u64,
}

impl ChannelHub {
    /// Creates an empty hub. Identity numbering starts at 1.
    pub fn new() -> Self {
        Self {
            peers: HashMap::new(),
            channels: HashMap::new(),
            next_id: 1,
        }
    }

    /// Registers a new connection: issues its identity and returns the
    /// receiver its writer task should drain.
    pub fn register(&mut self) -> (ClientId, EventReceiver) {
        let id = ClientId(self.next_id);
        self.next_id += 1;
        let (tx, rx) = mpsc::unbounded_channel();
        self.peers.insert(id, tx);
        tracing::debug!(%id, "connection registered");
        (id, rx)
    }

    /// Removes a connection from the hub and from every channel it was
    /// subscribed to. Channels left empty are dropped.
    pub fn unregister(&mut self, id: ClientId) {
        self.peers.remove(&id);
        self.channels.retain(|_, members| {
            members.retain(|m| *m != id);
            !members.is_empty()
        });
        tracing::debug!(%id, "connection unregistered");
    }

    /// Returns the number of live connections.
    pub fn len(&self) -> usize {
        self.peers.len()
    }

    /// Returns `true` if no connection is registered.
    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    fn push(&self, id: ClientId, event: ServerEvent) {
        if let Some(tx) = self.peers.get(&id) {
            // A closed receiver means the connection is tearing down;
            // its cleanup will reach unregister() on its own.
            let _ = tx.send(event);
        }
    }
}

impl Default for ChannelHub {
    fn default() -> Self {
        Self::new()
    }
}

impl Channels for ChannelHub {
    fn join(&mut self, id: ClientId, channel: &str) {
        let members = self.channels.entry(channel.to_string()).or_default();
        if !members.contains(&id) {
            members.push(id);
        }
    }

    fn leave(&mut self, id: ClientId, channel: &str) {
        if let Some(members) = self.channels.get_mut(channel) {
            members.retain(|m| *m != id);
            if members.is_empty() {
                self.channels.remove(channel);
            }
        }
    }

    fn occupied(&self, channel: &str) -> bool {
        self.channels
            .get(channel)
            .is_some_and(|members| !members.is_empty())
    }

    fn send_to(&mut self, channel: &str, event: ServerEvent) {
        if let Some(members) = self.channels.get(channel) {
            for id in members {
                self.push(*id, event.clone());
            }
        }
    }

    fn send_to_all(&mut self, event: ServerEvent) {
        for id in self.peers.keys() {
            self.push(*id, event.clone());
        }
    }

    fn send_to_all_except(&mut self, sender: ClientId, event: ServerEvent) {
        for id in self.peers.keys() {
            if *id != sender {
                self.push(*id, event.clone());
            }
        }
    }

    fn send_to_one(&mut self, id: ClientId, event: ServerEvent) {
        self.push(id, event);
    }
}

// =========================================================================
// Tests
// =========================================================================
