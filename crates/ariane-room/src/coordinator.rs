//! The room coordinator: every operation players invoke.
//!
//! The coordinator owns all mutable state (room registry, player
//! registry, guide directory) and receives the channel substrate as a
//! handle on every call — nothing here is ambient or global, so the whole
//! core can be driven in tests with a recording fake substrate.
//!
//! Every method is synchronous and never suspends mid-mutation: sends are
//! fire-and-forget pushes, so no operation can observe another's
//! partially-applied update. Callers serialize operations behind a single
//! lock (see the server crate).

use ariane_protocol::{
    ClientId, ObstacleKind, PlayerView, Position, Role, RoomId, ServerEvent,
};
use ariane_hub::Channels;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::obstacles::partition;
use crate::{GuideDirectory, Player, PlayerRegistry, RoomError, RoomRegistry};

/// Coordinates rooms, players, names, positions, launches, and obstacle
/// assignments for one server process.
pub struct Coordinator {
    rooms: RoomRegistry,
    players: PlayerRegistry,
    guides: GuideDirectory,
    rng: StdRng,
}

impl Coordinator {
    /// Creates a coordinator seeded from the operating system.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Creates a coordinator with an explicit RNG. Tests use this with a
    /// seeded `StdRng` to make PINs and partitions reproducible.
    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            rooms: RoomRegistry::new(),
            players: PlayerRegistry::new(),
            guides: GuideDirectory::new(),
            rng,
        }
    }

    // -----------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------

    /// `room:create` — generates a PIN, registers the room, creates the
    /// caller's `unity` record, and subscribes the caller to the PIN
    /// channel. The caller also receives its (empty) pre-guide roster.
    pub fn create_room(
        &mut self,
        hub: &mut impl Channels,
        client: ClientId,
    ) -> Result<RoomId, RoomError> {
        let pin = self.rooms.create(&mut self.rng)?;

        self.players
            .put(Player::new(client, Role::Unity, pin.clone()));
        hub.join(client, pin.as_str());

        tracing::info!(%client, room = %pin, "room created");

        // The room has one occupant, so nothing is broadcast — only the
        // creator's own empty view is pushed.
        hub.send_to_one(client, ServerEvent::RoomPlayers(Vec::new()));

        Ok(pin)
    }

    /// `room:join` — validates the PIN, creates the caller's `guide`
    /// record, subscribes it to the PIN channel, pushes the updated
    /// roster to the whole room, and re-partitions obstacles. Returns the
    /// roster for the caller's reply.
    pub fn join_room(
        &mut self,
        hub: &mut impl Channels,
        client: ClientId,
        pin: &RoomId,
    ) -> Result<Vec<PlayerView>, RoomError> {
        // The registry is the source of truth; live channel occupancy is
        // honored as a fallback for rooms that predate the registry.
        if !self.rooms.exists(pin) && !hub.occupied(pin.as_str()) {
            tracing::debug!(%client, room = %pin, "join rejected: unknown PIN");
            return Err(RoomError::InvalidRoom);
        }

        self.players
            .put(Player::new(client, Role::Guide, pin.clone()));
        hub.join(client, pin.as_str());

        tracing::info!(%client, room = %pin, "guide joined");

        self.broadcast_roster(hub, pin);
        self.repartition(hub, pin);

        Ok(self.players.roster(pin))
    }

    /// `player:create` — claims a display name for the caller's record.
    ///
    /// The name must be non-empty after trimming and unique within the
    /// room under case-insensitive comparison against every *other*
    /// player's effective name — placeholder names included, so claiming
    /// "anonyme" next to a yet-unnamed player fails.
    pub fn claim_name(
        &mut self,
        hub: &mut impl Channels,
        client: ClientId,
        pseudo: &str,
    ) -> Result<String, RoomError> {
        let trimmed = pseudo.trim();
        if trimmed.is_empty() {
            return Err(RoomError::EmptyName);
        }

        let room = match self.players.get(client) {
            Some(player) => player.room.clone(),
            None => return Err(RoomError::NoRoom),
        };

        let wanted = trimmed.to_lowercase();
        let taken = self
            .players
            .list_by_room(&room)
            .iter()
            .any(|p| p.id != client && p.effective_name().to_lowercase() == wanted);
        if taken {
            return Err(RoomError::NameTaken);
        }

        if let Some(player) = self.players.get_mut(client) {
            player.pseudo = Some(trimmed.to_string());
        }

        tracing::info!(%client, room = %room, pseudo = trimmed, "name claimed");

        self.broadcast_roster(hub, &room);
        Ok(trimmed.to_string())
    }

    /// `player:position` — stores a position (last-write-wins) and pushes
    /// the update to the whole room, sender included.
    ///
    /// Silently ignored when the caller has no record or the supplied
    /// room doesn't match the record's room: stale messages racing a room
    /// change must not leak across rooms, and the sender gets no error.
    pub fn report_position(
        &mut self,
        hub: &mut impl Channels,
        client: ClientId,
        room_id: &RoomId,
        pseudo: &str,
        position: Position,
        timestamp: u64,
    ) {
        let Some(player) = self.players.get_mut(client) else {
            return;
        };
        if player.room != *room_id {
            return;
        }

        player.position = Some(position);
        player.last_position_update = Some(timestamp);

        hub.send_to(
            room_id.as_str(),
            ServerEvent::PositionUpdate {
                client_id: client,
                pseudo: pseudo.to_string(),
                position,
                timestamp,
            },
        );
    }

    /// `game:launch` — role-gated start. Re-partitions obstacles for the
    /// room, then signals `game:started` to every member.
    pub fn launch_game(
        &mut self,
        hub: &mut impl Channels,
        client: ClientId,
    ) -> Result<(), RoomError> {
        let player = self.players.get(client).ok_or(RoomError::NoPlayer)?;
        if player.role == Role::Guide {
            return Err(RoomError::NotAuthorized);
        }
        let room = player.room.clone();

        self.repartition(hub, &room);
        hub.send_to(room.as_str(), ServerEvent::GameStarted);

        tracing::info!(%client, room = %room, "game launched");
        Ok(())
    }

    /// `joinAsGuide` — records the caller in the connected-guide
    /// directory and pushes the updated listing to every connection.
    pub fn join_as_guide(
        &mut self,
        hub: &mut impl Channels,
        client: ClientId,
        name: &str,
    ) {
        self.guides.announce(client, name);
        tracing::info!(%client, guide = name, "guide announced");
        hub.send_to_all(ServerEvent::GuidesUpdate(self.guides.names()));
    }

    /// Substrate-triggered cleanup when a connection drops.
    ///
    /// Removes the player record (if any), refreshes the room's roster,
    /// tears the room down when it became empty, and re-partitions
    /// obstacles when it didn't. Also drops the connection from the
    /// guide directory. Cannot fail; with no record and no directory
    /// entry it is a no-op.
    pub fn disconnect(&mut self, hub: &mut impl Channels, client: ClientId) {
        if let Some(player) = self.players.remove(client) {
            let room = player.room;
            hub.leave(client, room.as_str());

            let remaining = self.players.list_by_room(&room).len();
            self.broadcast_roster(hub, &room);

            if remaining == 0 {
                self.rooms.remove(&room);
                tracing::info!(%room, "room removed (empty)");
            } else {
                self.repartition(hub, &room);
            }
        }

        if let Some(name) = self.guides.remove(client) {
            tracing::info!(%client, guide = %name, "guide disconnected");
            hub.send_to_all(ServerEvent::GuidesUpdate(self.guides.names()));
        }
    }

    // -----------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------

    /// Returns `true` if the PIN is currently joinable.
    pub fn room_exists(&self, pin: &RoomId) -> bool {
        self.rooms.exists(pin)
    }

    /// Looks up a player record.
    pub fn player(&self, id: ClientId) -> Option<&Player> {
        self.players.get(id)
    }

    /// The current roster of one room, in join order.
    pub fn roster(&self, room: &RoomId) -> Vec<PlayerView> {
        self.players.roster(room)
    }

    /// The announced guide names, in announcement order.
    pub fn guide_names(&self) -> Vec<String> {
        self.guides.names()
    }

    // -----------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------

    fn broadcast_roster(&self, hub: &mut impl Channels, room: &RoomId) {
        hub.send_to(
            room.as_str(),
            ServerEvent::RoomPlayers(self.players.roster(room)),
        );
    }

    /// Recomputes the obstacle partition for a room and notifies each
    /// guide individually with its slice. No-op when the room has no
    /// guide. Always a fresh shuffle — prior assignments are discarded.
    fn repartition(&mut self, hub: &mut impl Channels, room: &RoomId) {
        let guides = self.players.guides_in(room);
        if guides.is_empty() {
            return;
        }

        let slices =
            partition(&ObstacleKind::CATALOG, guides.len(), &mut self.rng);

        for (guide, slice) in guides.into_iter().zip(slices) {
            if let Some(player) = self.players.get_mut(guide) {
                player.obstacles = Some(slice.clone());
            }
            hub.send_to_one(
                guide,
                ServerEvent::ObstaclesAssigned {
                    count: slice.len(),
                    obstacles: slice,
                },
            );
        }

        tracing::debug!(%room, "obstacles re-partitioned");
    }
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new()
    }
}
