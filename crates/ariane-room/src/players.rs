//! Player records and the registry that maps connection identity to them.

use std::collections::HashMap;

use ariane_protocol::{
    ClientId, ObstacleKind, PlayerView, Position, Role, RoomId,
};

/// A player's mutable server-side record.
///
/// One record per live connection; created on `room:create`/`room:join`
/// and destroyed on disconnect. The record never changes room — a player
/// re-enters a room only by reconnecting.
///
/// `pseudo` doubles as the connection's name state: `None` means the
/// player has joined but not yet claimed a name (the wire shows the
/// placeholder), `Some` means the name was claimed. "Unjoined" is simply
/// the absence of a record in the registry.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: ClientId,
    pub pseudo: Option<String>,
    pub role: Role,
    pub room: RoomId,
    pub position: Option<Position>,
    pub last_position_update: Option<u64>,
    pub obstacles: Option<Vec<ObstacleKind>>,
}

impl Player {
    /// The display name shown until a player claims one.
    pub const PLACEHOLDER_NAME: &'static str = "Anonyme";

    /// Creates a fresh record: placeholder name, no position, no
    /// obstacle assignment.
    pub fn new(id: ClientId, role: Role, room: RoomId) -> Self {
        Self {
            id,
            pseudo: None,
            role,
            room,
            position: None,
            last_position_update: None,
            obstacles: None,
        }
    }

    /// The name this player currently presents, placeholder included.
    /// Uniqueness checks run against this value.
    pub fn effective_name(&self) -> &str {
        self.pseudo.as_deref().unwrap_or(Self::PLACEHOLDER_NAME)
    }

    /// The wire snapshot of this record.
    pub fn view(&self) -> PlayerView {
        PlayerView {
            client_id: self.id,
            pseudo: self.effective_name().to_string(),
            role: self.role,
            room_id: self.room.clone(),
            position: self.position,
            last_position_update: self.last_position_update,
            obstacles: self.obstacles.clone(),
        }
    }
}

/// Maps connection identity to player records, preserving insertion order.
///
/// Nearly every coordinator operation reads [`list_by_room`] to compute
/// the current view of a room, so it must reflect the latest mutation
/// synchronously — plain single-threaded maps, no eventual consistency.
///
/// [`list_by_room`]: PlayerRegistry::list_by_room
pub struct PlayerRegistry {
    players: HashMap<ClientId, Player>,
    /// Join order across all rooms; filtered per room on read.
    order: Vec<ClientId>,
}

impl PlayerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            players: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Inserts or replaces a record.
    pub fn put(&mut self, player: Player) {
        if !self.players.contains_key(&player.id) {
            self.order.push(player.id);
        }
        self.players.insert(player.id, player);
    }

    /// Looks up a record by connection identity.
    pub fn get(&self, id: ClientId) -> Option<&Player> {
        self.players.get(&id)
    }

    /// Mutable lookup by connection identity.
    pub fn get_mut(&mut self, id: ClientId) -> Option<&mut Player> {
        self.players.get_mut(&id)
    }

    /// Removes and returns a record.
    pub fn remove(&mut self, id: ClientId) -> Option<Player> {
        let removed = self.players.remove(&id);
        if removed.is_some() {
            self.order.retain(|o| *o != id);
        }
        removed
    }

    /// All records of one room, in join order.
    pub fn list_by_room(&self, room: &RoomId) -> Vec<&Player> {
        self.order
            .iter()
            .filter_map(|id| self.players.get(id))
            .filter(|p| p.room == *room)
            .collect()
    }

    /// The wire roster of one room, in join order.
    pub fn roster(&self, room: &RoomId) -> Vec<PlayerView> {
        self.list_by_room(room).into_iter().map(Player::view).collect()
    }

    /// The guides of one room, in join order.
    pub fn guides_in(&self, room: &RoomId) -> Vec<ClientId> {
        self.list_by_room(room)
            .into_iter()
            .filter(|p| p.role == Role::Guide)
            .map(|p| p.id)
            .collect()
    }

    /// Returns the number of live records.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Returns `true` if no record exists.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

impl Default for PlayerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn room(pin: &str) -> RoomId {
        RoomId(pin.into())
    }

    fn guide(id: u64, pin: &str) -> Player {
        Player::new(ClientId(id), Role::Guide, room(pin))
    }

    #[test]
    fn test_list_by_room_preserves_join_order() {
        let mut registry = PlayerRegistry::new();
        registry.put(Player::new(ClientId(1), Role::Unity, room("AB12CD")));
        registry.put(guide(2, "AB12CD"));
        registry.put(guide(3, "FF00AA")); // other room
        registry.put(guide(4, "AB12CD"));

        let ids: Vec<ClientId> = registry
            .list_by_room(&room("AB12CD"))
            .iter()
            .map(|p| p.id)
            .collect();

        assert_eq!(ids, vec![ClientId(1), ClientId(2), ClientId(4)]);
    }

    #[test]
    fn test_remove_updates_room_view_synchronously() {
        let mut registry = PlayerRegistry::new();
        registry.put(guide(1, "AB12CD"));
        registry.put(guide(2, "AB12CD"));

        registry.remove(ClientId(1));

        let ids: Vec<ClientId> = registry
            .list_by_room(&room("AB12CD"))
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![ClientId(2)]);
        assert!(registry.get(ClientId(1)).is_none());
    }

    #[test]
    fn test_put_replaces_without_duplicating_order() {
        let mut registry = PlayerRegistry::new();
        registry.put(guide(1, "AB12CD"));

        let mut renamed = guide(1, "AB12CD");
        renamed.pseudo = Some("Alex".into());
        registry.put(renamed);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.list_by_room(&room("AB12CD")).len(), 1);
        assert_eq!(registry.get(ClientId(1)).unwrap().effective_name(), "Alex");
    }

    #[test]
    fn test_effective_name_falls_back_to_placeholder() {
        let player = guide(1, "AB12CD");
        assert_eq!(player.effective_name(), "Anonyme");
        assert_eq!(player.view().pseudo, "Anonyme");
    }

    #[test]
    fn test_guides_in_excludes_unity() {
        let mut registry = PlayerRegistry::new();
        registry.put(Player::new(ClientId(1), Role::Unity, room("AB12CD")));
        registry.put(guide(2, "AB12CD"));
        registry.put(guide(3, "AB12CD"));

        assert_eq!(
            registry.guides_in(&room("AB12CD")),
            vec![ClientId(2), ClientId(3)]
        );
    }
}
