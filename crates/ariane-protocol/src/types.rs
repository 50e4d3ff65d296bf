//! Core protocol types for Ariane's wire format.
//!
//! Everything here either travels on the wire (room PINs, roles, player
//! views) or identifies a participant (connection identity). The event
//! enums that carry these types live in [`crate::events`].

use serde::{Deserialize, Serialize};

use std::fmt;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// The identity the channel substrate assigns to a live connection.
///
/// One player record exists per `ClientId`; a player is not addressable
/// once its connection drops. Serialized as a plain number thanks to
/// `#[serde(transparent)]`, so `ClientId(42)` is just `42` in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(pub u64);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// A room PIN: six uppercase hexadecimal characters, e.g. `"AB12CD"`.
///
/// The PIN doubles as the room identifier and the channel name every
/// member of the room is subscribed to. Generation (and the collision
/// retry policy) lives in the room core; this type only carries the value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl RoomId {
    /// Returns the PIN as a string slice (also the channel name).
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// A player's role inside a room.
///
/// Exactly one `unity` per room (the creator); zero or more `guide`s
/// (joiners). Only the `unity` role may launch the game; only `guide`s
/// receive obstacle assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Unity,
    Guide,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unity => write!(f, "unity"),
            Self::Guide => write!(f, "guide"),
        }
    }
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A 2D position reported by a client. Stored last-write-wins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

// ---------------------------------------------------------------------------
// Obstacle catalog
// ---------------------------------------------------------------------------

/// One kind of puzzle obstacle.
///
/// The catalog is a fixed, ordered set — immutable at runtime. Obstacles
/// are not owned by any player; the partitioner divides the catalog across
/// the guides of a room and the slices land on [`PlayerView::obstacles`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleKind {
    Laser,
    Porte,
    Pont,
    Plateforme,
    Ventilateur,
    Ascenseur,
    Herse,
}

impl ObstacleKind {
    /// The full catalog, in its fixed order.
    pub const CATALOG: [ObstacleKind; 7] = [
        Self::Laser,
        Self::Porte,
        Self::Pont,
        Self::Plateforme,
        Self::Ventilateur,
        Self::Ascenseur,
        Self::Herse,
    ];
}

impl fmt::Display for ObstacleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Laser => "laser",
            Self::Porte => "porte",
            Self::Pont => "pont",
            Self::Plateforme => "plateforme",
            Self::Ventilateur => "ventilateur",
            Self::Ascenseur => "ascenseur",
            Self::Herse => "herse",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// PlayerView
// ---------------------------------------------------------------------------

/// One entry of a room roster as pushed to clients (`room:players`).
///
/// This is the wire view of a player record: the core owns the mutable
/// state, this is the snapshot it publishes. `pseudo` always carries the
/// effective display name — the placeholder `"Anonyme"` until the player
/// claims one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub client_id: ClientId,
    pub pseudo: String,
    pub role: Role,
    pub room_id: RoomId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_position_update: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obstacles: Option<Vec<ObstacleKind>>,
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! The wire shapes here are load-bearing: clients match on exact field
    //! names and enum spellings, so a serde-attribute mismatch breaks them.

    use super::*;

    #[test]
    fn test_client_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&ClientId(42)).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn test_client_id_display() {
        assert_eq!(ClientId(7).to_string(), "conn-7");
    }

    #[test]
    fn test_room_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&RoomId("AB12CD".into())).unwrap();
        assert_eq!(json, "\"AB12CD\"");
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Unity).unwrap(), "\"unity\"");
        assert_eq!(serde_json::to_string(&Role::Guide).unwrap(), "\"guide\"");
    }

    #[test]
    fn test_obstacle_kind_serializes_lowercase() {
        let json = serde_json::to_string(&ObstacleKind::Ventilateur).unwrap();
        assert_eq!(json, "\"ventilateur\"");
    }

    #[test]
    fn test_catalog_has_seven_distinct_entries() {
        let mut seen = std::collections::HashSet::new();
        for kind in ObstacleKind::CATALOG {
            assert!(seen.insert(kind), "{kind} appears twice in the catalog");
        }
        assert_eq!(seen.len(), 7);
    }

    #[test]
    fn test_player_view_uses_camel_case_fields() {
        let view = PlayerView {
            client_id: ClientId(1),
            pseudo: "Anonyme".into(),
            role: Role::Guide,
            room_id: RoomId("AB12CD".into()),
            position: None,
            last_position_update: None,
            obstacles: None,
        };
        let json: serde_json::Value = serde_json::to_value(&view).unwrap();

        assert_eq!(json["clientId"], 1);
        assert_eq!(json["pseudo"], "Anonyme");
        assert_eq!(json["role"], "guide");
        assert_eq!(json["roomId"], "AB12CD");
        // Absent optionals are omitted entirely, not serialized as null.
        assert!(json.get("position").is_none());
        assert!(json.get("lastPositionUpdate").is_none());
        assert!(json.get("obstacles").is_none());
    }

    #[test]
    fn test_player_view_round_trip_with_position_and_obstacles() {
        let view = PlayerView {
            client_id: ClientId(3),
            pseudo: "Alex".into(),
            role: Role::Guide,
            room_id: RoomId("FF00AA".into()),
            position: Some(Position { x: 1.5, y: -2.0 }),
            last_position_update: Some(1_720_000_000_000),
            obstacles: Some(vec![ObstacleKind::Laser, ObstacleKind::Herse]),
        };
        let bytes = serde_json::to_vec(&view).unwrap();
        let decoded: PlayerView = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(view, decoded);
    }
}
