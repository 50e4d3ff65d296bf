//! Error taxonomy for room operations.
//!
//! Every variant's `Display` string is the exact message clients receive
//! in `{ok: false, error}` replies — the UI matches on these, so they are
//! part of the wire contract, French included.

/// Errors surfaced by coordinator operations.
///
/// None of these is fatal: each is reported to the calling connection and
/// forgotten. The server never retries on the client's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RoomError {
    /// The PIN is not present in the room registry.
    #[error("PIN invalide")]
    InvalidRoom,

    /// The requested display name is empty after trimming.
    #[error("Pseudo requis")]
    EmptyName,

    /// Another player in the room already holds this display name
    /// (case-insensitive).
    #[error("Pseudo déjà pris")]
    NameTaken,

    /// The caller must create or join a room before claiming a name.
    #[error("Room non trouvée pour ce joueur")]
    NoRoom,

    /// The caller has no player record.
    #[error("Joueur non trouvé")]
    NoPlayer,

    /// The caller's role is not allowed to perform this operation.
    #[error("Seul le joueur Unity peut lancer la partie")]
    NotAuthorized,

    /// PIN generation collided on every attempt. With a 16.7M PIN space
    /// this only happens when the registry is pathologically full.
    #[error("Impossible de générer un PIN unique")]
    PinSpaceExhausted,
}
