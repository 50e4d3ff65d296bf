//! The named events that travel between clients and the server.
//!
//! Both enums are adjacently tagged: `#[serde(tag = "event", content =
//! "data")]` produces frames like
//! `{ "event": "room:join", "data": { "roomId": "AB12CD" } }`, which is the
//! shape browser clients already speak. Variants without a payload omit
//! `data` entirely (and tolerate an explicit `null`).
//!
//! Signaling payloads (`message`, `webrtc-*`, `audioMessage`, `audioChunk`)
//! are carried as raw [`serde_json::Value`] — the server forwards them
//! verbatim and never looks inside.

use serde::{Deserialize, Serialize};

use crate::types::{
    ClientId, ObstacleKind, PlayerView, Position, RoomId,
};

// ---------------------------------------------------------------------------
// Client → server
// ---------------------------------------------------------------------------

/// Every event a client may send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    /// Create a room and become its `unity` player.
    #[serde(rename = "room:create")]
    RoomCreate,

    /// Join an existing room as a `guide`.
    #[serde(rename = "room:join", rename_all = "camelCase")]
    RoomJoin { room_id: RoomId },

    /// Claim a display name. The payload is the bare name string.
    #[serde(rename = "player:create")]
    PlayerCreate(String),

    /// Report a live position.
    #[serde(rename = "player:position", rename_all = "camelCase")]
    PlayerPosition {
        room_id: RoomId,
        pseudo: String,
        position: Position,
        timestamp: u64,
    },

    /// Launch the game (role-gated: `unity` only).
    #[serde(rename = "game:launch")]
    GameLaunch,

    /// Announce this connection in the voice/chat guide directory.
    /// Unrelated to room membership.
    #[serde(rename = "joinAsGuide")]
    JoinAsGuide(String),

    /// Chat payload, relayed to every connection including the sender.
    #[serde(rename = "message")]
    Message(serde_json::Value),

    #[serde(rename = "webrtc-offer")]
    WebrtcOffer(serde_json::Value),

    #[serde(rename = "webrtc-answer")]
    WebrtcAnswer(serde_json::Value),

    #[serde(rename = "webrtc-candidate")]
    WebrtcCandidate(serde_json::Value),

    #[serde(rename = "audioMessage")]
    AudioMessage(serde_json::Value),

    #[serde(rename = "audioChunk")]
    AudioChunk(serde_json::Value),
}

// ---------------------------------------------------------------------------
// Server → client
// ---------------------------------------------------------------------------

/// Every event the server may push.
///
/// Each request that expects an answer gets a matching `<op>:response`
/// event carrying `{ok, ...}` on success or `{ok: false, error}` on
/// failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    /// Full roster of one room, pushed to the whole room on every change.
    #[serde(rename = "room:players")]
    RoomPlayers(Vec<PlayerView>),

    /// One player moved; pushed to the whole room including the sender.
    #[serde(rename = "player:position:update", rename_all = "camelCase")]
    PositionUpdate {
        client_id: ClientId,
        pseudo: String,
        position: Position,
        timestamp: u64,
    },

    /// A guide's slice of the obstacle catalog. Sent individually to that
    /// guide, never broadcast to the room.
    #[serde(rename = "obstacles:assigned")]
    ObstaclesAssigned {
        obstacles: Vec<ObstacleKind>,
        count: usize,
    },

    /// The game has started.
    #[serde(rename = "game:started")]
    GameStarted,

    /// Names of every announced voice/chat guide, pushed to everyone.
    #[serde(rename = "guidesUpdate")]
    GuidesUpdate(Vec<String>),

    /// Victory signal injected over HTTP, re-broadcast to everyone.
    #[serde(rename = "game:victory")]
    GameVictory { message: String, timestamp: u64 },

    /// Timer tick injected over HTTP, re-broadcast to everyone.
    #[serde(rename = "timer:update", rename_all = "camelCase")]
    TimerUpdate {
        time_left: f64,
        minutes: u32,
        seconds: u32,
        is_running: bool,
        timestamp: u64,
    },

    #[serde(rename = "room:create:response")]
    RoomCreateResponse(RoomCreateReply),

    #[serde(rename = "room:join:response")]
    RoomJoinResponse(RoomJoinReply),

    #[serde(rename = "player:create:response")]
    PlayerCreateResponse(PlayerCreateReply),

    #[serde(rename = "game:launch:response")]
    GameLaunchResponse(GameLaunchReply),

    /// Relayed chat payload, verbatim.
    #[serde(rename = "message")]
    Message(serde_json::Value),

    #[serde(rename = "webrtc-offer")]
    WebrtcOffer(serde_json::Value),

    #[serde(rename = "webrtc-answer")]
    WebrtcAnswer(serde_json::Value),

    #[serde(rename = "webrtc-candidate")]
    WebrtcCandidate(serde_json::Value),

    #[serde(rename = "audioMessage")]
    AudioMessage(serde_json::Value),

    #[serde(rename = "audioChunk")]
    AudioChunk(serde_json::Value),
}

// ---------------------------------------------------------------------------
// Operation replies
// ---------------------------------------------------------------------------

/// Reply to `room:create`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomCreateReply {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<RoomId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RoomCreateReply {
    pub fn ok(room_id: RoomId) -> Self {
        Self { ok: true, room_id: Some(room_id), error: None }
    }

    pub fn err(error: impl Into<String>) -> Self {
        Self { ok: false, room_id: None, error: Some(error.into()) }
    }
}

/// Reply to `room:join`. Carries the current roster on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomJoinReply {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub players: Option<Vec<PlayerView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RoomJoinReply {
    pub fn ok(players: Vec<PlayerView>) -> Self {
        Self { ok: true, players: Some(players), error: None }
    }

    pub fn err(error: impl Into<String>) -> Self {
        Self { ok: false, players: None, error: Some(error.into()) }
    }
}

/// Reply to `player:create`. Echoes the claimed name on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerCreateReply {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pseudo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PlayerCreateReply {
    pub fn ok(pseudo: impl Into<String>) -> Self {
        Self { ok: true, pseudo: Some(pseudo.into()), error: None }
    }

    pub fn err(error: impl Into<String>) -> Self {
        Self { ok: false, pseudo: None, error: Some(error.into()) }
    }
}

/// Reply to `game:launch`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameLaunchReply {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GameLaunchReply {
    pub fn ok() -> Self {
        Self { ok: true, error: None }
    }

    pub fn err(error: impl Into<String>) -> Self {
        Self { ok: false, error: Some(error.into()) }
    }
}

// =========================================================================
// Tests
// =========================================================================
