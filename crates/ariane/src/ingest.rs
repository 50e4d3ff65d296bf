//! HTTP ingestion of externally-produced events.
//!
//! Two fire-and-forget endpoints accept events from outside the WebSocket
//! world (the game engine posts here) and re-broadcast them to every
//! connection with a server timestamp:
//!
//! - `POST /victory` — no required body → `game:victory`
//! - `POST /timer`   — `{timeLeft, minutes, seconds, isRunning}` →
//!   `timer:update`
//!
//! Both reply `{"success": true}` synchronously. When a shared secret is
//! configured, requests must carry it in the `x-ariane-secret` header —
//! the one authentication check this server performs.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use ariane_hub::Channels;
use ariane_protocol::ServerEvent;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, header};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::sync::Mutex;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;
use crate::server::{Core, SharedState};

/// Header carrying the shared ingestion secret.
pub const SECRET_HEADER: &str = "x-ariane-secret";

#[derive(Clone)]
struct IngestState {
    core: Arc<Mutex<Core>>,
    secret: Option<String>,
}

/// Builds the ingestion router against the server's shared state.
pub fn router(state: SharedState, config: &Config) -> Router {
    let origin = match config.client_url.parse::<HeaderValue>() {
        Ok(value) => AllowOrigin::exact(value),
        Err(_) => AllowOrigin::from(Any),
    };
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(SECRET_HEADER),
        ])
        .allow_origin(origin);

    Router::new()
        .route("/victory", post(victory))
        .route("/timer", post(timer))
        .layer(cors)
        .with_state(IngestState {
            core: state.core,
            secret: config.ingest_secret.clone(),
        })
}

/// Milliseconds since the Unix epoch, for broadcast timestamps.
fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

fn authorized(secret: &Option<String>, headers: &HeaderMap) -> bool {
    match secret {
        None => true,
        Some(expected) => headers
            .get(SECRET_HEADER)
            .and_then(|value| value.to_str().ok())
            == Some(expected.as_str()),
    }
}

fn rejected() -> (StatusCode, Json<Value>) {
    (StatusCode::UNAUTHORIZED, Json(json!({ "success": false })))
}

async fn victory(
    State(state): State<IngestState>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    if !authorized(&state.secret, &headers) {
        return rejected();
    }

    tracing::info!("victory signal received");
    let mut core = state.core.lock().await;
    core.hub.send_to_all(ServerEvent::GameVictory {
        message: "Vous avez gagné!".to_string(),
        timestamp: now_millis(),
    });

    (
        StatusCode::OK,
        Json(json!({ "success": true, "message": "Message de victoire diffusé" })),
    )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimerBody {
    time_left: f64,
    minutes: u32,
    seconds: u32,
    is_running: bool,
}

async fn timer(
    State(state): State<IngestState>,
    headers: HeaderMap,
    Json(body): Json<TimerBody>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&state.secret, &headers) {
        return rejected();
    }

    let mut core = state.core.lock().await;
    core.hub.send_to_all(ServerEvent::TimerUpdate {
        time_left: body.time_left,
        minutes: body.minutes,
        seconds: body.seconds,
        is_running: body.is_running,
        timestamp: now_millis(),
    });

    (
        StatusCode::OK,
        Json(json!({ "success": true, "message": "Timer diffusé" })),
    )
}

// =========================================================================
// Tests
// =========================================================================
