//! Per-connection handler: registration, dispatch, and cleanup.
//!
//! Each accepted connection gets its own task running this handler. The
//! flow is:
//!   1. Register with the hub → identity + outbound event receiver
//!   2. Spawn a writer task draining the receiver into the socket
//!   3. Loop: decode inbound frames → dispatch to the coordinator/relay
//!   4. On close: run disconnect cleanup, unregister (which ends the
//!      writer task by dropping its sender)

use ariane_hub::{Channels, WsStream};
use ariane_protocol::{
    ClientEvent, ClientId, Codec, GameLaunchReply, JsonCodec,
    PlayerCreateReply, RoomCreateReply, RoomJoinReply, ServerEvent,
};
use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::Message;

use crate::ServerError;
use crate::relay;
use crate::server::SharedState;

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection(
    ws: WsStream,
    state: SharedState,
) -> Result<(), ServerError> {
    let codec = JsonCodec;

    let (id, mut rx) = {
        let mut core = state.core.lock().await;
        core.hub.register()
    };
    tracing::info!(%id, "client connected");

    let (mut sink, mut stream) = ws.split();

    // Writer task: everything the hub fans out to this connection goes
    // through `rx`; encode and push it onto the socket. Ends when the
    // hub drops the sender (unregister) or the socket breaks.
    let writer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let bytes = match codec.encode(&event) {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to encode event");
                    continue;
                }
            };
            let Ok(text) = String::from_utf8(bytes) else {
                continue;
            };
            if sink.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    // Reader loop: frames in, operations out.
    while let Some(msg) = stream.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                dispatch(&state, id, text.as_bytes(), &codec).await;
            }
            Ok(Message::Binary(data)) => {
                dispatch(&state, id, &data, &codec).await;
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => continue, // ping/pong/frame
            Err(e) => {
                tracing::debug!(%id, error = %e, "recv error");
                break;
            }
        }
    }

    // Disconnect cleanup: delivered exactly once, whatever ended the loop.
    {
        let mut guard = state.core.lock().await;
        let core = &mut *guard;
        core.coordinator.disconnect(&mut core.hub, id);
        core.hub.unregister(id);
    }
    tracing::info!(%id, "client disconnected");

    let _ = writer.await;
    Ok(())
}

/// Decodes one inbound frame and routes it.
///
/// Undecodable frames are logged and dropped — a malformed client must
/// not take the connection down.
async fn dispatch(
    state: &SharedState,
    id: ClientId,
    data: &[u8],
    codec: &JsonCodec,
) {
    let event: ClientEvent = match codec.decode(data) {
        Ok(event) => event,
        Err(e) => {
            tracing::debug!(%id, error = %e, "undecodable frame, ignoring");
            return;
        }
    };

    let mut guard = state.core.lock().await;
    let core = &mut *guard;

    match event {
        ClientEvent::RoomCreate => {
            let reply = match core.coordinator.create_room(&mut core.hub, id)
            {
                Ok(pin) => RoomCreateReply::ok(pin),
                Err(e) => RoomCreateReply::err(e.to_string()),
            };
            core.hub
                .send_to_one(id, ServerEvent::RoomCreateResponse(reply));
        }

        ClientEvent::RoomJoin { room_id } => {
            let reply =
                match core.coordinator.join_room(&mut core.hub, id, &room_id)
                {
                    Ok(players) => RoomJoinReply::ok(players),
                    Err(e) => RoomJoinReply::err(e.to_string()),
                };
            core.hub
                .send_to_one(id, ServerEvent::RoomJoinResponse(reply));
        }

        ClientEvent::PlayerCreate(pseudo) => {
            let reply =
                match core.coordinator.claim_name(&mut core.hub, id, &pseudo)
                {
                    Ok(pseudo) => PlayerCreateReply::ok(pseudo),
                    Err(e) => PlayerCreateReply::err(e.to_string()),
                };
            core.hub
                .send_to_one(id, ServerEvent::PlayerCreateResponse(reply));
        }

        ClientEvent::PlayerPosition {
            room_id,
            pseudo,
            position,
            timestamp,
        } => {
            // No acknowledgment for position reports.
            core.coordinator.report_position(
                &mut core.hub,
                id,
                &room_id,
                &pseudo,
                position,
                timestamp,
            );
        }

        ClientEvent::GameLaunch => {
            let reply = match core.coordinator.launch_game(&mut core.hub, id)
            {
                Ok(()) => GameLaunchReply::ok(),
                Err(e) => GameLaunchReply::err(e.to_string()),
            };
            core.hub
                .send_to_one(id, ServerEvent::GameLaunchResponse(reply));
        }

        ClientEvent::JoinAsGuide(name) => {
            core.coordinator.join_as_guide(&mut core.hub, id, &name);
        }

        relayed @ (ClientEvent::Message(_)
        | ClientEvent::WebrtcOffer(_)
        | ClientEvent::WebrtcAnswer(_)
        | ClientEvent::WebrtcCandidate(_)
        | ClientEvent::AudioMessage(_)
        | ClientEvent::AudioChunk(_)) => {
            relay::forward(&mut core.hub, id, relayed);
        }
    }
}
