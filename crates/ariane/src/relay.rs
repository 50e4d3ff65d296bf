//! Blind signaling relay.
//!
//! Offers, answers, candidates, audio, and chat are forwarded without
//! validation — the payload is opaque [`serde_json::Value`]. Chat goes to
//! everyone including the sender; everything else goes to everyone except
//! the sender, or to exactly one connection when the payload names a
//! target in a numeric `"to"` field.

use ariane_hub::Channels;
use ariane_protocol::{ClientEvent, ClientId, ServerEvent};
use serde_json::Value;

/// Forwards one signaling event. Infallible by design: an unknown target
/// simply delivers to nobody.
pub(crate) fn forward(
    hub: &mut impl Channels,
    sender: ClientId,
    event: ClientEvent,
) {
    match event {
        ClientEvent::Message(payload) => {
            hub.send_to_all(ServerEvent::Message(payload));
        }
        ClientEvent::WebrtcOffer(payload) => {
            route(hub, sender, payload, ServerEvent::WebrtcOffer);
        }
        ClientEvent::WebrtcAnswer(payload) => {
            route(hub, sender, payload, ServerEvent::WebrtcAnswer);
        }
        ClientEvent::WebrtcCandidate(payload) => {
            route(hub, sender, payload, ServerEvent::WebrtcCandidate);
        }
        ClientEvent::AudioMessage(payload) => {
            route(hub, sender, payload, ServerEvent::AudioMessage);
        }
        ClientEvent::AudioChunk(payload) => {
            route(hub, sender, payload, ServerEvent::AudioChunk);
        }
        other => {
            tracing::debug!(?other, "non-relay event reached the relay");
        }
    }
}

fn route(
    hub: &mut impl Channels,
    sender: ClientId,
    payload: Value,
    wrap: fn(Value) -> ServerEvent,
) {
    match payload.get("to").and_then(Value::as_u64) {
        Some(target) => {
            hub.send_to_one(ClientId(target), wrap(payload));
        }
        None => {
            hub.send_to_all_except(sender, wrap(payload));
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ariane_hub::{ChannelHub, EventReceiver};
    use serde_json::json;

    fn drain(rx: &mut EventReceiver) -> Vec<ServerEvent> {
        let mut out = Vec::new();
        while let Ok(event) = rx.try_recv() {
            out.push(event);
        }
        out
    }

    #[test]
    fn test_chat_reaches_everyone_including_sender() {
        let mut hub = ChannelHub::new();
        let (a, mut rx_a) = hub.register();
        let (_b, mut rx_b) = hub.register();

        forward(&mut hub, a, ClientEvent::Message(json!("salut")));

        assert_eq!(drain(&mut rx_a), vec![ServerEvent::Message(json!("salut"))]);
        assert_eq!(drain(&mut rx_b).len(), 1);
    }

    #[test]
    fn test_webrtc_offer_skips_the_sender() {
        let mut hub = ChannelHub::new();
        let (a, mut rx_a) = hub.register();
        let (_b, mut rx_b) = hub.register();
        let (_c, mut rx_c) = hub.register();

        let offer = json!({"type": "offer", "sdp": "v=0"});
        forward(&mut hub, a, ClientEvent::WebrtcOffer(offer.clone()));

        assert!(drain(&mut rx_a).is_empty());
        assert_eq!(drain(&mut rx_b), vec![ServerEvent::WebrtcOffer(offer.clone())]);
        assert_eq!(drain(&mut rx_c), vec![ServerEvent::WebrtcOffer(offer)]);
    }

    #[test]
    fn test_targeted_payload_reaches_only_the_named_connection() {
        let mut hub = ChannelHub::new();
        let (a, mut rx_a) = hub.register();
        let (b, mut rx_b) = hub.register();
        let (_c, mut rx_c) = hub.register();

        let answer = json!({"to": b.0, "sdp": "v=0"});
        forward(&mut hub, a, ClientEvent::WebrtcAnswer(answer.clone()));

        assert!(drain(&mut rx_a).is_empty());
        assert_eq!(drain(&mut rx_b), vec![ServerEvent::WebrtcAnswer(answer)]);
        assert!(drain(&mut rx_c).is_empty());
    }

    #[test]
    fn test_payload_is_forwarded_verbatim() {
        let mut hub = ChannelHub::new();
        let (a, _rx_a) = hub.register();
        let (_b, mut rx_b) = hub.register();

        // Nested structure, unknown keys, mixed types: none of it is ours
        // to touch.
        let chunk = json!({
            "seq": 17,
            "data": [1, 2, 3],
            "meta": {"codec": "opus", "final": false}
        });
        forward(&mut hub, a, ClientEvent::AudioChunk(chunk.clone()));

        assert_eq!(drain(&mut rx_b), vec![ServerEvent::AudioChunk(chunk)]);
    }

    #[test]
    fn test_unknown_target_delivers_to_nobody() {
        let mut hub = ChannelHub::new();
        let (a, mut rx_a) = hub.register();
        let (_b, mut rx_b) = hub.register();

        let candidate = json!({"to": 999, "candidate": "..."});
        forward(&mut hub, a, ClientEvent::WebrtcCandidate(candidate));

        assert!(drain(&mut rx_a).is_empty());
        assert!(drain(&mut rx_b).is_empty());
    }
}
