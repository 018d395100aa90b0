//! Webhook payload decoding.
//!
//! LINE delivers a JSON envelope of events. Only follow, unfollow, and text
//! message events concern the relay; everything else (stickers, images,
//! joins, ...) is ignored with a debug line. Events that cannot be attributed
//! to a user are dropped with a warning rather than failing the delivery.

use {
    courier_common::Event,
    serde::Deserialize,
    tracing::{debug, warn},
};

#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "replyToken")]
    pub reply_token: Option<String>,
    pub source: Option<EventSource>,
    pub message: Option<MessageContent>,
}

#[derive(Debug, Deserialize)]
pub struct EventSource {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MessageContent {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: Option<String>,
}

/// Decode a webhook envelope into router events, dropping whatever does not
/// concern the relay.
#[must_use]
pub fn decode_events(payload: WebhookPayload) -> Vec<Event> {
    payload
        .events
        .into_iter()
        .filter_map(decode_event)
        .collect()
}

fn decode_event(event: WebhookEvent) -> Option<Event> {
    let user_id = match event.source.and_then(|s| s.user_id) {
        Some(id) if !id.trim().is_empty() => id,
        _ => {
            warn!(kind = %event.kind, "dropping webhook event without a user id");
            return None;
        },
    };

    match event.kind.as_str() {
        "follow" => {
            let reply_token = event.reply_token?;
            Some(Event::Follow {
                user_id,
                reply_token,
            })
        },
        "unfollow" => Some(Event::Unfollow { user_id }),
        "message" => {
            let message = event.message?;
            if message.kind != "text" {
                debug!(message_kind = %message.kind, "ignoring non-text message");
                return None;
            }
            Some(Event::Text {
                user_id,
                reply_token: event.reply_token?,
                text: message.text.unwrap_or_default(),
            })
        },
        other => {
            debug!(kind = other, "ignoring webhook event kind");
            None
        },
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn decode(raw: &str) -> Vec<Event> {
        decode_events(serde_json::from_str(raw).unwrap())
    }

    #[test]
    fn decodes_follow_unfollow_and_text() {
        let events = decode(
            r#"{
                "destination": "Ubot",
                "events": [
                    {"type": "follow", "replyToken": "rt-1",
                     "source": {"type": "user", "userId": "U1"}},
                    {"type": "unfollow",
                     "source": {"type": "user", "userId": "U2"}},
                    {"type": "message", "replyToken": "rt-2",
                     "source": {"type": "user", "userId": "U3"},
                     "message": {"id": "m1", "type": "text", "text": "hello"}}
                ]
            }"#,
        );

        assert_eq!(
            events,
            vec![
                Event::Follow {
                    user_id: "U1".into(),
                    reply_token: "rt-1".into(),
                },
                Event::Unfollow {
                    user_id: "U2".into(),
                },
                Event::Text {
                    user_id: "U3".into(),
                    reply_token: "rt-2".into(),
                    text: "hello".into(),
                },
            ]
        );
    }

    #[test]
    fn drops_events_without_user_id() {
        let events = decode(
            r#"{"events": [
                {"type": "follow", "replyToken": "rt-1", "source": {"type": "group"}},
                {"type": "unfollow"}
            ]}"#,
        );
        assert!(events.is_empty());
    }

    #[test]
    fn ignores_non_text_messages_and_unknown_kinds() {
        let events = decode(
            r#"{"events": [
                {"type": "message", "replyToken": "rt-1",
                 "source": {"userId": "U1"},
                 "message": {"id": "m1", "type": "sticker"}},
                {"type": "join", "source": {"userId": "U1"}}
            ]}"#,
        );
        assert!(events.is_empty());
    }

    #[test]
    fn empty_envelope_decodes_to_nothing() {
        assert!(decode(r#"{"events": []}"#).is_empty());
        assert!(decode("{}").is_empty());
    }
}
