//! Inbound session events.

use serde::{Deserialize, Serialize};

/// Pseudo-chat that carries status updates.
pub const STATUS_BROADCAST: &str = "status@broadcast";

/// An event pushed by the bridge over SSE.
#[derive(Debug, Clone)]
pub enum GatewayEvent {
    /// The session is authenticated and able to send.
    Ready,
    /// A chat message was observed.
    Message(WaMessage),
}

/// A chat message as reported by the bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaMessage {
    /// Serialized message id.
    #[serde(default)]
    pub id: Option<String>,

    /// Chat id of the sender (e.g., "919876543210@c.us").
    pub from: String,

    /// Text body (caption for media messages).
    #[serde(default)]
    pub body: String,

    /// Unix timestamp in seconds.
    #[serde(default)]
    pub timestamp: u64,

    /// Whether the message carries media.
    #[serde(default)]
    pub has_media: bool,

    /// Message type, e.g. "chat" or "image".
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    /// Whether the message was sent by this session.
    #[serde(default)]
    pub from_me: bool,
}

impl WaMessage {
    /// Whether this is a status update rather than a chat message.
    pub fn is_status_broadcast(&self) -> bool {
        self.from == STATUS_BROADCAST
    }

    /// Whether this message came from the bot itself.
    pub fn is_own(&self, bot_id: Option<&str>) -> bool {
        self.from_me || bot_id.map_or(false, |id| id == self.from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_message_event() {
        let json = r#"{
            "id": "false_919876543210@c.us_3EB0",
            "from": "919876543210@c.us",
            "body": "Hi",
            "timestamp": 1718000000,
            "hasMedia": false,
            "type": "chat",
            "fromMe": false
        }"#;

        let msg: WaMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.from, "919876543210@c.us");
        assert_eq!(msg.body, "Hi");
        assert_eq!(msg.kind.as_deref(), Some("chat"));
        assert!(!msg.is_status_broadcast());
        assert!(!msg.is_own(None));
    }

    #[test]
    fn test_minimal_message() {
        let msg: WaMessage = serde_json::from_str(r#"{"from": "status@broadcast"}"#).unwrap();
        assert!(msg.is_status_broadcast());
        assert_eq!(msg.body, "");
        assert_eq!(msg.timestamp, 0);
    }

    #[test]
    fn test_is_own() {
        let mut msg: WaMessage = serde_json::from_str(r#"{"from": "111@c.us"}"#).unwrap();
        assert!(msg.is_own(Some("111@c.us")));
        assert!(!msg.is_own(Some("222@c.us")));

        msg.from_me = true;
        assert!(msg.is_own(None));
    }
}
