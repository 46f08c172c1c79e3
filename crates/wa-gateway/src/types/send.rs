//! Types for sending messages via the bridge.

use serde::{Deserialize, Serialize};

/// Body of a text send request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendTextParams {
    /// Destination chat id.
    pub chat_id: String,
    /// The message text.
    pub text: String,
}

impl SendTextParams {
    /// Create params for a text message.
    pub fn new(chat_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            text: text.into(),
        }
    }
}

/// Body of a media send request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMediaParams {
    /// Destination chat id.
    pub chat_id: String,
    /// MIME type of the payload.
    pub mimetype: String,
    /// File name shown to the recipient.
    pub filename: String,
    /// Base64-encoded file contents.
    pub data: String,
    /// Optional caption.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl SendMediaParams {
    /// Attach a caption.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

/// Result of a send operation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendResult {
    /// Id of the sent message, if the bridge reports one.
    #[serde(default)]
    pub id: Option<String>,
    /// Unix timestamp of the sent message.
    #[serde(default)]
    pub timestamp: Option<u64>,
}

/// Chat metadata.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatInfo {
    /// Chat id.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Whether this is a group chat.
    #[serde(default)]
    pub is_group: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_text_serialization() {
        let params = SendTextParams::new("111@c.us", "Hello");
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["chatId"], "111@c.us");
        assert_eq!(json["text"], "Hello");
    }

    #[test]
    fn test_media_caption_omitted() {
        let params = SendMediaParams {
            chat_id: "111@c.us".to_string(),
            mimetype: "image/jpeg".to_string(),
            filename: "1.jpg".to_string(),
            data: "AAAA".to_string(),
            caption: None,
        };
        let json = serde_json::to_value(&params).unwrap();
        assert!(json.get("caption").is_none());

        let json = serde_json::to_value(params.with_caption("Pool villa")).unwrap();
        assert_eq!(json["caption"], "Pool villa");
    }

    #[test]
    fn test_send_result_empty_body() {
        let result: SendResult = serde_json::from_str("{}").unwrap();
        assert!(result.id.is_none());
    }
}
