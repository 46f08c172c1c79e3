//! [`MessageSender`] over the WhatsApp bridge.

use std::path::Path;

use concierge_core::{async_trait, MessageSender, SendError};
use tracing::debug;
use wa_gateway::{GatewayError, WhatsAppClient};

/// Sends replies through a linked WhatsApp session.
#[derive(Clone)]
pub struct WhatsAppSender {
    client: WhatsAppClient,
}

impl WhatsAppSender {
    pub fn new(client: WhatsAppClient) -> Self {
        Self { client }
    }

    /// Get the underlying client.
    pub fn client(&self) -> &WhatsAppClient {
        &self.client
    }
}

#[async_trait]
impl MessageSender for WhatsAppSender {
    async fn send_text(&self, peer: &str, text: &str) -> Result<(), SendError> {
        let result = self
            .client
            .send_text(peer, text)
            .await
            .map_err(|e| SendError::Transport(e.to_string()))?;
        debug!("Sent text to {} (id={:?})", peer, result.id);
        Ok(())
    }

    async fn send_media(&self, peer: &str, path: &Path) -> Result<(), SendError> {
        let result = self
            .client
            .send_media(peer, path)
            .await
            .map_err(|e| SendError::Media(format!("{}: {}", path.display(), e)))?;
        debug!("Sent {} to {} (id={:?})", path.display(), peer, result.id);
        Ok(())
    }

    async fn get_chat(&self, peer: &str) -> Result<String, SendError> {
        match self.client.get_chat(peer).await {
            Ok(chat) => Ok(chat.id),
            Err(GatewayError::Api { status: 404, .. }) => {
                Err(SendError::UnknownChat(peer.to_string()))
            }
            Err(e) => Err(SendError::Transport(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wa_gateway::GatewayConfig;

    fn sender_for(server: &mockito::Server) -> WhatsAppSender {
        let config = GatewayConfig::new(server.url()).with_session("resort");
        WhatsAppSender::new(WhatsAppClient::new(config).unwrap())
    }

    #[tokio::test]
    async fn test_send_text_posts_to_session() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/sessions/resort/messages/text")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "true_1@c.us_ABC", "timestamp": 1718000000}"#)
            .create_async()
            .await;

        let sender = sender_for(&server);
        sender.send_text("1@c.us", "hello").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_text_failure_is_transport_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/sessions/resort/messages/text")
            .with_status(503)
            .with_body("session not ready")
            .create_async()
            .await;

        let sender = sender_for(&server);
        let err = sender.send_text("1@c.us", "hello").await.unwrap_err();
        assert!(matches!(err, SendError::Transport(_)));
    }

    #[tokio::test]
    async fn test_missing_media_file_is_media_error() {
        let server = mockito::Server::new_async().await;
        let sender = sender_for(&server);

        let err = sender
            .send_media("1@c.us", Path::new("/definitely/not/here.jpg"))
            .await
            .unwrap_err();
        assert!(matches!(err, SendError::Media(_)));
    }

    #[tokio::test]
    async fn test_unknown_chat() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Regex(r"^/api/sessions/resort/chats/".to_string()))
            .with_status(404)
            .with_body("chat not found")
            .create_async()
            .await;

        let sender = sender_for(&server);
        let err = sender.get_chat("2@c.us").await.unwrap_err();
        assert!(matches!(err, SendError::UnknownChat(peer) if peer == "2@c.us"));
    }

    #[tokio::test]
    async fn test_get_chat_returns_chat_id() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Regex(r"^/api/sessions/resort/chats/".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "2@c.us", "name": "Front desk", "isGroup": false}"#)
            .create_async()
            .await;

        let sender = sender_for(&server);
        assert_eq!(sender.get_chat("2@c.us").await.unwrap(), "2@c.us");
    }
}
