//! Configuration types for wa-gateway.

use std::env;

/// Default bridge address.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

/// Default session name.
pub const DEFAULT_SESSION: &str = "default";

/// Configuration for connecting to the WhatsApp bridge.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the bridge HTTP server (e.g., "http://127.0.0.1:3000").
    pub base_url: String,
    /// Linked-device session name on the bridge.
    pub session: String,
    /// The bot's own chat id, used to drop self-sent messages.
    pub bot_id: Option<String>,
}

impl GatewayConfig {
    /// Create a new configuration with the given base URL and default session.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session: DEFAULT_SESSION.to_string(),
            bot_id: None,
        }
    }

    /// Use a specific session.
    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        self.session = session.into();
        self
    }

    /// Record the bot's own chat id.
    pub fn with_bot_id(mut self, bot_id: impl Into<String>) -> Self {
        self.bot_id = Some(bot_id.into());
        self
    }

    /// Load from `WA_GATEWAY_URL`, `WA_SESSION` and `WA_BOT_ID`.
    pub fn from_env() -> Self {
        let mut config =
            Self::new(env::var("WA_GATEWAY_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()));
        if let Ok(session) = env::var("WA_SESSION") {
            if !session.trim().is_empty() {
                config.session = session.trim().to_string();
            }
        }
        config.bot_id = env::var("WA_BOT_ID").ok().filter(|id| !id.trim().is_empty());
        config
    }

    fn session_url(&self) -> String {
        format!(
            "{}/api/sessions/{}",
            self.base_url,
            urlencoding::encode(&self.session)
        )
    }

    /// Get the health check endpoint URL.
    pub fn health_url(&self) -> String {
        format!("{}/api/health", self.base_url)
    }

    /// Get the text send endpoint URL.
    pub fn send_text_url(&self) -> String {
        format!("{}/messages/text", self.session_url())
    }

    /// Get the media send endpoint URL.
    pub fn send_media_url(&self) -> String {
        format!("{}/messages/media", self.session_url())
    }

    /// Get the chat lookup URL for a chat id.
    pub fn chat_url(&self, chat_id: &str) -> String {
        format!("{}/chats/{}", self.session_url(), urlencoding::encode(chat_id))
    }

    /// Get the events endpoint URL.
    pub fn events_url(&self) -> String {
        format!("{}/events", self.session_url())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
