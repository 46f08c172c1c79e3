//! WhatsApp bridge HTTP client.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::types::{ChatInfo, SendMediaParams, SendResult, SendTextParams};

/// Client for a linked WhatsApp session on the bridge.
#[derive(Clone)]
pub struct WhatsAppClient {
    http: Client,
    config: GatewayConfig,
    connected: Arc<AtomicBool>,
}

impl WhatsAppClient {
    /// Connect to the bridge, verifying it with a health check.
    pub async fn connect(config: GatewayConfig) -> Result<Self, GatewayError> {
        let client = Self::new(config)?;

        if client.health_check().await? {
            info!(
                "Connected to WhatsApp bridge at {} (session {})",
                client.config.base_url, client.config.session
            );
            Ok(client)
        } else {
            Err(GatewayError::HealthCheckFailed)
        }
    }

    /// Create a client without contacting the bridge.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(GatewayError::Http)?;

        Ok(Self {
            http,
            config,
            connected: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Check if the last health check succeeded.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Perform a health check against the bridge.
    pub async fn health_check(&self) -> Result<bool, GatewayError> {
        let url = self.config.health_url();
        debug!("Health check: {}", url);

        match self.http.get(&url).send().await {
            Ok(resp) => {
                let ok = resp.status().is_success();
                self.connected.store(ok, Ordering::SeqCst);
                Ok(ok)
            }
            Err(e) => {
                self.connected.store(false, Ordering::SeqCst);
                Err(GatewayError::Http(e))
            }
        }
    }

    /// Send a text message to a chat.
    pub async fn send_text(&self, chat_id: &str, text: &str) -> Result<SendResult, GatewayError> {
        let params = SendTextParams::new(chat_id, text);
        self.post_json(&self.config.send_text_url(), &params).await
    }

    /// Send a local file as a media message.
    ///
    /// The MIME type is guessed from the file extension.
    pub async fn send_media(&self, chat_id: &str, path: &Path) -> Result<SendResult, GatewayError> {
        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());
        let mimetype = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        debug!(
            "Sending {} ({}, {} bytes) to {}",
            filename,
            mimetype,
            bytes.len(),
            chat_id
        );

        let params = SendMediaParams {
            chat_id: chat_id.to_string(),
            mimetype,
            filename,
            data: STANDARD.encode(&bytes),
            caption: None,
        };
        self.send_media_params(params).await
    }

    /// Send a prepared media payload.
    pub async fn send_media_params(
        &self,
        params: SendMediaParams,
    ) -> Result<SendResult, GatewayError> {
        self.post_json(&self.config.send_media_url(), &params).await
    }

    /// Look up chat metadata.
    pub async fn get_chat(&self, chat_id: &str) -> Result<ChatInfo, GatewayError> {
        let response = self
            .http
            .get(self.config.chat_url(chat_id))
            .send()
            .await
            .map_err(GatewayError::Http)?;
        Self::decode(response).await
    }

    /// Get the configuration.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    async fn post_json<P: Serialize, R: DeserializeOwned + Default>(
        &self,
        url: &str,
        body: &P,
    ) -> Result<R, GatewayError> {
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(GatewayError::Http)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::api_error(response).await);
        }

        // Some bridges answer sends with an empty body.
        let text = response.text().await.map_err(GatewayError::Http)?;
        if text.trim().is_empty() {
            return Ok(R::default());
        }
        Ok(serde_json::from_str(&text)?)
    }

    async fn decode<R: DeserializeOwned>(response: Response) -> Result<R, GatewayError> {
        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        Ok(response.json().await?)
    }

    async fn api_error(response: Response) -> GatewayError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .unwrap_or(body);
        GatewayError::Api { status, message }
    }
}

impl std::fmt::Debug for WhatsAppClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhatsAppClient")
            .field("config", &self.config)
            .field("connected", &self.is_connected())
            .finish()
    }
}
