//! PostgREST-backed [`KnowledgeSource`].

use concierge_core::{async_trait, KnowledgeError, KnowledgeSource, RoomOption};
use reqwest::Client;
use tracing::debug;

use crate::config::RoomStoreConfig;

/// Columns requested from the rooms table.
pub const ROOM_COLUMNS: &str = "room_name,rate,description,size,check_in_time,check_out_time";

/// Client for the rooms table.
#[derive(Debug, Clone)]
pub struct RoomStore {
    client: Client,
    config: RoomStoreConfig,
}

impl RoomStore {
    /// Create a store client.
    pub fn new(config: RoomStoreConfig) -> Result<Self, KnowledgeError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| KnowledgeError::Unavailable(format!("HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &RoomStoreConfig {
        &self.config
    }
}

#[async_trait]
impl KnowledgeSource for RoomStore {
    async fn list_rooms_by_ascending_rate(&self) -> Result<Vec<RoomOption>, KnowledgeError> {
        let url = self.config.table_url();

        let response = self
            .client
            .get(&url)
            .query(&[("select", ROOM_COLUMNS), ("order", "rate.asc")])
            .header("apikey", &self.config.api_key)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .send()
            .await
            .map_err(|e| KnowledgeError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(KnowledgeError::Unavailable(format!(
                "{} returned {}: {}",
                self.config.table,
                status.as_u16(),
                body
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| KnowledgeError::Unavailable(e.to_string()))?;
        let mut rooms: Vec<RoomOption> =
            serde_json::from_str(&body).map_err(|e| KnowledgeError::Malformed(e.to_string()))?;

        // The server already orders by rate; keep ties stable if it did not.
        rooms.sort_by_key(|room| room.rate);

        debug!("Loaded {} rooms from {}", rooms.len(), self.config.table);
        Ok(rooms)
    }
}
