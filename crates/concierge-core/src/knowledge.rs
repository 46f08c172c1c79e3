//! Grounding context for generated replies.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::KnowledgeError;
use crate::room::{render_rooms, RoomOption};

/// A queryable set of room records.
#[async_trait]
pub trait KnowledgeSource: Send + Sync {
    /// List all rooms, cheapest first.
    async fn list_rooms_by_ascending_rate(&self) -> Result<Vec<RoomOption>, KnowledgeError>;
}

/// Where the factual part of a prompt comes from.
#[derive(Clone)]
pub enum GroundingContext {
    /// A text blob loaded once at startup.
    Static(String),
    /// Rooms queried fresh for every generated reply.
    Rooms(Arc<dyn KnowledgeSource>),
}

impl GroundingContext {
    /// Load a static context file.
    pub async fn from_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let text = tokio::fs::read_to_string(path.as_ref()).await?;
        Ok(Self::Static(text.trim().to_string()))
    }

    /// Produce the grounding text for one turn.
    ///
    /// A failing knowledge source degrades to an empty context.
    pub async fn fetch(&self) -> String {
        match self {
            GroundingContext::Static(text) => text.clone(),
            GroundingContext::Rooms(source) => match source.list_rooms_by_ascending_rate().await {
                Ok(rooms) => {
                    debug!("Fetched {} rooms for grounding", rooms.len());
                    render_rooms(&rooms)
                }
                Err(e) => {
                    warn!("Error fetching room details: {}", e);
                    String::new()
                }
            },
        }
    }
}

impl std::fmt::Debug for GroundingContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroundingContext::Static(text) => f
                .debug_tuple("Static")
                .field(&format!("{} chars", text.chars().count()))
                .finish(),
            GroundingContext::Rooms(_) => f.debug_tuple("Rooms").finish(),
        }
    }
}
