//! Canned knowledge sources.

use concierge_core::{async_trait, KnowledgeError, KnowledgeSource, RoomOption};

/// A knowledge source that always returns the same rooms.
#[derive(Debug, Clone, Default)]
pub struct FixedKnowledge {
    rooms: Vec<RoomOption>,
}

impl FixedKnowledge {
    /// Create a source over these rooms.
    pub fn new(rooms: Vec<RoomOption>) -> Self {
        Self { rooms }
    }

    /// A room record with placeholder details.
    pub fn room(name: &str, rate: u64) -> RoomOption {
        RoomOption {
            display_name: name.to_string(),
            rate,
            description: format!("A lovely {}", name.to_lowercase()),
            size_sq_ft: "400".to_string(),
            check_in: "2 PM".to_string(),
            check_out: "11 AM".to_string(),
        }
    }
}

#[async_trait]
impl KnowledgeSource for FixedKnowledge {
    async fn list_rooms_by_ascending_rate(&self) -> Result<Vec<RoomOption>, KnowledgeError> {
        let mut rooms = self.rooms.clone();
        rooms.sort_by_key(|room| room.rate);
        Ok(rooms)
    }
}

/// A knowledge source that is always down.
#[derive(Debug, Clone, Default)]
pub struct FailingKnowledge;

#[async_trait]
impl KnowledgeSource for FailingKnowledge {
    async fn list_rooms_by_ascending_rate(&self) -> Result<Vec<RoomOption>, KnowledgeError> {
        Err(KnowledgeError::Unavailable("knowledge source offline".to_string()))
    }
}
