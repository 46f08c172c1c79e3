//! Conversation state management.
//!
//! This module provides per-sender conversation history tracking with a
//! fixed bound on retained turns (oldest evicted first) and the one-time
//! first-contact flag.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};

/// Default number of turns kept per sender.
pub const DEFAULT_MAX_TURNS: usize = 10;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Label used when rendering history into a prompt.
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }
}

/// A single message in the conversation history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationTurn {
    /// Who said it.
    pub role: Role,
    /// What was said.
    pub content: String,
    /// When the turn was recorded.
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    /// Create a user turn stamped now.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create an assistant turn stamped now.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Default)]
struct SenderState {
    turns: VecDeque<ConversationTurn>,
    greeted: bool,
}

/// Per-sender conversation state.
///
/// Each sender owns an independent record behind its own lock, so
/// mutations for one sender are atomic and never contend with another
/// sender's. Records are created lazily and live for the process lifetime.
///
/// # Example
///
/// ```rust
/// use concierge_core::{ConversationStore, ConversationTurn};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let store = ConversationStore::new(3);
///
///     store.append("91@c.us", ConversationTurn::user("hi")).await;
///     store.append("91@c.us", ConversationTurn::assistant("hello!")).await;
///
///     let turns = store.get("91@c.us").await;
///     assert_eq!(turns.len(), 2);
/// }
/// ```
#[derive(Debug)]
pub struct ConversationStore {
    /// Map from sender ID to their state. Insertion order is first contact order.
    senders: RwLock<IndexMap<String, Arc<Mutex<SenderState>>>>,
    /// Maximum number of turns kept per sender.
    max_turns: usize,
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TURNS)
    }
}

impl ConversationStore {
    /// Create a store keeping at most `max_turns` turns per sender.
    pub fn new(max_turns: usize) -> Self {
        Self {
            senders: RwLock::new(IndexMap::new()),
            max_turns,
        }
    }

    /// The configured per-sender bound.
    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    async fn existing(&self, sender: &str) -> Option<Arc<Mutex<SenderState>>> {
        let senders = self.senders.read().await;
        senders.get(sender).cloned()
    }

    async fn state(&self, sender: &str) -> Arc<Mutex<SenderState>> {
        if let Some(state) = self.existing(sender).await {
            return state;
        }
        let mut senders = self.senders.write().await;
        senders
            .entry(sender.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(SenderState::default())))
            .clone()
    }

    /// Append a turn, evicting the oldest turns beyond the bound.
    pub async fn append(&self, sender: &str, turn: ConversationTurn) {
        let state = self.state(sender).await;
        let mut state = state.lock().await;
        push_bounded(&mut state.turns, turn, self.max_turns);
    }

    /// Append a user turn and the assistant's reply in one step.
    pub async fn append_exchange(&self, sender: &str, user_msg: &str, assistant_msg: &str) {
        let state = self.state(sender).await;
        let mut state = state.lock().await;
        push_bounded(&mut state.turns, ConversationTurn::user(user_msg), self.max_turns);
        push_bounded(
            &mut state.turns,
            ConversationTurn::assistant(assistant_msg),
            self.max_turns,
        );
    }

    /// Get the ordered history for a sender (oldest first).
    pub async fn get(&self, sender: &str) -> Vec<ConversationTurn> {
        match self.existing(sender).await {
            Some(state) => state.lock().await.turns.iter().cloned().collect(),
            None => Vec::new(),
        }
    }

    /// Whether the one-time greeting has been sent to this sender.
    pub async fn has_greeted(&self, sender: &str) -> bool {
        match self.existing(sender).await {
            Some(state) => state.lock().await.greeted,
            None => false,
        }
    }

    /// Set the first-contact flag.
    ///
    /// Returns `true` only for the call that flipped the flag, so concurrent
    /// first messages greet exactly once.
    pub async fn mark_greeted(&self, sender: &str) -> bool {
        let state = self.state(sender).await;
        let mut state = state.lock().await;
        let first = !state.greeted;
        state.greeted = true;
        first
    }

    /// Undo [`mark_greeted`](Self::mark_greeted) after the greeting could
    /// not be delivered, so the next message greets again.
    pub async fn clear_greeted(&self, sender: &str) {
        if let Some(state) = self.existing(sender).await {
            state.lock().await.greeted = false;
        }
    }

    /// Number of senders seen so far.
    pub async fn sender_count(&self) -> usize {
        let senders = self.senders.read().await;
        senders.len()
    }
}

fn push_bounded(turns: &mut VecDeque<ConversationTurn>, turn: ConversationTurn, max: usize) {
    turns.push_back(turn);
    while turns.len() > max {
        turns.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_append_and_get_history() {
        let store = ConversationStore::new(5);

        store.append_exchange("91@c.us", "Hello", "Hi there!").await;

        let turns = store.get("91@c.us").await;
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[0].content, "Hello");
        assert_eq!(turns[1].role, Role::Assistant);
        assert_eq!(turns[1].content, "Hi there!");
    }

    #[tokio::test]
    async fn test_bound_never_exceeded_and_fifo() {
        let store = ConversationStore::new(10);

        for i in 0..25 {
            store
                .append("91@c.us", ConversationTurn::user(format!("msg {}", i)))
                .await;
            assert!(store.get("91@c.us").await.len() <= 10);
        }

        let turns = store.get("91@c.us").await;
        assert_eq!(turns.len(), 10);
        assert_eq!(turns[0].content, "msg 15");
        assert_eq!(turns[9].content, "msg 24");
    }

    #[tokio::test]
    async fn test_exchange_respects_odd_bound() {
        let store = ConversationStore::new(3);

        store.append_exchange("91@c.us", "first", "reply 1").await;
        store.append_exchange("91@c.us", "second", "reply 2").await;

        let turns = store.get("91@c.us").await;
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[0].content, "reply 1");
        assert_eq!(turns[2].content, "reply 2");
    }

    #[tokio::test]
    async fn test_separate_sender_histories() {
        let store = ConversationStore::new(5);

        store.append_exchange("1@c.us", "Hello A", "Hi A!").await;
        store.append_exchange("2@c.us", "Hello B", "Hi B!").await;

        assert_eq!(store.get("1@c.us").await[0].content, "Hello A");
        assert_eq!(store.get("2@c.us").await[0].content, "Hello B");
        assert_eq!(store.sender_count().await, 2);
    }

    #[tokio::test]
    async fn test_get_unknown_sender_does_not_create_state() {
        let store = ConversationStore::new(5);

        assert!(store.get("nobody@c.us").await.is_empty());
        assert!(!store.has_greeted("nobody@c.us").await);
        assert_eq!(store.sender_count().await, 0);
    }

    #[tokio::test]
    async fn test_mark_greeted_is_test_and_set() {
        let store = ConversationStore::new(5);

        assert!(!store.has_greeted("91@c.us").await);
        assert!(store.mark_greeted("91@c.us").await);
        assert!(!store.mark_greeted("91@c.us").await);
        assert!(store.has_greeted("91@c.us").await);
    }

    #[tokio::test]
    async fn test_clear_greeted_allows_another_greeting() {
        let store = ConversationStore::new(5);

        store.clear_greeted("nobody@c.us").await;
        assert_eq!(store.sender_count().await, 0);

        assert!(store.mark_greeted("91@c.us").await);
        store.clear_greeted("91@c.us").await;
        assert!(!store.has_greeted("91@c.us").await);
        assert!(store.mark_greeted("91@c.us").await);
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_not_lost() {
        let store = Arc::new(ConversationStore::new(100));

        let mut handles = Vec::new();
        for i in 0..20 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .append("91@c.us", ConversationTurn::user(format!("{}", i)))
                    .await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.get("91@c.us").await.len(), 20);
    }
}
