//! Conversation domain types.
//!
//! A chat session is a `Transcript`: an ordered, fixed-capacity log of
//! `ConversationTurn`s. The transcript is a sliding window — when it is
//! full, the oldest turns are dropped first. Nothing here is persisted
//! across process restarts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of turns kept in a transcript.
pub const TRANSCRIPT_CAPACITY: usize = 20;

/// The role of a turn in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user
    User,
    /// The research assistant
    Assistant,
}

/// A single turn in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Unique turn ID
    pub id: String,

    /// Who produced this turn
    pub role: Role,

    /// The text content
    pub content: String,

    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    /// Create a new user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a new assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// A fixed-capacity, ordered log of conversation turns.
///
/// `push` drops the oldest turns once the capacity is exceeded, so the
/// transcript always holds the most recent `capacity` turns in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<ConversationTurn>,
    capacity: usize,
}

impl Transcript {
    /// Create an empty transcript with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(TRANSCRIPT_CAPACITY)
    }

    /// Create an empty transcript with an explicit capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            turns: Vec::new(),
            capacity,
        }
    }

    /// Append a turn, evicting the oldest turns if over capacity.
    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
        if self.turns.len() > self.capacity {
            let excess = self.turns.len() - self.capacity;
            self.turns.drain(..excess);
        }
    }

    /// The turns currently in the window, oldest first.
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// Number of turns currently held.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the transcript is empty.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Remove all turns.
    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user_turn() {
        let turn = ConversationTurn::user("What is rough volatility?");
        assert_eq!(turn.role, Role::User);
        assert_eq!(turn.content, "What is rough volatility?");
    }

    #[test]
    fn transcript_caps_at_capacity() {
        let mut transcript = Transcript::new();
        for i in 0..25 {
            transcript.push(ConversationTurn::user(format!("message {i}")));
        }
        assert_eq!(transcript.len(), TRANSCRIPT_CAPACITY);
        // Oldest dropped first: window starts at message 5
        assert_eq!(transcript.turns()[0].content, "message 5");
        assert_eq!(transcript.turns()[19].content, "message 24");
    }

    #[test]
    fn transcript_preserves_order_under_capacity() {
        let mut transcript = Transcript::new();
        transcript.push(ConversationTurn::user("first"));
        transcript.push(ConversationTurn::assistant("second"));
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.turns()[0].content, "first");
        assert_eq!(transcript.turns()[1].role, Role::Assistant);
    }

    #[test]
    fn clear_empties_transcript() {
        let mut transcript = Transcript::new();
        transcript.push(ConversationTurn::user("hello"));
        transcript.clear();
        assert!(transcript.is_empty());
    }

    #[test]
    fn turn_serialization_roundtrip() {
        let turn = ConversationTurn::assistant("Here is what I found.");
        let json = serde_json::to_string(&turn).unwrap();
        assert!(json.contains("\"assistant\""));
        let parsed: ConversationTurn = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.content, "Here is what I found.");
    }
}
