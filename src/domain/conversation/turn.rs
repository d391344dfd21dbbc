//! Conversation turns.
//!
//! Turns are immutable records of user/assistant exchanges. The assistant
//! turn appended on finalization is synthesized locally and carries a fixed
//! marker so the transport can keep it out of the replayed history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Marker identifying the synthesized finalization acknowledgment.
pub const FINALIZATION_MARKER: &str = "Shopping list generated";

/// Text of the acknowledgment turn appended when a plan is produced.
pub const FINALIZATION_ACK: &str = "✅ Shopping list generated!";

/// Unique identifier for a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TurnId(Uuid);

impl TurnId {
    /// Creates a new random TurnId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TurnId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TurnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Assistant,
}

/// A single message in the dialogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    id: TurnId,
    sender: Sender,
    text: String,
    created_at: DateTime<Utc>,
}

impl ConversationTurn {
    /// Creates a turn with the given sender and text.
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: TurnId::new(),
            sender,
            text: text.into(),
            created_at: Utc::now(),
        }
    }

    /// Creates a user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    /// Creates an assistant turn.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, text)
    }

    /// Creates the acknowledgment turn appended on finalization.
    pub fn finalization_ack() -> Self {
        Self::assistant(FINALIZATION_ACK)
    }

    pub fn id(&self) -> TurnId {
        self.id
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns true for the synthesized acknowledgment, which must never be
    /// sent back to the model.
    pub fn is_finalization_ack(&self) -> bool {
        self.sender == Sender::Assistant && self.text.contains(FINALIZATION_MARKER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_sender() {
        assert_eq!(ConversationTurn::user("hi").sender(), Sender::User);
        assert_eq!(ConversationTurn::assistant("hello").sender(), Sender::Assistant);
    }

    #[test]
    fn ack_turn_is_recognized() {
        assert!(ConversationTurn::finalization_ack().is_finalization_ack());
    }

    #[test]
    fn user_text_containing_marker_is_not_an_ack() {
        let turn = ConversationTurn::user("Shopping list generated? not yet");
        assert!(!turn.is_finalization_ack());
    }

    #[test]
    fn ordinary_assistant_turn_is_not_an_ack() {
        assert!(!ConversationTurn::assistant("Which board?").is_finalization_ack());
    }

    #[test]
    fn sender_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Sender::Assistant).unwrap(), "\"assistant\"");
    }
}
