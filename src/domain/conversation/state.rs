//! Conversation state machine.
//!
//! Defines the lifecycle states of a planning conversation and valid transitions.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// The lifecycle state of a conversation.
///
/// - `Idle`: waiting for the next user turn
/// - `AwaitingReply`: one request is in flight
/// - `Finalized`: a plan was produced, input is closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    #[default]
    Idle,
    AwaitingReply,
    Finalized,
}

impl ConversationState {
    /// Returns true if user can submit a turn in this state.
    pub fn accepts_user_input(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns true while a request is outstanding.
    pub fn is_awaiting_reply(&self) -> bool {
        matches!(self, Self::AwaitingReply)
    }

    /// Returns true once a plan has been produced.
    pub fn is_finalized(&self) -> bool {
        matches!(self, Self::Finalized)
    }
}

impl StateMachine for ConversationState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ConversationState::*;
        matches!(
            (self, target),
            (Idle, AwaitingReply) | (AwaitingReply, Idle) | (AwaitingReply, Finalized)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ConversationState::*;
        match self {
            Idle => vec![AwaitingReply],
            AwaitingReply => vec![Idle, Finalized],
            Finalized => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_idle() {
        assert_eq!(ConversationState::default(), ConversationState::Idle);
    }

    #[test]
    fn serializes_to_snake_case() {
        let json = serde_json::to_string(&ConversationState::AwaitingReply).unwrap();
        assert_eq!(json, "\"awaiting_reply\"");
    }

    #[test]
    fn only_idle_accepts_input() {
        assert!(ConversationState::Idle.accepts_user_input());
        assert!(!ConversationState::AwaitingReply.accepts_user_input());
        assert!(!ConversationState::Finalized.accepts_user_input());
    }

    #[test]
    fn idle_cannot_finalize_without_a_request() {
        assert!(ConversationState::Idle
            .transition_to(ConversationState::Finalized)
            .is_err());
    }

    #[test]
    fn finalized_is_terminal() {
        assert!(ConversationState::Finalized.is_terminal());
        assert!(!ConversationState::AwaitingReply.is_terminal());
    }

    #[test]
    fn valid_transitions_matches_can_transition_to() {
        for state in [
            ConversationState::Idle,
            ConversationState::AwaitingReply,
            ConversationState::Finalized,
        ] {
            for target in state.valid_transitions() {
                assert!(
                    state.can_transition_to(&target),
                    "can_transition_to should return true for {:?} -> {:?}",
                    state,
                    target
                );
            }
        }
    }
}
