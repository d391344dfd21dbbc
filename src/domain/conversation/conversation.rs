//! Conversation aggregate entity.
//!
//! A conversation owns the ordered turns of one planning session and, once
//! the model produces it, the final plan.
//!
//! # Aggregate Boundary
//!
//! - Turns are appended only through the aggregate
//! - At most one reply is outstanding at any time
//! - After finalization no further turns are accepted

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::foundation::{StateMachine, ValidationError};
use crate::domain::plan::ProjectPlan;
use crate::domain::settings::Configuration;

use super::classifier::Classification;
use super::state::ConversationState;
use super::turn::ConversationTurn;

/// Unique identifier for a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(Uuid);

impl ConversationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors raised by conversation guards.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversationError {
    #[error("Message must not be empty")]
    EmptyMessage,

    #[error("A reply is already pending")]
    ReplyInFlight,

    #[error("Conversation is finalized; no further turns are accepted")]
    AlreadyFinalized,

    #[error("No API key is configured")]
    MissingCredential,

    #[error("No reply is pending")]
    NotAwaitingReply,

    #[error(transparent)]
    InvalidTransition(#[from] ValidationError),
}

/// How a completed exchange ended.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// The model asked another question.
    Continued,
    /// The model sent something plan-shaped that could not be parsed.
    Malformed { reason: String },
    /// The plan was produced.
    Finalized,
    /// The request failed; the user may try again.
    Failed { error: String },
}

/// Conversation aggregate.
///
/// # Invariants
///
/// - turns are ordered by append time
/// - `plan` is `Some` iff `state` is `Finalized`
/// - state transitions follow `ConversationState` rules
#[derive(Debug, Clone)]
pub struct Conversation {
    id: ConversationId,
    state: ConversationState,
    turns: Vec<ConversationTurn>,
    plan: Option<ProjectPlan>,
}

impl Conversation {
    /// Creates an empty, idle conversation.
    pub fn new() -> Self {
        Self {
            id: ConversationId::new(),
            state: ConversationState::Idle,
            turns: Vec::new(),
            plan: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> ConversationId {
        self.id
    }

    pub fn state(&self) -> ConversationState {
        self.state
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    /// The final plan, once produced.
    pub fn plan(&self) -> Option<&ProjectPlan> {
        self.plan.as_ref()
    }

    /// Whether the input surface is open.
    pub fn accepts_input(&self) -> bool {
        self.state.accepts_user_input()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────────────────────

    /// Starts a user turn.
    ///
    /// Guards run in order: empty text, reply in flight, finalized, missing
    /// credential. On success the user turn is appended, the conversation
    /// moves to `AwaitingReply` and the history to send is returned.
    pub fn begin_submission(
        &mut self,
        text: &str,
        config: &Configuration,
    ) -> Result<Vec<ConversationTurn>, ConversationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ConversationError::EmptyMessage);
        }
        if self.state.is_awaiting_reply() {
            return Err(ConversationError::ReplyInFlight);
        }
        if self.state.is_finalized() {
            return Err(ConversationError::AlreadyFinalized);
        }
        if !config.has_credential() {
            return Err(ConversationError::MissingCredential);
        }

        self.state = self.state.transition_to(ConversationState::AwaitingReply)?;
        self.turns.push(ConversationTurn::user(text));

        Ok(self.turns.clone())
    }

    /// Records the classified model reply for the pending turn.
    pub fn record_reply(
        &mut self,
        classification: Classification,
    ) -> Result<TurnOutcome, ConversationError> {
        self.ensure_awaiting_reply()?;

        match classification {
            Classification::Terminal(plan) => {
                self.state = self.state.transition_to(ConversationState::Finalized)?;
                self.plan = Some(plan);
                self.turns.push(ConversationTurn::finalization_ack());
                Ok(TurnOutcome::Finalized)
            }
            Classification::Continuation(text) => {
                self.state = self.state.transition_to(ConversationState::Idle)?;
                self.turns.push(ConversationTurn::assistant(text));
                Ok(TurnOutcome::Continued)
            }
            Classification::Malformed { text, reason } => {
                self.state = self.state.transition_to(ConversationState::Idle)?;
                self.turns.push(ConversationTurn::assistant(text));
                Ok(TurnOutcome::Malformed { reason })
            }
        }
    }

    /// Records a failed request for the pending turn. The conversation goes
    /// back to `Idle` so the user can retry.
    pub fn record_failure(
        &mut self,
        error: impl std::fmt::Display,
    ) -> Result<TurnOutcome, ConversationError> {
        self.ensure_awaiting_reply()?;

        let error = error.to_string();
        self.state = self.state.transition_to(ConversationState::Idle)?;
        self.turns.push(ConversationTurn::assistant(format!(
            "The assistant service request failed: {}",
            error
        )));
        Ok(TurnOutcome::Failed { error })
    }

    fn ensure_awaiting_reply(&self) -> Result<(), ConversationError> {
        if self.state.is_awaiting_reply() {
            Ok(())
        } else {
            Err(ConversationError::NotAwaitingReply)
        }
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}
