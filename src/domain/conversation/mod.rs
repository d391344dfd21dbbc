//! Conversation domain module.
//!
//! Manages the planning dialogue: turns, lifecycle state, and the
//! classification of model replies into dialogue or a final plan.

mod classifier;
mod conversation;
mod state;
mod turn;

pub use classifier::{Classification, TurnClassifier};
pub use conversation::{Conversation, ConversationError, ConversationId, TurnOutcome};
pub use state::ConversationState;
pub use turn::{ConversationTurn, Sender, TurnId, FINALIZATION_ACK, FINALIZATION_MARKER};
