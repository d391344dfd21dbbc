//! Foundation module - Shared domain primitives.
//!
//! Contains the error vocabulary and the state machine trait used by the
//! conversation lifecycle.

mod errors;
mod state_machine;

pub use errors::{ErrorCode, ValidationError};
pub use state_machine::StateMachine;
