//! Conversation command and query handlers.
//!
//! All handlers share one [`PlannerSession`].

mod export_plan;
mod get_conversation;
mod reset_conversation;
mod select_key;
mod session;
mod submit_turn;

pub use export_plan::{ExportPlanError, ExportPlanHandler};
pub use get_conversation::{ConversationView, GetConversationHandler, GetConversationQuery};
pub use reset_conversation::{ResetConversationCommand, ResetConversationHandler};
pub use select_key::{KeyStatus, SelectKeyCommand, SelectKeyError, SelectKeyHandler};
pub use session::{PlannerSession, SharedSession};
pub use submit_turn::{SubmitTurnCommand, SubmitTurnError, SubmitTurnHandler, SubmitTurnResult};
