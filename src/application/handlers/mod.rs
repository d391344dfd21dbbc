//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod conversation;

pub use conversation::{
    ConversationView, ExportPlanError, ExportPlanHandler, GetConversationHandler,
    GetConversationQuery, KeyStatus, PlannerSession, ResetConversationCommand,
    ResetConversationHandler, SelectKeyCommand, SelectKeyError, SelectKeyHandler, SharedSession,
    SubmitTurnCommand, SubmitTurnError, SubmitTurnHandler, SubmitTurnResult,
};
