//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (errors, state machine)
//! - `settings` - Credential selection and the instruction prompt
//! - `plan` - The final shopping list and its line items
//! - `conversation` - Dialogue lifecycle and reply classification

pub mod conversation;
pub mod foundation;
pub mod plan;
pub mod settings;
