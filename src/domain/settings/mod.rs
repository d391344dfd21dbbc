//! Prompt and credential settings.
//!
//! Supplies the standing instruction and decides which credential a turn
//! is sent with.

mod key_selection;
mod prompt;

pub use key_selection::{Configuration, KeyProvider, KeySelection};
pub use prompt::{full_instruction, DEFAULT_INSTRUCTION_TEMPLATE, FINAL_OUTPUT_DIRECTIVE};
