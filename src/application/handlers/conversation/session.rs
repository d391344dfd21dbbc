//! The planner session shared by all handlers.
//!
//! One session per process. The lock is taken only for state checks and
//! mutations, never across a call to the model.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::conversation::Conversation;
use crate::domain::settings::KeySelection;

/// Session state shared between requests.
pub type SharedSession = Arc<Mutex<PlannerSession>>;

/// Current conversation plus the user's key selection.
#[derive(Debug, Default)]
pub struct PlannerSession {
    conversation: Conversation,
    key_selection: KeySelection,
}

impl PlannerSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a fresh session for sharing between handlers.
    pub fn shared() -> SharedSession {
        Arc::new(Mutex::new(Self::new()))
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn conversation_mut(&mut self) -> &mut Conversation {
        &mut self.conversation
    }

    pub fn key_selection(&self) -> &KeySelection {
        &self.key_selection
    }

    pub fn set_key_selection(&mut self, selection: KeySelection) {
        self.key_selection = selection;
    }

    /// Starts a new empty conversation. The key selection is kept.
    pub fn reset(&mut self) {
        self.conversation = Conversation::new();
    }
}
