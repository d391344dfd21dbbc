//! GetConversationHandler - Query handler for the current conversation.

use std::sync::Arc;

use crate::domain::conversation::{ConversationId, ConversationState, ConversationTurn};
use crate::domain::plan::ProjectPlan;
use crate::domain::settings::KeyProvider;

use super::select_key::KeyStatus;
use super::session::SharedSession;

/// Query to get the current conversation.
#[derive(Debug, Clone, Default)]
pub struct GetConversationQuery;

/// Snapshot of the session.
#[derive(Debug, Clone)]
pub struct ConversationView {
    pub id: ConversationId,
    pub state: ConversationState,
    pub input_open: bool,
    pub turns: Vec<ConversationTurn>,
    pub plan: Option<ProjectPlan>,
    pub key: KeyStatus,
}

/// Handler for reading the conversation.
pub struct GetConversationHandler {
    session: SharedSession,
    key_provider: Arc<KeyProvider>,
}

impl GetConversationHandler {
    pub fn new(session: SharedSession, key_provider: Arc<KeyProvider>) -> Self {
        Self {
            session,
            key_provider,
        }
    }

    pub async fn handle(&self, _query: GetConversationQuery) -> ConversationView {
        let session = self.session.lock().await;
        let conversation = session.conversation();

        ConversationView {
            id: conversation.id(),
            state: conversation.state(),
            input_open: conversation.accepts_input(),
            turns: conversation.turns().to_vec(),
            plan: conversation.plan().cloned(),
            key: KeyStatus::of(&session, &self.key_provider),
        }
    }
}
