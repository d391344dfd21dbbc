//! ResetConversation command handler.

use crate::domain::conversation::ConversationId;

use super::session::SharedSession;

/// Command to discard the conversation and start over.
#[derive(Debug, Clone, Default)]
pub struct ResetConversationCommand;

/// Handler for resets.
pub struct ResetConversationHandler {
    session: SharedSession,
}

impl ResetConversationHandler {
    pub fn new(session: SharedSession) -> Self {
        Self { session }
    }

    /// Starts a new conversation and returns its id. Any pending reply for
    /// the old conversation is discarded when it arrives.
    pub async fn handle(&self, _cmd: ResetConversationCommand) -> ConversationId {
        let mut session = self.session.lock().await;
        let previous = session.conversation().id();
        session.reset();
        let id = session.conversation().id();

        tracing::info!(previous = %previous, conversation_id = %id, "Conversation reset");
        id
    }
}
