//! SubmitTurn command handler.
//!
//! Runs one dialogue exchange: guard and record the user turn, call the
//! model, classify the reply, record the outcome.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::conversation::{
    ConversationError, ConversationId, ConversationState, ConversationTurn, TurnClassifier,
    TurnOutcome,
};
use crate::domain::plan::ProjectPlan;
use crate::domain::settings::KeyProvider;
use crate::ports::{AIProvider, CompletionRequest, DEFAULT_TEMPERATURE};

use super::session::SharedSession;

/// Command to submit a user message.
#[derive(Debug, Clone)]
pub struct SubmitTurnCommand {
    pub message: String,
}

impl SubmitTurnCommand {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors that reject a submission.
///
/// Model failures are not errors here: they are recorded as a turn and
/// reported through [`TurnOutcome::Failed`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitTurnError {
    #[error(transparent)]
    Rejected(#[from] ConversationError),

    #[error("The conversation was reset while the reply was pending")]
    SessionReset,

    #[error("The model exchange ended unexpectedly")]
    Interrupted,
}

/// Result of one exchange.
#[derive(Debug, Clone)]
pub struct SubmitTurnResult {
    pub outcome: TurnOutcome,
    /// Turns appended by this exchange (user turn first).
    pub appended: Vec<ConversationTurn>,
    pub state: ConversationState,
    pub plan: Option<ProjectPlan>,
}

/// Handler for user submissions.
pub struct SubmitTurnHandler {
    session: SharedSession,
    key_provider: Arc<KeyProvider>,
    ai_provider: Arc<dyn AIProvider>,
    classifier: TurnClassifier,
    temperature: f32,
}

impl SubmitTurnHandler {
    pub fn new(
        session: SharedSession,
        key_provider: Arc<KeyProvider>,
        ai_provider: Arc<dyn AIProvider>,
    ) -> Self {
        Self {
            session,
            key_provider,
            ai_provider,
            classifier: TurnClassifier::new(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Sets the sampling temperature sent with every request.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub async fn handle(
        &self,
        cmd: SubmitTurnCommand,
    ) -> Result<SubmitTurnResult, SubmitTurnError> {
        // 1. Guard and record the user turn under the lock
        let (conversation_id, first_new_turn, request) = {
            let mut session = self.session.lock().await;
            let config = self.key_provider.configuration(session.key_selection());
            let conversation = session.conversation_mut();
            let first_new_turn = conversation.turn_count();

            let history = conversation.begin_submission(&cmd.message, &config)?;
            let request = CompletionRequest::new(
                config.credential().clone(),
                config.full_instruction(),
                history,
            )
            .with_temperature(self.temperature);

            (conversation.id(), first_new_turn, request)
        };

        tracing::debug!(
            conversation_id = %conversation_id,
            turns = request.history.len(),
            provider = %self.ai_provider.provider_info().name,
            "Requesting model reply"
        );

        // 2. The exchange runs on its own task and completes even if the
        //    caller is dropped
        let exchange = Exchange {
            session: Arc::clone(&self.session),
            ai_provider: Arc::clone(&self.ai_provider),
            classifier: self.classifier.clone(),
            conversation_id,
            first_new_turn,
        };
        let handle = tokio::spawn(exchange.run(request));

        handle.await.map_err(|e| {
            tracing::error!(conversation_id = %conversation_id, error = %e, "Model exchange task failed");
            SubmitTurnError::Interrupted
        })?
    }
}

/// One in-flight exchange, owned by its task.
struct Exchange {
    session: SharedSession,
    ai_provider: Arc<dyn AIProvider>,
    classifier: TurnClassifier,
    conversation_id: ConversationId,
    first_new_turn: usize,
}

impl Exchange {
    async fn run(self, request: CompletionRequest) -> Result<SubmitTurnResult, SubmitTurnError> {
        let conversation_id = self.conversation_id;

        // Call the model without holding the lock
        let reply = self.ai_provider.complete(request).await;

        // Record the outcome
        let mut session = self.session.lock().await;
        let conversation = session.conversation_mut();

        if conversation.id() != conversation_id {
            tracing::warn!(
                conversation_id = %conversation_id,
                "Discarding reply for a conversation that was reset"
            );
            return Err(SubmitTurnError::SessionReset);
        }

        let outcome = match reply {
            Ok(response) => {
                let classification = self.classifier.classify(&response.content);
                conversation.record_reply(classification)?
            }
            Err(err) => {
                tracing::warn!(conversation_id = %conversation_id, error = %err, "Model request failed");
                conversation.record_failure(&err)?
            }
        };

        match &outcome {
            TurnOutcome::Finalized => {
                tracing::info!(conversation_id = %conversation_id, "Shopping list generated")
            }
            TurnOutcome::Malformed { reason } => {
                tracing::warn!(conversation_id = %conversation_id, %reason, "Plan-shaped reply could not be parsed")
            }
            _ => {}
        }

        Ok(SubmitTurnResult {
            outcome,
            appended: conversation.turns()[self.first_new_turn..].to_vec(),
            state: conversation.state(),
            plan: conversation.plan().cloned(),
        })
    }
}
