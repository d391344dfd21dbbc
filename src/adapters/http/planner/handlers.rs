//! HTTP handlers for planner endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::{
    ExportPlanError, ExportPlanHandler, GetConversationHandler, GetConversationQuery,
    PlannerSession, ResetConversationCommand, ResetConversationHandler, SelectKeyCommand,
    SelectKeyError, SelectKeyHandler, SharedSession, SubmitTurnCommand, SubmitTurnError,
    SubmitTurnHandler,
};
use crate::domain::conversation::ConversationError;
use crate::domain::foundation::ErrorCode;
use crate::domain::settings::KeyProvider;
use crate::ports::{AIProvider, PlanExporter};

use super::dto::{
    ConversationResponse, ErrorResponse, KeyStatusResponse, PlanView, ResetResponse,
    SelectKeyRequest, SubmitMessageRequest, SubmitMessageResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct PlannerAppState {
    submit_handler: Arc<SubmitTurnHandler>,
    get_handler: Arc<GetConversationHandler>,
    reset_handler: Arc<ResetConversationHandler>,
    select_key_handler: Arc<SelectKeyHandler>,
    export_handler: Arc<ExportPlanHandler>,
}

impl PlannerAppState {
    /// Wires all handlers around one shared session.
    pub fn new(
        key_provider: Arc<KeyProvider>,
        ai_provider: Arc<dyn AIProvider>,
        exporter: Arc<dyn PlanExporter>,
        temperature: f32,
    ) -> Self {
        Self::with_session(
            PlannerSession::shared(),
            key_provider,
            ai_provider,
            exporter,
            temperature,
        )
    }

    /// Same as [`PlannerAppState::new`] with a caller-provided session.
    pub fn with_session(
        session: SharedSession,
        key_provider: Arc<KeyProvider>,
        ai_provider: Arc<dyn AIProvider>,
        exporter: Arc<dyn PlanExporter>,
        temperature: f32,
    ) -> Self {
        Self {
            submit_handler: Arc::new(
                SubmitTurnHandler::new(session.clone(), key_provider.clone(), ai_provider)
                    .with_temperature(temperature),
            ),
            get_handler: Arc::new(GetConversationHandler::new(
                session.clone(),
                key_provider.clone(),
            )),
            reset_handler: Arc::new(ResetConversationHandler::new(session.clone())),
            select_key_handler: Arc::new(SelectKeyHandler::new(session.clone(), key_provider)),
            export_handler: Arc::new(ExportPlanHandler::new(session, exporter)),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/config - Current key status
pub async fn get_key_status(State(state): State<PlannerAppState>) -> Response {
    let status: KeyStatusResponse = state.select_key_handler.status().await.into();
    (StatusCode::OK, Json(status)).into_response()
}

/// PUT /api/config/key - Change key selection
pub async fn select_key(
    State(state): State<PlannerAppState>,
    Json(req): Json<SelectKeyRequest>,
) -> Response {
    let cmd = SelectKeyCommand {
        use_default: req.use_default,
        api_key: req.api_key,
    };

    match state.select_key_handler.handle(cmd).await {
        Ok(status) => (StatusCode::OK, Json(KeyStatusResponse::from(status))).into_response(),
        Err(SelectKeyError::Validation(e)) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(ErrorCode::ValidationFailed, e.to_string())),
        )
            .into_response(),
    }
}

/// GET /api/conversation - Conversation snapshot
pub async fn get_conversation(State(state): State<PlannerAppState>) -> Response {
    let view = state.get_handler.handle(GetConversationQuery).await;
    (StatusCode::OK, Json(ConversationResponse::from(view))).into_response()
}

/// POST /api/conversation/messages - Submit a user message
pub async fn submit_message(
    State(state): State<PlannerAppState>,
    Json(req): Json<SubmitMessageRequest>,
) -> Response {
    match state
        .submit_handler
        .handle(SubmitTurnCommand::new(req.message))
        .await
    {
        Ok(result) => (StatusCode::OK, Json(SubmitMessageResponse::from(result))).into_response(),
        Err(e) => handle_submit_error(e),
    }
}

/// DELETE /api/conversation - Start over
pub async fn reset_conversation(State(state): State<PlannerAppState>) -> Response {
    let id = state
        .reset_handler
        .handle(ResetConversationCommand)
        .await;
    let response = ResetResponse {
        conversation_id: id.to_string(),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// GET /api/plan - Final plan
pub async fn get_plan(State(state): State<PlannerAppState>) -> Response {
    let view = state.get_handler.handle(GetConversationQuery).await;
    match view.plan {
        Some(plan) => (StatusCode::OK, Json(PlanView::from(&plan))).into_response(),
        None => (StatusCode::NOT_FOUND, Json(ErrorResponse::plan_not_ready())).into_response(),
    }
}

/// GET /api/plan/export - Download the plan as a file
pub async fn export_plan(State(state): State<PlannerAppState>) -> Response {
    match state.export_handler.handle().await {
        Ok(file) => {
            let disposition = file.content_disposition();
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, file.content_type),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                file.bytes,
            )
                .into_response()
        }
        Err(ExportPlanError::NotReady) => {
            (StatusCode::NOT_FOUND, Json(ErrorResponse::plan_not_ready())).into_response()
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_submit_error(error: SubmitTurnError) -> Response {
    let message = error.to_string();
    let (status, code) = match error {
        SubmitTurnError::Rejected(ConversationError::EmptyMessage) => {
            (StatusCode::BAD_REQUEST, ErrorCode::EmptyMessage)
        }
        SubmitTurnError::Rejected(ConversationError::ReplyInFlight) => {
            (StatusCode::CONFLICT, ErrorCode::ReplyInFlight)
        }
        SubmitTurnError::Rejected(ConversationError::AlreadyFinalized) => {
            (StatusCode::CONFLICT, ErrorCode::ConversationFinalized)
        }
        SubmitTurnError::Rejected(ConversationError::MissingCredential) => {
            (StatusCode::PRECONDITION_FAILED, ErrorCode::CredentialMissing)
        }
        SubmitTurnError::SessionReset => (StatusCode::CONFLICT, ErrorCode::SessionReset),
        SubmitTurnError::Interrupted
        | SubmitTurnError::Rejected(
            ConversationError::NotAwaitingReply | ConversationError::InvalidTransition(_),
        ) => {
            tracing::error!(error = %message, "Conversation state inconsistency");
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::InternalError)
        }
    };

    (status, Json(ErrorResponse::new(code, message))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_message_maps_to_400() {
        let response = handle_submit_error(ConversationError::EmptyMessage.into());
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn in_flight_and_finalized_map_to_409() {
        assert_eq!(
            handle_submit_error(ConversationError::ReplyInFlight.into()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            handle_submit_error(ConversationError::AlreadyFinalized.into()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            handle_submit_error(SubmitTurnError::SessionReset).status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn missing_credential_maps_to_412() {
        let response = handle_submit_error(ConversationError::MissingCredential.into());
        assert_eq!(response.status(), StatusCode::PRECONDITION_FAILED);
    }

    #[test]
    fn state_inconsistency_maps_to_500() {
        let response = handle_submit_error(ConversationError::NotAwaitingReply.into());
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = handle_submit_error(SubmitTurnError::Interrupted);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
