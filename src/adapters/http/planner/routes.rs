//! Axum router configuration for planner endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    export_plan, get_conversation, get_key_status, get_plan, reset_conversation, select_key,
    submit_message, PlannerAppState,
};

/// Create the planner API routes.
///
/// # Routes
///
/// - `GET /config` - Key status
/// - `PUT /config/key` - Change key selection
/// - `GET /conversation` - Conversation snapshot
/// - `DELETE /conversation` - Start over
/// - `POST /conversation/messages` - Submit a user message
/// - `GET /plan` - Final plan
/// - `GET /plan/export` - CSV download
pub fn planner_routes() -> Router<PlannerAppState> {
    Router::new()
        .route("/config", get(get_key_status))
        .route("/config/key", put(select_key))
        .route("/conversation", get(get_conversation).delete(reset_conversation))
        .route("/conversation/messages", post(submit_message))
        .route("/plan", get(get_plan))
        .route("/plan/export", get(export_plan))
}

/// Create the planner router mounted at `/api`.
pub fn planner_router() -> Router<PlannerAppState> {
    Router::new().nest("/api", planner_routes())
}
