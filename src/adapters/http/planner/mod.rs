//! HTTP adapter for planner endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CategoryView, ConversationResponse, ErrorResponse, KeyStatusResponse, LineItemView,
    OutcomeKind, PlanView, ResetResponse, SelectKeyRequest, SubmitMessageRequest,
    SubmitMessageResponse, TurnResponse,
};
pub use handlers::PlannerAppState;
pub use routes::{planner_router, planner_routes};
