//! HTTP DTOs for planner endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::handlers::{ConversationView, KeyStatus, SubmitTurnResult};
use crate::domain::conversation::{ConversationState, ConversationTurn, Sender, TurnOutcome};
use crate::domain::foundation::ErrorCode;
use crate::domain::plan::{LineItem, ProjectPlan};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to submit a user message.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitMessageRequest {
    pub message: String,
}

/// Request to change the API key selection.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectKeyRequest {
    pub use_default: bool,
    #[serde(default)]
    pub api_key: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Key readiness.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeyStatusResponse {
    pub using_default_key: bool,
    pub default_key_available: bool,
    pub key_ready: bool,
}

impl From<KeyStatus> for KeyStatusResponse {
    fn from(status: KeyStatus) -> Self {
        Self {
            using_default_key: status.using_default_key,
            default_key_available: status.default_key_available,
            key_ready: status.key_ready,
        }
    }
}

/// One dialogue turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnResponse {
    pub id: String,
    pub sender: Sender,
    pub text: String,
    pub created_at: String,
}

impl From<&ConversationTurn> for TurnResponse {
    fn from(turn: &ConversationTurn) -> Self {
        Self {
            id: turn.id().to_string(),
            sender: turn.sender(),
            text: turn.text().to_string(),
            created_at: turn.created_at().to_rfc3339(),
        }
    }
}

/// Full conversation snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationResponse {
    pub id: String,
    pub state: ConversationState,
    pub input_open: bool,
    pub turns: Vec<TurnResponse>,
    pub key: KeyStatusResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<PlanView>,
}

impl From<ConversationView> for ConversationResponse {
    fn from(view: ConversationView) -> Self {
        Self {
            id: view.id.to_string(),
            state: view.state,
            input_open: view.input_open,
            turns: view.turns.iter().map(TurnResponse::from).collect(),
            key: view.key.into(),
            plan: view.plan.as_ref().map(PlanView::from),
        }
    }
}

/// How a submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Continuation,
    Malformed,
    Finalized,
    Failed,
}

/// Result of one exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitMessageResponse {
    pub outcome: OutcomeKind,
    /// Parse or transport error detail for `malformed` / `failed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub appended: Vec<TurnResponse>,
    pub state: ConversationState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<PlanView>,
}

impl From<SubmitTurnResult> for SubmitMessageResponse {
    fn from(result: SubmitTurnResult) -> Self {
        let (outcome, detail) = match result.outcome {
            TurnOutcome::Continued => (OutcomeKind::Continuation, None),
            TurnOutcome::Malformed { reason } => (OutcomeKind::Malformed, Some(reason)),
            TurnOutcome::Finalized => (OutcomeKind::Finalized, None),
            TurnOutcome::Failed { error } => (OutcomeKind::Failed, Some(error)),
        };

        Self {
            outcome,
            detail,
            appended: result.appended.iter().map(TurnResponse::from).collect(),
            state: result.state,
            plan: result.plan.as_ref().map(PlanView::from),
        }
    }
}

/// Response for a reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetResponse {
    pub conversation_id: String,
}

/// One line of the shopping list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemView {
    pub name: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub total: f64,
    pub note: String,
    pub link: String,
}

impl From<&LineItem> for LineItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            name: item.name().to_string(),
            unit_price: item.unit_price(),
            quantity: item.quantity(),
            total: item.total(),
            note: item.note().to_string(),
            link: item.link().to_string(),
        }
    }
}

/// One category section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryView {
    pub category: String,
    pub label: String,
    pub items: Vec<LineItemView>,
    pub subtotal: f64,
}

/// The final plan as shown to the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanView {
    pub advice: String,
    pub categories: Vec<CategoryView>,
    pub grand_total: f64,
}

impl From<&ProjectPlan> for PlanView {
    fn from(plan: &ProjectPlan) -> Self {
        let categories = plan
            .sections()
            .map(|(category, items)| CategoryView {
                category: category.key().to_string(),
                label: category.label().to_string(),
                items: items.iter().map(LineItemView::from).collect(),
                subtotal: items.iter().map(LineItem::total).sum(),
            })
            .collect();

        Self {
            advice: plan.advice().to_string(),
            categories,
            grand_total: plan.grand_total(),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn plan_not_ready() -> Self {
        Self::new(ErrorCode::PlanNotReady, "No shopping list has been generated yet")
    }
}
