//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur during value construction or state changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes exposed to API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyMessage,

    // State errors
    ReplyInFlight,
    ConversationFinalized,
    CredentialMissing,
    PlanNotReady,
    SessionReset,

    // Infrastructure errors
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyMessage => "EMPTY_MESSAGE",
            ErrorCode::ReplyInFlight => "REPLY_IN_FLIGHT",
            ErrorCode::ConversationFinalized => "CONVERSATION_FINALIZED",
            ErrorCode::CredentialMissing => "CREDENTIAL_MISSING",
            ErrorCode::PlanNotReady => "PLAN_NOT_READY",
            ErrorCode::SessionReset => "SESSION_RESET",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}
