//! AI Provider Port - Interface for the generative-language service.
//!
//! The conversation handlers talk to the model only through this port, so
//! the transport can be swapped for a mock in tests.
//!
//! # Design
//!
//! - One request per call, no streaming, no retry
//! - The credential travels with each request (it can change between turns)
//! - Distinct error variants for transport, refusal and empty replies

use async_trait::async_trait;
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use crate::domain::conversation::ConversationTurn;

/// Port for model interactions.
#[async_trait]
pub trait AIProvider: Send + Sync {
    /// Sends the dialogue and returns the model's reply text.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError>;

    /// Get provider information (name, model).
    fn provider_info(&self) -> ProviderInfo;
}

/// Request for one model reply.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Credential for this call. Must be non-empty.
    pub credential: Secret<String>,
    /// Instruction guiding the model (template plus output directive).
    pub system_instruction: String,
    /// Ordered turns, newest user turn last.
    pub history: Vec<ConversationTurn>,
    /// Sampling temperature.
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(
        credential: Secret<String>,
        system_instruction: impl Into<String>,
        history: Vec<ConversationTurn>,
    ) -> Self {
        Self {
            credential,
            system_instruction: system_instruction.into(),
            history,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Sets the temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Temperature used when none is configured.
pub const DEFAULT_TEMPERATURE: f32 = 0.5;

/// Reply from the model.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Reply text, trimmed.
    pub content: String,
    /// Model that produced the reply.
    pub model: String,
    /// Token usage, when the service reports it.
    pub usage: Option<TokenUsage>,
}

impl CompletionResponse {
    pub fn new(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model: model.into(),
            usage: None,
        }
    }

    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = Some(usage);
        self
    }
}

/// Token usage reported by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// Provider information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "gemini").
    pub name: String,
    /// Model identifier.
    pub model: String,
}

impl ProviderInfo {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// AI provider errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AIError {
    /// No credential was supplied; nothing was sent.
    #[error("no API key configured")]
    MissingCredential,

    /// The service answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Http {
        /// Status code.
        status: u16,
        /// Service error message, or the status line.
        message: String,
    },

    /// The service refused to answer.
    #[error("content blocked: {reason}")]
    ContentBlocked {
        /// Block reason reported by the service.
        reason: String,
    },

    /// The reply had no usable candidate.
    #[error("empty response from model")]
    EmptyResponse,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),
}

impl AIError {
    /// Creates an HTTP status error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates a content blocked error.
    pub fn content_blocked(reason: impl Into<String>) -> Self {
        Self::ContentBlocked {
            reason: reason.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
