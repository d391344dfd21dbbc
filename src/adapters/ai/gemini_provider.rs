//! Gemini Provider - Implementation of AIProvider for the Generative Language API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new()
//!     .with_model("gemini-2.5-flash")
//!     .with_instruction_delivery(InstructionDelivery::Prepend);
//!
//! let provider = GeminiProvider::new(config)?;
//! ```
//!
//! The API key is not part of the provider configuration: it arrives with
//! every `CompletionRequest`, since the user can switch keys between turns.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::conversation::{ConversationTurn, Sender};
use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, ProviderInfo, TokenUsage,
};

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1";

/// Default model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// How the instruction reaches the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstructionDelivery {
    /// Prefixed to the first user turn. Works on every API version.
    #[default]
    Prepend,
    /// Sent in the `systemInstruction` field.
    SystemField,
}

/// Configuration for the Gemini provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Model to use (e.g., "gemini-2.5-flash").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Instruction channel.
    pub instruction_delivery: InstructionDelivery,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GeminiConfig {
    /// Creates a configuration with default model and endpoint.
    pub fn new() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            instruction_delivery: InstructionDelivery::default(),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the instruction channel.
    pub fn with_instruction_delivery(mut self, delivery: InstructionDelivery) -> Self {
        self.instruction_delivery = delivery;
        self
    }
}

/// Gemini API provider implementation.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Creates a new Gemini provider with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self, AIError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AIError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the generateContent endpoint URL (without the key).
    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Converts our request to Gemini's format.
    ///
    /// User turns map to `user`, assistant turns to `model`. The local
    /// finalization acknowledgment is never sent.
    fn to_gemini_request(&self, request: &CompletionRequest) -> GeminiRequest {
        let mut contents: Vec<GeminiContent> = request
            .history
            .iter()
            .filter(|turn| !turn.is_finalization_ack())
            .map(to_gemini_content)
            .collect();

        let instruction = request.system_instruction.trim();
        let mut system_instruction = None;

        if !instruction.is_empty() {
            match self.config.instruction_delivery {
                InstructionDelivery::Prepend => {
                    if let Some(first_user) =
                        contents.iter_mut().find(|c| c.role.as_deref() == Some("user"))
                    {
                        first_user.prepend_instruction(instruction);
                    }
                }
                InstructionDelivery::SystemField => {
                    system_instruction = Some(GeminiContent::text(None, instruction));
                }
            }
        }

        GeminiRequest {
            contents,
            system_instruction,
            generation_config: GenerationConfig {
                temperature: request.temperature,
            },
        }
    }

    /// Sends a request.
    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, AIError> {
        let gemini_request = self.to_gemini_request(request);

        tracing::debug!(
            model = %self.config.model,
            contents = gemini_request.contents.len(),
            delivery = ?self.config.instruction_delivery,
            "Sending generateContent request"
        );

        self.client
            .post(self.generate_url())
            .query(&[("key", request.credential.expose_secret().as_str())])
            .json(&gemini_request)
            .send()
            .await
            .map_err(|e| {
                // The URL carries the key; keep it out of error text.
                let e = e.without_url();
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_secs: self.config.timeout.map_or(0, |t| t.as_secs()),
                    }
                } else if e.is_connect() {
                    AIError::network(format!("Connection failed: {}", e))
                } else {
                    AIError::network(e.to_string())
                }
            })
    }

    /// Parses the API response status and handles errors.
    async fn handle_response_status(&self, response: Response) -> Result<Response, AIError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        let message = service_error_message(&error_body).unwrap_or_else(|| status.to_string());

        tracing::warn!(status = status.as_u16(), %message, "Gemini request failed");

        Err(AIError::http(status.as_u16(), message))
    }

    /// Parses a response.
    async fn parse_response(&self, response: Response) -> Result<CompletionResponse, AIError> {
        let response = self.handle_response_status(response).await?;

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        let usage = gemini_response
            .usage_metadata
            .as_ref()
            .map(|u| TokenUsage::new(u.prompt_token_count, u.candidates_token_count));
        let model = gemini_response
            .model_version
            .clone()
            .unwrap_or_else(|| self.config.model.clone());

        let content = extract_reply(gemini_response)?;

        if let Some(ref usage) = usage {
            tracing::info!(
                model = %model,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "Gemini reply received"
            );
        }

        let mut completion = CompletionResponse::new(content, model);
        if let Some(usage) = usage {
            completion = completion.with_usage(usage);
        }
        Ok(completion)
    }
}

#[async_trait]
impl AIProvider for GeminiProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        if request.credential.expose_secret().trim().is_empty() {
            return Err(AIError::MissingCredential);
        }

        let response = self.send_request(&request).await?;
        self.parse_response(response).await
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("gemini", &self.config.model)
    }
}

fn to_gemini_content(turn: &ConversationTurn) -> GeminiContent {
    let role = match turn.sender() {
        Sender::User => "user",
        Sender::Assistant => "model",
    };
    GeminiContent::text(Some(role), turn.text())
}

/// Extracts `error.message` from an error body.
fn service_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<GeminiErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .and_then(|e| e.message)
        .filter(|m| !m.trim().is_empty())
}

/// Takes the first candidate's first text part.
fn extract_reply(response: GeminiResponse) -> Result<String, AIError> {
    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    match text {
        Some(text) => Ok(text),
        None => match response.prompt_feedback.and_then(|f| f.block_reason) {
            Some(reason) => Err(AIError::content_blocked(reason)),
            None => Err(AIError::EmptyResponse),
        },
    }
}

// ----- Gemini API Types -----

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

impl GeminiContent {
    fn text(role: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![GeminiPart {
                text: Some(text.into()),
            }],
        }
    }

    fn prepend_instruction(&mut self, instruction: &str) {
        if let Some(part) = self.parts.first_mut() {
            let text = part.text.take().unwrap_or_default();
            part.text = Some(format!(
                "[System instruction: {}]\n\nUser input: {}",
                instruction, text
            ));
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    prompt_feedback: Option<PromptFeedback>,
    usage_metadata: Option<UsageMetadata>,
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    error: Option<GeminiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: Option<String>,
}
