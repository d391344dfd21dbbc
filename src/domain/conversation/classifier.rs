//! Reply classification and plan extraction.
//!
//! Decides whether a model reply is the final shopping list or just another
//! dialogue message. Anything that cannot be turned into a plan degrades to
//! dialogue; nothing here is surfaced as an error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::domain::plan::{Category, ProjectPlan};

/// A fenced block tagged `json` holding a single top-level object.
static JSON_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"```json\s*(\{[\s\S]*?\})\s*```").expect("fence pattern is valid")
});

const FENCE: &str = "```";

/// What a model reply turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// An ordinary dialogue message (usually another clarifying question).
    Continuation(String),
    /// The final structured result.
    Terminal(ProjectPlan),
    /// Looked like the final result but could not be parsed into a plan.
    /// Shown to the user as dialogue.
    Malformed { text: String, reason: String },
}

impl Classification {
    /// Text to append as an assistant turn, if this is not a terminal result.
    pub fn dialogue_text(&self) -> Option<&str> {
        match self {
            Classification::Continuation(text) => Some(text),
            Classification::Malformed { text, .. } => Some(text),
            Classification::Terminal(_) => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Classification::Terminal(_))
    }
}

/// Classifies raw model replies.
#[derive(Debug, Clone, Default)]
pub struct TurnClassifier;

impl TurnClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classifies a raw reply.
    ///
    /// # Steps
    /// 1. Trim
    /// 2. Unwrap a ```` ```json ```` fence if the reply starts with a fence
    /// 3. Require a leading `{`
    /// 4. Parse JSON
    /// 5. Require `equipment`, `tools` and `consumables`
    pub fn classify(&self, raw: &str) -> Classification {
        let trimmed = raw.trim();

        let candidate = if trimmed.starts_with(FENCE) {
            match self.extract_fenced_object(trimmed) {
                Some(inner) => inner,
                None => return Classification::Continuation(trimmed.to_string()),
            }
        } else {
            trimmed
        };

        if !candidate.starts_with('{') {
            return Classification::Continuation(trimmed.to_string());
        }

        let value: Value = match serde_json::from_str(candidate) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Structured-looking reply failed to parse: {}", e);
                return Classification::Malformed {
                    text: trimmed.to_string(),
                    reason: e.to_string(),
                };
            }
        };

        let missing = self.missing_categories(&value);
        if !missing.is_empty() {
            tracing::debug!(
                ?missing,
                keys = ?value.as_object().map(|o| o.keys().cloned().collect::<Vec<_>>()),
                "Reply object lacks category keys, treating as dialogue"
            );
            return Classification::Continuation(trimmed.to_string());
        }

        match serde_json::from_value::<ProjectPlan>(value) {
            Ok(plan) => Classification::Terminal(plan),
            Err(e) => {
                tracing::warn!("Reply has all categories but an unusable shape: {}", e);
                Classification::Malformed {
                    text: trimmed.to_string(),
                    reason: e.to_string(),
                }
            }
        }
    }

    fn extract_fenced_object<'a>(&self, s: &'a str) -> Option<&'a str> {
        JSON_FENCE
            .captures(s)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Category keys that are absent or null. Key names must match exactly.
    fn missing_categories(&self, value: &Value) -> Vec<&'static str> {
        Category::ALL
            .iter()
            .map(Category::key)
            .filter(|key| value.get(*key).map_or(true, Value::is_null))
            .collect()
    }
}
