//! Instruction template configuration

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::settings::DEFAULT_INSTRUCTION_TEMPLATE;

use super::error::{ConfigError, ValidationError};

/// Instruction template configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PromptConfig {
    /// File overriding the built-in template
    pub template_path: Option<PathBuf>,
}

impl PromptConfig {
    /// Load the instruction template, falling back to the built-in one
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::TemplateRead` if the file cannot be read and
    /// `ValidationError::EmptyPromptTemplate` if it holds only whitespace.
    pub fn load_template(&self) -> Result<String, ConfigError> {
        let Some(path) = &self.template_path else {
            return Ok(DEFAULT_INSTRUCTION_TEMPLATE.to_string());
        };

        let template = std::fs::read_to_string(path).map_err(|source| ConfigError::TemplateRead {
            path: path.clone(),
            source,
        })?;

        if template.trim().is_empty() {
            return Err(ValidationError::EmptyPromptTemplate.into());
        }

        tracing::info!(path = %path.display(), "Loaded instruction template override");
        Ok(template)
    }
}
