//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `MAKERS_LIST` prefix and
//! nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use makers_list::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Model: {}", config.ai.model);
//! ```

mod ai;
mod error;
mod prompt;
mod server;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use prompt::PromptConfig;
pub use server::{Deployment, ServerConfig};

use serde::Deserialize;

use crate::adapters::ai::GeminiConfig;
use crate::domain::settings::KeyProvider;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// configuration (without a default API key).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Model service configuration
    #[serde(default)]
    pub ai: AiConfig,

    /// Instruction template source
    #[serde(default)]
    pub prompt: PromptConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `MAKERS_LIST` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `MAKERS_LIST__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `MAKERS_LIST__AI__DEFAULT_API_KEY=...` -> `ai.default_api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MAKERS_LIST")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }

    /// Build the key provider from the default key and the instruction template
    pub fn key_provider(&self) -> Result<KeyProvider, ConfigError> {
        let template = self.prompt.load_template()?;
        Ok(KeyProvider::new(self.ai.default_api_key.clone(), template))
    }

    /// Transport settings for the Gemini provider
    pub fn gemini_config(&self) -> GeminiConfig {
        let config = GeminiConfig::new()
            .with_model(&self.ai.model)
            .with_base_url(&self.ai.base_url)
            .with_instruction_delivery(self.ai.instruction_delivery);

        match self.ai.timeout() {
            Some(timeout) => config.with_timeout(timeout),
            None => config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::InstructionDelivery;
    use std::env;
    use std::sync::Mutex;
    use std::time::Duration;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "MAKERS_LIST__SERVER__PORT",
        "MAKERS_LIST__SERVER__ENVIRONMENT",
        "MAKERS_LIST__AI__DEFAULT_API_KEY",
        "MAKERS_LIST__AI__MODEL",
        "MAKERS_LIST__AI__TEMPERATURE",
        "MAKERS_LIST__AI__TIMEOUT_SECS",
        "MAKERS_LIST__AI__INSTRUCTION_DELIVERY",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.ai.model, "gemini-2.5-flash");
        assert!(config.ai.default_api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_ai_section() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("MAKERS_LIST__AI__DEFAULT_API_KEY", "AIza-test");
        env::set_var("MAKERS_LIST__AI__MODEL", "gemini-2.0-pro");
        env::set_var("MAKERS_LIST__AI__TEMPERATURE", "0.9");
        env::set_var("MAKERS_LIST__AI__TIMEOUT_SECS", "45");
        env::set_var("MAKERS_LIST__AI__INSTRUCTION_DELIVERY", "system_field");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.ai.has_default_key());
        assert_eq!(config.ai.model, "gemini-2.0-pro");
        assert!((config.ai.temperature - 0.9).abs() < f32::EPSILON);
        assert_eq!(config.ai.timeout(), Some(Duration::from_secs(45)));
        assert_eq!(
            config.ai.instruction_delivery,
            InstructionDelivery::SystemField
        );
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("MAKERS_LIST__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        assert!(result.unwrap().is_production());
    }

    #[test]
    fn test_out_of_range_temperature_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("MAKERS_LIST__AI__TEMPERATURE", "3.5");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidTemperature(3.5))
        );
    }

    #[test]
    fn test_key_provider_uses_default_key() {
        let config = AppConfig {
            ai: AiConfig {
                default_api_key: Some(secrecy::Secret::new("AIza-default".to_string())),
                ..Default::default()
            },
            ..Default::default()
        };

        let provider = config.key_provider().unwrap();
        assert!(provider.has_default_credential());
    }
}
