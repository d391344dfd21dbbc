//! Credential selection and the per-turn configuration derived from it.

use secrecy::{ExposeSecret, Secret};

use super::prompt;

/// Which credential the user wants to use.
///
/// Starts on the service-provided default. Supplying a custom key switches
/// the default off; switching back to the default discards the custom key.
#[derive(Debug, Clone)]
pub struct KeySelection {
    use_default: bool,
    custom_key: Secret<String>,
}

impl Default for KeySelection {
    fn default() -> Self {
        Self::default_key()
    }
}

impl KeySelection {
    /// Selects the service-provided default credential.
    pub fn default_key() -> Self {
        Self {
            use_default: true,
            custom_key: Secret::new(String::new()),
        }
    }

    /// Selects a user-supplied credential.
    pub fn custom(key: impl Into<String>) -> Self {
        Self {
            use_default: false,
            custom_key: Secret::new(key.into().trim().to_string()),
        }
    }

    /// Returns true if the default credential is selected.
    pub fn uses_default(&self) -> bool {
        self.use_default
    }

    /// Returns true if a non-empty custom key has been entered.
    pub fn has_custom_key(&self) -> bool {
        !self.custom_key.expose_secret().is_empty()
    }
}

/// Everything the controller needs to issue a turn.
#[derive(Debug, Clone)]
pub struct Configuration {
    credential: Secret<String>,
    instruction_template: String,
    using_default_credential: bool,
}

impl Configuration {
    /// Creates a configuration directly.
    pub fn new(
        credential: Secret<String>,
        instruction_template: impl Into<String>,
        using_default_credential: bool,
    ) -> Self {
        Self {
            credential,
            instruction_template: instruction_template.into(),
            using_default_credential,
        }
    }

    /// The selected credential.
    pub fn credential(&self) -> &Secret<String> {
        &self.credential
    }

    /// Returns true if the credential is usable for a request.
    pub fn has_credential(&self) -> bool {
        !self.credential.expose_secret().trim().is_empty()
    }

    /// The raw instruction template.
    pub fn instruction_template(&self) -> &str {
        &self.instruction_template
    }

    /// Template plus the final-output directive, as sent to the model.
    pub fn full_instruction(&self) -> String {
        prompt::full_instruction(&self.instruction_template)
    }

    pub fn using_default_credential(&self) -> bool {
        self.using_default_credential
    }
}

/// Supplies the instruction template and picks the credential for a
/// [`KeySelection`].
#[derive(Debug, Clone)]
pub struct KeyProvider {
    default_credential: Option<Secret<String>>,
    instruction_template: String,
}

impl KeyProvider {
    /// Creates a provider with an optional default credential.
    pub fn new(
        default_credential: Option<Secret<String>>,
        instruction_template: impl Into<String>,
    ) -> Self {
        Self {
            default_credential,
            instruction_template: instruction_template.into(),
        }
    }

    /// Creates a provider using the built-in template.
    pub fn with_default_template(default_credential: Option<Secret<String>>) -> Self {
        Self::new(default_credential, prompt::DEFAULT_INSTRUCTION_TEMPLATE)
    }

    /// Returns true if a non-empty default credential was configured.
    pub fn has_default_credential(&self) -> bool {
        self.default_credential
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Computes the configuration for the given selection.
    pub fn configuration(&self, selection: &KeySelection) -> Configuration {
        let credential = if selection.use_default {
            self.default_credential
                .clone()
                .unwrap_or_else(|| Secret::new(String::new()))
        } else {
            selection.custom_key.clone()
        };

        Configuration::new(
            credential,
            self.instruction_template.clone(),
            selection.use_default,
        )
    }
}
