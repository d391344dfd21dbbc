//! SelectKey command handler and key status query.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::ValidationError;
use crate::domain::settings::{KeyProvider, KeySelection};

use super::session::{PlannerSession, SharedSession};

/// Command to change which API key is used.
#[derive(Debug, Clone)]
pub struct SelectKeyCommand {
    pub use_default: bool,
    /// New custom key. `None` leaves the field empty when switching away
    /// from the default, otherwise keeps the current custom key.
    pub api_key: Option<String>,
}

/// Errors for key selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectKeyError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Readiness of the key used for the next turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyStatus {
    pub using_default_key: bool,
    pub default_key_available: bool,
    /// A non-empty credential will be sent with the next turn.
    pub key_ready: bool,
}

impl KeyStatus {
    pub(crate) fn of(session: &PlannerSession, key_provider: &KeyProvider) -> Self {
        let selection = session.key_selection();
        let config = key_provider.configuration(selection);
        Self {
            using_default_key: selection.uses_default(),
            default_key_available: key_provider.has_default_credential(),
            key_ready: config.has_credential(),
        }
    }
}

/// Handler for key selection.
pub struct SelectKeyHandler {
    session: SharedSession,
    key_provider: Arc<KeyProvider>,
}

impl SelectKeyHandler {
    pub fn new(session: SharedSession, key_provider: Arc<KeyProvider>) -> Self {
        Self {
            session,
            key_provider,
        }
    }

    /// Returns the current key status.
    pub async fn status(&self) -> KeyStatus {
        let session = self.session.lock().await;
        KeyStatus::of(&session, &self.key_provider)
    }

    /// Applies a new selection. Takes effect on the next turn.
    pub async fn handle(&self, cmd: SelectKeyCommand) -> Result<KeyStatus, SelectKeyError> {
        let mut session = self.session.lock().await;

        let selection = match (cmd.use_default, cmd.api_key) {
            (true, Some(key)) if !key.trim().is_empty() => {
                return Err(ValidationError::invalid_format(
                    "api_key",
                    "must be omitted when the default key is selected",
                )
                .into());
            }
            (true, _) => KeySelection::default_key(),
            (false, Some(key)) => KeySelection::custom(key),
            (false, None) if session.key_selection().uses_default() => KeySelection::custom(""),
            (false, None) => session.key_selection().clone(),
        };

        session.set_key_selection(selection);
        let status = KeyStatus::of(&session, &self.key_provider);

        tracing::info!(
            using_default_key = status.using_default_key,
            key_ready = status.key_ready,
            "API key selection changed"
        );

        Ok(status)
    }
}
