//! ExportPlan query handler.

use std::sync::Arc;

use thiserror::Error;

use crate::ports::{ExportedFile, PlanExporter};

use super::session::SharedSession;

/// Errors for plan export.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportPlanError {
    #[error("No shopping list has been generated yet")]
    NotReady,
}

/// Handler for reading and exporting the final plan.
pub struct ExportPlanHandler {
    session: SharedSession,
    exporter: Arc<dyn PlanExporter>,
}

impl ExportPlanHandler {
    pub fn new(session: SharedSession, exporter: Arc<dyn PlanExporter>) -> Self {
        Self { session, exporter }
    }

    /// Renders the plan through the configured exporter.
    pub async fn handle(&self) -> Result<ExportedFile, ExportPlanError> {
        let plan = {
            let session = self.session.lock().await;
            session.conversation().plan().cloned()
        }
        .ok_or(ExportPlanError::NotReady)?;

        Ok(self.exporter.export(&plan))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::export::CsvPlanExporter;
    use crate::application::handlers::conversation::PlannerSession;
    use crate::domain::conversation::Classification;
    use crate::domain::plan::{LineItem, ProjectPlan};
    use crate::domain::settings::{KeyProvider, KeySelection};
    use secrecy::Secret;

    #[tokio::test]
    async fn export_before_finalization_is_not_ready() {
        let handler = ExportPlanHandler::new(PlannerSession::shared(), Arc::new(CsvPlanExporter::new()));
        assert_eq!(handler.handle().await.unwrap_err(), ExportPlanError::NotReady);
    }

    #[tokio::test]
    async fn export_after_finalization_renders_plan() {
        let session = PlannerSession::shared();
        {
            let mut guard = session.lock().await;
            let config = KeyProvider::new(Some(Secret::new("k".to_string())), "t")
                .configuration(&KeySelection::default());
            let conversation = guard.conversation_mut();
            conversation.begin_submission("Robot", &config).unwrap();
            conversation
                .record_reply(Classification::Terminal(ProjectPlan::new(
                    "",
                    vec![],
                    vec![],
                    vec![LineItem::new("Arduino Nano", 150.0, 2, "", "")],
                )))
                .unwrap();
        }

        let file = ExportPlanHandler::new(session, Arc::new(CsvPlanExporter::new()))
            .handle()
            .await
            .unwrap();

        let text = String::from_utf8(file.bytes).unwrap();
        assert!(text.contains("Consumables,\"Arduino Nano\",150,2,300"));
    }
}
