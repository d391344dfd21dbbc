//! Plan Exporter Port - Converts a finished plan into a downloadable file.
//!
//! The HTTP layer depends on this trait; `CsvPlanExporter` provides the
//! spreadsheet implementation.

use serde::{Deserialize, Serialize};

use crate::domain::plan::ProjectPlan;

/// Port for exporting a plan.
///
/// # Contract
///
/// Implementations must:
/// - Be infallible for any plan
/// - Be deterministic (same plan, same bytes)
/// - Keep category order
pub trait PlanExporter: Send + Sync {
    /// Renders the plan as a file.
    fn export(&self, plan: &ProjectPlan) -> ExportedFile;
}

/// A rendered export ready to be sent to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    /// Suggested download filename.
    pub filename: String,
    /// MIME content type.
    pub content_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl ExportedFile {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Value for a `Content-Disposition` header.
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename)
    }
}

/// Export formats supported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Csv,
}

impl ExportFormat {
    /// Get the MIME content type for this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
        }
    }
}
