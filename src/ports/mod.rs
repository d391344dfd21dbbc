//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - Generative-language service used for every dialogue turn
//! - `PlanExporter` - Renders the finished plan as a downloadable file

mod ai_provider;
mod plan_exporter;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, ProviderInfo, TokenUsage,
    DEFAULT_TEMPERATURE,
};
pub use plan_exporter::{ExportFormat, ExportedFile, PlanExporter};
