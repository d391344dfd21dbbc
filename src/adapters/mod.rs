//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Generative-language providers (Gemini, mock)
//! - `export` - Plan file exports (CSV)
//! - `http` - REST API (axum)

pub mod ai;
pub mod export;
pub mod http;
