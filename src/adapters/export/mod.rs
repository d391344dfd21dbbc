//! Export adapters.
//!
//! - `CsvPlanExporter` - Spreadsheet download of the final plan

mod csv_exporter;

pub use csv_exporter::{CsvPlanExporter, EXPORT_FILENAME};
