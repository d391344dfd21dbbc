//! Spreadsheet export of the final plan.
//!
//! Output layout:
//!
//! ```text
//! \u{FEFF}Category,Name,Unit Price,Quantity,Total,Note,Link
//! Consumables,"Arduino Nano",150,2,300,"core","http://..."
//! ```
//!
//! Text columns are always quoted with inner quotes doubled. The BOM lets
//! spreadsheet tools detect UTF-8.

use std::fmt::Write;

use crate::domain::plan::{LineItem, ProjectPlan};
use crate::ports::{ExportFormat, ExportedFile, PlanExporter};

/// Download filename for the exported list.
pub const EXPORT_FILENAME: &str = "makers_project_list.csv";

const BOM: char = '\u{FEFF}';
const HEADER: &str = "Category,Name,Unit Price,Quantity,Total,Note,Link";

/// Renders a plan as CSV.
#[derive(Debug, Clone, Default)]
pub struct CsvPlanExporter;

impl CsvPlanExporter {
    pub fn new() -> Self {
        Self
    }

    /// Renders the CSV text (BOM included).
    pub fn render(&self, plan: &ProjectPlan) -> String {
        let mut out = String::new();
        out.push(BOM);
        out.push_str(HEADER);
        out.push('\n');

        for (category, items) in plan.sections() {
            for item in items {
                write_row(&mut out, category.label(), item);
            }
        }

        out
    }
}

impl PlanExporter for CsvPlanExporter {
    fn export(&self, plan: &ProjectPlan) -> ExportedFile {
        let bytes = self.render(plan).into_bytes();

        tracing::debug!(
            items = plan.item_count(),
            bytes = bytes.len(),
            "Rendered plan export"
        );

        ExportedFile::new(EXPORT_FILENAME, ExportFormat::Csv.content_type(), bytes)
    }
}

fn write_row(out: &mut String, label: &str, item: &LineItem) {
    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "{},{},{},{},{},{},{}",
        label,
        quoted(item.name()),
        item.unit_price(),
        item.quantity(),
        item.total(),
        quoted(item.note()),
        quoted(item.link()),
    );
}

fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
