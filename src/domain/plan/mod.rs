//! Project plan domain module.
//!
//! The structured shopping list the conversation ends with: build advice
//! plus priced line items in three fixed categories.

mod category;
mod line_item;
mod project_plan;

pub use category::Category;
pub use line_item::LineItem;
pub use project_plan::ProjectPlan;
