//! The terminal result of a planning conversation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::line_item::text_or_empty;
use super::{Category, LineItem};

/// Final shopping list with build advice.
///
/// # Invariants
///
/// - all three categories are present (possibly empty)
/// - immutable once constructed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawProjectPlan")]
pub struct ProjectPlan {
    #[serde(rename = "project_advice")]
    advice: String,
    equipment: Vec<LineItem>,
    tools: Vec<LineItem>,
    consumables: Vec<LineItem>,
}

impl ProjectPlan {
    /// Creates a plan from its parts.
    pub fn new(
        advice: impl Into<String>,
        equipment: Vec<LineItem>,
        tools: Vec<LineItem>,
        consumables: Vec<LineItem>,
    ) -> Self {
        Self {
            advice: advice.into(),
            equipment,
            tools,
            consumables,
        }
    }

    /// Build advice for the user.
    pub fn advice(&self) -> &str {
        &self.advice
    }

    /// Items of one category.
    pub fn items(&self, category: Category) -> &[LineItem] {
        match category {
            Category::Equipment => &self.equipment,
            Category::Tools => &self.tools,
            Category::Consumables => &self.consumables,
        }
    }

    /// Categories with their items, in export order.
    pub fn sections(&self) -> impl Iterator<Item = (Category, &[LineItem])> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.items(c)))
    }

    /// Number of items across all categories.
    pub fn item_count(&self) -> usize {
        self.sections().map(|(_, items)| items.len()).sum()
    }

    /// Sum of all line totals.
    pub fn grand_total(&self) -> f64 {
        self.sections()
            .flat_map(|(_, items)| items.iter())
            .map(LineItem::total)
            .sum()
    }
}

#[derive(Debug, Deserialize)]
struct RawProjectPlan {
    #[serde(default)]
    project_advice: Value,
    equipment: Vec<LineItem>,
    tools: Vec<LineItem>,
    consumables: Vec<LineItem>,
}

impl From<RawProjectPlan> for ProjectPlan {
    fn from(raw: RawProjectPlan) -> Self {
        Self {
            advice: text_or_empty(&raw.project_advice),
            equipment: raw.equipment,
            tools: raw.tools,
            consumables: raw.consumables,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_plan() -> ProjectPlan {
        ProjectPlan::new(
            "Start with a breadboard prototype.",
            vec![LineItem::new("3D printer", 8000.0, 1, "enclosure", "")],
            vec![],
            vec![
                LineItem::new("Arduino Nano", 150.0, 2, "core", ""),
                LineItem::new("PLA filament", 700.0, 1, "", ""),
            ],
        )
    }

    #[test]
    fn sections_follow_category_order() {
        let plan = sample_plan();
        let order: Vec<Category> = plan.sections().map(|(c, _)| c).collect();
        assert_eq!(order, Category::ALL.to_vec());
    }

    #[test]
    fn counts_and_totals_span_all_categories() {
        let plan = sample_plan();
        assert_eq!(plan.item_count(), 3);
        assert_eq!(plan.grand_total(), 8000.0 + 300.0 + 700.0);
    }

    #[test]
    fn deserializes_from_model_payload() {
        let plan: ProjectPlan = serde_json::from_value(json!({
            "project_advice": "Mind the polarity.",
            "equipment": [],
            "tools": [{"item": "Multimeter"}],
            "consumables": [],
            "extra": true
        }))
        .unwrap();

        assert_eq!(plan.advice(), "Mind the polarity.");
        assert_eq!(plan.items(Category::Tools)[0].name(), "Multimeter");
    }

    #[test]
    fn missing_advice_defaults_to_empty() {
        let plan: ProjectPlan =
            serde_json::from_value(json!({"equipment": [], "tools": [], "consumables": []}))
                .unwrap();
        assert_eq!(plan.advice(), "");
    }

    #[test]
    fn missing_category_is_rejected() {
        let result =
            serde_json::from_value::<ProjectPlan>(json!({"equipment": [], "tools": []}));
        assert!(result.is_err());
    }

    #[test]
    fn serializes_with_payload_keys() {
        let value = serde_json::to_value(sample_plan()).unwrap();
        assert_eq!(value["project_advice"], "Start with a breadboard prototype.");
        assert_eq!(value["consumables"].as_array().unwrap().len(), 2);
    }
}
