//! Shopping list categories.

use serde::{Deserialize, Serialize};

/// One of the three fixed sections of a project plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Machines the maker needs access to (3D printer, laser cutter).
    Equipment,
    /// Hand tools.
    Tools,
    /// Parts and materials used up by the build.
    Consumables,
}

impl Category {
    /// All categories in presentation and export order.
    pub const ALL: [Category; 3] = [Category::Equipment, Category::Tools, Category::Consumables];

    /// Human-readable label used in exports.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Equipment => "Equipment",
            Category::Tools => "Tools",
            Category::Consumables => "Consumables",
        }
    }

    /// Key of this category in the model's JSON payload.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Equipment => "equipment",
            Category::Tools => "tools",
            Category::Consumables => "consumables",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_is_equipment_tools_consumables() {
        assert_eq!(
            Category::ALL,
            [Category::Equipment, Category::Tools, Category::Consumables]
        );
    }

    #[test]
    fn serializes_to_payload_key() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.key()));
        }
    }
}
