//! A single purchasable entry.
//!
//! Model output is loosely typed, so every field is defaulted instead of
//! rejected: prices fall back to 0, quantities to 1, text to "".

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of the shopping list.
///
/// # Invariants
///
/// - `unit_price` is finite and `>= 0`
/// - `quantity` is `>= 1`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawLineItem")]
pub struct LineItem {
    #[serde(rename = "item")]
    name: String,
    unit_price: f64,
    quantity: u32,
    note: String,
    link: String,
}

impl LineItem {
    /// Creates a line item, applying the same defaulting as deserialization.
    pub fn new(
        name: impl Into<String>,
        unit_price: f64,
        quantity: u32,
        note: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            unit_price: sanitize_price(unit_price),
            quantity: quantity.max(1),
            note: note.into(),
            link: link.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    /// Unit price multiplied by quantity.
    pub fn total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// Wire shape of an item as the model emits it.
#[derive(Debug, Deserialize)]
struct RawLineItem {
    #[serde(default)]
    item: Value,
    #[serde(default)]
    unit_price: Value,
    #[serde(default)]
    quantity: Value,
    #[serde(default)]
    note: Value,
    #[serde(default)]
    link: Value,
}

impl From<RawLineItem> for LineItem {
    fn from(raw: RawLineItem) -> Self {
        Self {
            name: text_or_empty(&raw.item),
            unit_price: price_or_zero(&raw.unit_price),
            quantity: quantity_or_one(&raw.quantity),
            note: text_or_empty(&raw.note),
            link: text_or_empty(&raw.link),
        }
    }
}

/// Renders strings as-is and scalars via their JSON text; anything else is "".
pub(crate) fn text_or_empty(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn sanitize_price(price: f64) -> f64 {
    if price.is_finite() && price > 0.0 {
        price
    } else {
        0.0
    }
}

fn price_or_zero(value: &Value) -> f64 {
    numeric(value).map(sanitize_price).unwrap_or(0.0)
}

fn quantity_or_one(value: &Value) -> u32 {
    match numeric(value) {
        Some(q) if q.is_finite() && q >= 1.0 => q.trunc().min(f64::from(u32::MAX)) as u32,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> LineItem {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn reads_all_wire_fields() {
        let item = parse(json!({
            "item": "Arduino Nano",
            "unit_price": 150,
            "quantity": 2,
            "note": "core",
            "link": "http://example.test/nano"
        }));

        assert_eq!(item.name(), "Arduino Nano");
        assert_eq!(item.unit_price(), 150.0);
        assert_eq!(item.quantity(), 2);
        assert_eq!(item.note(), "core");
        assert_eq!(item.link(), "http://example.test/nano");
        assert_eq!(item.total(), 300.0);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let item = parse(json!({}));

        assert_eq!(item.name(), "");
        assert_eq!(item.unit_price(), 0.0);
        assert_eq!(item.quantity(), 1);
        assert_eq!(item.note(), "");
        assert_eq!(item.link(), "");
    }

    #[test]
    fn null_and_garbage_numbers_take_defaults() {
        let item = parse(json!({"unit_price": null, "quantity": "lots"}));
        assert_eq!(item.unit_price(), 0.0);
        assert_eq!(item.quantity(), 1);
    }

    #[test]
    fn negative_price_and_zero_quantity_are_clamped() {
        let item = parse(json!({"unit_price": -5, "quantity": 0}));
        assert_eq!(item.unit_price(), 0.0);
        assert_eq!(item.quantity(), 1);
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let item = parse(json!({"unit_price": "12.5", "quantity": " 4 "}));
        assert_eq!(item.unit_price(), 12.5);
        assert_eq!(item.quantity(), 4);
    }

    #[test]
    fn fractional_quantity_is_truncated() {
        let item = parse(json!({"quantity": 2.7}));
        assert_eq!(item.quantity(), 2);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let item = parse(json!({"item": "Wire", "color": "red"}));
        assert_eq!(item.name(), "Wire");
    }

    #[test]
    fn non_object_item_is_rejected() {
        assert!(serde_json::from_value::<LineItem>(json!("just a string")).is_err());
    }

    #[test]
    fn serializes_with_wire_keys() {
        let item = LineItem::new("LED", 3.0, 10, "red", "");
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["item"], "LED");
        assert_eq!(value["unit_price"], 3.0);
        assert_eq!(value["quantity"], 10);
    }
}
