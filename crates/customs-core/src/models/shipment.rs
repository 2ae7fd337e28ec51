//! Shipment data extracted from invoice / packing-list OCR text.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Structured shipment data produced by the extraction engine.
///
/// Every field is provisional: the record is the initial draft handed to
/// the editing layer, which may overwrite anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentRecord {
    /// Customs / invoice reference token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,

    /// Document date exactly as printed (not normalized).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_date: Option<String>,

    /// Best-guess exporting entity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exporter_name: Option<String>,

    /// Best-guess importer / consignee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importer_name: Option<String>,

    /// Commodity lines. Never empty after extraction.
    pub line_items: Vec<LineItem>,
}

impl ShipmentRecord {
    /// True when extraction only produced the review placeholder item.
    pub fn has_only_placeholder(&self) -> bool {
        self.line_items.iter().all(|item| item.needs_review)
    }

    /// Total declared value across all line items.
    pub fn total_value(&self) -> Decimal {
        self.line_items.iter().map(|item| item.value).sum()
    }
}

/// A single commodity line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Local key for UI lists; not a business identifier.
    pub identifier: i64,

    /// Harmonized System tariff code, free-form at this stage.
    pub harmonized_code: String,

    /// Goods description.
    pub description: String,

    /// Quantity (unit not tracked).
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,

    /// Value (currency not tracked).
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,

    /// Synthesized placeholder that a human must review before submission.
    #[serde(default)]
    pub needs_review: bool,
}

impl LineItem {
    /// Whether this item differs from `other` only by its identifier.
    pub fn same_goods(&self, other: &LineItem) -> bool {
        self.harmonized_code == other.harmonized_code
            && self.description == other.description
            && self.quantity == other.quantity
            && self.value == other.value
            && self.needs_review == other.needs_review
    }
}

/// Time-derived identifier (epoch milliseconds) used to key line items.
pub fn timestamp_identifier() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item(code: &str, value: i64, needs_review: bool) -> LineItem {
        LineItem {
            identifier: 1,
            harmonized_code: code.to_string(),
            description: "Goods".to_string(),
            quantity: Decimal::ONE,
            value: Decimal::from(value),
            needs_review,
        }
    }

    #[test]
    fn test_serializes_camel_case_with_numeric_amounts() {
        let record = ShipmentRecord {
            reference_number: Some("INV-1".to_string()),
            document_date: None,
            exporter_name: None,
            importer_name: None,
            line_items: vec![item("6404.11.90", 15000, false)],
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["referenceNumber"], "INV-1");
        assert!(json.get("documentDate").is_none());
        assert_eq!(json["lineItems"][0]["harmonizedCode"], "6404.11.90");
        assert_eq!(json["lineItems"][0]["value"], 15000.0);
        assert_eq!(json["lineItems"][0]["quantity"], 1.0);
    }

    #[test]
    fn test_total_value_and_placeholder() {
        let record = ShipmentRecord {
            reference_number: None,
            document_date: None,
            exporter_name: None,
            importer_name: None,
            line_items: vec![item("6404.11.90", 100, false), item("0000.00.00", 0, true)],
        };
        assert_eq!(record.total_value(), Decimal::from(100));
        assert!(!record.has_only_placeholder());
    }

    #[test]
    fn test_same_goods_ignores_identifier() {
        let a = item("6109.10.00", 5000, false);
        let mut b = a.clone();
        b.identifier = 42;
        assert!(a.same_goods(&b));
        b.value = Decimal::ZERO;
        assert!(!a.same_goods(&b));
    }
}
