//! Commodity line detection.
//!
//! This is keyword classification, not table parsing: the first catalogue
//! category whose keyword appears anywhere in the text contributes one
//! representative line item with canned figures. When nothing matches, a
//! zero-value placeholder flagged for review is emitted instead, so the
//! item list is never empty.

use rust_decimal::Decimal;

use crate::models::document::UNCLASSIFIED_HS_CODE;
use crate::models::shipment::LineItem;

/// Line item template synthesized for a detected commodity category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommodityTemplate {
    /// Category name, for logs.
    pub category: &'static str,
    /// Lowercase keywords; any one of them selects the category.
    pub keywords: &'static [&'static str],
    pub harmonized_code: &'static str,
    pub description: &'static str,
    pub quantity: i64,
    pub value: i64,
    pub needs_review: bool,
}

impl CommodityTemplate {
    /// Whether any keyword occurs in already-lowercased text.
    pub fn matches(&self, lowercase_text: &str) -> bool {
        self.keywords.iter().any(|kw| lowercase_text.contains(kw))
    }

    /// Instantiate the template with the given identifier.
    pub fn to_line_item(&self, identifier: i64) -> LineItem {
        LineItem {
            identifier,
            harmonized_code: self.harmonized_code.to_string(),
            description: self.description.to_string(),
            quantity: Decimal::from(self.quantity),
            value: Decimal::from(self.value),
            needs_review: self.needs_review,
        }
    }
}

/// Keyword categories, evaluated top to bottom.
pub const COMMODITY_CATALOGUE: &[CommodityTemplate] = &[
    CommodityTemplate {
        category: "footwear",
        keywords: &["shoes", "footwear"],
        harmonized_code: "6404.11.90",
        description: "SPORTS FOOTWEAR",
        quantity: 500,
        value: 15000,
        needs_review: false,
    },
    CommodityTemplate {
        category: "garment",
        keywords: &["garment", "shirt"],
        harmonized_code: "6109.10.00",
        description: "COTTON T-SHIRTS",
        quantity: 1000,
        value: 5000,
        needs_review: false,
    },
];

/// Fallback entry when no category keyword is present.
pub const PLACEHOLDER_ITEM: CommodityTemplate = CommodityTemplate {
    category: "placeholder",
    keywords: &[],
    harmonized_code: UNCLASSIFIED_HS_CODE,
    description: "DETECTED ITEM (Review Needed)",
    quantity: 1,
    value: 0,
    needs_review: true,
};

/// First catalogue entry matching `text`, or the placeholder.
pub fn classify(text: &str) -> &'static CommodityTemplate {
    let lowercase = text.to_lowercase();
    COMMODITY_CATALOGUE
        .iter()
        .find(|template| template.matches(&lowercase))
        .unwrap_or(&PLACEHOLDER_ITEM)
}

/// Detect line items. Always returns exactly one item.
pub fn detect_line_items(text: &str, identifier: i64) -> Vec<LineItem> {
    vec![classify(text).to_line_item(identifier)]
}
