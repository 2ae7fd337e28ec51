//! Editable customs declaration draft.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::shipment::{timestamp_identifier, LineItem, ShipmentRecord};

/// Harmonized code used for items that have not been classified yet.
pub const UNCLASSIFIED_HS_CODE: &str = "0000.00.00";

/// Default declaration type (export declaration).
pub const DEFAULT_DOCUMENT_TYPE: &str = "PEB";

/// A customs declaration being edited by a user.
///
/// Seeded from a [`ShipmentRecord`] and then freely overwritten.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentDraft {
    /// Customs application / reference number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,

    /// Customs office as "<code> - <name>", e.g. "040300 - KPPBC Tanjung Priok".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customs_office: Option<String>,

    /// Declaration type code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,

    /// Document date as printed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_date: Option<String>,

    /// Exporter name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exporter: Option<String>,

    /// Importer / consignee name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub importer: Option<String>,

    /// Commodity lines.
    pub line_items: Vec<LineItem>,
}

impl DocumentDraft {
    /// Seed a draft from extracted shipment data.
    pub fn from_record(record: ShipmentRecord) -> Self {
        Self {
            reference_number: record.reference_number,
            customs_office: None,
            document_type: Some(DEFAULT_DOCUMENT_TYPE.to_string()),
            document_date: record.document_date,
            exporter: record.exporter_name,
            importer: record.importer_name,
            line_items: record.line_items,
        }
    }

    /// Declaration type, falling back to the export declaration.
    pub fn document_type(&self) -> &str {
        self.document_type
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(DEFAULT_DOCUMENT_TYPE)
    }

    /// Customs office code (the part before " - "), if any.
    pub fn customs_office_code(&self) -> Option<&str> {
        self.customs_office
            .as_deref()
            .map(|office| office.split(" - ").next().unwrap_or(office).trim())
            .filter(|code| !code.is_empty())
    }

    /// Append a blank, unclassified item and return its identifier.
    pub fn add_item(&mut self) -> i64 {
        let identifier = self.next_identifier();
        self.line_items.push(LineItem {
            identifier,
            harmonized_code: UNCLASSIFIED_HS_CODE.to_string(),
            description: "New Item Description".to_string(),
            quantity: Decimal::ZERO,
            value: Decimal::ZERO,
            needs_review: false,
        });
        identifier
    }

    /// Remove an item by identifier. Returns whether anything was removed.
    pub fn remove_item(&mut self, identifier: i64) -> bool {
        let before = self.line_items.len();
        self.line_items.retain(|item| item.identifier != identifier);
        self.line_items.len() != before
    }

    fn next_identifier(&self) -> i64 {
        let now = timestamp_identifier();
        match self.line_items.iter().map(|item| item.identifier).max() {
            Some(max) if max >= now => max
                .checked_add(1)
                .unwrap_or_else(|| self.smallest_unused_identifier()),
            _ => now,
        }
    }

    // Only reached when an imported draft already holds i64::MAX.
    fn smallest_unused_identifier(&self) -> i64 {
        let used: HashSet<i64> = self.line_items.iter().map(|item| item.identifier).collect();
        (1..).find(|id| !used.contains(id)).unwrap_or_default()
    }
}

impl From<ShipmentRecord> for DocumentDraft {
    fn from(record: ShipmentRecord) -> Self {
        Self::from_record(record)
    }
}
