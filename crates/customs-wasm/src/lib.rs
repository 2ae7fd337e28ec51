//! WASM bindings for customs declaration field extraction.
//!
//! Lets the browser dashboard run extraction, draft validation and payload
//! building client-side, on text produced by its own OCR step.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use customs_core::extraction::{RuleBasedParser, ShipmentParser};
use customs_core::models::config::ExportDefaults;
use customs_core::models::document::DocumentDraft;
use customs_core::models::shipment::ShipmentRecord;

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn draft_from_js(draft: JsValue) -> Result<DocumentDraft, JsValue> {
    serde_wasm_bindgen::from_value(draft).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Extract shipment data from raw OCR text.
///
/// Never fails on content: missing fields are simply absent from the result.
#[wasm_bindgen]
pub fn extract_shipment_from_text(text: &str) -> Result<JsValue, JsValue> {
    to_js(&customs_core::extract(text))
}

/// Seed an editable declaration draft from raw OCR text.
#[wasm_bindgen]
pub fn draft_from_text(text: &str) -> Result<JsValue, JsValue> {
    to_js(&DocumentDraft::from(customs_core::extract(text)))
}

/// Validate a declaration draft, returning the list of issues.
#[wasm_bindgen]
pub fn validate_draft(draft: JsValue) -> Result<JsValue, JsValue> {
    let draft = draft_from_js(draft)?;
    to_js(&customs_core::validate_document(&draft))
}

/// Build the direct-export job payload for a draft.
///
/// `defaults` may be `undefined`, in which case the built-in defaults apply.
#[wasm_bindgen]
pub fn build_payload(draft: JsValue, defaults: JsValue) -> Result<JsValue, JsValue> {
    let draft = draft_from_js(draft)?;
    let defaults: ExportDefaults = if defaults.is_undefined() || defaults.is_null() {
        ExportDefaults::default()
    } else {
        serde_wasm_bindgen::from_value(defaults).map_err(|e| JsValue::from_str(&e.to_string()))?
    };

    to_js(&customs_core::build_payload(&draft, &defaults))
}

/// Shipment extractor class for browser use.
#[wasm_bindgen]
pub struct ShipmentExtractor {
    parser: RuleBasedParser,
}

#[wasm_bindgen]
impl ShipmentExtractor {
    /// Create a new shipment extractor.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: RuleBasedParser::new(),
        }
    }

    /// Configure warnings for fields that were not found.
    #[wasm_bindgen]
    pub fn set_report_missing_fields(&mut self, report: bool) {
        self.parser = self.parser.clone().with_missing_field_warnings(report);
    }

    /// Extract shipment data from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.parser.parse(text).record)
    }

    /// Get extraction result with warnings and timing.
    #[wasm_bindgen]
    pub fn extract_with_metadata(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.parser.parse(text))
    }
}

impl Default for ShipmentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Draft editing helpers that keep line item identifiers unique.
#[wasm_bindgen]
pub struct DraftEditor;

#[wasm_bindgen]
impl DraftEditor {
    /// Append a blank line item and return the updated draft.
    #[wasm_bindgen]
    pub fn add_item(draft: JsValue) -> Result<JsValue, JsValue> {
        let mut draft = draft_from_js(draft)?;
        draft.add_item();
        to_js(&draft)
    }

    /// Remove the line item with the given identifier and return the updated draft.
    #[wasm_bindgen]
    pub fn remove_item(draft: JsValue, identifier: f64) -> Result<JsValue, JsValue> {
        let mut draft = draft_from_js(draft)?;
        draft.remove_item(identifier as i64);
        to_js(&draft)
    }

    /// Total declared value of the record's line items.
    #[wasm_bindgen]
    pub fn total_value(record: JsValue) -> Result<f64, JsValue> {
        let record: ShipmentRecord =
            serde_wasm_bindgen::from_value(record).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(record.total_value().to_string().parse().unwrap_or(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const TEXT: &str = "Invoice No: INV-9\nDate: 01/02/2024\nExporter: PT ABC\ncotton shirt";

    #[wasm_bindgen_test]
    fn test_extract_shipment_from_text() {
        let value = extract_shipment_from_text(TEXT).unwrap();
        let record: ShipmentRecord = serde_wasm_bindgen::from_value(value).unwrap();

        assert_eq!(record.reference_number.as_deref(), Some("INV-9"));
        assert_eq!(record.document_date.as_deref(), Some("01/02/2024"));
        assert_eq!(record.line_items[0].harmonized_code, "6109.10.00");
    }

    #[wasm_bindgen_test]
    fn test_validate_empty_draft() {
        let draft = to_js(&DocumentDraft::default()).unwrap();
        let issues: Vec<customs_core::ValidationIssue> =
            serde_wasm_bindgen::from_value(validate_draft(draft).unwrap()).unwrap();

        assert!(issues.iter().any(|i| i.field == "referenceNumber"));
        assert!(issues.iter().any(|i| i.field == "lineItems"));
    }

    #[wasm_bindgen_test]
    fn test_build_payload_with_default_settings() {
        let draft = draft_from_text(TEXT).unwrap();
        let payload: customs_core::DirectExportJobPayload =
            serde_wasm_bindgen::from_value(build_payload(draft, JsValue::UNDEFINED).unwrap())
                .unwrap();

        assert_eq!(payload.customs_code, "040300");
        assert_eq!(payload.invoices[0].invoice_no, "INV-9");
    }

    #[wasm_bindgen_test]
    fn test_extractor_class() {
        let mut extractor = ShipmentExtractor::new();
        extractor.set_report_missing_fields(false);
        let record: ShipmentRecord =
            serde_wasm_bindgen::from_value(extractor.extract(TEXT).unwrap()).unwrap();
        assert_eq!(record.exporter_name.as_deref(), Some("PT ABC"));
    }

    #[derive(serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Metadata {
        record: ShipmentRecord,
        warnings: Vec<String>,
        processing_time_ms: u64,
    }

    #[wasm_bindgen_test]
    fn test_extract_with_metadata() {
        let extractor = ShipmentExtractor::new();
        let value = extractor.extract_with_metadata(TEXT).unwrap();
        let metadata: Metadata = serde_wasm_bindgen::from_value(value).unwrap();

        assert_eq!(metadata.record.reference_number.as_deref(), Some("INV-9"));
        assert!(metadata.warnings.iter().any(|w| w.contains("importerName")));
        assert!(metadata.processing_time_ms < 60_000);
    }

    #[wasm_bindgen_test]
    fn test_draft_editor_add_item() {
        let draft = draft_from_text(TEXT).unwrap();
        let edited: DocumentDraft =
            serde_wasm_bindgen::from_value(DraftEditor::add_item(draft).unwrap()).unwrap();
        assert_eq!(edited.line_items.len(), 2);
        assert_ne!(edited.line_items[0].identifier, edited.line_items[1].identifier);
    }
}
