//! Shipment record assembly from the individual field detectors.

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use crate::models::config::ExtractionConfig;
use crate::models::shipment::{timestamp_identifier, ShipmentRecord};

use super::rules::{
    dates::extract_document_date,
    items::{classify, PLACEHOLDER_ITEM},
    parties::{extract_exporter, extract_importer, ExporterMatch},
    reference::extract_reference_number,
    Field,
};

/// Result of a shipment extraction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Extracted shipment data.
    pub record: ShipmentRecord,
    /// Things the user should look at before submitting.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for shipment document parsing.
///
/// Parsing is total: every input, including empty or binary-looking text,
/// yields a record with at least one line item.
pub trait ShipmentParser {
    /// Parse shipment data from OCR text.
    fn parse(&self, text: &str) -> ExtractionResult;
}

/// Rule-based parser running every detector over the same text.
#[derive(Debug, Clone)]
pub struct RuleBasedParser {
    /// Inputs with fewer non-whitespace characters skip the detectors.
    min_text_length: usize,
    /// Add a warning for each field without evidence.
    report_missing_fields: bool,
}

impl RuleBasedParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create a parser from extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            min_text_length: config.min_text_length,
            report_missing_fields: config.report_missing_fields,
        }
    }

    /// Set the minimum amount of text worth running detectors on.
    pub fn with_min_text_length(mut self, min_text_length: usize) -> Self {
        self.min_text_length = min_text_length;
        self
    }

    /// Set whether missing fields produce warnings.
    pub fn with_missing_field_warnings(mut self, report: bool) -> Self {
        self.report_missing_fields = report;
        self
    }

    fn has_enough_text(&self, text: &str) -> bool {
        text.chars().filter(|c| !c.is_whitespace()).take(self.min_text_length).count()
            >= self.min_text_length
    }

    fn note_missing<T>(&self, value: &Option<T>, field: Field, warnings: &mut Vec<String>) {
        if value.is_none() {
            debug!("No evidence for {}", field.name());
            if self.report_missing_fields {
                warnings.push(format!("Could not extract {}", field.name()));
            }
        }
    }
}

impl Default for RuleBasedParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ShipmentParser for RuleBasedParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        // std::time::Instant::now() traps on wasm32
        let start = Utc::now();
        let mut warnings = Vec::new();

        info!("Parsing shipment from {} characters of text", text.len());

        let scan = self.has_enough_text(text);
        if !scan {
            debug!("Text below {} characters, using placeholder only", self.min_text_length);
        }

        let reference_number = scan.then(|| extract_reference_number(text)).flatten();
        self.note_missing(&reference_number, Field::ReferenceNumber, &mut warnings);

        let document_date = scan.then(|| extract_document_date(text)).flatten();
        self.note_missing(&document_date, Field::DocumentDate, &mut warnings);

        let exporter_name = match scan.then(|| extract_exporter(text)).flatten() {
            Some(ExporterMatch::CompanyName(name)) => {
                warnings.push(format!("Exporter inferred from company name \"{}\"", name));
                Some(name)
            }
            Some(ExporterMatch::Labelled(name)) => Some(name),
            None => None,
        };
        self.note_missing(&exporter_name, Field::ExporterName, &mut warnings);

        let importer_name = scan.then(|| extract_importer(text)).flatten();
        self.note_missing(&importer_name, Field::ImporterName, &mut warnings);

        let template = if scan { classify(text) } else { &PLACEHOLDER_ITEM };
        debug!("Line item category: {}", template.category);
        if template.needs_review {
            warnings.push("No commodity detected; placeholder line item requires review".to_string());
        } else {
            warnings.push(format!(
                "Line item synthesized from {} keyword; quantity and value are not from the document",
                template.category
            ));
        }
        let line_items = vec![template.to_line_item(timestamp_identifier())];

        let record = ShipmentRecord {
            reference_number,
            document_date,
            exporter_name,
            importer_name,
            line_items,
        };

        debug!(
            "Extracted shipment {:?} with {} warnings",
            record.reference_number,
            warnings.len()
        );

        ExtractionResult {
            record,
            warnings,
            processing_time_ms: (Utc::now() - start).num_milliseconds().max(0) as u64,
        }
    }
}

/// Extract a shipment record from raw OCR text with default settings.
pub fn extract(raw_text: &str) -> ShipmentRecord {
    RuleBasedParser::new().parse(raw_text).record
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    const INVOICE: &str = r#"
        COMMERCIAL INVOICE
        Invoice No: INV-2024/001
        Date: 29-12-2024

        Exporter: PT. Sepatu Nusantara
        Consignee: Runners World Pte Ltd, Singapore

        Description            Qty     Amount
        Sports shoes, mesh     500     15,000.00 USD
    "#;

    #[test]
    fn test_parse_full_invoice() {
        let result = RuleBasedParser::new().parse(INVOICE);
        let record = result.record;

        assert_eq!(record.reference_number.as_deref(), Some("INV-2024/001"));
        assert_eq!(record.document_date.as_deref(), Some("29-12-2024"));
        assert_eq!(record.exporter_name.as_deref(), Some("PT. Sepatu Nusantara"));
        assert_eq!(
            record.importer_name.as_deref(),
            Some("Runners World Pte Ltd, Singapore")
        );
        assert_eq!(record.line_items.len(), 1);
        assert_eq!(record.line_items[0].harmonized_code, "6404.11.90");
        assert!(!record.has_only_placeholder());
    }

    #[test]
    fn test_total_on_empty_and_garbage() {
        for text in ["", "   \n\t ", "\u{0}\u{fffd}\u{1b}[0m", "::::....////"] {
            let record = extract(text);
            assert_eq!(record.line_items.len(), 1, "input {:?}", text);
            assert!(record.line_items[0].needs_review);
            assert_eq!(record.reference_number, None);
            assert_eq!(record.document_date, None);
            assert_eq!(record.exporter_name, None);
            assert_eq!(record.importer_name, None);
        }
    }

    #[test]
    fn test_repeatable_except_identifier() {
        let first = extract(INVOICE);
        let second = extract(INVOICE);

        assert_eq!(first.reference_number, second.reference_number);
        assert_eq!(first.document_date, second.document_date);
        assert_eq!(first.exporter_name, second.exporter_name);
        assert_eq!(first.importer_name, second.importer_name);
        assert_eq!(first.line_items.len(), second.line_items.len());
        assert!(first.line_items[0].same_goods(&second.line_items[0]));
    }

    #[test]
    fn test_string_fields_are_trimmed() {
        let record = extract("Exporter:   Kencana  \nImporter:\tBlue Ocean \r\n");
        assert_eq!(record.exporter_name.as_deref(), Some("Kencana"));
        assert_eq!(record.importer_name.as_deref(), Some("Blue Ocean"));
    }

    #[test]
    fn test_warnings() {
        let result = RuleBasedParser::new().parse("PT. GLOBAL TRADING CO");
        assert!(result.warnings.iter().any(|w| w.contains("company name")));
        assert!(result.warnings.iter().any(|w| w == "Could not extract referenceNumber"));
        assert!(result.warnings.iter().any(|w| w.contains("requires review")));

        let quiet = RuleBasedParser::new()
            .with_missing_field_warnings(false)
            .parse("PT. GLOBAL TRADING CO");
        assert!(!quiet.warnings.iter().any(|w| w.starts_with("Could not extract")));
    }

    #[test]
    fn test_min_text_length_skips_detectors() {
        let parser = RuleBasedParser::new().with_min_text_length(100);
        let result = parser.parse("Invoice No: A-1 shoes");

        assert_eq!(result.record.reference_number, None);
        assert!(result.record.line_items[0].needs_review);
        assert_eq!(result.record.line_items[0].value, Decimal::ZERO);
    }
}
