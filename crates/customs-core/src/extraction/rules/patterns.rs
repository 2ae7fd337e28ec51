//! Rule table and compiled patterns for shipment document extraction.

use lazy_static::lazy_static;
use regex::Regex;

use super::{Capture, Delimiter, Field, FieldRule};

// Reference number: "Invoice No: INV-2024/001", "Ref. 88/A"
pub const REFERENCE_RULE: FieldRule = FieldRule {
    field: Field::ReferenceNumber,
    labels: &["Invoice No", "INV", "Ref", "No"],
    delimiter: Delimiter::Punctuation,
    capture: Capture::ReferenceToken,
};

// Document date: "Date: 29-12-2024", "Tanggal. 1/2/24"
pub const DATE_RULE: FieldRule = FieldRule {
    field: Field::DocumentDate,
    labels: &["Date", "Tanggal"],
    delimiter: Delimiter::Punctuation,
    capture: Capture::NumericDate,
};

// Exporter, explicit label only. Unlabelled company names are tier 2.
pub const EXPORTER_RULE: FieldRule = FieldRule {
    field: Field::ExporterName,
    labels: &["Exporter"],
    delimiter: Delimiter::PunctuationOrSpace,
    capture: Capture::RestOfLine,
};

// Importer / consignee / bill-to party.
pub const IMPORTER_RULE: FieldRule = FieldRule {
    field: Field::ImporterName,
    labels: &["Importer", "Consignee", "Bill To"],
    delimiter: Delimiter::PunctuationOrSpace,
    capture: Capture::RestOfLine,
};

/// Every labelled rule, in pipeline order.
pub const FIELD_RULES: &[FieldRule] = &[REFERENCE_RULE, DATE_RULE, EXPORTER_RULE, IMPORTER_RULE];

/// Legal-entity abbreviations that introduce a company name
/// (Perseroan Terbatas, Commanditaire Vennootschap, Usaha Dagang).
pub const COMPANY_PREFIXES: &[&str] = &["PT.", "CV.", "UD."];

lazy_static! {
    pub static ref REFERENCE_NUMBER: Regex = REFERENCE_RULE.compile();

    pub static ref DOCUMENT_DATE: Regex = DATE_RULE.compile();

    pub static ref EXPORTER_LABELLED: Regex = EXPORTER_RULE.compile();

    pub static ref IMPORTER_LABELLED: Regex = IMPORTER_RULE.compile();

    // Case-sensitive: the heuristic is "a company name printed in capitals".
    // The uppercase run stays on the prefix's line.
    pub static ref COMPANY_NAME: Regex = {
        let prefixes: Vec<String> = COMPANY_PREFIXES.iter().map(|p| regex::escape(p)).collect();
        Regex::new(&format!(r"(?:{})[ \t]*[A-Z][A-Z \t]*", prefixes.join("|")))
            .unwrap_or_else(|e| panic!("invalid company pattern: {}", e))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_cover_every_labelled_field() {
        let fields: Vec<Field> = FIELD_RULES.iter().map(|r| r.field).collect();
        assert_eq!(
            fields,
            vec![
                Field::ReferenceNumber,
                Field::DocumentDate,
                Field::ExporterName,
                Field::ImporterName
            ]
        );
    }

    #[test]
    fn test_company_pattern_is_case_sensitive() {
        assert!(COMPANY_NAME.is_match("PT. GLOBAL TRADING"));
        assert!(!COMPANY_NAME.is_match("pt. global trading"));
        assert!(!COMPANY_NAME.is_match("PT. global trading"));
    }
}
