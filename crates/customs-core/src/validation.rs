//! Pre-submission checks for declaration drafts.

use serde::{Deserialize, Serialize};

use crate::models::document::DocumentDraft;

/// Minimum length of an exporter name.
pub const MIN_EXPORTER_NAME_LEN: usize = 3;

/// A problem the user must fix before the draft can be submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Form section the field belongs to ("header", "entities", "items").
    pub section: String,
    /// Field name as serialized in the draft.
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(section: &str, field: &str, message: impl Into<String>) -> Self {
        Self {
            section: section.to_string(),
            field: field.to_string(),
            message: message.into(),
        }
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

/// Validate a draft and return every issue found.
pub fn validate_document(draft: &DocumentDraft) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if is_blank(&draft.reference_number) {
        issues.push(ValidationIssue::new(
            "header",
            "referenceNumber",
            "Reference number is required",
        ));
    }

    if is_blank(&draft.customs_office) {
        issues.push(ValidationIssue::new(
            "header",
            "customsOffice",
            "Customs office is required",
        ));
    }

    match draft.exporter.as_deref().map(str::trim) {
        None | Some("") => {
            issues.push(ValidationIssue::new("entities", "exporter", "Exporter name is required"));
        }
        Some(name) if name.chars().count() < MIN_EXPORTER_NAME_LEN => {
            issues.push(ValidationIssue::new("entities", "exporter", "Exporter name is too short"));
        }
        Some(_) => {}
    }

    if is_blank(&draft.importer) {
        issues.push(ValidationIssue::new("entities", "importer", "Importer name is required"));
    }

    if draft.line_items.is_empty() {
        issues.push(ValidationIssue::new("items", "lineItems", "At least one line item is required"));
    }

    for (index, item) in draft.line_items.iter().enumerate() {
        if item.needs_review {
            issues.push(ValidationIssue::new(
                "items",
                "lineItems",
                format!("Line item {} was not detected in the document and requires review", index + 1),
            ));
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::extract;
    use pretty_assertions::assert_eq;

    fn fields(issues: &[ValidationIssue]) -> Vec<&str> {
        issues.iter().map(|i| i.field.as_str()).collect()
    }

    #[test]
    fn test_empty_draft() {
        let issues = validate_document(&DocumentDraft::default());
        assert_eq!(
            fields(&issues),
            vec!["referenceNumber", "customsOffice", "exporter", "importer", "lineItems"]
        );
    }

    #[test]
    fn test_short_exporter() {
        let draft = DocumentDraft {
            exporter: Some(" AB ".to_string()),
            ..Default::default()
        };
        let issues = validate_document(&draft);
        let exporter = issues.iter().find(|i| i.field == "exporter").unwrap();
        assert_eq!(exporter.message, "Exporter name is too short");
        assert_eq!(exporter.section, "entities");
    }

    #[test]
    fn test_placeholder_item_flagged() {
        let draft = DocumentDraft::from(extract("nothing useful"));
        let issues = validate_document(&draft);
        assert!(issues.iter().any(|i| i.message.contains("requires review")));
    }

    #[test]
    fn test_complete_draft() {
        let mut draft = DocumentDraft::from(extract(
            "Invoice No: INV-9\nExporter: PT. Sepatu\nImporter: Runners Ltd\nshoes",
        ));
        draft.customs_office = Some("040300 - KPPBC Tanjung Priok".to_string());

        assert_eq!(validate_document(&draft), Vec::<ValidationIssue>::new());
    }
}
