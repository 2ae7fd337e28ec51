//! Persistence of declaration drafts.

#[cfg(feature = "native")]
mod sqlite;

#[cfg(feature = "native")]
pub use sqlite::SqliteDraftStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::models::document::DocumentDraft;
use crate::models::shipment::timestamp_identifier;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Lifecycle status of a stored document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentStatus {
    Draft,
    Submitted,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Draft => "Draft",
            DocumentStatus::Submitted => "Submitted",
        }
    }

    /// Parse a stored status; anything unrecognised reads as `Draft`.
    pub fn parse_lossy(s: &str) -> Self {
        match s {
            "Submitted" => DocumentStatus::Submitted,
            _ => DocumentStatus::Draft,
        }
    }
}

/// A draft as kept in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDocument {
    /// Reference number, or `DRAFT-<millis>` when the draft has none.
    pub id: String,
    /// Declaration type code.
    #[serde(rename = "type")]
    pub doc_type: String,
    /// Exporter name, or "Unknown".
    pub customer: String,
    /// Save date, YYYY-MM-DD.
    pub date: String,
    pub status: DocumentStatus,
    pub data: DocumentDraft,
    /// Set by the store on every upsert.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl StoredDocument {
    /// Wrap a draft for saving, deriving id, type, customer and date.
    pub fn from_draft(draft: DocumentDraft) -> Self {
        let id = draft
            .reference_number
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("DRAFT-{}", timestamp_identifier()));

        let customer = draft
            .exporter
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .unwrap_or("Unknown")
            .to_string();

        Self {
            id,
            doc_type: draft.document_type().to_string(),
            customer,
            date: Utc::now().format("%Y-%m-%d").to_string(),
            status: DocumentStatus::Draft,
            data: draft,
            updated_at: None,
        }
    }
}

/// Row of a document listing (no draft body).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub id: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub customer: String,
    pub date: String,
    pub status: DocumentStatus,
    pub updated_at: DateTime<Utc>,
}

/// Upsert-style document store.
pub trait DraftStore {
    /// Insert the document or overwrite the one with the same id.
    fn upsert(&self, document: &StoredDocument) -> Result<()>;

    /// Fetch a document with its draft body.
    fn get(&self, id: &str) -> Result<StoredDocument>;

    /// All documents, most recently updated first.
    fn list(&self) -> Result<Vec<DocumentSummary>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_draft_derives_fields() {
        let draft = DocumentDraft {
            reference_number: Some("INV-1".to_string()),
            exporter: Some("PT. MAJU".to_string()),
            ..Default::default()
        };
        let doc = StoredDocument::from_draft(draft);

        assert_eq!(doc.id, "INV-1");
        assert_eq!(doc.customer, "PT. MAJU");
        assert_eq!(doc.doc_type, "PEB");
        assert_eq!(doc.status, DocumentStatus::Draft);
        assert_eq!(doc.date.len(), 10);
    }

    #[test]
    fn test_from_blank_draft() {
        let doc = StoredDocument::from_draft(DocumentDraft::default());
        assert!(doc.id.starts_with("DRAFT-"));
        assert_eq!(doc.customer, "Unknown");
    }

    #[test]
    fn test_status_round_trip() {
        for status in [DocumentStatus::Draft, DocumentStatus::Submitted] {
            assert_eq!(DocumentStatus::parse_lossy(status.as_str()), status);
        }
        assert_eq!(DocumentStatus::parse_lossy(""), DocumentStatus::Draft);
        assert_eq!(DocumentStatus::parse_lossy("archived"), DocumentStatus::Draft);
    }
}
