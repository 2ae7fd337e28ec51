//! Core library for customs declaration OCR processing.
//!
//! This crate provides:
//! - Shipment field extraction from raw OCR text (reference number, date,
//!   exporter, importer, commodity lines)
//! - Editable declaration drafts and pre-submission validation
//! - Direct-export payload building for the single-window customs API
//! - Draft persistence (SQLite) and text-layer PDF input

pub mod error;
pub mod extraction;
pub mod models;
pub mod payload;
pub mod store;
pub mod validation;

#[cfg(feature = "native")]
pub mod pdf;

pub use error::{CustomsError, PdfError, Result, StoreError};
pub use extraction::{extract, ExtractionResult, RuleBasedParser, ShipmentParser};
pub use models::config::{CustomsConfig, ExportDefaults, ExtractionConfig};
pub use models::document::DocumentDraft;
pub use models::shipment::{LineItem, ShipmentRecord};
pub use payload::{build_payload, DirectExportJobPayload};
pub use store::{DocumentStatus, DocumentSummary, DraftStore, StoredDocument};
pub use validation::{validate_document, ValidationIssue};

#[cfg(feature = "native")]
pub use pdf::{read_text_layer, PdfExtractor, PdfProcessor, PdfType};
#[cfg(feature = "native")]
pub use store::SqliteDraftStore;
