//! Error types for the customs-core library.
//!
//! Field extraction has no error type: missing evidence is an absent value.

use thiserror::Error;

/// Main error type for the customs library.
#[derive(Error, Debug)]
pub enum CustomsError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Draft store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to reading the text layer of a PDF.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),

    /// Scanned PDF: the pages must be rasterized and run through OCR first.
    #[error("PDF has no text layer; run OCR on the rendered pages instead")]
    NoTextLayer,
}

/// Errors raised by the draft document store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Underlying database failure.
    #[cfg(feature = "native")]
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Stored draft payload could not be (de)serialized.
    #[error("invalid draft data for {id}: {reason}")]
    InvalidData { id: String, reason: String },

    /// No document with the given id.
    #[error("document not found: {0}")]
    NotFound(String),
}

/// Result type for the customs library.
pub type Result<T> = std::result::Result<T, CustomsError>;
