//! Text-layer PDF input.
//!
//! Digitally generated invoices carry their text; those can skip OCR.
//! Scanned PDFs are reported as image-only so the caller can route them
//! through rasterization and OCR instead.

mod extractor;

pub use extractor::{PdfExtractor, DEFAULT_MIN_TEXT_LENGTH};

use crate::error::PdfError;

/// Type of PDF content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfType {
    /// Contains extractable text.
    Text,
    /// Contains only images (scanned document).
    Image,
    /// Contains both text and images.
    Hybrid,
    /// Empty or unreadable.
    Empty,
}

impl PdfType {
    /// Whether the embedded text is worth extracting from.
    pub fn has_text_layer(&self) -> bool {
        matches!(self, PdfType::Text | PdfType::Hybrid)
    }
}

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Analyze the PDF to determine its type.
    fn analyze(&self) -> PdfType;

    /// Extract text from the entire PDF.
    fn extract_text(&self) -> Result<String>;

    /// Extract text from a specific page (1-indexed).
    fn extract_page_text(&self, page: u32) -> Result<String>;
}

/// Load PDF bytes and return their text layer, or
/// [`PdfError::NoTextLayer`] for scanned documents.
pub fn read_text_layer(data: &[u8], min_text_length: usize) -> Result<String> {
    let mut extractor = PdfExtractor::new().with_min_text_length(min_text_length);
    extractor.load(data)?;

    if !extractor.analyze().has_text_layer() {
        return Err(PdfError::NoTextLayer);
    }
    extractor.extract_text()
}
