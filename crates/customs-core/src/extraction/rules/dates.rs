//! Document date extraction.
//!
//! Dates are kept exactly as printed. No calendar validation and no
//! normalization: "31-02-24" is returned as-is for the user to fix.

use super::patterns::DOCUMENT_DATE;
use super::{labelled_matches, ExtractionMatch, FieldExtractor};

/// Labelled document date extractor.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        labelled_matches(&DOCUMENT_DATE, text)
    }
}

/// Extract the document date from text.
pub fn extract_document_date(text: &str) -> Option<String> {
    DateExtractor::new().extract(text).map(|m| m.value)
}
