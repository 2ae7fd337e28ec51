//! Reference (invoice / customs) number extraction.

use super::patterns::REFERENCE_NUMBER;
use super::{labelled_matches, ExtractionMatch, FieldExtractor};

/// Reference number extractor.
///
/// The first labelled token in the document wins. Several candidates
/// (e.g. an invoice number and a packing-list number) are not ranked.
pub struct ReferenceExtractor;

impl ReferenceExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ReferenceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ReferenceExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        labelled_matches(&REFERENCE_NUMBER, text)
    }
}

/// Extract the reference number from text.
pub fn extract_reference_number(text: &str) -> Option<String> {
    ReferenceExtractor::new().extract(text).map(|m| m.value)
}
