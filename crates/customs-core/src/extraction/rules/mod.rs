//! Rule-based field detectors for shipment documents.
//!
//! Each labelled field is described by a [`FieldRule`] (label synonyms,
//! delimiter class, capture class). The regex for a rule is derived from
//! that description, so the table in [`patterns`] is the single source of
//! truth for what every detector accepts.

pub mod dates;
pub mod items;
pub mod parties;
pub mod patterns;
pub mod reference;

pub use dates::{extract_document_date, DateExtractor};
pub use items::{detect_line_items, CommodityTemplate, COMMODITY_CATALOGUE, PLACEHOLDER_ITEM};
pub use parties::{extract_exporter, extract_importer, CompanyNameExtractor, ExporterMatch};
pub use patterns::*;
pub use reference::{extract_reference_number, ReferenceExtractor};

use regex::Regex;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field, in document order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A matched field value with its location in the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte span of the whole match in the source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// Shipment field a rule feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ReferenceNumber,
    DocumentDate,
    ExporterName,
    ImporterName,
}

impl Field {
    /// Field name as used in warnings and serialized records.
    pub fn name(&self) -> &'static str {
        match self {
            Field::ReferenceNumber => "referenceNumber",
            Field::DocumentDate => "documentDate",
            Field::ExporterName => "exporterName",
            Field::ImporterName => "importerName",
        }
    }
}

/// What may separate a label from its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// A single `.` or `:`, then optional whitespace.
    Punctuation,
    /// Any run of `.`, `:` and whitespace (at least one character).
    PunctuationOrSpace,
}

impl Delimiter {
    pub fn pattern(&self) -> &'static str {
        match self {
            Delimiter::Punctuation => r"[.:]\s*",
            Delimiter::PunctuationOrSpace => r"[.:\s]+",
        }
    }
}

/// Shape of the captured value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// Contiguous letters, digits, hyphens and slashes.
    ReferenceToken,
    /// `D[-/.]M[-/.]Y`, 1-2 digit day and month, 2 or 4 digit year.
    /// ASCII digits only.
    NumericDate,
    /// Free text up to the end of the line.
    RestOfLine,
}

impl Capture {
    pub fn pattern(&self) -> &'static str {
        match self {
            Capture::ReferenceToken => r"[A-Za-z0-9\-/]+",
            Capture::NumericDate => r"[0-9]{1,2}[-/.][0-9]{1,2}[-/.](?:[0-9]{4}|[0-9]{2})\b",
            Capture::RestOfLine => r"[^\n]+",
        }
    }
}

/// Declarative description of a labelled field detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: Field,
    /// Label synonyms in priority-free order; matching is case-insensitive
    /// and words inside a label may be separated by any whitespace.
    pub labels: &'static [&'static str],
    pub delimiter: Delimiter,
    pub capture: Capture,
}

impl FieldRule {
    /// Regex source for this rule; capture group 1 is the value.
    pub fn pattern(&self) -> String {
        let labels: Vec<String> = self
            .labels
            .iter()
            .map(|label| {
                label
                    .split_whitespace()
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(r"\s*")
            })
            .collect();

        format!(
            r"(?i)\b(?:{}){}({})",
            labels.join("|"),
            self.delimiter.pattern(),
            self.capture.pattern()
        )
    }

    /// Compile the rule. The table is static, so a bad rule is a bug.
    pub fn compile(&self) -> Regex {
        Regex::new(&self.pattern())
            .unwrap_or_else(|e| panic!("invalid rule for {}: {}", self.field.name(), e))
    }
}

/// Run a compiled labelled rule over `text`, returning every non-empty
/// trimmed capture in document order.
pub(crate) fn labelled_matches(regex: &Regex, text: &str) -> Vec<ExtractionMatch<String>> {
    regex
        .captures_iter(text)
        .filter_map(|caps| {
            let full = caps.get(0)?;
            let value = caps.get(1)?.as_str().trim();
            if value.is_empty() {
                return None;
            }
            Some(
                ExtractionMatch::new(value.to_string(), full.as_str())
                    .with_position(full.start(), full.end()),
            )
        })
        .collect()
}
