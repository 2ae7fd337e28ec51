//! Exporter and importer name extraction.

use super::patterns::{COMPANY_NAME, EXPORTER_LABELLED, IMPORTER_LABELLED};
use super::{labelled_matches, ExtractionMatch, FieldExtractor};

/// Which tier produced the exporter name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExporterMatch {
    /// Explicit "Exporter" label.
    Labelled(String),
    /// Unlabelled company name ("PT. ...", "CV. ...", "UD. ...") in capitals.
    CompanyName(String),
}

impl ExporterMatch {
    pub fn into_value(self) -> String {
        match self {
            ExporterMatch::Labelled(name) | ExporterMatch::CompanyName(name) => name,
        }
    }
}

/// Unlabelled company-name extractor (exporter tier 2).
pub struct CompanyNameExtractor;

impl CompanyNameExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CompanyNameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CompanyNameExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        COMPANY_NAME
            .find_iter(text)
            .map(|m| {
                ExtractionMatch::new(m.as_str().trim().to_string(), m.as_str())
                    .with_position(m.start(), m.end())
            })
            .collect()
    }
}

/// Extract the exporter: labelled value first, company-name heuristic only
/// when no label is present.
pub fn extract_exporter(text: &str) -> Option<ExporterMatch> {
    if let Some(labelled) = labelled_matches(&EXPORTER_LABELLED, text).into_iter().next() {
        return Some(ExporterMatch::Labelled(labelled.value));
    }

    CompanyNameExtractor::new()
        .extract(text)
        .map(|m| ExporterMatch::CompanyName(m.value))
}

/// Extract the importer / consignee. There is no unlabelled fallback.
pub fn extract_importer(text: &str) -> Option<String> {
    labelled_matches(&IMPORTER_LABELLED, text)
        .into_iter()
        .next()
        .map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_labelled_exporter() {
        let text = "Exporter: PT. Sinar Jaya Abadi\nJakarta";
        assert_eq!(
            extract_exporter(text),
            Some(ExporterMatch::Labelled("PT. Sinar Jaya Abadi".to_string()))
        );
    }

    #[test]
    fn test_label_with_whitespace_only_delimiter() {
        assert_eq!(
            extract_exporter("EXPORTER   Kencana Mills  \r\n").map(ExporterMatch::into_value),
            Some("Kencana Mills".to_string())
        );
    }

    #[test]
    fn test_company_name_fallback() {
        let text = "COMMERCIAL INVOICE\nPT. GLOBAL TRADING CO\nJl. Sudirman 1";
        assert_eq!(
            extract_exporter(text),
            Some(ExporterMatch::CompanyName("PT. GLOBAL TRADING CO".to_string()))
        );
    }

    #[test]
    fn test_company_run_stops_at_line_end_and_lowercase() {
        assert_eq!(
            extract_exporter("CV.MAKMUR Sentosa").map(ExporterMatch::into_value),
            Some("CV.MAKMUR S".to_string())
        );
        assert_eq!(
            extract_exporter("UD. TANI\nBARU").map(ExporterMatch::into_value),
            Some("UD. TANI".to_string())
        );
    }

    #[test]
    fn test_label_beats_earlier_company_name() {
        let text = "PT. FIRST NAME\nExporter: Second Name";
        assert_eq!(
            extract_exporter(text).map(ExporterMatch::into_value),
            Some("Second Name".to_string())
        );
    }

    #[test]
    fn test_importer_synonyms() {
        assert_eq!(extract_importer("Importer: ACME Pte Ltd"), Some("ACME Pte Ltd".to_string()));
        assert_eq!(extract_importer("CONSIGNEE. Blue Ocean"), Some("Blue Ocean".to_string()));
        assert_eq!(extract_importer("bill to: Kaya Corp"), Some("Kaya Corp".to_string()));
    }

    #[test]
    fn test_importer_has_no_fallback() {
        assert_eq!(extract_importer("PT. GLOBAL TRADING CO"), None);
    }

    #[test]
    fn test_importer_only_leaves_exporter_empty() {
        let text = "Importer: ACME Corp";
        assert_eq!(extract_exporter(text), None);
        assert_eq!(extract_importer(text), Some("ACME Corp".to_string()));
    }
}
