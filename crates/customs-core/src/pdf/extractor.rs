//! PDF text extraction using lopdf and pdf-extract.

use lopdf::{Document, Object};
use tracing::{debug, trace, warn};

use super::{PdfProcessor, PdfType, Result};
use crate::error::PdfError;

/// Default amount of embedded text that makes a PDF count as text-based.
pub const DEFAULT_MIN_TEXT_LENGTH: usize = 50;

/// PDF text extractor.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    min_text_length: usize,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            min_text_length: DEFAULT_MIN_TEXT_LENGTH,
        }
    }

    /// Set the text length above which the PDF counts as text-based.
    pub fn with_min_text_length(mut self, min_text_length: usize) -> Self {
        self.min_text_length = min_text_length;
        self
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| PdfError::Parse("No document loaded".to_string()))
    }

    fn count_images(&self) -> usize {
        let Some(doc) = self.document.as_ref() else {
            return 0;
        };

        doc.objects
            .values()
            .filter(|object| match object {
                Object::Stream(stream) => stream
                    .dict
                    .get(b"Subtype")
                    .and_then(|s| s.as_name())
                    .map(|name| name == b"Image")
                    .unwrap_or(false),
                _ => false,
            })
            .count()
    }

    /// Page-by-page text through lopdf; fallback when pdf-extract fails.
    fn extract_text_by_page(&self) -> Result<String> {
        let mut pages = Vec::new();
        for page in 1..=self.page_count() {
            match self.extract_page_text(page) {
                Ok(text) => pages.push(text),
                Err(e) => warn!("Skipping page {}: {}", page, e),
            }
        }
        Ok(pages.join("\n\n"))
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf_extract needs the decrypted bytes
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn analyze(&self) -> PdfType {
        let text_len = self
            .extract_text_by_page()
            .map(|text| text.chars().filter(|c| !c.is_whitespace()).count())
            .unwrap_or(0);
        let has_text = text_len >= self.min_text_length && text_len > 0;
        let has_images = self.count_images() > 0;

        let pdf_type = match (has_text, has_images) {
            (true, false) => PdfType::Text,
            (false, true) => PdfType::Image,
            (true, true) => PdfType::Hybrid,
            (false, false) => PdfType::Empty,
        };

        debug!(
            "PDF analysis: {} text chars, has_images={} -> {:?}",
            text_len, has_images, pdf_type
        );
        pdf_type
    }

    fn extract_text(&self) -> Result<String> {
        self.document()?;

        match pdf_extract::extract_text_from_mem(&self.raw_data) {
            Ok(text) => Ok(text),
            Err(e) => {
                warn!("pdf-extract failed ({}), falling back to per-page extraction", e);
                self.extract_text_by_page()
            }
        }
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self.document()?;
        if page == 0 || page > self.page_count() {
            return Err(PdfError::InvalidPage(page));
        }

        let text = doc
            .extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        trace!("Page {}: {} chars", page, text.len());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Stream};

    fn text_pdf(line: &str) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(line)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_pdf_extractor_new() {
        let extractor = PdfExtractor::new();
        assert!(extractor.document.is_none());
        assert_eq!(extractor.page_count(), 0);
        assert!(extractor.extract_text().is_err());
    }

    #[test]
    fn test_load_rejects_garbage() {
        let mut extractor = PdfExtractor::new();
        assert!(matches!(extractor.load(b"not a pdf"), Err(PdfError::Parse(_))));
    }

    #[test]
    fn test_text_pdf() {
        let data = text_pdf("Invoice No: PDF-1");
        let mut extractor = PdfExtractor::new().with_min_text_length(5);
        extractor.load(&data).unwrap();

        assert_eq!(extractor.page_count(), 1);
        assert!(extractor.extract_page_text(1).unwrap().contains("PDF-1"));
        assert!(matches!(extractor.extract_page_text(2), Err(PdfError::InvalidPage(2))));
        assert_eq!(extractor.analyze(), PdfType::Text);
    }

    #[test]
    fn test_short_text_counts_as_empty() {
        let data = text_pdf("x");
        let mut extractor = PdfExtractor::new();
        extractor.load(&data).unwrap();

        assert_eq!(extractor.analyze(), PdfType::Empty);
        assert!(matches!(
            super::super::read_text_layer(&data, DEFAULT_MIN_TEXT_LENGTH),
            Err(PdfError::NoTextLayer)
        ));
    }
}
