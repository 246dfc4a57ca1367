use std::path::Path;

use honyaku_core::{Page, PageMeta};

use crate::backend::PdfBackend;
use crate::ocr::TesseractOcr;
use crate::section::split_into_sections;
use crate::tables::detect_tables;
use crate::text_processing::fix_encoding_issues;
use crate::PdfError;

/// Drives the extraction pipeline over a [`PdfBackend`].
#[derive(Default)]
pub struct PdfExtractor {
    ocr: Option<TesseractOcr>,
}

impl PdfExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable the OCR fallback for pages without an embedded text layer.
    pub fn with_ocr(mut self, ocr: TesseractOcr) -> Self {
        self.ocr = Some(ocr);
        self
    }

    pub fn extract(
        &self,
        pdf_path: &Path,
        backend: &dyn PdfBackend,
    ) -> Result<Vec<Page>, PdfError> {
        let raw_pages = backend.extract_pages(pdf_path)?;
        tracing::info!(pages = raw_pages.len(), "processing PDF");

        let mut pages = Vec::with_capacity(raw_pages.len());
        for raw in raw_pages {
            let mut text = fix_encoding_issues(&raw.text);
            let mut used_ocr = false;

            if text.trim().is_empty() {
                if let Some(ocr) = &self.ocr {
                    match ocr.recognize_page(pdf_path, raw.number) {
                        Ok(recognized) => {
                            text = fix_encoding_issues(&recognized);
                            used_ocr = true;
                            tracing::info!(page = raw.number, "recovered page text via OCR");
                        }
                        Err(e) => {
                            // OCR problems degrade to an empty page rather
                            // than failing the whole document.
                            tracing::warn!(page = raw.number, error = %e, "OCR fallback failed");
                        }
                    }
                }
            }

            let sections = split_into_sections(&text);
            let tables = detect_tables(&text);
            tracing::debug!(
                page = raw.number,
                chars = text.chars().count(),
                sections = sections.len(),
                "extracted page"
            );

            pages.push(Page {
                page: raw.number,
                metadata: PageMeta {
                    width: raw.width,
                    height: raw.height,
                    has_tables: !tables.is_empty(),
                    ocr: used_ocr,
                },
                text,
                sections,
                tables,
            });
        }

        Ok(pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RawPage;
    use honyaku_core::PdfInfo;

    /// Backend that serves canned pages, no PDF involved.
    struct StubBackend {
        pages: Vec<RawPage>,
    }

    impl PdfBackend for StubBackend {
        fn extract_pages(&self, _path: &Path) -> Result<Vec<RawPage>, PdfError> {
            Ok(self.pages.clone())
        }

        fn info(&self, _path: &Path) -> Result<PdfInfo, PdfError> {
            Ok(PdfInfo {
                pages: self.pages.len(),
                first_page_size: None,
            })
        }
    }

    fn raw(number: usize, text: &str) -> RawPage {
        RawPage {
            number,
            text: text.to_string(),
            width: 595.0,
            height: 842.0,
        }
    }

    #[test]
    fn cleans_and_sections_pages() {
        let backend = StubBackend {
            pages: vec![raw(1, "・O・n・l・i・n・e・ manual\n\nInstall the pump.")],
        };
        let pages = PdfExtractor::new().extract(Path::new("unused.pdf"), &backend).unwrap();

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].page, 1);
        assert!(pages[0].text.starts_with("Online manual"));
        assert_eq!(pages[0].sections.len(), 2);
        assert_eq!(pages[0].metadata.width, 595.0);
        assert!(!pages[0].metadata.ocr);
    }

    #[test]
    fn flags_pages_with_tables() {
        let backend = StubBackend {
            pages: vec![raw(1, "Model    Flow\nP-100    120 L/min")],
        };
        let pages = PdfExtractor::new().extract(Path::new("unused.pdf"), &backend).unwrap();
        assert!(pages[0].metadata.has_tables);
        assert_eq!(pages[0].tables.len(), 1);
    }

    #[test]
    fn empty_page_without_ocr_stays_empty() {
        let backend = StubBackend {
            pages: vec![raw(1, "   ")],
        };
        let pages = PdfExtractor::new().extract(Path::new("unused.pdf"), &backend).unwrap();
        assert_eq!(pages[0].text, "");
        assert!(pages[0].sections.is_empty());
        assert!(!pages[0].metadata.ocr);
    }
}
