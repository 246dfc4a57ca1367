use std::path::Path;

use mupdf::{Document, TextPageFlags};

use honyaku_core::{PageSize, PdfInfo};
use honyaku_pdf::{PdfBackend, PdfError, RawPage};

/// MuPDF-based implementation of [`PdfBackend`].
///
/// This crate is the sole AGPL island — it isolates the mupdf dependency
/// (which is AGPL-3.0) so that the translation and web crates do not
/// transitively depend on it through the trait.
#[derive(Default)]
pub struct MupdfBackend;

impl MupdfBackend {
    pub fn new() -> Self {
        Self
    }

    fn open(path: &Path) -> Result<Document, PdfError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| PdfError::OpenError("invalid path encoding".into()))?;
        Document::open(path_str).map_err(|e| PdfError::OpenError(e.to_string()))
    }
}

impl PdfBackend for MupdfBackend {
    fn extract_pages(&self, path: &Path) -> Result<Vec<RawPage>, PdfError> {
        let document = Self::open(path)?;

        let mut pages = Vec::new();

        for (index, page_result) in document
            .pages()
            .map_err(|e| PdfError::ExtractionError(e.to_string()))?
            .enumerate()
        {
            let page = page_result.map_err(|e| PdfError::ExtractionError(e.to_string()))?;

            let bounds = page
                .bounds()
                .map_err(|e| PdfError::ExtractionError(e.to_string()))?;

            let text_page = page
                .to_text_page(TextPageFlags::empty())
                .map_err(|e| PdfError::ExtractionError(e.to_string()))?;

            // Block/line iteration keeps paragraph gaps: a blank line between
            // blocks is what the sectioner later splits on.
            let mut page_text = String::new();
            for block in text_page.blocks() {
                if !page_text.is_empty() {
                    page_text.push('\n');
                }
                for line in block.lines() {
                    let line_text: String = line
                        .chars()
                        .map(|c| c.char().unwrap_or('\u{FFFD}'))
                        .collect();
                    page_text.push_str(&line_text);
                    page_text.push('\n');
                }
            }

            pages.push(RawPage {
                number: index + 1,
                text: page_text,
                width: bounds.x1 - bounds.x0,
                height: bounds.y1 - bounds.y0,
            });
        }

        Ok(pages)
    }

    fn info(&self, path: &Path) -> Result<PdfInfo, PdfError> {
        let document = Self::open(path)?;

        let mut count = 0usize;
        let mut first_page_size = None;

        for page_result in document
            .pages()
            .map_err(|e| PdfError::ExtractionError(e.to_string()))?
        {
            let page = page_result.map_err(|e| PdfError::ExtractionError(e.to_string()))?;
            if first_page_size.is_none() {
                let bounds = page
                    .bounds()
                    .map_err(|e| PdfError::ExtractionError(e.to_string()))?;
                first_page_size = Some(PageSize {
                    width: bounds.x1 - bounds.x0,
                    height: bounds.y1 - bounds.y0,
                });
            }
            count += 1;
        }

        Ok(PdfInfo {
            pages: count,
            first_page_size,
        })
    }
}
