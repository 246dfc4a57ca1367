use std::path::Path;

use thiserror::Error;

pub mod backend;
pub mod extract;
pub mod ocr;
pub mod section;
pub mod tables;
pub mod text_processing;

pub use backend::{PdfBackend, RawPage};
pub use extract::PdfExtractor;
pub use ocr::TesseractOcr;
// Re-export domain types from core (canonical definitions live there)
pub use honyaku_core::{Page, PageMeta, PdfInfo, Section, SectionMeta, Table};

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("failed to open PDF: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
    #[error("OCR failed: {0}")]
    Ocr(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Extract cleaned, sectioned pages from a PDF file using the given backend
/// for raw text extraction.
///
/// Pipeline:
/// 1. Extract per-page text via `backend`
/// 2. Fix encoding damage (CID artifacts, interpunct-wrapped glyph runs)
/// 3. Split each page into paragraph sections with heading/list detection
/// 4. Detect whitespace-aligned tables
/// 5. Pages with no embedded text fall back to OCR when configured
pub fn extract_pages(pdf_path: &Path, backend: &dyn PdfBackend) -> Result<Vec<Page>, PdfError> {
    PdfExtractor::new().extract(pdf_path, backend)
}

/// Document-level information (page count, first page size).
pub fn pdf_info(pdf_path: &Path, backend: &dyn PdfBackend) -> Result<PdfInfo, PdfError> {
    backend.info(pdf_path)
}
