use std::path::Path;

use honyaku_core::PdfInfo;

use crate::PdfError;

/// Raw per-page output of a PDF text extraction backend, before cleanup.
#[derive(Debug, Clone)]
pub struct RawPage {
    /// 1-based page number.
    pub number: usize,
    pub text: String,
    pub width: f32,
    pub height: f32,
}

/// Trait for PDF text extraction backends.
///
/// Implementors provide the low-level per-page text; the extraction pipeline
/// (encoding cleanup, sectioning, table detection, OCR fallback) lives in
/// [`crate::extract::PdfExtractor`].
pub trait PdfBackend: Send + Sync {
    /// Extract the raw text of every page, with page dimensions in points.
    fn extract_pages(&self, path: &Path) -> Result<Vec<RawPage>, PdfError>;

    /// Page count and first-page size without extracting any text.
    fn info(&self, path: &Path) -> Result<PdfInfo, PdfError>;
}
