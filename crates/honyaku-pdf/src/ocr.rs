//! OCR fallback for pages with no embedded text layer.
//!
//! Rasterises a single page with `mutool draw` and feeds the PNG to the
//! `tesseract` CLI. Both tools are resolved from config; a missing binary
//! surfaces as [`PdfError::Ocr`] and the caller degrades to an empty page.

use std::path::Path;
use std::process::Command;

use crate::PdfError;

pub struct TesseractOcr {
    tesseract_bin: String,
    mutool_bin: String,
    dpi: u32,
}

impl TesseractOcr {
    pub fn new(tesseract_bin: &str, mutool_bin: &str) -> Self {
        Self {
            tesseract_bin: tesseract_bin.to_string(),
            mutool_bin: mutool_bin.to_string(),
            dpi: 300,
        }
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Recognise the text of one page (1-based) of a PDF.
    pub fn recognize_page(&self, pdf_path: &Path, page: usize) -> Result<String, PdfError> {
        let scratch = tempfile::tempdir()?;
        let png_path = scratch.path().join("page.png");

        let render = Command::new(&self.mutool_bin)
            .arg("draw")
            .arg("-o")
            .arg(&png_path)
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg(pdf_path)
            .arg(page.to_string())
            .output()
            .map_err(|e| PdfError::Ocr(format!("failed to run {}: {}", self.mutool_bin, e)))?;

        if !render.status.success() {
            return Err(PdfError::Ocr(format!(
                "mutool draw exited with {}: {}",
                render.status,
                String::from_utf8_lossy(&render.stderr).trim()
            )));
        }

        let recognize = Command::new(&self.tesseract_bin)
            .arg(&png_path)
            .arg("stdout")
            .arg("-l")
            .arg("eng")
            .output()
            .map_err(|e| PdfError::Ocr(format!("failed to run {}: {}", self.tesseract_bin, e)))?;

        if !recognize.status.success() {
            return Err(PdfError::Ocr(format!(
                "tesseract exited with {}: {}",
                recognize.status,
                String::from_utf8_lossy(&recognize.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&recognize.stdout).into_owned())
    }
}
