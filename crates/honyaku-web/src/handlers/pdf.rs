use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, State};

use honyaku_pdf::{PdfExtractor, TesseractOcr};
use honyaku_pdf_mupdf::MupdfBackend;

use crate::error::ApiError;
use crate::models::UploadResponse;
use crate::state::AppState;
use crate::upload;

/// Upload a PDF and extract its text. Extraction is blocking (MuPDF, and
/// possibly OCR subprocesses), so it runs on the blocking pool.
pub async fn upload_pdf(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let file = upload::parse_multipart(multipart).await?;
    tracing::info!(filename = %file.filename, bytes = file.data.len(), "received PDF");

    let tesseract = state.settings.tesseract_bin.clone();
    let mutool = state.settings.mutool_bin.clone();
    let filename = file.filename.clone();

    let (info, pages) = tokio::task::spawn_blocking(move || {
        let temp_dir = tempfile::tempdir()?;
        let pdf_path = temp_dir.path().join("upload.pdf");
        std::fs::write(&pdf_path, &file.data)?;

        let backend = MupdfBackend::new();
        let extractor =
            PdfExtractor::new().with_ocr(TesseractOcr::new(&tesseract, &mutool));

        let info = honyaku_pdf::pdf_info(&pdf_path, &backend)?;
        let pages = extractor.extract(&pdf_path, &backend)?;
        Ok::<_, honyaku_pdf::PdfError>((info, pages))
    })
    .await
    .map_err(|e| ApiError::internal(format!("Extraction task error: {e}")))??;

    Ok(Json(UploadResponse {
        success: true,
        filename,
        info,
        pages,
    }))
}
