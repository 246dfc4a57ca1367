use axum::extract::Multipart;

use crate::error::ApiError;

/// An uploaded PDF with its original filename.
pub struct UploadedPdf {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Parse a multipart form upload. Accepts the file under either `file` or
/// `pdf`; any other fields are ignored.
pub async fn parse_multipart(mut multipart: Multipart) -> Result<UploadedPdf, ApiError> {
    let mut file: Option<UploadedPdf> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Failed to read form field: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" | "pdf" => {
                let filename = field.file_name().unwrap_or("upload.pdf").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read file data: {e}")))?
                    .to_vec();

                validate_pdf(&filename, &data)?;
                file = Some(UploadedPdf { filename, data });
            }
            _ => {
                // Ignore unknown fields
                let _ = field.bytes().await;
            }
        }
    }

    file.ok_or_else(|| ApiError::bad_request("No file uploaded"))
}

/// Reject anything that is not a PDF, by extension and magic bytes.
fn validate_pdf(filename: &str, data: &[u8]) -> Result<(), ApiError> {
    if !filename.to_lowercase().ends_with(".pdf") {
        return Err(ApiError::bad_request("Only PDF files are supported"));
    }
    if !data.starts_with(b"%PDF-") {
        return Err(ApiError::bad_request(
            "File has .pdf extension but doesn't appear to be a valid PDF",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_pdf_magic_bytes() {
        assert!(validate_pdf("spec.pdf", b"%PDF-1.7 rest").is_ok());
    }

    #[test]
    fn rejects_wrong_extension() {
        let err = validate_pdf("notes.txt", b"%PDF-1.7").unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn rejects_masquerading_file() {
        assert!(validate_pdf("fake.pdf", b"PK\x03\x04zip data").is_err());
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(validate_pdf("SPEC.PDF", b"%PDF-1.4").is_ok());
    }
}
