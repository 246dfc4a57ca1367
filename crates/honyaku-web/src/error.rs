use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use honyaku_core::GlossaryError;
use honyaku_core::translator::TranslateError;
use honyaku_pdf::PdfError;

/// Request-boundary error: a status code and a message, serialised as
/// `{"success": false, "detail": …}`. Validation problems map to 400,
/// everything else to 500.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, message = %self.message, "request failed");
        }
        (
            self.status,
            Json(json!({ "success": false, "detail": self.message })),
        )
            .into_response()
    }
}

impl From<TranslateError> for ApiError {
    fn from(e: TranslateError) -> Self {
        ApiError::internal(format!("Translation error: {e}"))
    }
}

impl From<PdfError> for ApiError {
    fn from(e: PdfError) -> Self {
        ApiError::internal(format!("Error processing PDF: {e}"))
    }
}

impl From<GlossaryError> for ApiError {
    fn from(e: GlossaryError) -> Self {
        ApiError::internal(format!("Glossary error: {e}"))
    }
}
