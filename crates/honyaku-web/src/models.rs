//! JSON wire types. Field names match the original frontend contract
//! (`page`, `pageNumbers`, …), so core types that already serialise with
//! those names pass straight through.

use serde::{Deserialize, Serialize};

use honyaku_core::{Glossary, MergedPage, Page, PdfInfo, Progress};

// ── Requests ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub context: String,
}

#[derive(Debug, Deserialize)]
pub struct TranslatePagesRequest {
    #[serde(default)]
    pub pages: Vec<Page>,
    pub quality: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TranslateBatchRequest {
    #[serde(default)]
    pub texts: Vec<String>,
    #[serde(default)]
    pub context: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadFormat {
    Original,
    Translated,
    #[default]
    Both,
}

#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    #[serde(default)]
    pub pages: Vec<MergedPage>,
    #[serde(default)]
    pub format: DownloadFormat,
    #[serde(rename = "pageNumbers")]
    pub page_numbers: Option<Vec<usize>>,
}

#[derive(Debug, Deserialize)]
pub struct SetQualityRequest {
    pub quality: String,
}

#[derive(Debug, Deserialize)]
pub struct GlossaryUpdateRequest {
    #[serde(default)]
    pub glossary: Glossary,
}

#[derive(Debug, Deserialize)]
pub struct GlossaryAddRequest {
    #[serde(default)]
    pub english: String,
    #[serde(default)]
    pub japanese: String,
}

// ── Responses ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub filename: String,
    pub info: PdfInfo,
    pub pages: Vec<Page>,
}

#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub success: bool,
    pub original: String,
    pub translated: String,
}

#[derive(Debug, Serialize)]
pub struct TranslatePagesResponse {
    pub success: bool,
    pub pages: Vec<MergedPage>,
    pub quality: String,
}

#[derive(Debug, Serialize)]
pub struct TranslatedPair {
    pub original: String,
    pub translated: String,
}

#[derive(Debug, Serialize)]
pub struct TranslateBatchResponse {
    pub success: bool,
    pub translations: Vec<TranslatedPair>,
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub success: bool,
    pub progress: Progress,
}

#[derive(Debug, Serialize)]
pub struct QualityOption {
    pub model: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_request_accepts_camel_case_page_numbers() {
        let req: DownloadRequest = serde_json::from_str(
            r#"{"pages": [], "format": "translated", "pageNumbers": [1, 3]}"#,
        )
        .unwrap();
        assert_eq!(req.format, DownloadFormat::Translated);
        assert_eq!(req.page_numbers, Some(vec![1, 3]));
    }

    #[test]
    fn download_format_defaults_to_both() {
        let req: DownloadRequest = serde_json::from_str(r#"{"pages": []}"#).unwrap();
        assert_eq!(req.format, DownloadFormat::Both);
        assert_eq!(req.page_numbers, None);
    }

    #[test]
    fn page_roundtrips_through_wire_shape() {
        let json = r#"{
            "page": 1,
            "text": "hello",
            "sections": [{"text": "hello", "metadata": {"index": 0, "is_heading": false, "is_list": false, "length": 5}}],
            "tables": [],
            "metadata": {"width": 595.0, "height": 842.0, "has_tables": false}
        }"#;
        let page: Page = serde_json::from_str(json).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.sections.len(), 1);
        assert!(!page.metadata.ocr);
    }
}
