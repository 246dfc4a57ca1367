use axum::Json;
use axum::http::{HeaderMap, HeaderValue, header};

use honyaku_core::MergedPage;

use crate::error::ApiError;
use crate::models::{DownloadFormat, DownloadRequest};

const RULE: &str = "================================================================================";
const THIN_RULE: &str =
    "--------------------------------------------------------------------------------";

/// Download the merged translation as a plain-text attachment.
pub async fn download_translation(
    Json(req): Json<DownloadRequest>,
) -> Result<(HeaderMap, String), ApiError> {
    if req.pages.is_empty() {
        return Err(ApiError::bad_request("Pages data is required"));
    }

    let pages: Vec<&MergedPage> = match &req.page_numbers {
        Some(numbers) => {
            let selected: Vec<&MergedPage> = req
                .pages
                .iter()
                .filter(|p| numbers.contains(&p.page))
                .collect();
            if selected.is_empty() {
                return Err(ApiError::bad_request("No matching pages found"));
            }
            selected
        }
        None => req.pages.iter().collect(),
    };

    let now = chrono::Local::now();
    let content = render_text_file(&pages, req.format, &now.format("%Y-%m-%d %H:%M:%S").to_string());

    let filename = match req.page_numbers.as_deref() {
        Some([single]) => format!("translation_page{}_{}.txt", single, now.format("%Y%m%d_%H%M%S")),
        _ => format!("translation_{}.txt", now.format("%Y%m%d_%H%M%S")),
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename={filename}"))
            .map_err(|e| ApiError::internal(format!("Invalid filename: {e}")))?,
    );

    Ok((headers, content))
}

/// Render pages into the downloadable text layout: a header banner, then per
/// page the original and/or translated text depending on `format`.
fn render_text_file(pages: &[&MergedPage], format: DownloadFormat, generated: &str) -> String {
    let mut lines: Vec<String> = vec![
        RULE.to_string(),
        "PDF Translation Result".to_string(),
        format!("Generated: {generated}"),
        RULE.to_string(),
        String::new(),
    ];

    for page in pages {
        lines.push(format!("\n{RULE}"));
        lines.push(format!("Page {}", page.page));
        lines.push(format!("{RULE}\n"));

        if matches!(format, DownloadFormat::Original | DownloadFormat::Both)
            && !page.original.text.is_empty()
        {
            lines.push("[ORIGINAL]".to_string());
            lines.push(THIN_RULE.to_string());
            lines.push(page.original.text.clone());
            lines.push(String::new());
        }

        if matches!(format, DownloadFormat::Translated | DownloadFormat::Both)
            && !page.translated.text.is_empty()
        {
            lines.push("[TRANSLATION]".to_string());
            lines.push(THIN_RULE.to_string());
            lines.push(page.translated.text.clone());
            lines.push(String::new());
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use honyaku_core::{PageMeta, PageText, TranslatedText};

    fn merged(page: usize, original: &str, translated: &str) -> MergedPage {
        MergedPage {
            page,
            original: PageText {
                text: original.to_string(),
                sections: vec![],
            },
            translated: TranslatedText {
                text: translated.to_string(),
                sections: vec![],
            },
            metadata: PageMeta::default(),
            tables: vec![],
        }
    }

    #[test]
    fn both_format_includes_original_and_translation() {
        let page = merged(1, "Hello", "こんにちは");
        let text = render_text_file(&[&page], DownloadFormat::Both, "2026-01-01 00:00:00");
        assert!(text.contains("[ORIGINAL]"));
        assert!(text.contains("Hello"));
        assert!(text.contains("[TRANSLATION]"));
        assert!(text.contains("こんにちは"));
        assert!(text.contains("Page 1"));
    }

    #[test]
    fn translated_format_omits_original() {
        let page = merged(2, "Hello", "こんにちは");
        let text = render_text_file(&[&page], DownloadFormat::Translated, "2026-01-01 00:00:00");
        assert!(!text.contains("[ORIGINAL]"));
        assert!(text.contains("[TRANSLATION]"));
    }

    #[test]
    fn empty_page_text_is_skipped() {
        let page = merged(3, "", "");
        let text = render_text_file(&[&page], DownloadFormat::Both, "2026-01-01 00:00:00");
        assert!(text.contains("Page 3"));
        assert!(!text.contains("[ORIGINAL]"));
        assert!(!text.contains("[TRANSLATION]"));
    }
}
