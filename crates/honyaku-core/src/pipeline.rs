//! Page-by-page translation loop with progress reporting and cancellation.

use tokio_util::sync::CancellationToken;

use crate::glossary::Glossary;
use crate::postprocess::clean_response;
use crate::progress::ProgressTracker;
use crate::quality::Quality;
use crate::translator::{TranslateError, TranslationRequest, Translator};
use crate::{Page, ProgressEvent, TranslatedPage, TranslatedSection};

/// Context line attached to full-page translations.
const PAGE_CONTEXT: &str = "Technical specification document";

/// Translate a single text. Empty input short-circuits without touching any
/// backend; output is post-processed (think tags, encoding, trim).
pub async fn translate_one(
    translator: &dyn Translator,
    text: &str,
    context: &str,
    quality: Quality,
    glossary: &Glossary,
) -> Result<String, TranslateError> {
    if text.trim().is_empty() {
        return Ok(String::new());
    }
    let request =
        TranslationRequest::new(text, quality, glossary.clone()).with_context(context);
    let raw = translator.translate(&request).await?;
    Ok(clean_response(&raw))
}

/// Translate a list of texts sequentially, preserving order.
pub async fn translate_batch(
    translator: &dyn Translator,
    texts: &[String],
    context: &str,
    quality: Quality,
    glossary: &Glossary,
) -> Result<Vec<String>, TranslateError> {
    let mut translations = Vec::with_capacity(texts.len());
    for text in texts {
        translations.push(translate_one(translator, text, context, quality, glossary).await?);
    }
    Ok(translations)
}

/// Translate extracted pages one at a time: the full page text first, then
/// each section for finer-grained display.
///
/// Progress events fire at page boundaries and the tracker is updated so the
/// progress endpoint can observe the run. Cancellation (via the token or the
/// tracker's cancel flag) is checked between pages; a cancelled run returns
/// the pages completed so far rather than an error.
pub async fn translate_pages(
    pages: Vec<Page>,
    translator: &dyn Translator,
    quality: Quality,
    glossary: &Glossary,
    tracker: &ProgressTracker,
    progress: impl Fn(ProgressEvent) + Send + Sync,
    cancel: CancellationToken,
) -> Result<Vec<TranslatedPage>, TranslateError> {
    let total = pages.len();
    tracker.start(total);

    let mut translated_pages = Vec::with_capacity(total);

    for (idx, page) in pages.into_iter().enumerate() {
        let index = idx + 1;
        if cancel.is_cancelled() || tracker.is_cancelled() {
            tracing::info!(index, total, "translation cancelled");
            progress(ProgressEvent::Cancelled { index, total });
            break;
        }

        tracker.advance(index);
        progress(ProgressEvent::PageStart {
            index,
            total,
            page: page.page,
        });
        tracing::info!(page = page.page, index, total, "translating page");

        let translated_text =
            translate_one(translator, &page.text, PAGE_CONTEXT, quality, glossary).await?;

        let mut sections = Vec::with_capacity(page.sections.len());
        for section in &page.sections {
            let context = format!("Page {}, Section", page.page);
            let translated =
                translate_one(translator, &section.text, &context, quality, glossary).await?;
            sections.push(TranslatedSection {
                original: section.text.clone(),
                translated,
                metadata: section.metadata.clone(),
            });
        }

        progress(ProgressEvent::PageDone {
            index,
            total,
            page: page.page,
        });

        translated_pages.push(TranslatedPage {
            page: page.page,
            original_text: page.text,
            translated_text,
            sections,
        });
    }

    Ok(translated_pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translator::mock::MockTranslator;

    #[tokio::test]
    async fn empty_text_skips_backend() {
        let mock = MockTranslator::with_prefix("mock", "訳:");
        let out = translate_one(&mock, "   \n ", "", Quality::Fast, &Glossary::new())
            .await
            .unwrap();
        assert_eq!(out, "");
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn batch_preserves_order() {
        let mock = MockTranslator::with_prefix("mock", "ja:");
        let texts = vec!["one".to_string(), "two".to_string()];
        let out = translate_batch(&mock, &texts, "", Quality::Fast, &Glossary::new())
            .await
            .unwrap();
        assert_eq!(out, vec!["ja:one", "ja:two"]);
    }
}
