use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

pub mod config_file;
pub mod glossary;
pub mod pipeline;
pub mod postprocess;
pub mod progress;
pub mod prompt;
pub mod quality;
pub mod translator;

// Re-export for convenience
pub use glossary::{Glossary, GlossaryError, GlossaryStore};
pub use pipeline::{translate_batch, translate_pages};
pub use progress::{Progress, ProgressTracker};
pub use quality::{GenerationSettings, Quality};
pub use translator::{
    FallbackTranslator, TranslateError, TranslationRequest, Translator, build_translator,
};

/// A table extracted from a PDF page: rows of cells. Empty cells are `None`.
pub type Table = Vec<Vec<Option<String>>>;

/// Per-page dimensions and extraction flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageMeta {
    pub width: f32,
    pub height: f32,
    pub has_tables: bool,
    /// True when the page had no embedded text and OCR produced the content.
    #[serde(default)]
    pub ocr: bool,
}

/// Paragraph-level metadata attached to each section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionMeta {
    pub index: usize,
    pub is_heading: bool,
    pub is_list: bool,
    pub length: usize,
}

/// One paragraph of an extracted page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub text: String,
    pub metadata: SectionMeta,
}

/// One extracted PDF page, cleaned up and split into sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based page number.
    pub page: usize,
    pub text: String,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub metadata: PageMeta,
}

/// A translated section, paired with its source text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslatedSection {
    pub original: String,
    pub translated: String,
    pub metadata: SectionMeta,
}

/// The translation of a single page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslatedPage {
    pub page: usize,
    pub original_text: String,
    pub translated_text: String,
    pub sections: Vec<TranslatedSection>,
}

/// Original and translated text for one page, as served to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedPage {
    pub page: usize,
    pub original: PageText,
    pub translated: TranslatedText,
    pub metadata: PageMeta,
    pub tables: Vec<Table>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageText {
    pub text: String,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranslatedText {
    pub text: String,
    pub sections: Vec<TranslatedSection>,
}

/// Document-level information reported after upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfInfo {
    pub pages: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_page_size: Option<PageSize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

/// Progress events emitted while translating a document.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// A page translation is starting.
    PageStart {
        index: usize,
        total: usize,
        page: usize,
    },
    /// A page finished (full text plus all sections).
    PageDone {
        index: usize,
        total: usize,
        page: usize,
    },
    /// The run was cancelled before finishing.
    Cancelled { index: usize, total: usize },
}

/// Pair original pages with their translations, zipped by position.
///
/// A cancelled run produces fewer translated pages than originals; the
/// surplus originals are dropped, matching the length of the shorter side.
pub fn merge_pages(original: &[Page], translated: &[TranslatedPage]) -> Vec<MergedPage> {
    original
        .iter()
        .zip(translated.iter())
        .map(|(orig, trans)| MergedPage {
            page: orig.page,
            original: PageText {
                text: orig.text.clone(),
                sections: orig.sections.clone(),
            },
            translated: TranslatedText {
                text: trans.translated_text.clone(),
                sections: trans.sections.clone(),
            },
            metadata: orig.metadata.clone(),
            tables: orig.tables.clone(),
        })
        .collect()
}

/// Translate a list of extracted pages, emitting progress events.
///
/// Convenience wrapper over [`pipeline::translate_pages`]; the operation can
/// be cancelled via the CancellationToken, in which case the pages completed
/// so far are returned.
pub async fn translate_document(
    pages: Vec<Page>,
    translator: &dyn Translator,
    quality: Quality,
    glossary: &Glossary,
    tracker: &ProgressTracker,
    progress: impl Fn(ProgressEvent) + Send + Sync,
    cancel: CancellationToken,
) -> Result<Vec<TranslatedPage>, TranslateError> {
    pipeline::translate_pages(pages, translator, quality, glossary, tracker, progress, cancel)
        .await
}

#[cfg(test)]
mod merge_tests {
    use super::*;

    fn page(n: usize, text: &str) -> Page {
        Page {
            page: n,
            text: text.to_string(),
            sections: vec![],
            tables: vec![],
            metadata: PageMeta::default(),
        }
    }

    fn translated(n: usize, text: &str) -> TranslatedPage {
        TranslatedPage {
            page: n,
            original_text: String::new(),
            translated_text: text.to_string(),
            sections: vec![],
        }
    }

    #[test]
    fn merges_by_position() {
        let orig = vec![page(1, "one"), page(2, "two")];
        let trans = vec![translated(1, "一"), translated(2, "二")];
        let merged = merge_pages(&orig, &trans);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].page, 1);
        assert_eq!(merged[0].original.text, "one");
        assert_eq!(merged[0].translated.text, "一");
        assert_eq!(merged[1].translated.text, "二");
    }

    #[test]
    fn cancelled_run_truncates_to_shorter_side() {
        let orig = vec![page(1, "one"), page(2, "two"), page(3, "three")];
        let trans = vec![translated(1, "一")];
        let merged = merge_pages(&orig, &trans);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].page, 1);
    }
}
