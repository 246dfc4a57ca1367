//! End-to-end pipeline tests against the mock translator.

use std::sync::Mutex;

use tokio_util::sync::CancellationToken;

use honyaku_core::translator::mock::MockTranslator;
use honyaku_core::{
    Glossary, Page, PageMeta, ProgressEvent, ProgressTracker, Quality, Section, SectionMeta,
    merge_pages, pipeline,
};

fn page(n: usize, text: &str, sections: &[&str]) -> Page {
    Page {
        page: n,
        text: text.to_string(),
        sections: sections
            .iter()
            .enumerate()
            .map(|(i, s)| Section {
                text: s.to_string(),
                metadata: SectionMeta {
                    index: i,
                    is_heading: false,
                    is_list: false,
                    length: s.len(),
                },
            })
            .collect(),
        tables: vec![],
        metadata: PageMeta::default(),
    }
}

#[tokio::test]
async fn translates_all_pages_and_sections() {
    let mock = MockTranslator::with_prefix("mock", "ja:");
    let tracker = ProgressTracker::new();
    let pages = vec![
        page(1, "first page", &["intro", "body"]),
        page(2, "second page", &[]),
    ];

    let events = Mutex::new(Vec::new());
    let result = pipeline::translate_pages(
        pages,
        &mock,
        Quality::Fast,
        &Glossary::new(),
        &tracker,
        |e| events.lock().unwrap().push(e),
        CancellationToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(result.len(), 2);
    assert_eq!(result[0].translated_text, "ja:first page");
    assert_eq!(result[0].sections.len(), 2);
    assert_eq!(result[0].sections[0].translated, "ja:intro");
    assert_eq!(result[1].translated_text, "ja:second page");

    // 2 page texts + 2 sections
    assert_eq!(mock.calls(), 4);

    // Tracker finished at 2/2
    let progress = tracker.snapshot();
    assert_eq!(progress.current, 2);
    assert_eq!(progress.total, 2);
    assert_eq!(progress.percentage, 100.0);

    // PageStart/PageDone per page, no cancellation
    let events = events.lock().unwrap();
    let starts = events
        .iter()
        .filter(|e| matches!(e, ProgressEvent::PageStart { .. }))
        .count();
    let dones = events
        .iter()
        .filter(|e| matches!(e, ProgressEvent::PageDone { .. }))
        .count();
    assert_eq!(starts, 2);
    assert_eq!(dones, 2);
}

#[tokio::test]
async fn pre_cancelled_token_translates_nothing() {
    let mock = MockTranslator::with_prefix("mock", "ja:");
    let tracker = ProgressTracker::new();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = pipeline::translate_pages(
        vec![page(1, "text", &[])],
        &mock,
        Quality::Fast,
        &Glossary::new(),
        &tracker,
        |_| {},
        cancel,
    )
    .await
    .unwrap();

    assert!(result.is_empty());
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn tracker_cancel_stops_between_pages() {
    let mock = MockTranslator::with_prefix("mock", "ja:");
    let tracker = ProgressTracker::new();
    let pages = vec![page(1, "one", &[]), page(2, "two", &[]), page(3, "three", &[])];

    // Cancel after the first page completes.
    let result = pipeline::translate_pages(
        pages,
        &mock,
        Quality::Fast,
        &Glossary::new(),
        &tracker,
        |e| {
            if matches!(e, ProgressEvent::PageDone { index: 1, .. }) {
                tracker.cancel();
            }
        },
        CancellationToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].translated_text, "ja:one");
}

#[tokio::test]
async fn backend_error_aborts_the_run() {
    let mock = MockTranslator::failing("dead");
    let tracker = ProgressTracker::new();

    let result = pipeline::translate_pages(
        vec![page(1, "text", &[])],
        &mock,
        Quality::Fast,
        &Glossary::new(),
        &tracker,
        |_| {},
        CancellationToken::new(),
    )
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn merged_output_pairs_pages() {
    let mock = MockTranslator::with_prefix("mock", "ja:");
    let tracker = ProgressTracker::new();
    let originals = vec![page(1, "alpha", &[]), page(2, "beta", &[])];

    let translated = pipeline::translate_pages(
        originals.clone(),
        &mock,
        Quality::Balanced,
        &Glossary::new(),
        &tracker,
        |_| {},
        CancellationToken::new(),
    )
    .await
    .unwrap();

    let merged = merge_pages(&originals, &translated);
    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].original.text, "alpha");
    assert_eq!(merged[0].translated.text, "ja:alpha");
    assert_eq!(merged[1].page, 2);
}
