use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use honyaku_core::{merge_pages, pipeline};

use crate::error::ApiError;
use crate::models::*;
use crate::state::AppState;

/// Translate a single text.
pub async fn translate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, ApiError> {
    if req.text.is_empty() {
        return Err(ApiError::bad_request("Text is required"));
    }

    let engine = state.engine().await;
    let glossary = state.glossary.get();
    let translated = pipeline::translate_one(
        &engine.translator,
        &req.text,
        &req.context,
        engine.quality,
        &glossary,
    )
    .await?;

    Ok(Json(TranslateResponse {
        success: true,
        original: req.text,
        translated,
    }))
}

/// Translate extracted pages and merge originals with translations.
///
/// The run happens in a spawned task so a client disconnect (or the cancel
/// endpoint) stops it between pages instead of orphaning the work.
pub async fn translate_pages(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TranslatePagesRequest>,
) -> Result<Json<TranslatePagesResponse>, ApiError> {
    if req.pages.is_empty() {
        return Err(ApiError::bad_request("Pages data is required"));
    }

    if let Some(quality) = &req.quality {
        let quality = quality.parse().map_err(ApiError::bad_request)?;
        state.set_quality(quality).await;
    }

    let engine = state.engine().await;
    let glossary = state.glossary.get();
    let tracker = state.progress.clone();
    let cancel = state.begin_run();
    // If the client disconnects, axum drops this handler future; the guard
    // then cancels the run so the spawned task stops at the next page.
    let _disconnect_guard = cancel.clone().drop_guard();

    tracing::info!(pages = req.pages.len(), quality = %engine.quality, "translating pages");

    let originals = req.pages.clone();
    let run_engine = engine.clone();
    let handle = tokio::spawn(async move {
        pipeline::translate_pages(
            req.pages,
            &run_engine.translator,
            run_engine.quality,
            &glossary,
            &tracker,
            |_| {},
            cancel,
        )
        .await
    });

    let translated = handle
        .await
        .map_err(|e| ApiError::internal(format!("Translation task error: {e}")))??;

    let merged = merge_pages(&originals, &translated);

    Ok(Json(TranslatePagesResponse {
        success: true,
        pages: merged,
        quality: engine.quality.as_str().to_string(),
    }))
}

/// Translate a batch of texts, preserving order.
pub async fn translate_batch(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TranslateBatchRequest>,
) -> Result<Json<TranslateBatchResponse>, ApiError> {
    if req.texts.is_empty() {
        return Err(ApiError::bad_request("Texts are required"));
    }

    let engine = state.engine().await;
    let glossary = state.glossary.get();
    let translations = pipeline::translate_batch(
        &engine.translator,
        &req.texts,
        &req.context,
        engine.quality,
        &glossary,
    )
    .await?;

    let pairs = req
        .texts
        .into_iter()
        .zip(translations)
        .map(|(original, translated)| TranslatedPair {
            original,
            translated,
        })
        .collect();

    Ok(Json(TranslateBatchResponse {
        success: true,
        translations: pairs,
    }))
}

pub async fn progress(State(state): State<Arc<AppState>>) -> Json<ProgressResponse> {
    Json(ProgressResponse {
        success: true,
        progress: state.progress.snapshot(),
    })
}

pub async fn cancel(State(state): State<Arc<AppState>>) -> Json<Value> {
    state.cancel_active_run();
    tracing::info!("translation cancellation requested");
    Json(json!({
        "success": true,
        "message": "Translation cancellation requested"
    }))
}
