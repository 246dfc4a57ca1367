use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::models::{GlossaryAddRequest, GlossaryUpdateRequest};
use crate::state::AppState;

pub async fn get_glossary(State(state): State<Arc<AppState>>) -> Json<Value> {
    let glossary = state.glossary.get();
    Json(json!({
        "success": true,
        "count": glossary.len(),
        "glossary": glossary,
    }))
}

/// Replace the full glossary.
pub async fn update_glossary(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GlossaryUpdateRequest>,
) -> Result<Json<Value>, ApiError> {
    let count = req.glossary.len();
    state.glossary.replace(req.glossary.clone())?;
    tracing::info!(terms = count, "glossary replaced");

    Ok(Json(json!({
        "success": true,
        "message": format!("Glossary updated with {count} terms"),
        "terms": req.glossary,
    })))
}

/// Add a single term.
pub async fn add_glossary_term(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GlossaryAddRequest>,
) -> Result<Json<Value>, ApiError> {
    if req.english.is_empty() || req.japanese.is_empty() {
        return Err(ApiError::bad_request(
            "Both english and japanese terms are required",
        ));
    }

    state.glossary.add(&req.english, &req.japanese)?;
    tracing::info!(term = %req.english, "glossary term added");

    let mut term = serde_json::Map::new();
    term.insert(req.english, Value::String(req.japanese));

    Ok(Json(json!({
        "success": true,
        "message": "Term added to glossary",
        "term": term,
    })))
}
