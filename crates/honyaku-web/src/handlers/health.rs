use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use honyaku_core::translator::Translator;

use crate::state::AppState;

pub async fn root() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "PDF Translation API is running"
    }))
}

/// Detailed health: current quality, configured backend chain, and whether
/// any backend answers its readiness probe.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    let engine = state.engine().await;
    let backend_ready = engine.translator.check_ready().await.is_ok();

    Json(json!({
        "status": if backend_ready { "healthy" } else { "degraded" },
        "quality": engine.quality.as_str(),
        "backends": engine.translator.backend_names(),
        "backend_ready": backend_ready,
    }))
}
