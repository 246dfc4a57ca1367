use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use honyaku_core::Quality;

use crate::error::ApiError;
use crate::models::SetQualityRequest;
use crate::state::AppState;

/// Current quality plus the available tiers and their models.
pub async fn quality_info(State(state): State<Arc<AppState>>) -> Json<Value> {
    let engine = state.engine().await;

    let mut options = serde_json::Map::new();
    for quality in Quality::ALL {
        options.insert(
            quality.as_str().to_string(),
            json!({
                "model": quality.transformers_model(),
                "mlx_model": quality.mlx_model(),
                "description": quality.description(),
                "max_tokens": quality.settings().max_tokens,
            }),
        );
    }

    Json(json!({
        "success": true,
        "current": engine.quality.as_str(),
        "options": options,
    }))
}

pub async fn set_quality(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SetQualityRequest>,
) -> Result<Json<Value>, ApiError> {
    let quality: Quality = req.quality.parse().map_err(ApiError::bad_request)?;
    state.set_quality(quality).await;

    Ok(Json(json!({
        "success": true,
        "quality": quality.as_str(),
        "message": format!("Quality set to {quality}")
    })))
}
