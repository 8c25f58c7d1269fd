//! Library statistics endpoint.

use axum::Json;
use axum::extract::State;

use postcraft_types::platform::CATALOG;

use crate::http::error::AppError;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

/// GET /api/v1/stats - Saved output count and generator readiness.
pub async fn get_stats(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let timer = RequestTimer::start();
    let saved_outputs = state.service.count_saved().await?;

    let data = serde_json::json!({
        "saved_outputs": saved_outputs,
        "platforms": CATALOG.len(),
        "model": state.config.model,
        "generator_ready": state.service.generator().has_api_key(),
    });
    Ok(Json(timer.success(data).with_link("self", "/api/v1/stats")))
}
