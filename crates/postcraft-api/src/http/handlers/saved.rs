//! Saved output library handlers.

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use uuid::Uuid;

use postcraft_core::{parse, plain};
use postcraft_types::output::GeneratedOutput;
use postcraft_types::platform::Platform;

use crate::http::error::AppError;
use crate::http::handlers::text::copy_texts;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

/// Body for saving a generated output.
#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    pub output: GeneratedOutput,
    /// Platforms that were selected for the generation.
    #[serde(default)]
    pub platforms: Vec<Platform>,
}

fn parse_id(id: &str) -> Result<Uuid, AppError> {
    id.parse()
        .map_err(|_| AppError::Validation(format!("'{id}' is not a valid output ID")))
}

/// GET /api/v1/saved - Saved outputs, newest first, with preview lines.
pub async fn list_saved(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<serde_json::Value>>>, AppError> {
    let timer = RequestTimer::start();
    let saved = state.service.list_saved().await?;

    let items = saved
        .iter()
        .map(|s| {
            serde_json::json!({
                "id": s.id,
                "created_at": s.created_at,
                "saved_at": s.saved_at,
                "platforms": s.platforms,
                "preview": plain::preview_line(&s.content),
            })
        })
        .collect();

    Ok(Json(timer.success(items).with_link("self", "/api/v1/saved")))
}

/// POST /api/v1/saved - Save a generated output.
pub async fn save_output(
    State(state): State<AppState>,
    Json(body): Json<SaveRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let timer = RequestTimer::start();
    let saved = state.service.save(body.output, body.platforms).await?;
    let href = format!("/api/v1/saved/{}", saved.id);

    let data = serde_json::json!(saved);
    Ok(Json(timer.success(data).with_link("self", &href)))
}

/// GET /api/v1/saved/{id} - A saved output with its parsed record.
pub async fn get_saved(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let timer = RequestTimer::start();
    let id = parse_id(&id)?;
    let saved = state.service.get_saved(&id).await?;

    let parsed = parse::parse(&saved.content);
    let data = serde_json::json!({
        "copy_texts": copy_texts(&parsed),
        "parsed": parsed,
        "saved": saved,
    });
    Ok(Json(
        timer
            .success(data)
            .with_link("self", &format!("/api/v1/saved/{id}")),
    ))
}

/// DELETE /api/v1/saved/{id} - Delete a saved output.
pub async fn delete_saved(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let timer = RequestTimer::start();
    let id = parse_id(&id)?;
    state.service.delete_saved(&id).await?;

    Ok(Json(
        timer.success(serde_json::json!({ "deleted": true, "id": id })),
    ))
}
