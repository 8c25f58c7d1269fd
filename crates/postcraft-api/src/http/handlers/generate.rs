//! Payload preview and generation handlers.

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use postcraft_core::input;
use postcraft_core::parse;
use postcraft_core::payload::PayloadBuilder;
use postcraft_types::input::CampaignInput;

use crate::http::error::AppError;
use crate::http::handlers::text::copy_texts;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct GenerateQuery {
    /// Save the output to the library right away.
    #[serde(default)]
    pub save: bool,
}

fn ensure_valid(campaign: &CampaignInput) -> Result<(), AppError> {
    let problems = input::problems(campaign);
    if problems.is_empty() {
        Ok(())
    } else {
        Err(AppError::InvalidInput(problems))
    }
}

/// POST /api/v1/payload - Build the request payload without sending it.
pub async fn preview_payload(
    Json(campaign): Json<CampaignInput>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let timer = RequestTimer::start();
    ensure_valid(&campaign)?;

    let payload = PayloadBuilder::build(&campaign);
    let data = serde_json::json!({
        "image_count": payload.image_count(),
        "parts": payload.parts,
    });
    Ok(Json(timer.success(data)))
}

/// POST /api/v1/generate - Run one generation request.
///
/// Returns the output together with its parsed record. With `?save=true`
/// the output is also saved.
pub async fn generate(
    State(state): State<AppState>,
    Query(query): Query<GenerateQuery>,
    Json(campaign): Json<CampaignInput>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let timer = RequestTimer::start();
    ensure_valid(&campaign)?;

    let output = state.service.generate(&campaign).await?;
    let saved = if query.save {
        let platforms = campaign.platforms.iter().copied().collect();
        Some(state.service.save(output.clone(), platforms).await?)
    } else {
        None
    };

    let parsed = parse::parse(&output.content);
    let data = serde_json::json!({
        "copy_texts": copy_texts(&parsed),
        "parsed": parsed,
        "output": output,
        "saved": saved.is_some(),
    });
    let mut resp = timer.success(data);
    if let Some(s) = saved {
        resp = resp.with_link("saved", &format!("/api/v1/saved/{}", s.id));
    }
    Ok(Json(resp))
}
