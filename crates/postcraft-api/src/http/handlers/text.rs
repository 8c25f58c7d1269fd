//! Stateless text endpoints: parse and plain-text derivation.

use axum::Json;
use serde::Deserialize;

use postcraft_core::{parse, plain};
use postcraft_types::parsed::ParsedOutput;

use crate::http::response::{ApiResponse, RequestTimer};

/// Body for the text endpoints.
#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

/// POST /api/v1/parse - Split generated text into platform and variation blocks.
pub async fn parse_text(Json(body): Json<TextRequest>) -> Json<ApiResponse<serde_json::Value>> {
    let timer = RequestTimer::start();
    let parsed = parse::parse(&body.text);
    let data = serde_json::json!({
        "platform_count": parsed.platforms.len(),
        "variation_count": parsed.variation_count(),
        "copy_texts": copy_texts(&parsed),
        "platforms": parsed.platforms,
    });
    Json(timer.success(data))
}

/// POST /api/v1/plain-text - Generated text with markdown removed.
pub async fn plain_text(Json(body): Json<TextRequest>) -> Json<ApiResponse<serde_json::Value>> {
    let timer = RequestTimer::start();
    let data = serde_json::json!({ "text": plain::to_plain_text(&body.text) });
    Json(timer.success(data))
}

/// Per-variation copy text in display order.
pub(crate) fn copy_texts(parsed: &ParsedOutput) -> Vec<serde_json::Value> {
    parsed
        .variations()
        .map(|(platform, variation)| {
            serde_json::json!({
                "platform": platform.title,
                "variation": variation.title,
                "copy_text": plain::variation_copy_text(variation),
            })
        })
        .collect()
}
