//! Platform catalog endpoint.

use axum::Json;

use postcraft_types::platform::{CATALOG, CONTENT_STYLES, CTA_STYLES, TARGET_AUDIENCES};

use crate::http::response::{ApiResponse, RequestTimer};

/// GET /api/v1/platforms - Platform catalog and picker options.
pub async fn list_platforms() -> Json<ApiResponse<serde_json::Value>> {
    let timer = RequestTimer::start();
    let data = serde_json::json!({
        "platforms": CATALOG,
        "audiences": TARGET_AUDIENCES,
        "styles": CONTENT_STYLES,
        "cta_styles": CTA_STYLES,
    });
    Json(timer.success(data).with_link("self", "/api/v1/platforms"))
}
