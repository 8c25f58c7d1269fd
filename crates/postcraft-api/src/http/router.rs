//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/` except `/health`.
//! Middleware: CORS and request tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/platforms", get(handlers::platforms::list_platforms))
        // Generation
        .route("/payload", post(handlers::generate::preview_payload))
        .route("/generate", post(handlers::generate::generate))
        // Text utilities
        .route("/parse", post(handlers::text::parse_text))
        .route("/plain-text", post(handlers::text::plain_text))
        // Saved library
        .route(
            "/saved",
            get(handlers::saved::list_saved).post(handlers::saved::save_output),
        )
        .route(
            "/saved/{id}",
            get(handlers::saved::get_saved).delete(handlers::saved::delete_saved),
        )
        .route("/stats", get(handlers::stats::get_stats));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Liveness check.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
