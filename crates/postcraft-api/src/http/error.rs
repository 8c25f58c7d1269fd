//! Application error type mapping to HTTP status codes and envelope format.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use postcraft_types::error::{GenerationError, InputError, ServiceError};

use crate::http::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    Service(ServiceError),
    /// Every problem found in a submitted campaign input.
    InvalidInput(Vec<InputError>),
    Validation(String),
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        AppError::Service(e)
    }
}

impl From<InputError> for AppError {
    fn from(e: InputError) -> Self {
        AppError::InvalidInput(vec![e])
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Service(ServiceError::NotFound) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "Saved output not found".to_string(),
            ),
            AppError::Service(ServiceError::AlreadySaved(id)) => (
                StatusCode::CONFLICT,
                "CONFLICT",
                format!("Output '{id}' is already saved"),
            ),
            AppError::Service(ServiceError::Storage(e)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR", e.to_string())
            }
            AppError::Service(ServiceError::Generation(GenerationError::Input(e))) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
            }
            AppError::Service(ServiceError::Generation(e @ GenerationError::MissingApiKey)) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "GENERATOR_UNAVAILABLE",
                e.to_string(),
            ),
            AppError::Service(ServiceError::Generation(e @ GenerationError::Blocked(_))) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "CONTENT_BLOCKED",
                e.to_string(),
            ),
            AppError::Service(ServiceError::Generation(e)) => {
                (StatusCode::BAD_GATEWAY, "GENERATION_FAILED", e.to_string())
            }
            AppError::InvalidInput(problems) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                problems
                    .first()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "invalid input".to_string()),
            ),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let details = match &self {
            AppError::InvalidInput(problems) if problems.len() > 1 => Some(serde_json::json!({
                "problems": problems.iter().map(ToString::to_string).collect::<Vec<_>>(),
            })),
            _ => None,
        };

        if status.is_server_error() {
            tracing::error!(code, %message, "request failed");
        } else {
            tracing::debug!(code, %message, "request rejected");
        }

        (status, Json(ApiResponse::error(code, &message, details))).into_response()
    }
}
