//! Maps domain errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use domains::AppError;

/// Web-layer error: either a domain failure or a condition only the HTTP
/// layer knows about.
#[derive(Debug)]
pub enum ApiError {
    App(AppError),
    /// Request body over the configured upload cap.
    PayloadTooLarge,
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                "request body exceeds the upload limit".to_string(),
            ),
            ApiError::App(err) => {
                let (status, code) = match err {
                    AppError::NotFound(..) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
                    AppError::Validation(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
                    AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
                    AppError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
                    AppError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
                    AppError::Internal(detail) => {
                        tracing::error!(%detail, "request failed");
                        (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
                    }
                };

                // Internal details stay in the logs.
                let message = match err {
                    AppError::Internal(_) => "internal server error".to_string(),
                    other => other.to_string(),
                };
                (status, code, message)
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));
        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
