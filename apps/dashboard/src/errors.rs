use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::backend_client::BackendError;
use crate::selection::controller::ControllerError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// The action is not allowed in the current selection phase.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Service unavailable: {0}")]
    Unavailable(#[from] ControllerError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Backend(BackendError::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone())
            }
            AppError::Backend(e) => {
                tracing::error!("Backend error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "BACKEND_ERROR",
                    "The evaluation backend could not be reached".to_string(),
                )
            }
            AppError::Unavailable(e) => {
                tracing::error!("Selection controller error: {e}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "UNAVAILABLE",
                    "Selection state is unavailable".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_not_found_maps_to_404() {
        let response = AppError::from(BackendError::NotFound("gone".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_backend_failure_maps_to_502() {
        let err = BackendError::Api {
            status: 500,
            message: "boom".into(),
        };
        assert_eq!(
            AppError::from(err).into_response().status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_validation_maps_to_400() {
        let response = AppError::Validation("unknown tab".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_conflict_and_closed_controller() {
        assert_eq!(
            AppError::Conflict("x".into()).into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(ControllerError::Closed).into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
