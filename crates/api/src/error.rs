use aurora_core::error::CoreError;
use aurora_events::RecordError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`RecordError`] for activity
/// recording failures. Implements [`IntoResponse`] to produce consistent
/// JSON error responses; storage detail is logged, never returned.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `aurora_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The activity recorder rejected or failed to persist an event.
    #[error(transparent)]
    Record(#[from] RecordError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Core(CoreError::Unauthorized(msg)) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }

            AppError::Record(RecordError::Invalid(errors)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", errors.to_string())
            }
            AppError::Record(err) => {
                tracing::error!(error = %err, "Activity recording failed");
                internal_error()
            }

            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                internal_error()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal_error() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
