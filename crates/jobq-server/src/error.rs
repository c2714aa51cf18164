use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use jobq_core::QueueError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`QueueError`] for lifecycle errors and adds request-decoding
/// failures. Implements [`IntoResponse`] to produce consistent JSON error
/// responses of the form `{ "error": ..., "code": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A lifecycle error from `jobq_core`.
    #[error(transparent)]
    Core(#[from] QueueError),

    /// The request body could not be decoded.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    fn classify(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(core) => {
                let (status, code) = match core {
                    QueueError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
                    QueueError::InvalidConsumer(_) => {
                        (StatusCode::BAD_REQUEST, "INVALID_CONSUMER")
                    }
                    QueueError::NoJobAvailable => (StatusCode::NOT_FOUND, "NO_JOB_AVAILABLE"),
                    QueueError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
                    QueueError::Conflict { .. } => (StatusCode::CONFLICT, "CONFLICT"),
                };
                (status, code, core.to_string())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.classify();
        tracing::debug!(%status, code, error = %message, "request failed");

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
