use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mediagen_core::error::CoreError;
use mediagen_inference::InferenceError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the `{error, detail?}` JSON shape
/// clients expect.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `mediagen_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The requested model/media-type combination has no configured service.
    #[error("Unsupported model: {0}")]
    UnsupportedModel(String),

    /// A generation service failed (network, timeout, bad payload).
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<InferenceError> for AppError {
    /// Every inference failure reaches the client as an upstream error with
    /// the underlying message preserved as detail, except an unsupported
    /// model, which is the client's fault.
    fn from(err: InferenceError) -> Self {
        match &err {
            InferenceError::UnsupportedModel { .. } => AppError::UnsupportedModel(err.to_string()),
            _ => AppError::Upstream(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, detail) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    format!("{entity} with id {id} not found"),
                    None,
                ),
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "An internal error occurred".to_string(),
                        None,
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::UnsupportedModel(msg) => (
                StatusCode::BAD_REQUEST,
                "unsupported model".to_string(),
                Some(msg.clone()),
            ),
            AppError::Upstream(msg) => (
                StatusCode::BAD_GATEWAY,
                "generation service request failed".to_string(),
                Some(msg.clone()),
            ),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let mut body = json!({ "error": error });
        if let Some(detail) = detail {
            body["detail"] = json!(detail);
        }

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error message, and detail.
///
/// - `RowNotFound` maps to 404.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, String, Option<String>) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "Resource not found".to_string(),
            None,
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal error occurred".to_string(),
                None,
            )
        }
    }
}
