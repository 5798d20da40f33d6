use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use vidya_core::error::CoreError;
use vidya_db::store::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Only unrecoverable conditions end up here. Validation failures, password
/// mismatches and blocked deletes are re-rendered forms, not errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `vidya_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure reported by the catalog store.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn not_found(entity: &'static str, id: vidya_core::types::DbId) -> Self {
        AppError::Core(CoreError::NotFound { entity, id })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(CoreError::NotFound { entity, id }) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} with id {id} not found"),
            ),

            // --- Store errors ---
            AppError::Store(err) => classify_store_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Classify a store error into an HTTP status, error code, and message.
///
/// - Dangling references map to 400.
/// - Deletes blocked by dependants map to 409.
/// - Database failures map to 500 with a sanitized message.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::MissingReference { .. } => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string())
        }
        StoreError::InUse { .. } => (StatusCode::CONFLICT, "CONFLICT", err.to_string()),
        StoreError::Unavailable(db_err) => {
            tracing::error!(error = %db_err, "Database error");
            internal()
        }
    }
}
