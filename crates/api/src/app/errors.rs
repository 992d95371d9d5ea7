use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use bazaar_core::DomainError;

/// Client-facing text for storage failures; the backend detail is only logged.
const STORAGE_FAILURE_MESSAGE: &str = "record store unavailable";

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::NotFound(msg) => json_error(StatusCode::NOT_FOUND, "not_found", msg),
        DomainError::Storage(msg) => {
            tracing::error!(error = %msg, "record store failure");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "storage_error",
                STORAGE_FAILURE_MESSAGE,
            )
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
