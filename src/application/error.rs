use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use super::repos::RepoError;
use super::validate::FieldErrors;

/// Failure taxonomy for one request.
///
/// `Validation` and `NotFound` are expected outcomes with fixed client
/// mappings; everything else collapses to a generic 500 whose detail is
/// logged server-side only.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed")]
    Validation(FieldErrors),
    #[error("resource not found")]
    NotFound,
    #[error(transparent)]
    Repo(RepoError),
}

impl AppError {
    pub fn validation(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }

    pub fn malformed_body() -> Self {
        Self::Validation(FieldErrors::single("body", "body must be a valid JSON document"))
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            // A row that vanished between the existence check and the write
            // still reads as "not found" to the client.
            RepoError::NotFound => AppError::NotFound,
            other => AppError::Repo(other),
        }
    }
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(validation) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "message": "validation error",
                    "validation": validation,
                })),
            )
                .into_response(),
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({"message": "not found"})),
            )
                .into_response(),
            AppError::Repo(err) => {
                error!(error = %err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"message": "internal server error"})),
                )
                    .into_response()
            }
        }
    }
}
