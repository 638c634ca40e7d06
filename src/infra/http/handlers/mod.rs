pub mod authors;
pub mod books;

use axum::Json;
use axum::extract::Path;
use axum::extract::rejection::{JsonRejection, PathRejection};
use serde_json::Value;

use crate::application::error::AppError;

/// An `{id}` segment that does not parse as an integer resolves to the same
/// uniform not-found as an unknown route.
pub(crate) fn entity_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    path.map(|Path(id)| id).map_err(|_| AppError::NotFound)
}

pub(crate) fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    body.map(|Json(value)| value)
        .map_err(|_| AppError::malformed_body())
}
