//! Author handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::response::IntoResponse;
use serde_json::Value;

use crate::application::error::AppError;
use crate::application::validate;
use crate::infra::http::HttpState;
use crate::infra::http::responses;

use super::{entity_id, json_body};

pub async fn list_authors(State(state): State<HttpState>) -> Result<impl IntoResponse, AppError> {
    let authors = state.authors.list_authors().await?;
    Ok(responses::ok(authors))
}

pub async fn get_author(
    State(state): State<HttpState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = entity_id(path)?;
    let author = state.authors.get_author(id).await?;
    Ok(responses::ok(author))
}

pub async fn create_author(
    State(state): State<HttpState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = json_body(body)?;
    let params = validate::author_params(&body)?;
    let author = state.authors.create_author(params).await?;
    Ok(responses::created(author))
}

pub async fn update_author(
    State(state): State<HttpState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = entity_id(path)?;
    let body = json_body(body)?;
    let params = validate::author_params(&body)?;
    let author = state.authors.update_author(id, params).await?;
    Ok(responses::ok(author))
}

pub async fn delete_author(
    State(state): State<HttpState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = entity_id(path)?;
    state.authors.delete_author(id).await?;
    Ok(responses::no_content())
}
