//! Book handlers

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

pub async fn list_books(State(state): State<HttpState>) -> Result<impl IntoResponse, AppError> {
    let books = state.books.list_books().await?;
    Ok(responses::ok(books))
}

pub async fn get_book(
    State(state): State<HttpState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = entity_id(path)?;
    let book = state.books.get_book(id).await?;
    Ok(responses::ok(book))
}

pub async fn create_book(
    State(state): State<HttpState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = json_body(body)?;
    let params = validate::book_params(&body)?;
    let book = state.books.create_book(params).await?;
    Ok(responses::created(book))
}

pub async fn update_book(
    State(state): State<HttpState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = entity_id(path)?;
    let body = json_body(body)?;
    let params = validate::book_params(&body)?;
    let book = state.books.update_book(id, params).await?;
    Ok(responses::ok(book))
}

pub async fn delete_book(
    State(state): State<HttpState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = entity_id(path)?;
    state.books.delete_book(id).await?;
    Ok(responses::no_content())
}

pub async fn list_books_by_author(
    State(state): State<HttpState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let author_id = entity_id(path)?;
    let books = state.books.list_books_by_author(author_id).await?;
    Ok(responses::ok(books))
}
