//! HTTP surface: thin handlers over the services, uniform envelopes.

pub mod handlers;
pub mod responses;

use axum::{Router, routing::get};

use crate::application::authors::AuthorService;
use crate::application::books::BookService;
use crate::application::error::AppError;

#[derive(Clone)]
pub struct HttpState {
    pub authors: AuthorService,
    pub books: BookService,
}

pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route(
            "/authors",
            get(handlers::authors::list_authors).post(handlers::authors::create_author),
        )
        .route(
            "/authors/{id}",
            get(handlers::authors::get_author)
                .put(handlers::authors::update_author)
                .delete(handlers::authors::delete_author),
        )
        .route(
            "/authors/{id}/books",
            get(handlers::books::list_books_by_author),
        )
        .route(
            "/books",
            get(handlers::books::list_books).post(handlers::books::create_book),
        )
        .route(
            "/books/{id}",
            get(handlers::books::get_book)
                .put(handlers::books::update_book)
                .delete(handlers::books::delete_book),
        )
        // Unknown routes and known routes hit with the wrong method both
        // collapse to the uniform not-found body.
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found)
        .with_state(state)
}

async fn route_not_found() -> AppError {
    AppError::NotFound
}
