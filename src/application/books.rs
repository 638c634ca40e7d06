//! Book service: repository access, the `books`/`author:{id}` cache policy,
//! and the cross-entity author reference check.

use std::sync::Arc;

use tracing::info;

use crate::cache::{CacheKey, CacheStore};
use crate::domain::entities::BookRecord;

use super::authors::AuthorService;
use super::error::AppError;
use super::repos::{BookParams, BooksRepo};
use super::validate::FieldErrors;

#[derive(Clone)]
pub struct BookService {
    repo: Arc<dyn BooksRepo>,
    authors: AuthorService,
    cache: Arc<CacheStore>,
}

impl BookService {
    pub fn new(repo: Arc<dyn BooksRepo>, authors: AuthorService, cache: Arc<CacheStore>) -> Self {
        Self {
            repo,
            authors,
            cache,
        }
    }

    pub async fn list_books(&self) -> Result<Vec<BookRecord>, AppError> {
        self.cache
            .remember(CacheKey::Books, || self.repo.list())
            .await
            .map_err(AppError::from)
    }

    pub async fn get_book(&self, id: i64) -> Result<BookRecord, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn create_book(&self, params: BookParams) -> Result<BookRecord, AppError> {
        self.ensure_author_exists(params.author_id).await?;
        let book = self.repo.create(params).await?;
        self.cache.forget(&CacheKey::Books);
        self.cache.forget(&CacheKey::BooksByAuthor(book.author_id));
        info!(book_id = book.id, author_id = book.author_id, "book created");
        Ok(book)
    }

    /// Invalidation is keyed by the author in the update payload; when a
    /// book moves between authors the previous author's listing is left to
    /// TTL expiry.
    pub async fn update_book(&self, id: i64, params: BookParams) -> Result<BookRecord, AppError> {
        self.get_book(id).await?;
        self.ensure_author_exists(params.author_id).await?;
        let author_id = params.author_id;
        let book = self.repo.update(id, params).await?;
        self.cache.forget(&CacheKey::Books);
        self.cache.forget(&CacheKey::BooksByAuthor(author_id));
        info!(book_id = id, author_id, "book updated");
        Ok(book)
    }

    pub async fn delete_book(&self, id: i64) -> Result<(), AppError> {
        let book = self.get_book(id).await?;
        self.repo.delete(id).await?;
        self.cache.forget(&CacheKey::Books);
        self.cache.forget(&CacheKey::BooksByAuthor(book.author_id));
        info!(book_id = id, author_id = book.author_id, "book deleted");
        Ok(())
    }

    /// Books of one author, read through `author:{id}`. A missing author is
    /// a not-found failure before the cache is consulted.
    pub async fn list_books_by_author(&self, author_id: i64) -> Result<Vec<BookRecord>, AppError> {
        self.authors.get_author(author_id).await?;
        self.cache
            .remember(CacheKey::BooksByAuthor(author_id), || {
                self.repo.list_by_author(author_id)
            })
            .await
            .map_err(AppError::from)
    }

    /// A dangling `author_id` in a write payload is a validation failure,
    /// not a not-found: the book routes resolved fine, the field is wrong.
    async fn ensure_author_exists(&self, author_id: i64) -> Result<(), AppError> {
        match self.authors.get_author(author_id).await {
            Ok(_) => Ok(()),
            Err(AppError::NotFound) => Err(AppError::Validation(FieldErrors::single(
                "author_id",
                "author_id must reference an existing author",
            ))),
            Err(other) => Err(other),
        }
    }
}
