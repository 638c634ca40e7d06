//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;
use time::Date;

use crate::domain::entities::{AuthorRecord, BookRecord};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("record not found")]
    NotFound,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

/// Validated author fields, used for both create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorParams {
    pub name: String,
    pub bio: String,
    pub birth_date: Date,
}

/// Validated book fields, used for both create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookParams {
    pub title: String,
    pub description: Option<String>,
    pub publish_date: Date,
    pub author_id: i64,
}

/// Raw author persistence. No caching, no validation.
#[async_trait]
pub trait AuthorsRepo: Send + Sync {
    async fn list(&self) -> Result<Vec<AuthorRecord>, RepoError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<AuthorRecord>, RepoError>;
    async fn create(&self, params: AuthorParams) -> Result<AuthorRecord, RepoError>;
    async fn update(&self, id: i64, params: AuthorParams) -> Result<AuthorRecord, RepoError>;
    async fn delete(&self, id: i64) -> Result<(), RepoError>;
}

/// Raw book persistence. No caching, no validation.
#[async_trait]
pub trait BooksRepo: Send + Sync {
    async fn list(&self) -> Result<Vec<BookRecord>, RepoError>;
    async fn list_by_author(&self, author_id: i64) -> Result<Vec<BookRecord>, RepoError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<BookRecord>, RepoError>;
    async fn create(&self, params: BookParams) -> Result<BookRecord, RepoError>;
    async fn update(&self, id: i64, params: BookParams) -> Result<BookRecord, RepoError>;
    async fn delete(&self, id: i64) -> Result<(), RepoError>;
}
