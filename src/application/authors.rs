//! Author service: repository access plus the `authors` cache policy.

use std::sync::Arc;

use tracing::info;

use crate::cache::{CacheKey, CacheStore};
use crate::domain::entities::AuthorRecord;

use super::error::AppError;
use super::repos::{AuthorParams, AuthorsRepo};

#[derive(Clone)]
pub struct AuthorService {
    repo: Arc<dyn AuthorsRepo>,
    cache: Arc<CacheStore>,
}

impl AuthorService {
    pub fn new(repo: Arc<dyn AuthorsRepo>, cache: Arc<CacheStore>) -> Self {
        Self { repo, cache }
    }

    /// Full listing, read through the `authors` cache key. An empty
    /// collection is a valid result, not a failure.
    pub async fn list_authors(&self) -> Result<Vec<AuthorRecord>, AppError> {
        self.cache
            .remember(CacheKey::Authors, || self.repo.list())
            .await
            .map_err(AppError::from)
    }

    /// Direct repository lookup; individual authors are never cached.
    pub async fn get_author(&self, id: i64) -> Result<AuthorRecord, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn create_author(&self, params: AuthorParams) -> Result<AuthorRecord, AppError> {
        let author = self.repo.create(params).await?;
        self.cache.forget(&CacheKey::Authors);
        info!(author_id = author.id, "author created");
        Ok(author)
    }

    pub async fn update_author(
        &self,
        id: i64,
        params: AuthorParams,
    ) -> Result<AuthorRecord, AppError> {
        self.get_author(id).await?;
        let author = self.repo.update(id, params).await?;
        self.cache.forget(&CacheKey::Authors);
        info!(author_id = id, "author updated");
        Ok(author)
    }

    /// Deletes the author. Books keep their `author_id`; the relationship
    /// key is forgotten so the stale listing is dropped rather than served
    /// until expiry.
    pub async fn delete_author(&self, id: i64) -> Result<(), AppError> {
        self.get_author(id).await?;
        self.repo.delete(id).await?;
        self.cache.forget(&CacheKey::Authors);
        self.cache.forget(&CacheKey::BooksByAuthor(id));
        info!(author_id = id, "author deleted");
        Ok(())
    }
}
