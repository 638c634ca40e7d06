//! In-memory repositories and wiring helpers shared by the integration suites.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use time::macros::date;

use folio::application::authors::AuthorService;
use folio::application::books::BookService;
use folio::application::repos::{AuthorParams, AuthorsRepo, BookParams, BooksRepo, RepoError};
use folio::cache::CacheStore;
use folio::domain::entities::{AuthorRecord, BookRecord};
use folio::infra::http::{HttpState, build_router};

/// Map-backed stand-in for the Postgres adapters. Counts listing calls so
/// tests can tell a cache hit from a recomputation, and can be switched to
/// fail writes to prove a failed write evicts nothing.
#[derive(Default)]
pub struct MemoryRepositories {
    authors: Mutex<BTreeMap<i64, AuthorRecord>>,
    books: Mutex<BTreeMap<i64, BookRecord>>,
    next_author_id: AtomicI64,
    next_book_id: AtomicI64,
    pub author_list_calls: AtomicUsize,
    pub book_list_calls: AtomicUsize,
    pub books_by_author_calls: AtomicUsize,
    pub fail_writes: AtomicBool,
}

impl MemoryRepositories {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn write_guard(&self) -> Result<(), RepoError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepoError::Persistence("writes disabled".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl AuthorsRepo for MemoryRepositories {
    async fn list(&self) -> Result<Vec<AuthorRecord>, RepoError> {
        self.author_list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.authors.lock().unwrap().values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<AuthorRecord>, RepoError> {
        Ok(self.authors.lock().unwrap().get(&id).cloned())
    }

    async fn create(&self, params: AuthorParams) -> Result<AuthorRecord, RepoError> {
        self.write_guard()?;
        let id = self.next_author_id.fetch_add(1, Ordering::SeqCst) + 1;
        let author = AuthorRecord {
            id,
            name: params.name,
            bio: params.bio,
            birth_date: params.birth_date,
        };
        self.authors.lock().unwrap().insert(id, author.clone());
        Ok(author)
    }

    async fn update(&self, id: i64, params: AuthorParams) -> Result<AuthorRecord, RepoError> {
        self.write_guard()?;
        let mut authors = self.authors.lock().unwrap();
        let author = authors.get_mut(&id).ok_or(RepoError::NotFound)?;
        author.name = params.name;
        author.bio = params.bio;
        author.birth_date = params.birth_date;
        Ok(author.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        self.write_guard()?;
        self.authors
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl BooksRepo for MemoryRepositories {
    async fn list(&self) -> Result<Vec<BookRecord>, RepoError> {
        self.book_list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.books.lock().unwrap().values().cloned().collect())
    }

    async fn list_by_author(&self, author_id: i64) -> Result<Vec<BookRecord>, RepoError> {
        self.books_by_author_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .books
            .lock()
            .unwrap()
            .values()
            .filter(|book| book.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<BookRecord>, RepoError> {
        Ok(self.books.lock().unwrap().get(&id).cloned())
    }

    async fn create(&self, params: BookParams) -> Result<BookRecord, RepoError> {
        self.write_guard()?;
        let id = self.next_book_id.fetch_add(1, Ordering::SeqCst) + 1;
        let book = BookRecord {
            id,
            title: params.title,
            description: params.description,
            publish_date: params.publish_date,
            author_id: params.author_id,
        };
        self.books.lock().unwrap().insert(id, book.clone());
        Ok(book)
    }

    async fn update(&self, id: i64, params: BookParams) -> Result<BookRecord, RepoError> {
        self.write_guard()?;
        let mut books = self.books.lock().unwrap();
        let book = books.get_mut(&id).ok_or(RepoError::NotFound)?;
        book.title = params.title;
        book.description = params.description;
        book.publish_date = params.publish_date;
        book.author_id = params.author_id;
        Ok(book.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        self.write_guard()?;
        self.books
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

pub fn services(
    repos: Arc<MemoryRepositories>,
    ttl: Duration,
) -> (AuthorService, BookService, Arc<CacheStore>) {
    let cache = Arc::new(CacheStore::new(ttl));
    let authors = AuthorService::new(repos.clone(), cache.clone());
    let books = BookService::new(repos, authors.clone(), cache.clone());
    (authors, books, cache)
}

pub fn router(repos: Arc<MemoryRepositories>) -> axum::Router {
    let (authors, books, _cache) = services(repos, Duration::from_secs(300));
    build_router(HttpState { authors, books })
}

pub fn author_params(name: &str) -> AuthorParams {
    AuthorParams {
        name: name.to_string(),
        bio: "Wrote several things".to_string(),
        birth_date: date!(1980 - 10 - 10),
    }
}

pub fn book_params(title: &str, author_id: i64) -> BookParams {
    BookParams {
        title: title.to_string(),
        description: Some("A fine read".to_string()),
        publish_date: date!(2022 - 05 - 15),
        author_id,
    }
}
