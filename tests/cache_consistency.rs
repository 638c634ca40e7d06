//! Cache policy tests at the service layer.
//!
//! Every test drives the services against in-memory repositories whose
//! listing-call counters distinguish a cache hit (counter unchanged) from a
//! recomputation (counter bumped).

mod support;

use std::sync::atomic::Ordering;
use std::time::Duration;

use folio::application::error::AppError;

use support::{MemoryRepositories, author_params, book_params, services};

const TTL: Duration = Duration::from_secs(300);

#[tokio::test]
async fn author_listing_is_served_from_cache_within_ttl() {
    let repos = MemoryRepositories::new();
    let (authors, _books, _cache) = services(repos.clone(), TTL);

    authors.create_author(author_params("John Doe")).await.unwrap();

    let first = authors.list_authors().await.unwrap();
    let second = authors.list_authors().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(repos.author_list_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn author_writes_invalidate_the_listing() {
    let repos = MemoryRepositories::new();
    let (authors, _books, _cache) = services(repos.clone(), TTL);

    let john = authors.create_author(author_params("John Doe")).await.unwrap();
    assert_eq!(authors.list_authors().await.unwrap().len(), 1);

    authors.create_author(author_params("Jane Roe")).await.unwrap();
    let listed = authors.list_authors().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(repos.author_list_calls.load(Ordering::SeqCst), 2);

    let mut renamed = author_params("Johnny Doe");
    renamed.bio = "Updated bio".to_string();
    authors.update_author(john.id, renamed).await.unwrap();
    let listed = authors.list_authors().await.unwrap();
    assert!(listed.iter().any(|author| author.name == "Johnny Doe"));

    authors.delete_author(john.id).await.unwrap();
    let listed = authors.list_authors().await.unwrap();
    assert!(!listed.iter().any(|author| author.id == john.id));
}

#[tokio::test]
async fn failed_write_does_not_evict_the_cache() {
    let repos = MemoryRepositories::new();
    let (authors, _books, _cache) = services(repos.clone(), TTL);

    authors.create_author(author_params("John Doe")).await.unwrap();
    authors.list_authors().await.unwrap();
    assert_eq!(repos.author_list_calls.load(Ordering::SeqCst), 1);

    repos.fail_writes(true);
    let failed = authors.create_author(author_params("Jane Roe")).await;
    assert!(matches!(failed, Err(AppError::Repo(_))));
    repos.fail_writes(false);

    authors.list_authors().await.unwrap();
    assert_eq!(
        repos.author_list_calls.load(Ordering::SeqCst),
        1,
        "failed create must leave the cached listing in place"
    );
}

#[tokio::test]
async fn cached_listing_expires_after_the_ttl() {
    let repos = MemoryRepositories::new();
    let (authors, _books, _cache) = services(repos.clone(), Duration::from_millis(10));

    authors.create_author(author_params("John Doe")).await.unwrap();
    authors.list_authors().await.unwrap();
    tokio::time::sleep(Duration::from_millis(25)).await;
    authors.list_authors().await.unwrap();

    assert_eq!(repos.author_list_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn book_writes_invalidate_collection_and_relationship_keys() {
    let repos = MemoryRepositories::new();
    let (authors, books, _cache) = services(repos.clone(), TTL);

    let author = authors.create_author(author_params("John Doe")).await.unwrap();
    books.create_book(book_params("First", author.id)).await.unwrap();

    assert_eq!(books.list_books().await.unwrap().len(), 1);
    assert_eq!(books.list_books_by_author(author.id).await.unwrap().len(), 1);
    assert_eq!(repos.book_list_calls.load(Ordering::SeqCst), 1);
    assert_eq!(repos.books_by_author_calls.load(Ordering::SeqCst), 1);

    books.create_book(book_params("Second", author.id)).await.unwrap();

    assert_eq!(books.list_books().await.unwrap().len(), 2);
    assert_eq!(books.list_books_by_author(author.id).await.unwrap().len(), 2);
    assert_eq!(repos.book_list_calls.load(Ordering::SeqCst), 2);
    assert_eq!(repos.books_by_author_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn deleting_a_book_refreshes_its_authors_listing() {
    let repos = MemoryRepositories::new();
    let (authors, books, _cache) = services(repos.clone(), TTL);

    let author = authors.create_author(author_params("John Doe")).await.unwrap();
    let book = books.create_book(book_params("Gone Soon", author.id)).await.unwrap();
    assert_eq!(books.list_books_by_author(author.id).await.unwrap().len(), 1);

    books.delete_book(book.id).await.unwrap();

    assert!(books.list_books_by_author(author.id).await.unwrap().is_empty());
    assert!(books.list_books().await.unwrap().is_empty());
}

#[tokio::test]
async fn updating_a_book_invalidates_the_payload_author_key() {
    let repos = MemoryRepositories::new();
    let (authors, books, _cache) = services(repos.clone(), TTL);

    let first = authors.create_author(author_params("John Doe")).await.unwrap();
    let second = authors.create_author(author_params("Jane Roe")).await.unwrap();
    let book = books.create_book(book_params("Wanderer", first.id)).await.unwrap();

    // Warm both relationship keys.
    assert_eq!(books.list_books_by_author(first.id).await.unwrap().len(), 1);
    assert!(books.list_books_by_author(second.id).await.unwrap().is_empty());
    let warm_calls = repos.books_by_author_calls.load(Ordering::SeqCst);

    books
        .update_book(book.id, book_params("Wanderer", second.id))
        .await
        .unwrap();

    // The payload author's key was forgotten and recomputes.
    assert_eq!(books.list_books_by_author(second.id).await.unwrap().len(), 1);
    assert_eq!(
        repos.books_by_author_calls.load(Ordering::SeqCst),
        warm_calls + 1
    );

    // The previous author's key is deliberately left to TTL expiry.
    let stale = books.list_books_by_author(first.id).await.unwrap();
    assert_eq!(stale.len(), 1);
    assert_eq!(
        repos.books_by_author_calls.load(Ordering::SeqCst),
        warm_calls + 1
    );
}

#[tokio::test]
async fn deleting_an_author_drops_its_relationship_key() {
    let repos = MemoryRepositories::new();
    let (authors, books, _cache) = services(repos.clone(), TTL);

    let author = authors.create_author(author_params("John Doe")).await.unwrap();
    books.create_book(book_params("Orphan", author.id)).await.unwrap();
    books.list_books_by_author(author.id).await.unwrap();
    let warm_calls = repos.books_by_author_calls.load(Ordering::SeqCst);

    authors.delete_author(author.id).await.unwrap();

    // The author is gone, so the endpoint now fails before the cache; the
    // key must not keep serving the stale listing to anyone.
    let missing = books.list_books_by_author(author.id).await;
    assert!(matches!(missing, Err(AppError::NotFound)));
    assert_eq!(repos.books_by_author_calls.load(Ordering::SeqCst), warm_calls);

    // The book itself survives with a dangling author_id.
    let remaining = books.list_books().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].author_id, author.id);
}

#[tokio::test]
async fn relationship_listing_is_scoped_to_the_author() {
    let repos = MemoryRepositories::new();
    let (authors, books, _cache) = services(repos.clone(), TTL);

    let first = authors.create_author(author_params("John Doe")).await.unwrap();
    let second = authors.create_author(author_params("Jane Roe")).await.unwrap();
    books.create_book(book_params("His", first.id)).await.unwrap();
    books.create_book(book_params("Hers", second.id)).await.unwrap();

    let listed = books.list_books_by_author(first.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "His");
}

#[tokio::test]
async fn dangling_author_reference_is_a_validation_failure() {
    let repos = MemoryRepositories::new();
    let (_authors, books, _cache) = services(repos.clone(), TTL);

    let failed = books.create_book(book_params("Nowhere", 12345)).await;
    match failed {
        Err(AppError::Validation(errors)) => {
            assert_eq!(errors.fields().collect::<Vec<_>>(), ["author_id"]);
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_author_fails_before_the_relationship_cache() {
    let repos = MemoryRepositories::new();
    let (_authors, books, _cache) = services(repos.clone(), TTL);

    let missing = books.list_books_by_author(999).await;
    assert!(matches!(missing, Err(AppError::NotFound)));
    assert_eq!(repos.books_by_author_calls.load(Ordering::SeqCst), 0);
}
