//! Cache key definitions.

use std::fmt;

/// Identifies one cached listing.
///
/// `Authors` and `Books` hold the full collections; `BooksByAuthor` holds
/// the books of a single author and is the key every book write must forget
/// alongside the collection key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Authors,
    Books,
    BooksByAuthor(i64),
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Authors => f.write_str("authors"),
            CacheKey::Books => f.write_str("books"),
            CacheKey::BooksByAuthor(author_id) => write!(f, "author:{author_id}"),
        }
    }
}
