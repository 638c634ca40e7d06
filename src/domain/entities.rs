use serde::{Deserialize, Serialize};
use time::Date;

use super::date_format;

/// An author as persisted and served. Ids are assigned by the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRecord {
    pub id: i64,
    pub name: String,
    pub bio: String,
    #[serde(with = "date_format")]
    pub birth_date: Date,
}

/// A book. `author_id` is validated against authors at write time by the
/// book service; the storage layer carries no foreign-key constraint, so a
/// dangling `author_id` after an author deletion is representable on purpose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    #[serde(with = "date_format")]
    pub publish_date: Date,
    pub author_id: i64,
}
