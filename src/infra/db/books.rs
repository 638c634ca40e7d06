use async_trait::async_trait;
use time::Date;

use crate::application::repos::{BookParams, BooksRepo, RepoError};
use crate::domain::entities::BookRecord;

use super::PostgresRepositories;

#[derive(sqlx::FromRow)]
struct BookRow {
    id: i64,
    title: String,
    description: Option<String>,
    publish_date: Date,
    author_id: i64,
}

impl From<BookRow> for BookRecord {
    fn from(row: BookRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            publish_date: row.publish_date,
            author_id: row.author_id,
        }
    }
}

#[async_trait]
impl BooksRepo for PostgresRepositories {
    async fn list(&self) -> Result<Vec<BookRecord>, RepoError> {
        let rows = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, title, description, publish_date, author_id
            FROM books
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(RepoError::from_persistence)?;

        Ok(rows.into_iter().map(BookRecord::from).collect())
    }

    async fn list_by_author(&self, author_id: i64) -> Result<Vec<BookRecord>, RepoError> {
        let rows = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, title, description, publish_date, author_id
            FROM books
            WHERE author_id = $1
            ORDER BY id
            "#,
        )
        .bind(author_id)
        .fetch_all(self.pool())
        .await
        .map_err(RepoError::from_persistence)?;

        Ok(rows.into_iter().map(BookRecord::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<BookRecord>, RepoError> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, title, description, publish_date, author_id
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(RepoError::from_persistence)?;

        Ok(row.map(BookRecord::from))
    }

    async fn create(&self, params: BookParams) -> Result<BookRecord, RepoError> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            INSERT INTO books (title, description, publish_date, author_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, publish_date, author_id
            "#,
        )
        .bind(params.title)
        .bind(params.description)
        .bind(params.publish_date)
        .bind(params.author_id)
        .fetch_one(self.pool())
        .await
        .map_err(RepoError::from_persistence)?;

        Ok(row.into())
    }

    async fn update(&self, id: i64, params: BookParams) -> Result<BookRecord, RepoError> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            UPDATE books
            SET title = $2, description = $3, publish_date = $4, author_id = $5
            WHERE id = $1
            RETURNING id, title, description, publish_date, author_id
            "#,
        )
        .bind(id)
        .bind(params.title)
        .bind(params.description)
        .bind(params.publish_date)
        .bind(params.author_id)
        .fetch_optional(self.pool())
        .await
        .map_err(RepoError::from_persistence)?;

        row.map(BookRecord::from).ok_or(RepoError::NotFound)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(RepoError::from_persistence)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
