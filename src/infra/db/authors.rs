use async_trait::async_trait;
use time::Date;

use crate::application::repos::{AuthorParams, AuthorsRepo, RepoError};
use crate::domain::entities::AuthorRecord;

use super::PostgresRepositories;

#[derive(sqlx::FromRow)]
struct AuthorRow {
    id: i64,
    name: String,
    bio: String,
    birth_date: Date,
}

impl From<AuthorRow> for AuthorRecord {
    fn from(row: AuthorRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            bio: row.bio,
            birth_date: row.birth_date,
        }
    }
}

#[async_trait]
impl AuthorsRepo for PostgresRepositories {
    async fn list(&self) -> Result<Vec<AuthorRecord>, RepoError> {
        let rows = sqlx::query_as::<_, AuthorRow>(
            r#"
            SELECT id, name, bio, birth_date
            FROM authors
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(RepoError::from_persistence)?;

        Ok(rows.into_iter().map(AuthorRecord::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<AuthorRecord>, RepoError> {
        let row = sqlx::query_as::<_, AuthorRow>(
            r#"
            SELECT id, name, bio, birth_date
            FROM authors
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(RepoError::from_persistence)?;

        Ok(row.map(AuthorRecord::from))
    }

    async fn create(&self, params: AuthorParams) -> Result<AuthorRecord, RepoError> {
        let row = sqlx::query_as::<_, AuthorRow>(
            r#"
            INSERT INTO authors (name, bio, birth_date)
            VALUES ($1, $2, $3)
            RETURNING id, name, bio, birth_date
            "#,
        )
        .bind(params.name)
        .bind(params.bio)
        .bind(params.birth_date)
        .fetch_one(self.pool())
        .await
        .map_err(RepoError::from_persistence)?;

        Ok(row.into())
    }

    async fn update(&self, id: i64, params: AuthorParams) -> Result<AuthorRecord, RepoError> {
        let row = sqlx::query_as::<_, AuthorRow>(
            r#"
            UPDATE authors
            SET name = $2, bio = $3, birth_date = $4
            WHERE id = $1
            RETURNING id, name, bio, birth_date
            "#,
        )
        .bind(id)
        .bind(params.name)
        .bind(params.bio)
        .bind(params.birth_date)
        .fetch_optional(self.pool())
        .await
        .map_err(RepoError::from_persistence)?;

        row.map(AuthorRecord::from).ok_or(RepoError::NotFound)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
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
