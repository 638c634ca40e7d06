//! Postgres-backed repository implementations.

mod authors;
mod books;

use std::sync::Arc;

use sqlx::postgres::{PgPool, PgPoolOptions};

#[derive(Clone)]
pub struct PostgresRepositories {
    pool: Arc<PgPool>,
}

impl PostgresRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn connect(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
    }

    /// Create the two tables when absent. `books.author_id` deliberately
    /// carries no foreign-key constraint: referential integrity is the book
    /// service's job, and author deletion must not cascade or block.
    pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS authors (
                id          BIGSERIAL PRIMARY KEY,
                name        TEXT NOT NULL,
                bio         TEXT NOT NULL,
                birth_date  DATE NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS books (
                id            BIGSERIAL PRIMARY KEY,
                title         TEXT NOT NULL,
                description   TEXT,
                publish_date  DATE NOT NULL,
                author_id     BIGINT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}
