use crate::models::UrlRecord;
use crate::storage::{Storage, StorageResult};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;

pub struct PostgresStorage {
    pool: Arc<PgPool>,
}

impl PostgresStorage {
    pub async fn new(database_url: &str, max_connections: u32) -> StorageResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self {
            pool: Arc::new(pool),
        })
    }
}

#[async_trait]
impl Storage for PostgresStorage {
    async fn init(&self) -> StorageResult<()> {
        // Sequences never hand out a deleted id again
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS urls (
                id BIGSERIAL PRIMARY KEY,
                url TEXT NOT NULL,
                access_count BIGINT NOT NULL DEFAULT 0,
                created_at BIGINT NOT NULL,
                updated_at BIGINT NOT NULL
            )
            "#,
        )
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn insert(&self, url: &str, now: i64) -> StorageResult<UrlRecord> {
        let mut tx = self.pool.begin().await?;

        let record = sqlx::query_as::<_, UrlRecord>(
            r#"
            INSERT INTO urls (url, access_count, created_at, updated_at)
            VALUES ($1, 0, $2, $3)
            RETURNING id, url, access_count, created_at, updated_at
            "#,
        )
        .bind(url)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(record)
    }

    async fn get(&self, id: i64) -> StorageResult<Option<UrlRecord>> {
        let record = sqlx::query_as::<_, UrlRecord>(
            r#"
            SELECT id, url, access_count, created_at, updated_at
            FROM urls
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(record)
    }

    async fn update_url(&self, id: i64, url: &str, now: i64) -> StorageResult<Option<UrlRecord>> {
        let mut tx = self.pool.begin().await?;

        let record = sqlx::query_as::<_, UrlRecord>(
            r#"
            UPDATE urls
            SET url = $1, updated_at = GREATEST(updated_at, $2)
            WHERE id = $3
            RETURNING id, url, access_count, created_at, updated_at
            "#,
        )
        .bind(url)
        .bind(now)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(record)
    }

    async fn increment_access(&self, id: i64, now: i64) -> StorageResult<Option<UrlRecord>> {
        let mut tx = self.pool.begin().await?;

        let record = sqlx::query_as::<_, UrlRecord>(
            r#"
            UPDATE urls
            SET access_count = access_count + 1, updated_at = GREATEST(updated_at, $1)
            WHERE id = $2
            RETURNING id, url, access_count, created_at, updated_at
            "#,
        )
        .bind(now)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(record)
    }

    async fn delete(&self, id: i64) -> StorageResult<bool> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            DELETE FROM urls
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> StorageResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM urls")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
