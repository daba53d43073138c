use crate::models::UrlRecord;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Persistent record store. Implementations assign ids from a source that is
/// unique and strictly increasing for the lifetime of the store, and never
/// hand out an id again once its record is deleted.
///
/// Each mutating call is applied atomically: it either commits completely or
/// leaves the store untouched.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Initialize the storage (create tables, etc.)
    async fn init(&self) -> StorageResult<()>;

    /// Insert a new record with `access_count = 0` and both timestamps set to `now`.
    async fn insert(&self, url: &str, now: i64) -> StorageResult<UrlRecord>;

    /// Get a record by id
    async fn get(&self, id: i64) -> StorageResult<Option<UrlRecord>>;

    /// Replace the url of a record and refresh `updated_at`
    async fn update_url(&self, id: i64, url: &str, now: i64) -> StorageResult<Option<UrlRecord>>;

    /// Add one to `access_count` and refresh `updated_at`. `updated_at` never
    /// moves backwards, even if `now` is behind the stored value.
    async fn increment_access(&self, id: i64, now: i64) -> StorageResult<Option<UrlRecord>>;

    /// Permanently remove a record
    async fn delete(&self, id: i64) -> StorageResult<bool>;

    /// Number of stored records
    async fn count(&self) -> StorageResult<i64>;
}
