pub mod memory;
pub mod postgres;
pub mod sqlite;
pub mod trait_def;

pub use memory::MemoryStorage;
pub use postgres::PostgresStorage;
pub use sqlite::SqliteStorage;
pub use trait_def::{Storage, StorageError, StorageResult};

use crate::config::{DatabaseBackend, DatabaseConfig};
use std::sync::Arc;
use std::time::Duration;

/// Open the configured backend, retrying the connection a fixed number of
/// times. Tables are created before the store is returned.
pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<Arc<dyn Storage>> {
    let attempts = config.connect_attempts.max(1);
    let mut attempt = 1;

    loop {
        let result: StorageResult<Arc<dyn Storage>> = match config.backend {
            DatabaseBackend::Sqlite => SqliteStorage::new(&config.url, config.max_connections)
                .await
                .map(|s| Arc::new(s) as Arc<dyn Storage>),
            DatabaseBackend::Postgres => {
                PostgresStorage::new(&config.url, config.max_connections)
                    .await
                    .map(|s| Arc::new(s) as Arc<dyn Storage>)
            }
            DatabaseBackend::Memory => Ok(Arc::new(MemoryStorage::new()) as Arc<dyn Storage>),
        };

        match result {
            Ok(storage) => {
                storage.init().await?;
                return Ok(storage);
            }
            Err(e) if attempt < attempts => {
                tracing::warn!(
                    attempt,
                    max_attempts = attempts,
                    error = %e,
                    "failed to connect to database, retrying in {}s",
                    config.connect_retry_secs
                );
                tokio::time::sleep(Duration::from_secs(config.connect_retry_secs)).await;
                attempt += 1;
            }
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("could not connect to database after {attempts} attempts")))
            }
        }
    }
}
