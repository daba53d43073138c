use crate::models::UrlRecord;
use crate::storage::{Storage, StorageResult};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};

/// In-memory store backed by DashMap.
///
/// Mutations go through the map's per-shard write lock, so an increment on
/// one record is serialized against every other write to the same record.
/// Ids come from an atomic counter that is never rewound.
#[derive(Debug)]
pub struct MemoryStorage {
    records: DashMap<i64, UrlRecord>,
    last_id: AtomicI64,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            last_id: AtomicI64::new(0),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn init(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn insert(&self, url: &str, now: i64) -> StorageResult<UrlRecord> {
        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        let record = UrlRecord {
            id,
            url: url.to_string(),
            access_count: 0,
            created_at: now,
            updated_at: now,
        };

        self.records.insert(id, record.clone());
        Ok(record)
    }

    async fn get(&self, id: i64) -> StorageResult<Option<UrlRecord>> {
        Ok(self.records.get(&id).map(|entry| entry.value().clone()))
    }

    async fn update_url(&self, id: i64, url: &str, now: i64) -> StorageResult<Option<UrlRecord>> {
        Ok(self.records.get_mut(&id).map(|mut entry| {
            entry.url = url.to_string();
            entry.updated_at = entry.updated_at.max(now);
            entry.clone()
        }))
    }

    async fn increment_access(&self, id: i64, now: i64) -> StorageResult<Option<UrlRecord>> {
        Ok(self.records.get_mut(&id).map(|mut entry| {
            entry.access_count += 1;
            entry.updated_at = entry.updated_at.max(now);
            entry.clone()
        }))
    }

    async fn delete(&self, id: i64) -> StorageResult<bool> {
        Ok(self.records.remove(&id).is_some())
    }

    async fn count(&self) -> StorageResult<i64> {
        Ok(self.records.len() as i64)
    }
}
