//! Short URL lifecycle: create, resolve, stats, update and delete.
//!
//! Every operation is a single call into the [`Storage`], which applies it
//! atomically. A short code is never looked up directly; it is decoded to the
//! record id first, and any code that cannot be decoded is reported as
//! not found since no stored record could ever carry it.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::codec;
use crate::models::UrlRecord;
use crate::storage::{Storage, StorageError};
use crate::validation::{self, ValidationError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("short URL '{0}' not found")]
    NotFound(String),
    #[error("storage failure while handling '{context}': {source}")]
    Internal {
        context: String,
        #[source]
        source: StorageError,
    },
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::InvalidInput(err.to_string())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// A freshly created record together with its short code.
#[derive(Debug, Clone)]
pub struct CreatedUrl {
    pub record: UrlRecord,
    pub short_code: String,
}

#[derive(Clone)]
pub struct UrlService {
    storage: Arc<dyn Storage>,
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn internal(context: impl Into<String>) -> impl FnOnce(StorageError) -> ServiceError {
    let context = context.into();
    move |source| {
        error!(context = %context, error = %source, "storage operation failed");
        ServiceError::Internal { context, source }
    }
}

impl UrlService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    fn id_for(short_code: &str) -> ServiceResult<i64> {
        match codec::decode_base62(short_code) {
            Ok(id) if id > 0 => Ok(id),
            Ok(_) => Err(ServiceError::NotFound(short_code.to_string())),
            Err(e) => {
                debug!(short_code, error = %e, "short code does not decode to an id");
                Err(ServiceError::NotFound(short_code.to_string()))
            }
        }
    }

    /// Store a new URL and return it with its short code.
    pub async fn create(&self, raw_url: &str) -> ServiceResult<CreatedUrl> {
        let url = validation::normalize_for_create(raw_url)?;

        let record = self
            .storage
            .insert(&url, now_millis())
            .await
            .map_err(internal(format!("create {url}")))?;

        let short_code = record.short_code();
        info!(id = record.id, short_code = %short_code, "created short URL");

        Ok(CreatedUrl { record, short_code })
    }

    /// Look up a short code and count the access.
    pub async fn resolve(&self, short_code: &str) -> ServiceResult<UrlRecord> {
        let id = Self::id_for(short_code)?;

        self.storage
            .increment_access(id, now_millis())
            .await
            .map_err(internal(format!("resolve {short_code} (id {id})")))?
            .ok_or_else(|| ServiceError::NotFound(short_code.to_string()))
    }

    /// Look up a short code without touching it.
    pub async fn stats(&self, short_code: &str) -> ServiceResult<UrlRecord> {
        let id = Self::id_for(short_code)?;

        self.storage
            .get(id)
            .await
            .map_err(internal(format!("stats {short_code} (id {id})")))?
            .ok_or_else(|| ServiceError::NotFound(short_code.to_string()))
    }

    /// Point an existing short code at a new URL.
    pub async fn update(&self, short_code: &str, new_url: &str) -> ServiceResult<UrlRecord> {
        let existing = self.stats(short_code).await?;
        let url = validation::normalize_for_update(new_url)?;

        let record = self
            .storage
            .update_url(existing.id, &url, now_millis())
            .await
            .map_err(internal(format!("update {short_code} (id {})", existing.id)))?
            .ok_or_else(|| ServiceError::NotFound(short_code.to_string()))?;

        info!(id = record.id, short_code, "updated short URL");
        Ok(record)
    }

    /// Remove a short code for good.
    pub async fn delete(&self, short_code: &str) -> ServiceResult<()> {
        let id = Self::id_for(short_code)?;

        let deleted = self
            .storage
            .delete(id)
            .await
            .map_err(internal(format!("delete {short_code} (id {id})")))?;

        if !deleted {
            return Err(ServiceError::NotFound(short_code.to_string()));
        }

        info!(id, short_code, "deleted short URL");
        Ok(())
    }
}
