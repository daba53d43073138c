use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::codec;

/// A stored URL. Timestamps are Unix milliseconds (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UrlRecord {
    pub id: i64,
    pub url: String,
    pub access_count: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl UrlRecord {
    /// Short code derived from the record id.
    pub fn short_code(&self) -> String {
        // Store ids are always positive, so encoding cannot fail.
        codec::encode_base62(self.id).unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUrlRequest {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUrlRequest {
    pub url: String,
}

fn to_datetime(millis: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .unwrap_or_default()
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlResponse {
    pub id: String,
    pub url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&UrlRecord> for UrlResponse {
    fn from(record: &UrlRecord) -> Self {
        Self {
            id: record.id.to_string(),
            url: record.url.clone(),
            short_code: record.short_code(),
            created_at: to_datetime(record.created_at),
            updated_at: to_datetime(record.updated_at),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlStatsResponse {
    pub id: String,
    pub url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub access_count: i64,
}

impl From<&UrlRecord> for UrlStatsResponse {
    fn from(record: &UrlRecord) -> Self {
        Self {
            id: record.id.to_string(),
            url: record.url.clone(),
            short_code: record.short_code(),
            created_at: to_datetime(record.created_at),
            updated_at: to_datetime(record.updated_at),
            access_count: record.access_count,
        }
    }
}
