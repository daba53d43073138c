//! API integration tests
//!
//! Drive the HTTP surface through the router with an in-memory SQLite store.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tern::api;
use tern::models::UrlRecord;
use tern::storage::{SqliteStorage, Storage, StorageError, StorageResult};
use tern::UrlService;
use tower::ServiceExt;

/// Helper to create the API router over a fresh store
async fn create_test_app() -> Router {
    let storage = SqliteStorage::new("sqlite::memory:", 1).await.unwrap();
    storage.init().await.unwrap();
    let storage: Arc<dyn Storage> = Arc::new(storage);
    api::create_api_router(UrlService::new(storage))
}

/// Store whose connection pool has gone away
struct UnavailableStorage;

fn pool_closed<T>() -> StorageResult<T> {
    Err(StorageError::Database(sqlx::Error::PoolClosed))
}

#[async_trait]
impl Storage for UnavailableStorage {
    async fn init(&self) -> StorageResult<()> {
        pool_closed()
    }

    async fn insert(&self, _url: &str, _now: i64) -> StorageResult<UrlRecord> {
        pool_closed()
    }

    async fn get(&self, _id: i64) -> StorageResult<Option<UrlRecord>> {
        pool_closed()
    }

    async fn update_url(&self, _id: i64, _url: &str, _now: i64) -> StorageResult<Option<UrlRecord>> {
        pool_closed()
    }

    async fn increment_access(&self, _id: i64, _now: i64) -> StorageResult<Option<UrlRecord>> {
        pool_closed()
    }

    async fn delete(&self, _id: i64) -> StorageResult<bool> {
        pool_closed()
    }

    async fn count(&self) -> StorageResult<i64> {
        pool_closed()
    }
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

#[tokio::test]
async fn test_lifecycle_scenario() {
    let app = create_test_app().await;

    let (status, created) = send(&app, "POST", "/shorten", Some(r#"{"url": "example.com"}"#)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], "1");
    assert_eq!(created["shortCode"], "1");
    assert_eq!(created["url"], "https://example.com");
    assert_eq!(created["createdAt"], created["updatedAt"]);

    let (status, resolved) = send(&app, "GET", "/shorten/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resolved["url"], "https://example.com");
    assert!(resolved.get("accessCount").is_none());

    let (status, stats) = send(&app, "GET", "/shorten/1/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["accessCount"], 1);

    let (_, stats) = send(&app, "GET", "/shorten/1/stats", None).await;
    assert_eq!(stats["accessCount"], 1, "stats must not count as an access");

    let (status, body) = send(&app, "DELETE", "/shorten/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, "GET", "/shorten/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Short URL not found");
}

#[tokio::test]
async fn test_resolve_counts_each_access() {
    let app = create_test_app().await;
    send(&app, "POST", "/shorten", Some(r#"{"url": "https://example.com/a"}"#)).await;

    for _ in 0..3 {
        let (status, _) = send(&app, "GET", "/shorten/1", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, stats) = send(&app, "GET", "/shorten/1/stats", None).await;
    assert_eq!(stats["accessCount"], 3);
}

#[tokio::test]
async fn test_create_rejects_invalid_urls() {
    let app = create_test_app().await;

    for payload in [r#"{"url": ""}"#, r#"{"url": "   "}"#, r#"{"url": "not a url"}"#] {
        let (status, body) = send(&app, "POST", "/shorten", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {payload}");
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn test_update_url() {
    let app = create_test_app().await;
    send(&app, "POST", "/shorten", Some(r#"{"url": "example.com"}"#)).await;

    let (status, updated) = send(
        &app,
        "PUT",
        "/shorten/1",
        Some(r#"{"url": "example.org/new"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["url"], "https://example.org/new");
    assert_eq!(updated["shortCode"], "1");

    let (status, _) = send(&app, "PUT", "/shorten/1", Some(r#"{"url": "  "}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, stats) = send(&app, "GET", "/shorten/1/stats", None).await;
    assert_eq!(stats["url"], "https://example.org/new");

    let (status, _) = send(&app, "PUT", "/shorten/zz", Some(r#"{"url": "example.org"}"#)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_and_malformed_codes_are_not_found() {
    let app = create_test_app().await;

    for uri in ["/shorten/abc", "/shorten/a-b", "/shorten/ZZZZZZZZZZZZZZZZ/stats"] {
        let (status, _) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
    }

    let (status, _) = send(&app, "DELETE", "/shorten/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_index_and_health() {
    let app = create_test_app().await;

    let (status, index) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(index["endpoints"]["POST /shorten"].is_string());

    let (status, health) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["message"], "OK");
}

#[tokio::test]
async fn test_store_failures_return_generic_500() {
    let app = api::create_api_router(UrlService::new(Arc::new(UnavailableStorage)));
    let expected = json!({ "error": "Internal server error" });

    let requests = [
        ("POST", "/shorten", Some(r#"{"url": "example.com"}"#)),
        ("GET", "/shorten/1", None),
        ("GET", "/shorten/1/stats", None),
        ("PUT", "/shorten/1", Some(r#"{"url": "example.org"}"#)),
        ("DELETE", "/shorten/1", None),
    ];

    for (method, uri, body) in requests {
        let (status, json) = send(&app, method, uri, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
        assert_eq!(json, expected, "{method} {uri}");
    }
}
