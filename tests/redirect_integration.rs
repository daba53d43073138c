//! Redirect integration tests
//!
//! A redirect is a resolve: it must count the access and send the client to
//! the stored URL, and unknown codes must 404.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use std::sync::Arc;
use tern::config::RedirectMode;
use tern::redirect;
use tern::storage::{SqliteStorage, Storage};
use tern::UrlService;
use tower::ServiceExt;

/// Helper to create a service over a fresh store
async fn create_test_service() -> UrlService {
    let storage = SqliteStorage::new("sqlite::memory:", 1).await.unwrap();
    storage.init().await.unwrap();
    let storage: Arc<dyn Storage> = Arc::new(storage);
    UrlService::new(storage)
}

#[tokio::test]
async fn test_redirect_counts_access() {
    let service = create_test_service().await;
    let created = service.create("example.com/destination").await.unwrap();

    let app = redirect::create_redirect_router(service.clone(), RedirectMode::Temporary);

    let request = Request::builder()
        .uri(format!("/{}", created.short_code))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "https://example.com/destination"
    );
    assert_eq!(response.headers().get("x-tern-access-count").unwrap(), "1");

    let stats = service.stats(&created.short_code).await.unwrap();
    assert_eq!(stats.access_count, 1);
}

#[tokio::test]
async fn test_permanent_redirect_mode() {
    let service = create_test_service().await;
    let created = service.create("https://example.com").await.unwrap();

    let app = redirect::create_redirect_router(service, RedirectMode::Permanent);

    let request = Request::builder()
        .uri(format!("/{}", created.short_code))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
}

#[tokio::test]
async fn test_redirect_unknown_and_deleted_codes() {
    let service = create_test_service().await;
    let created = service.create("https://example.com").await.unwrap();
    service.delete(&created.short_code).await.unwrap();

    let app = redirect::create_redirect_router(service, RedirectMode::Temporary);

    for uri in [format!("/{}", created.short_code), "/no-such".to_string()] {
        let request = Request::builder().uri(&uri).body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn test_redirect_health() {
    let service = create_test_service().await;
    let app = redirect::create_redirect_router(service, RedirectMode::Temporary);

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unusable_target_is_not_counted() {
    let service = create_test_service().await;
    let created = service.create("example.com").await.unwrap();
    service
        .update(&created.short_code, "example.com/a\nb")
        .await
        .unwrap();

    let app = redirect::create_redirect_router(service.clone(), RedirectMode::Temporary);

    let request = Request::builder()
        .uri(format!("/{}", created.short_code))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let stats = service.stats(&created.short_code).await.unwrap();
    assert_eq!(stats.url, "https://example.com/a\nb");
    assert_eq!(stats.access_count, 0);
}

#[tokio::test]
async fn test_responses_carry_timing_header() {
    let service = create_test_service().await;
    let created = service.create("example.com").await.unwrap();
    let app = redirect::create_redirect_router(service, RedirectMode::Temporary);

    for uri in [format!("/{}", created.short_code), "/unknown".to_string()] {
        let request = Request::builder().uri(&uri).body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let timing = response
            .headers()
            .get(redirect::middleware::TIMING_HEADER)
            .unwrap();
        assert!(timing.to_str().unwrap().parse::<u64>().is_ok(), "{uri}");
    }
}
