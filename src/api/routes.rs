use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::service::UrlService;

use super::handlers::{
    create_url, delete_url, get_url, health_check, index, update_url, url_stats, AppState,
};

pub fn create_api_router(service: UrlService) -> Router {
    let state = Arc::new(AppState { service });

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/shorten", post(create_url))
        .route(
            "/shorten/{code}",
            get(get_url).put(update_url).delete(delete_url),
        )
        .route("/shorten/{code}/stats", get(url_stats))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
