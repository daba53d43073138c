use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::RedirectMode;
use crate::service::UrlService;

use super::handlers::{health_check, redirect_url, RedirectState};
use super::middleware::add_timing_header;

pub fn create_redirect_router(service: UrlService, redirect_status: RedirectMode) -> Router {
    let state = Arc::new(RedirectState {
        service,
        redirect_status,
    });

    Router::new()
        .route("/", get(health_check))
        .route("/{code}", get(redirect_url))
        .layer(middleware::from_fn(add_timing_header))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
