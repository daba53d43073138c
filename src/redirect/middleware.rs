use axum::{body::Body, http::HeaderValue, http::Request, middleware::Next, response::Response};
use std::time::Instant;

pub const TIMING_HEADER: &str = "x-tern-timing-total-ms";

/// Stamp every redirect response with the time spent handling it.
pub async fn add_timing_header(request: Request<Body>, next: Next) -> Response {
    let started = Instant::now();
    let mut response = next.run(request).await;

    let elapsed_ms = started.elapsed().as_millis() as u64;
    response
        .headers_mut()
        .insert(TIMING_HEADER, HeaderValue::from(elapsed_ms));
    response
}
