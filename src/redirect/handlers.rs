use axum::{
    extract::{Path, State},
    http::{header::HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Redirect},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::config::RedirectMode;
use crate::service::{ServiceError, UrlService};

pub struct RedirectState {
    pub service: UrlService,
    pub redirect_status: RedirectMode,
}

/// Redirect to original URL
pub async fn redirect_url(
    State(state): State<Arc<RedirectState>>,
    Path(code): Path<String>,
) -> impl IntoResponse {
    // A URL that cannot go in a Location header must not count an access
    match state.service.stats(&code).await {
        Ok(record) if HeaderValue::from_str(&record.url).is_err() => {
            tracing::warn!(short_code = %code, id = record.id, "stored URL is not a valid redirect target");
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Stored URL is not a valid redirect target",
            )
                .into_response();
        }
        Ok(_) => {}
        Err(ServiceError::Internal { .. }) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response();
        }
        Err(_) => return (StatusCode::NOT_FOUND, "URL not found").into_response(),
    }

    match state.service.resolve(&code).await {
        Ok(record) => {
            let mut headers = HeaderMap::new();
            headers.insert(
                "x-tern-access-count",
                HeaderValue::from(record.access_count),
            );

            let redirect = match state.redirect_status {
                RedirectMode::Temporary => Redirect::temporary(&record.url),
                RedirectMode::Permanent => Redirect::permanent(&record.url),
            };

            (headers, redirect).into_response()
        }
        Err(ServiceError::NotFound(_)) | Err(ServiceError::InvalidInput(_)) => {
            (StatusCode::NOT_FOUND, "URL not found").into_response()
        }
        Err(ServiceError::Internal { .. }) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    #[derive(Serialize)]
    struct HealthResponse {
        status: String,
    }

    Json(HealthResponse {
        status: "OK".to_string(),
    })
}
