use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::models::{CreateUrlRequest, UpdateUrlRequest, UrlResponse, UrlStatsResponse};
use crate::service::{ServiceResult, UrlService};

pub struct AppState {
    pub service: UrlService,
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub message: String,
}

/// Describe the available endpoints
pub async fn index() -> Json<Value> {
    Json(json!({
        "message": "URL Shortener API",
        "endpoints": {
            "POST /shorten": "Create a new short URL",
            "GET /shorten/{shortCode}": "Retrieve original URL",
            "PUT /shorten/{shortCode}": "Update existing short URL",
            "DELETE /shorten/{shortCode}": "Delete short URL",
            "GET /shorten/{shortCode}/stats": "Get URL statistics"
        }
    }))
}

/// Create a new short URL
pub async fn create_url(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateUrlRequest>,
) -> ServiceResult<(StatusCode, Json<UrlResponse>)> {
    let created = state.service.create(&payload.url).await?;
    Ok((StatusCode::CREATED, Json(UrlResponse::from(&created.record))))
}

/// Retrieve the original URL, counting the access
pub async fn get_url(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> ServiceResult<Json<UrlResponse>> {
    let record = state.service.resolve(&code).await?;
    Ok(Json(UrlResponse::from(&record)))
}

/// Point a short URL at a new destination
pub async fn update_url(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    Json(payload): Json<UpdateUrlRequest>,
) -> ServiceResult<Json<UrlResponse>> {
    let record = state.service.update(&code, &payload.url).await?;
    Ok(Json(UrlResponse::from(&record)))
}

/// Delete a short URL
pub async fn delete_url(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> ServiceResult<StatusCode> {
    state.service.delete(&code).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Statistics for a short URL
pub async fn url_stats(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> ServiceResult<Json<UrlStatsResponse>> {
    let record = state.service.stats(&code).await?;
    Ok(Json(UrlStatsResponse::from(&record)))
}

/// Health check endpoint
pub async fn health_check() -> Json<SuccessResponse> {
    Json(SuccessResponse {
        message: "OK".to_string(),
    })
}
