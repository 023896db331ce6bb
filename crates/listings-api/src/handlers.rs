//! HTTP handlers for the listings API.

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::context::ApiContext;
use crate::dto::{CacheMetricsResponse, PropertyListResponse, PropertyResponse};
use crate::error::ApiResult;

/// Serve the full property listing as JSON.
#[instrument(skip(ctx), name = "api_property_list")]
pub async fn property_list(State(ctx): State<ApiContext>) -> ApiResult<Json<PropertyListResponse>> {
    let properties = ctx.store.get_all_properties().await?;

    let properties = properties
        .into_iter()
        .map(PropertyResponse::from)
        .collect();

    Ok(Json(PropertyListResponse { properties }))
}

/// Report the cache server's hit/miss counters and derived hit ratio.
#[instrument(skip(ctx), name = "api_cache_metrics")]
pub async fn cache_metrics(State(ctx): State<ApiContext>) -> ApiResult<Json<CacheMetricsResponse>> {
    let metrics = ctx.metrics.cache_metrics().await?;
    Ok(Json(CacheMetricsResponse::from(metrics)))
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    "OK"
}
