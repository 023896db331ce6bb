//! Whole-response page cache.
//!
//! Keyed by request method and URI; a hit replays the stored response
//! without invoking the handler at all. Only successful GET responses
//! are stored. Cache I/O failures degrade to normal handler execution.

use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::extract::{Request, State};
use axum::http::{Method, StatusCode, Uri, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::warn;

use listings_persistence::SharedCacheClient;

use crate::context::ApiContext;

/// Serialized HTTP response as stored in the cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedPage {
    pub status: u16,
    pub content_type: String,
    pub body: String,
}

impl IntoResponse for CachedPage {
    fn into_response(self) -> Response {
        (
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK),
            [(header::CONTENT_TYPE, self.content_type)],
            self.body,
        )
            .into_response()
    }
}

/// Storage for whole-response cache entries.
///
/// Implementations absorb their own failures: the page cache is
/// best-effort and must never fail a request.
#[async_trait]
pub trait ResponseCache: Send + Sync {
    async fn get(&self, key: &str) -> Option<CachedPage>;
    async fn put(&self, key: &str, page: CachedPage);
}

/// Redis-backed page cache using the configured page expiry.
pub struct RedisPageCache {
    cache: SharedCacheClient,
}

impl RedisPageCache {
    pub fn new(cache: SharedCacheClient) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl ResponseCache for RedisPageCache {
    async fn get(&self, key: &str) -> Option<CachedPage> {
        match self.cache.get_json(key).await {
            Ok(page) => page,
            Err(e) => {
                warn!(error = %e, key, "Page cache read failed");
                None
            }
        }
    }

    async fn put(&self, key: &str, page: CachedPage) {
        let ttl = self.cache.ttl().page;
        if let Err(e) = self.cache.set_json(key, &page, ttl).await {
            warn!(error = %e, key, "Page cache write failed");
        }
    }
}

/// Cache key for a request: method plus full URI (path and query).
#[must_use]
pub fn page_key(method: &Method, uri: &Uri) -> String {
    format!("page:{method}:{uri}")
}

/// Axum middleware implementing the whole-response cache.
pub async fn page_cache(State(ctx): State<ApiContext>, req: Request, next: Next) -> Response {
    if req.method() != Method::GET {
        return next.run(req).await;
    }

    let key = page_key(req.method(), req.uri());

    if let Some(page) = ctx.page_cache.get(&key).await {
        return page.into_response();
    }

    let response = next.run(req).await;

    if response.status() != StatusCode::OK {
        return response;
    }

    let (parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "Failed to buffer response for page cache");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let content_type = parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();

    // Non-UTF-8 bodies are served but not cached
    if let Ok(text) = String::from_utf8(bytes.to_vec()) {
        let page = CachedPage {
            status: parts.status.as_u16(),
            content_type,
            body: text,
        };
        ctx.page_cache.put(&key, page).await;
    }

    Response::from_parts(parts, Body::from(bytes))
}
