//! # Cache Module
//!
//! Redis cache layer and the trait seams the rest of the service
//! injects cache access through.

pub mod redis_client;

use async_trait::async_trait;

use crate::error::Result;
use listings_domain::{CacheMetrics, Property};

pub use redis_client::{ALL_PROPERTIES_KEY, CacheClient, CacheConfig, CacheTtl, SharedCacheClient};

/// Cache access for the full property listing.
///
/// Implemented by [`CacheClient`] against Redis; tests substitute
/// in-memory doubles.
#[async_trait]
pub trait PropertyCache: Send + Sync {
    /// Read the cached listing. `Ok(None)` is a miss; a decode failure
    /// surfaces as `Err` so callers can decide the fallback.
    async fn get_properties(&self) -> Result<Option<Vec<Property>>>;

    /// Write the listing back with the configured expiry.
    async fn put_properties(&self, properties: &[Property]) -> Result<()>;
}

/// Source of server-side cache effectiveness counters.
#[async_trait]
pub trait CacheMetricsSource: Send + Sync {
    async fn cache_metrics(&self) -> Result<CacheMetrics>;
}
