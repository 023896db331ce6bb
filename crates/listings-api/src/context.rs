//! # API Context
//!
//! Application state and dependency injection for HTTP handlers.

use std::sync::Arc;

use listings_persistence::{CacheClient, CacheMetricsSource, PgPropertyRepository, PropertyStore};

use crate::page_cache::{RedisPageCache, ResponseCache};

/// Application context shared across all handlers
#[derive(Clone)]
pub struct ApiContext {
    /// Cache-aside property reader
    pub store: Arc<PropertyStore>,

    /// Cache server metrics source
    pub metrics: Arc<dyn CacheMetricsSource>,

    /// Whole-response cache
    pub page_cache: Arc<dyn ResponseCache>,
}

impl ApiContext {
    /// Create a new API context with real dependencies
    pub fn new(repository: PgPropertyRepository, cache: CacheClient) -> Self {
        let repository = Arc::new(repository);
        let cache = Arc::new(cache);

        let store = Arc::new(PropertyStore::new(repository, cache.clone()));
        let page_cache = Arc::new(RedisPageCache::new(cache.clone()));

        Self {
            store,
            metrics: cache,
            page_cache,
        }
    }

    /// Assemble a context from externally-built parts.
    ///
    /// Used by tests to inject in-memory doubles for storage and both
    /// cache layers.
    pub fn from_parts(
        store: Arc<PropertyStore>,
        metrics: Arc<dyn CacheMetricsSource>,
        page_cache: Arc<dyn ResponseCache>,
    ) -> Self {
        Self {
            store,
            metrics,
            page_cache,
        }
    }
}
