//! # Redis Cache Layer
//!
//! Redis client wrapper with typed operations for property listing
//! caching and keyspace statistics.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, InfoDict};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheMetricsSource, PropertyCache};
use crate::error::Result;
use listings_domain::{CacheMetrics, Property};

/// Key under which the full property listing is cached.
pub const ALL_PROPERTIES_KEY: &str = "all_properties";

/// Cache TTL configuration
#[derive(Debug, Clone, Copy)]
pub struct CacheTtl {
    /// Expiry for the `all_properties` entry.
    pub properties: Duration,
    /// Expiry for whole-response page entries.
    pub page: Duration,
}

impl Default for CacheTtl {
    fn default() -> Self {
        Self {
            properties: Duration::from_secs(3600),
            page: Duration::from_secs(900),
        }
    }
}

/// Redis cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub url: String,
    pub ttl: CacheTtl,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            // Logical database 1, matching the deployed cache layout
            url: "redis://127.0.0.1:6379/1".to_string(),
            ttl: CacheTtl::default(),
        }
    }
}

/// Redis cache client backed by a shared connection manager
#[derive(Clone)]
pub struct CacheClient {
    conn: ConnectionManager,
    config: CacheConfig,
}

impl CacheClient {
    /// Create a new cache client
    pub async fn new(config: CacheConfig) -> Result<Self> {
        let client = Client::open(config.url.as_str())?;
        let conn = ConnectionManager::new(client).await?;

        Ok(Self { conn, config })
    }

    /// TTL configuration this client was built with
    #[must_use]
    pub fn ttl(&self) -> CacheTtl {
        self.config.ttl
    }

    /// Get a JSON value from cache
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;

        match value {
            Some(json) => {
                let parsed = serde_json::from_str(&json)?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    /// Set a JSON value in cache with TTL
    pub async fn set_json<T: Serialize + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> Result<()> {
        let mut conn = self.conn.clone();
        let json = serde_json::to_string(value)?;
        let _: () = conn.set_ex(key, json, ttl.as_secs()).await?;
        Ok(())
    }

    /// Delete a key from cache
    pub async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        let deleted: i64 = conn.del(key).await?;
        Ok(deleted > 0)
    }

    /// Check if key exists
    pub async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        let exists: bool = conn.exists(key).await?;
        Ok(exists)
    }
}

#[async_trait]
impl PropertyCache for CacheClient {
    async fn get_properties(&self) -> Result<Option<Vec<Property>>> {
        self.get_json(ALL_PROPERTIES_KEY).await
    }

    async fn put_properties(&self, properties: &[Property]) -> Result<()> {
        self.set_json(ALL_PROPERTIES_KEY, &properties, self.config.ttl.properties)
            .await
    }
}

#[async_trait]
impl CacheMetricsSource for CacheClient {
    /// Read `keyspace_hits` / `keyspace_misses` from the server's
    /// `INFO stats` section and derive the hit ratio.
    async fn cache_metrics(&self) -> Result<CacheMetrics> {
        let mut conn = self.conn.clone();
        let info: InfoDict = redis::cmd("INFO")
            .arg("stats")
            .query_async(&mut conn)
            .await?;

        let hits: u64 = info.get("keyspace_hits").unwrap_or(0);
        let misses: u64 = info.get("keyspace_misses").unwrap_or(0);
        let metrics = CacheMetrics::from_counters(hits, misses);

        tracing::info!(
            hits = metrics.hits,
            misses = metrics.misses,
            hit_ratio = metrics.hit_ratio,
            "Cache keyspace metrics"
        );

        Ok(metrics)
    }
}

/// Shared cache client wrapper
pub type SharedCacheClient = Arc<CacheClient>;
