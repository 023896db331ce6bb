//! # Property Listings - Domain Model
//!
//! Core domain entities and value objects for the property listings
//! service. These types are the single source of truth across all
//! layers: persistence, cache, and API.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// ENTITY TYPES
// =============================================================================

/// Property listing entity.
///
/// Records are created and mutated by storage-side tooling; this service
/// only reads them. Uniqueness of `id` is enforced by the storage layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Listing price. Serializes as a decimal string (`"100.50"`) in
    /// every wire form: cache entries and API payloads.
    pub price: Decimal,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// CACHE METRICS
// =============================================================================

/// Cache effectiveness counters as reported by the cache server.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CacheMetrics {
    pub hits: u64,
    pub misses: u64,
    /// `hits / (hits + misses) * 100`, rounded to 2 decimal places.
    /// Zero when no lookups have been recorded.
    pub hit_ratio: f64,
}

impl CacheMetrics {
    /// Derive the hit ratio from raw keyspace counters.
    #[must_use]
    pub fn from_counters(hits: u64, misses: u64) -> Self {
        let total = hits + misses;
        let hit_ratio = if total > 0 {
            ((hits as f64 / total as f64) * 100.0 * 100.0).round() / 100.0
        } else {
            0.0
        };

        Self {
            hits,
            misses,
            hit_ratio,
        }
    }
}
