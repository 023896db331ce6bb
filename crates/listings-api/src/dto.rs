//! Response DTOs for the listings API.

use chrono::{DateTime, Utc};
use serde::Serialize;

use listings_domain::{CacheMetrics, Property};

/// Wire form of a property record.
#[derive(Serialize, Debug, Clone)]
pub struct PropertyResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Decimal string, e.g. `"100.50"`; never a JSON number.
    pub price: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

impl From<Property> for PropertyResponse {
    fn from(property: Property) -> Self {
        Self {
            id: property.id,
            title: property.title,
            description: property.description,
            price: property.price.to_string(),
            location: property.location,
            created_at: property.created_at,
        }
    }
}

/// Envelope for the listing endpoint.
#[derive(Serialize, Debug, Clone)]
pub struct PropertyListResponse {
    pub properties: Vec<PropertyResponse>,
}

/// Wire form of the cache metrics report.
#[derive(Serialize, Debug, Clone)]
pub struct CacheMetricsResponse {
    pub hits: u64,
    pub misses: u64,
    pub hit_ratio: f64,
}

impl From<CacheMetrics> for CacheMetricsResponse {
    fn from(metrics: CacheMetrics) -> Self {
        Self {
            hits: metrics.hits,
            misses: metrics.misses,
            hit_ratio: metrics.hit_ratio,
        }
    }
}
