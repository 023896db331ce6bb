//! Cache-aside access to the property listing.

use std::sync::Arc;
use tracing::{info, warn};

use crate::cache::PropertyCache;
use crate::error::Result;
use crate::repository::PropertyRepository;
use listings_domain::Property;

/// Cache-aside reader for the full property listing.
///
/// Collaborators are injected as trait objects so tests can substitute
/// in-memory doubles for Redis and PostgreSQL.
pub struct PropertyStore {
    repository: Arc<dyn PropertyRepository>,
    cache: Arc<dyn PropertyCache>,
}

impl PropertyStore {
    pub fn new(repository: Arc<dyn PropertyRepository>, cache: Arc<dyn PropertyCache>) -> Self {
        Self { repository, cache }
    }

    /// Fetch every property, consulting the cache first.
    ///
    /// A malformed or unreadable cache entry is treated as a miss: the
    /// listing is re-read from storage and the entry rewritten. There is
    /// no invalidation on table writes, so readers can observe data up
    /// to the cache expiry old.
    pub async fn get_all_properties(&self) -> Result<Vec<Property>> {
        match self.cache.get_properties().await {
            Ok(Some(properties)) => {
                info!(count = properties.len(), "Property listing served from cache");
                return Ok(properties);
            }
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "Cache read failed, falling back to database");
            }
        }

        let properties = self.repository.get_all().await?;

        if let Err(e) = self.cache.put_properties(&properties).await {
            warn!(error = %e, "Failed to populate property cache");
        }

        info!(
            count = properties.len(),
            "Property listing fetched from database and cached"
        );
        Ok(properties)
    }
}
