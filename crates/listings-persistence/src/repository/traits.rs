//! # Repository Traits
//!
//! Abstract repository interface for property records.
//! Implementations can be swapped for different backends (PostgreSQL,
//! mock, etc.)

use async_trait::async_trait;

use crate::error::Result;
use listings_domain::Property;

/// Repository for Property entity reads.
///
/// The service is a read-only consumer of the property table; record
/// creation and mutation happen elsewhere.
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// Full read of every property record.
    async fn get_all(&self) -> Result<Vec<Property>>;
}
