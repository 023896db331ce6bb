//! PostgreSQL repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use crate::error::Result;
use crate::repository::traits::PropertyRepository;
use listings_domain::Property;

// =============================================================================
// POSTGRES CONFIGURATION
// =============================================================================

/// PostgreSQL connection configuration.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            username: "postgres".to_string(),
            password: "password".to_string(),
            database: "property_listings_db".to_string(),
        }
    }
}

impl PostgresConfig {
    /// Connection URL in the form sqlx expects.
    #[must_use]
    pub fn url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database
        )
    }
}

// =============================================================================
// PROPERTY REPOSITORY
// =============================================================================

type PropertyRow = (i64, String, String, Decimal, String, DateTime<Utc>);

/// Property repository backed by a PostgreSQL connection pool.
pub struct PgPropertyRepository {
    pool: PgPool,
}

impl PgPropertyRepository {
    /// Connect a new pool and wrap it.
    pub async fn connect(config: &PostgresConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(16)
            .min_connections(2)
            .acquire_timeout(Duration::from_secs(5))
            .connect(&config.url())
            .await?;

        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_property(row: PropertyRow) -> Property {
        let (id, title, description, price, location, created_at) = row;

        Property {
            id,
            title,
            description,
            price,
            location,
            created_at,
        }
    }
}

#[async_trait]
impl PropertyRepository for PgPropertyRepository {
    async fn get_all(&self) -> Result<Vec<Property>> {
        let rows = sqlx::query_as::<_, PropertyRow>(
            "SELECT id, title, description, price, location, created_at
             FROM properties
             ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Self::row_to_property).collect())
    }
}
