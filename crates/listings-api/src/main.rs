//! # Property Listings API Server
//!
//! Binary entry point for the listings HTTP service.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use listings_api::{ApiContext, Config, build_router};
use listings_persistence::{CacheClient, CacheConfig, PgPropertyRepository, PostgresConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    tracing::info!(
        version = listings_api::VERSION,
        "Starting Property Listings API"
    );

    // Connect to PostgreSQL
    tracing::info!(
        host = %config.database.host,
        port = config.database.port,
        database = %config.database.database,
        "Connecting to PostgreSQL"
    );

    let repository = PgPropertyRepository::connect(&PostgresConfig::from(&config.database)).await?;
    tracing::info!("PostgreSQL connected");

    // Connect to Redis
    tracing::info!(url = %config.redis.url(), "Connecting to Redis");

    let cache = CacheClient::new(CacheConfig::from(&config.redis)).await?;
    tracing::info!("Redis connected");

    // Build API context and router
    let ctx = ApiContext::new(repository, cache);
    let app = build_router(ctx);

    // Start server
    let addr = config.server_addr;
    tracing::info!(%addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Property listing available at http://{}/properties", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}
