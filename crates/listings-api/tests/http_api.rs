//! Router-level tests exercising the HTTP surface with in-memory
//! doubles for storage and both cache layers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use tower::util::ServiceExt;

use listings_api::page_cache::{CachedPage, ResponseCache};
use listings_api::{ApiContext, build_router};
use listings_domain::{CacheMetrics, Property};
use listings_persistence::{
    CacheMetricsSource, PersistenceError, PropertyCache, PropertyRepository, PropertyStore,
    Result as PersistenceResult,
};

// =============================================================================
// TEST DOUBLES
// =============================================================================

struct StubRepository {
    properties: Mutex<Vec<Property>>,
}

impl StubRepository {
    fn with(properties: Vec<Property>) -> Arc<Self> {
        Arc::new(Self {
            properties: Mutex::new(properties),
        })
    }

    fn replace(&self, properties: Vec<Property>) {
        *self.properties.lock().unwrap() = properties;
    }
}

#[async_trait]
impl PropertyRepository for StubRepository {
    async fn get_all(&self) -> PersistenceResult<Vec<Property>> {
        Ok(self.properties.lock().unwrap().clone())
    }
}

struct FailingRepository;

#[async_trait]
impl PropertyRepository for FailingRepository {
    async fn get_all(&self) -> PersistenceResult<Vec<Property>> {
        Err(PersistenceError::Postgres(
            "connection refused".to_string(),
        ))
    }
}

/// Property cache that never hits, forcing every read through storage.
struct NoopPropertyCache;

#[async_trait]
impl PropertyCache for NoopPropertyCache {
    async fn get_properties(&self) -> PersistenceResult<Option<Vec<Property>>> {
        Ok(None)
    }

    async fn put_properties(&self, _properties: &[Property]) -> PersistenceResult<()> {
        Ok(())
    }
}

struct FixedMetrics(CacheMetrics);

#[async_trait]
impl CacheMetricsSource for FixedMetrics {
    async fn cache_metrics(&self) -> PersistenceResult<CacheMetrics> {
        Ok(self.0)
    }
}

struct InMemoryPageCache {
    entries: Mutex<HashMap<String, CachedPage>>,
}

impl InMemoryPageCache {
    fn empty() -> Arc<Self> {
        Arc::new(Self {
            entries: Mutex::new(HashMap::new()),
        })
    }
}

#[async_trait]
impl ResponseCache for InMemoryPageCache {
    async fn get(&self, key: &str) -> Option<CachedPage> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    async fn put(&self, key: &str, page: CachedPage) {
        self.entries.lock().unwrap().insert(key.to_string(), page);
    }
}

/// Page cache that stores nothing, so every request reaches the handler.
struct NoopPageCache;

#[async_trait]
impl ResponseCache for NoopPageCache {
    async fn get(&self, _key: &str) -> Option<CachedPage> {
        None
    }

    async fn put(&self, _key: &str, _page: CachedPage) {}
}

// =============================================================================
// HELPERS
// =============================================================================

fn property(id: i64, title: &str, price: &str) -> Property {
    Property {
        id,
        title: title.to_string(),
        description: format!("{title} description"),
        price: price.parse().unwrap(),
        location: "Austin".to_string(),
        created_at: Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap(),
    }
}

fn router(
    repository: Arc<dyn PropertyRepository>,
    page_cache: Arc<dyn ResponseCache>,
) -> Router {
    let store = Arc::new(PropertyStore::new(repository, Arc::new(NoopPropertyCache)));
    let metrics = Arc::new(FixedMetrics(CacheMetrics::from_counters(3, 1)));
    build_router(ApiContext::from_parts(store, metrics, page_cache))
}

async fn get_body(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

// =============================================================================
// TESTS
// =============================================================================

#[tokio::test]
async fn listing_returns_properties_envelope() {
    let repository = StubRepository::with(vec![]);
    let app = router(repository, Arc::new(NoopPageCache));

    let (status, body) = get_body(app, "/properties").await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!({ "properties": [] }));
}

#[tokio::test]
async fn listing_serializes_price_as_decimal_string() {
    let repository = StubRepository::with(vec![property(1, "Loft", "100.50")]);
    let app = router(repository, Arc::new(NoopPageCache));

    let (status, body) = get_body(app, "/properties").await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(status, StatusCode::OK);

    let listed = &json["properties"][0];
    assert_eq!(listed["id"], serde_json::json!(1));
    assert_eq!(listed["title"], serde_json::json!("Loft"));
    assert_eq!(listed["location"], serde_json::json!("Austin"));
    // Price is a JSON string, never a number
    assert_eq!(listed["price"], serde_json::json!("100.50"));
}

#[tokio::test]
async fn page_cache_replays_body_despite_storage_change() {
    let repository = StubRepository::with(vec![property(1, "Loft", "100.50")]);
    let page_cache = InMemoryPageCache::empty();
    let app = router(repository.clone(), page_cache.clone());

    let (_, first) = get_body(app.clone(), "/properties").await;

    // Storage changes are invisible while the page entry lives
    repository.replace(vec![
        property(1, "Loft", "100.50"),
        property(2, "Cabin", "80.00"),
    ]);

    let (_, second) = get_body(app, "/properties").await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn page_cache_miss_reaches_handler() {
    let repository = StubRepository::with(vec![property(1, "Loft", "100.50")]);
    let app = router(repository.clone(), Arc::new(NoopPageCache));

    let (_, first) = get_body(app.clone(), "/properties").await;

    repository.replace(vec![property(2, "Cabin", "80.00")]);

    let (_, second) = get_body(app, "/properties").await;

    assert_ne!(first, second);
}

#[tokio::test]
async fn metrics_endpoint_reports_hit_ratio() {
    let repository = StubRepository::with(vec![]);
    let app = router(repository, Arc::new(NoopPageCache));

    let (status, body) = get_body(app, "/metrics/cache").await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        serde_json::json!({ "hits": 3, "misses": 1, "hit_ratio": 75.0 })
    );
}

#[tokio::test]
async fn storage_failure_maps_to_generic_500() {
    let app = router(Arc::new(FailingRepository), Arc::new(NoopPageCache));

    let (status, body) = get_body(app, "/properties").await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], serde_json::json!("PERSISTENCE_ERROR"));
}

#[tokio::test]
async fn health_check_responds_ok() {
    let repository = StubRepository::with(vec![]);
    let app = router(repository, Arc::new(NoopPageCache));

    let (status, body) = get_body(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK".to_vec());
}
