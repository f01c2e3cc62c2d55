//! API Handlers
//!
//! One handler per data source, each the canonical cache call site:
//! derive the key from the request parameters, serve a live entry if one
//! exists, otherwise fetch upstream and populate the cache with the
//! source's TTL. The cache lock is never held across an upstream await,
//! so two concurrent misses on one key may both fetch; only results are
//! recorded, not in-flight requests.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{ApiCache, CacheStats};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{
    Apod, ApodQuery, ClearResponse, DonkiEvent, DonkiQuery, EonetQuery, EpicQuery, Exoplanet,
    ExoplanetsQuery, HealthResponse, MarsPhotosQuery, MediaSearchQuery, NeoFeedQuery,
};
use crate::nasa::NasaClient;
use crate::policy::{self, DataSource};
use crate::ratelimit::{RateLimitMonitor, RateLimitUsage};

// == App State ==
/// Application state shared across all handlers.
///
/// The cache and monitor are constructed once at startup and injected
/// everywhere through this handle; there is no module-level singleton.
#[derive(Clone)]
pub struct AppState {
    /// The process-wide response cache
    pub cache: Arc<RwLock<ApiCache>>,
    /// Upstream quota observer, shared with the client
    pub monitor: Arc<RwLock<RateLimitMonitor>>,
    /// Upstream HTTP client
    pub nasa: Arc<NasaClient>,
}

impl AppState {
    /// Creates application state from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let monitor = Arc::new(RwLock::new(RateLimitMonitor::new()));
        let nasa = Arc::new(NasaClient::new(config, monitor.clone())?);
        Ok(Self {
            cache: Arc::new(RwLock::new(ApiCache::new(config.default_ttl_ms))),
            monitor,
            nasa,
        })
    }
}

/// Serves a live cache entry or fetches, caches and returns the upstream
/// payload. `fetch` runs without the cache lock held.
async fn cached_or_fetch<F>(
    state: &AppState,
    key: String,
    source: DataSource,
    fetch: F,
) -> Result<Value>
where
    F: std::future::Future<Output = Result<Value>>,
{
    if let Some(hit) = state.cache.write().await.get(&key) {
        debug!(%key, api = source.name(), "served from cache");
        return Ok(hit);
    }

    let data = fetch.await?;
    state
        .cache
        .write()
        .await
        .set(key.clone(), data.clone(), Some(source.ttl_ms()));
    debug!(%key, api = source.name(), "fetched from upstream and cached");
    Ok(data)
}

// == Data Endpoints ==

/// Handler for GET /apod
pub async fn apod_handler(
    State(state): State<AppState>,
    Query(query): Query<ApodQuery>,
) -> Result<Json<Apod>> {
    let key = policy::apod_key(query.date.as_deref());
    let data = cached_or_fetch(&state, key, DataSource::Apod, async {
        state.nasa.apod(query.date.as_deref()).await
    })
    .await?;

    let apod: Apod = serde_json::from_value(data)?;
    Ok(Json(apod))
}

/// Handler for GET /mars-photos
pub async fn mars_photos_handler(
    State(state): State<AppState>,
    Query(query): Query<MarsPhotosQuery>,
) -> Result<Json<Value>> {
    if let Some(error_msg) = query.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let key = policy::mars_photos_key(
        &query.rover,
        query.sol,
        query.earth_date.as_deref(),
        query.camera.as_deref(),
        query.page,
    );
    let data = cached_or_fetch(&state, key, DataSource::MarsPhotos, async {
        state
            .nasa
            .mars_photos(
                &query.rover,
                query.sol,
                query.earth_date.as_deref(),
                query.camera.as_deref(),
                query.page,
            )
            .await
    })
    .await?;

    Ok(Json(data))
}

/// Handler for GET /neo/feed
pub async fn neo_feed_handler(
    State(state): State<AppState>,
    Query(query): Query<NeoFeedQuery>,
) -> Result<Json<Value>> {
    let key = policy::asteroids_key(&query.start_date, &query.end_date);
    let data = cached_or_fetch(&state, key, DataSource::NeoFeed, async {
        state
            .nasa
            .neo_feed(&query.start_date, &query.end_date)
            .await
    })
    .await?;

    Ok(Json(data))
}

/// Handler for GET /donki
pub async fn donki_handler(
    State(state): State<AppState>,
    Query(query): Query<DonkiQuery>,
) -> Result<Json<Vec<DonkiEvent>>> {
    let key = policy::donki_key(&query.event_type);
    let data = cached_or_fetch(&state, key, DataSource::Donki, async {
        state.nasa.donki(&query.event_type).await
    })
    .await?;

    let events: Vec<DonkiEvent> = serde_json::from_value(data)?;
    Ok(Json(events))
}

/// Handler for GET /exoplanets
pub async fn exoplanets_handler(
    State(state): State<AppState>,
    Query(query): Query<ExoplanetsQuery>,
) -> Result<Json<Vec<Exoplanet>>> {
    let key = policy::exoplanets_key(&query.table);
    let data = cached_or_fetch(&state, key, DataSource::Exoplanets, async {
        state.nasa.exoplanets(&query.table).await
    })
    .await?;

    let planets: Vec<Exoplanet> = serde_json::from_value(data)?;
    Ok(Json(planets))
}

/// Handler for GET /epic
pub async fn epic_handler(
    State(state): State<AppState>,
    Query(query): Query<EpicQuery>,
) -> Result<Json<Value>> {
    let key = policy::epic_key(query.date.as_deref());
    let data = cached_or_fetch(&state, key, DataSource::Epic, async {
        state.nasa.epic(query.date.as_deref()).await
    })
    .await?;

    Ok(Json(data))
}

/// Handler for GET /media/search
pub async fn media_search_handler(
    State(state): State<AppState>,
    Query(query): Query<MediaSearchQuery>,
) -> Result<Json<Value>> {
    if let Some(error_msg) = query.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let key = policy::nasa_library_key(&query.q, query.page);
    let data = cached_or_fetch(&state, key, DataSource::MediaLibrary, async {
        state.nasa.media_search(&query.q, query.page).await
    })
    .await?;

    Ok(Json(data))
}

/// Handler for GET /eonet/events
pub async fn eonet_handler(
    State(state): State<AppState>,
    Query(query): Query<EonetQuery>,
) -> Result<Json<Value>> {
    let key = policy::eonet_key(query.limit);
    let data = cached_or_fetch(&state, key, DataSource::Eonet, async {
        state.nasa.eonet_events(query.limit).await
    })
    .await?;

    Ok(Json(data))
}

// == Diagnostics ==

/// Handler for GET /cache/stats
///
/// A pure snapshot: taking it never evicts expired entries, so the total
/// can exceed what the data endpoints would currently serve.
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStats> {
    let cache = state.cache.read().await;
    Json(cache.stats())
}

/// Handler for DELETE /cache
pub async fn cache_clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let mut cache = state.cache.write().await;
    let removed = cache.len();
    cache.clear();
    Json(ClearResponse::new(removed))
}

/// Handler for GET /rate-limits
pub async fn rate_limits_handler(
    State(state): State<AppState>,
) -> Json<std::collections::HashMap<String, RateLimitUsage>> {
    let monitor = state.monitor.read().await;
    Json(monitor.report())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_state() -> AppState {
        AppState::from_config(&Config::default()).unwrap()
    }

    #[tokio::test]
    async fn test_apod_served_from_seeded_cache() {
        let state = test_state();
        state.cache.write().await.set(
            policy::apod_key(Some("2024-01-01")),
            json!({
                "date": "2024-01-01",
                "explanation": "A nebula.",
                "media_type": "image",
                "service_version": "v1",
                "title": "X",
                "url": "https://apod.nasa.gov/x.jpg"
            }),
            Some(DataSource::Apod.ttl_ms()),
        );

        let query = ApodQuery {
            date: Some("2024-01-01".to_string()),
        };
        let response = apod_handler(State(state), Query(query)).await.unwrap();
        assert_eq!(response.title, "X");
    }

    #[tokio::test]
    async fn test_mars_photos_rejects_unknown_rover() {
        let state = test_state();
        let query = MarsPhotosQuery {
            rover: "sojourner".to_string(),
            sol: None,
            earth_date: None,
            camera: None,
            page: 1,
        };

        let result = mars_photos_handler(State(state), Query(query)).await;
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_stats_and_clear_handlers() {
        let state = test_state();
        state
            .cache
            .write()
            .await
            .set("eonet_10", json!([]), Some(1_000));

        let stats = cache_stats_handler(State(state.clone())).await;
        assert_eq!(stats.total_entries, 1);
        assert_eq!(stats.valid_entries, 1);

        let cleared = cache_clear_handler(State(state.clone())).await;
        assert_eq!(cleared.entries_removed, 1);

        let stats = cache_stats_handler(State(state)).await;
        assert_eq!(stats.total_entries, 0);
    }

    #[tokio::test]
    async fn test_rate_limits_empty_by_default() {
        let state = test_state();
        let report = rate_limits_handler(State(state)).await;
        assert!(report.is_empty());
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
