//! API Routes
//!
//! Configures the Axum router with all proxy endpoints.

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    apod_handler, cache_clear_handler, cache_stats_handler, donki_handler, eonet_handler,
    epic_handler, exoplanets_handler, health_handler, mars_photos_handler, media_search_handler,
    neo_feed_handler, rate_limits_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /apod` - Astronomy picture of the day
/// - `GET /mars-photos` - Mars rover photography
/// - `GET /neo/feed` - Near-Earth object feed
/// - `GET /donki` - Space weather events
/// - `GET /exoplanets` - Exoplanet archive records
/// - `GET /epic` - EPIC Earth imagery
/// - `GET /media/search` - NASA media library search
/// - `GET /eonet/events` - Natural event tracker
/// - `GET /cache/stats` - Cache occupancy snapshot
/// - `DELETE /cache` - Manual cache invalidation
/// - `GET /rate-limits` - Upstream quota report
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/apod", get(apod_handler))
        .route("/mars-photos", get(mars_photos_handler))
        .route("/neo/feed", get(neo_feed_handler))
        .route("/donki", get(donki_handler))
        .route("/exoplanets", get(exoplanets_handler))
        .route("/epic", get(epic_handler))
        .route("/media/search", get(media_search_handler))
        .route("/eonet/events", get(eonet_handler))
        .route("/cache/stats", get(cache_stats_handler))
        .route("/cache", delete(cache_clear_handler))
        .route("/rate-limits", get(rate_limits_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let state = AppState::from_config(&Config::default()).unwrap();
        create_router(state)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cache_stats_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/cache/stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_neo_feed_missing_dates_rejected() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/neo/feed")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
