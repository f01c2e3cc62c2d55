//! NASA API Client Module
//!
//! Request building and response shaping for every upstream data source.
//! Each fetch reports its rate-limit headers to the shared monitor before
//! the status is even checked, so throttled responses still count. Cache
//! orchestration lives in the handlers; a failed fetch here simply means
//! the cache is never populated for that attempt.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::policy::DataSource;
use crate::ratelimit::{RateLimitMonitor, HEADER_LIMIT};

/// Rovers the Mars photos API accepts.
pub const ROVERS: [&str; 4] = ["curiosity", "opportunity", "spirit", "perseverance"];

/// EPIC imagery host (keyless, separate from api.nasa.gov).
const EPIC_BASE_URL: &str = "https://epic.gsfc.nasa.gov/api";
/// Exoplanet Archive host.
const EXOPLANET_BASE_URL: &str = "https://exoplanetarchive.ipac.caltech.edu";
/// NASA image and video library host.
const MEDIA_LIBRARY_URL: &str = "https://images-api.nasa.gov/search";
/// EONET natural event tracker endpoint.
const EONET_URL: &str = "https://eonet.gsfc.nasa.gov/api/v3/events";

// == NASA Client ==
/// HTTP client for the upstream NASA APIs.
pub struct NasaClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    monitor: Arc<RwLock<RateLimitMonitor>>,
}

impl NasaClient {
    // == Constructor ==
    /// Builds a client from configuration, sharing the rate-limit monitor
    /// with the rest of the application.
    pub fn new(config: &Config, monitor: Arc<RwLock<RateLimitMonitor>>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            monitor,
        })
    }

    // == Core Request ==
    /// Issues a GET against an api.nasa.gov endpoint with the API key
    /// appended, records rate-limit headers, and maps error statuses.
    async fn get_keyed(&self, path: &str, query: &[(&str, String)], source: DataSource) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, api = source.name(), "fetching from NASA API");

        let response = self
            .http
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        if response.headers().contains_key(HEADER_LIMIT) {
            self.monitor
                .write()
                .await
                .record(source.name(), response.headers());
        }

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%url, status = status.as_u16(), "upstream returned an error");
            return Err(match status.as_u16() {
                403 => ApiError::KeyRejected,
                429 => ApiError::RateLimited,
                400 => ApiError::InvalidRequest(
                    "upstream rejected the request parameters, check the date format".to_string(),
                ),
                code => ApiError::UpstreamStatus { status: code, body },
            });
        }

        Ok(response.json().await?)
    }

    /// GET against a keyless host, mapping non-2xx to an upstream error.
    async fn get_plain(&self, url: &str, query: &[(&str, String)]) -> Result<Value> {
        debug!(%url, "fetching from keyless upstream");
        let response = self.http.get(url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }

    // == Data Sources ==

    /// Astronomy Picture of the Day.
    pub async fn apod(&self, date: Option<&str>) -> Result<Value> {
        let mut query = Vec::new();
        if let Some(date) = date {
            query.push(("date", date.to_string()));
        }
        self.get_keyed("/planetary/apod", &query, DataSource::Apod)
            .await
    }

    /// Mars rover photos for one rover, filtered by sol, earth date,
    /// camera and page.
    pub async fn mars_photos(
        &self,
        rover: &str,
        sol: Option<u32>,
        earth_date: Option<&str>,
        camera: Option<&str>,
        page: u32,
    ) -> Result<Value> {
        let mut query = vec![("page", page.to_string())];
        if let Some(sol) = sol {
            query.push(("sol", sol.to_string()));
        }
        if let Some(earth_date) = earth_date {
            query.push(("earth_date", earth_date.to_string()));
        }
        if let Some(camera) = camera {
            query.push(("camera", camera.to_string()));
        }

        let path = format!("/mars-photos/api/v1/rovers/{}/photos", rover);
        self.get_keyed(&path, &query, DataSource::MarsPhotos).await
    }

    /// Near-Earth object feed between two dates.
    pub async fn neo_feed(&self, start_date: &str, end_date: &str) -> Result<Value> {
        let query = vec![
            ("start_date", start_date.to_string()),
            ("end_date", end_date.to_string()),
        ];
        self.get_keyed("/neo/rest/v1/feed", &query, DataSource::NeoFeed)
            .await
    }

    /// Space weather events of one DONKI type (FLR, CME, GST, ...).
    pub async fn donki(&self, event_type: &str) -> Result<Value> {
        let path = format!("/DONKI/{}", event_type);
        self.get_keyed(&path, &[], DataSource::Donki).await
    }

    /// Exoplanet Archive records. Tries the v1 API first and falls back to
    /// the legacy nstedAPI endpoint when it is unavailable.
    pub async fn exoplanets(&self, table: &str) -> Result<Value> {
        let primary = format!("{}/api/v1/exoplanets", EXOPLANET_BASE_URL);
        let query = vec![("format", "json".to_string()), ("limit", "100".to_string())];
        match self.get_plain(&primary, &query).await {
            Ok(data) => Ok(data),
            Err(err) => {
                warn!(%err, "primary exoplanet endpoint failed, trying fallback");
                let fallback = format!("{}/cgi-bin/nstedAPI/nph-nstedAPI", EXOPLANET_BASE_URL);
                let query = vec![
                    ("table", table.to_string()),
                    ("format", "json".to_string()),
                    ("limit", "100".to_string()),
                ];
                self.get_plain(&fallback, &query).await
            }
        }
    }

    /// EPIC natural-color Earth imagery, most recent or for a given date.
    /// An empty image list is reported as a no-data error, never cached.
    pub async fn epic(&self, date: Option<&str>) -> Result<Value> {
        let url = match date {
            Some(date) => format!("{}/natural/date/{}", EPIC_BASE_URL, date),
            None => format!("{}/natural/images", EPIC_BASE_URL),
        };

        let data = self.get_plain(&url, &[]).await?;
        match data.as_array() {
            Some(images) if !images.is_empty() => Ok(data),
            _ => Err(ApiError::NoData(
                "no EPIC images available for the selected date".to_string(),
            )),
        }
    }

    /// NASA image and video library search.
    pub async fn media_search(&self, query: &str, page: u32) -> Result<Value> {
        let params = vec![
            ("q", query.to_string()),
            ("page", page.to_string()),
            ("media_type", "image,video".to_string()),
        ];
        self.get_plain(MEDIA_LIBRARY_URL, &params).await
    }

    /// EONET natural events, newest first.
    pub async fn eonet_events(&self, limit: u32) -> Result<Value> {
        self.get_plain(EONET_URL, &[("limit", limit.to_string())])
            .await
    }
}

impl std::fmt::Debug for NasaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NasaClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds_from_config() {
        let monitor = Arc::new(RwLock::new(RateLimitMonitor::new()));
        let client = NasaClient::new(&Config::default(), monitor);
        assert!(client.is_ok());
    }

    #[test]
    fn test_rover_whitelist() {
        assert!(ROVERS.contains(&"curiosity"));
        assert!(ROVERS.contains(&"perseverance"));
        assert!(!ROVERS.contains(&"sojourner"));
    }
}
