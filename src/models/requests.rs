//! Request DTOs for the proxy API
//!
//! Query-parameter structures for the data endpoints, mirroring what the
//! upstream APIs accept. Required parameters are plain fields so a missing
//! one is rejected during extraction; optional ones default to the same
//! values the upstream assumes.

use serde::Deserialize;

use crate::nasa::ROVERS;

fn default_page() -> u32 {
    1
}

fn default_rover() -> String {
    "curiosity".to_string()
}

fn default_event_type() -> String {
    "FLR".to_string()
}

fn default_table() -> String {
    "exoplanets".to_string()
}

fn default_limit() -> u32 {
    10
}

/// Query for `GET /apod`
#[derive(Debug, Clone, Deserialize)]
pub struct ApodQuery {
    /// Date in YYYY-MM-DD format, today when omitted
    pub date: Option<String>,
}

/// Query for `GET /mars-photos`
#[derive(Debug, Clone, Deserialize)]
pub struct MarsPhotosQuery {
    #[serde(default = "default_rover")]
    pub rover: String,
    pub sol: Option<u32>,
    pub earth_date: Option<String>,
    pub camera: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
}

impl MarsPhotosQuery {
    /// Validates the rover name against the rovers the upstream knows.
    pub fn validate(&self) -> Option<String> {
        if ROVERS.contains(&self.rover.as_str()) {
            None
        } else {
            Some(format!(
                "Unknown rover '{}', expected one of: {}",
                self.rover,
                ROVERS.join(", ")
            ))
        }
    }
}

/// Query for `GET /neo/feed`; both dates are required upstream.
#[derive(Debug, Clone, Deserialize)]
pub struct NeoFeedQuery {
    pub start_date: String,
    pub end_date: String,
}

/// Query for `GET /donki`
#[derive(Debug, Clone, Deserialize)]
pub struct DonkiQuery {
    #[serde(default = "default_event_type")]
    pub event_type: String,
}

/// Query for `GET /exoplanets`
#[derive(Debug, Clone, Deserialize)]
pub struct ExoplanetsQuery {
    #[serde(default = "default_table")]
    pub table: String,
}

/// Query for `GET /epic`
#[derive(Debug, Clone, Deserialize)]
pub struct EpicQuery {
    pub date: Option<String>,
}

/// Query for `GET /media/search`
#[derive(Debug, Clone, Deserialize)]
pub struct MediaSearchQuery {
    pub q: String,
    #[serde(default = "default_page")]
    pub page: u32,
}

impl MediaSearchQuery {
    pub fn validate(&self) -> Option<String> {
        if self.q.trim().is_empty() {
            Some("Search query cannot be empty".to_string())
        } else {
            None
        }
    }
}

/// Query for `GET /eonet/events`
#[derive(Debug, Clone, Deserialize)]
pub struct EonetQuery {
    #[serde(default = "default_limit")]
    pub limit: u32,
}
