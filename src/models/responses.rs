//! Response DTOs for the proxy API
//!
//! Typed shapes for the upstream payloads the service inspects, plus the
//! small service-level response bodies. Sources the original dashboard left
//! untyped (EONET, media library, EPIC, Mars photos, NEO feed) pass through
//! as raw JSON and have no model here.

use serde::{Deserialize, Serialize};

// == Upstream Payloads ==

/// Astronomy Picture of the Day record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Apod {
    pub date: String,
    pub explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hdurl: Option<String>,
    pub media_type: String,
    pub service_version: String,
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

/// One DONKI space-weather event. The feed is sparse, so nearly every
/// field can be missing depending on the event type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonkiEvent {
    #[serde(rename = "flrID", skip_serializing_if = "Option::is_none")]
    pub flr_id: Option<String>,
    #[serde(rename = "beginTime", skip_serializing_if = "Option::is_none")]
    pub begin_time: Option<String>,
    #[serde(rename = "peakTime", skip_serializing_if = "Option::is_none")]
    pub peak_time: Option<String>,
    #[serde(rename = "endTime", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(rename = "classType", skip_serializing_if = "Option::is_none")]
    pub class_type: Option<String>,
    #[serde(rename = "sourceLocation", skip_serializing_if = "Option::is_none")]
    pub source_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// One exoplanet record from the archive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exoplanet {
    pub pl_name: String,
    pub hostname: String,
    pub pl_orbper: Option<f64>,
    pub pl_bmasse: Option<f64>,
    pub pl_rade: Option<f64>,
    pub pl_eqt: Option<f64>,
    pub sy_dist: Option<f64>,
    pub discoverymethod: Option<String>,
    pub disc_year: Option<i32>,
}

// == Service Responses ==

/// Response body for `GET /health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Response body for `DELETE /cache`
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
    /// How many entries the clear removed, live and expired alike
    pub entries_removed: usize,
}

impl ClearResponse {
    pub fn new(entries_removed: usize) -> Self {
        Self {
            message: "Cache cleared".to_string(),
            entries_removed,
        }
    }
}
