//! Configuration Module
//!
//! Handles loading server configuration from environment variables.

use std::env;

use crate::cache::DEFAULT_TTL_MS;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// NASA API key sent with api.nasa.gov requests
    pub api_key: String,
    /// Base URL for api.nasa.gov endpoints
    pub base_url: String,
    /// HTTP server port
    pub server_port: u16,
    /// Cache TTL in milliseconds applied when a call site passes none
    pub default_ttl_ms: u64,
    /// Upstream request timeout in seconds
    pub http_timeout_secs: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `NASA_API_KEY` - API key (default: DEMO_KEY)
    /// - `NASA_API_BASE_URL` - api.nasa.gov base URL (default: https://api.nasa.gov)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DEFAULT_TTL_MS` - fallback cache TTL in milliseconds (default: 3600000)
    /// - `HTTP_TIMEOUT_SECS` - upstream timeout in seconds (default: 10)
    pub fn from_env() -> Self {
        Self {
            api_key: env::var("NASA_API_KEY").unwrap_or_else(|_| "DEMO_KEY".to_string()),
            base_url: env::var("NASA_API_BASE_URL")
                .unwrap_or_else(|_| "https://api.nasa.gov".to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            default_ttl_ms: env::var("DEFAULT_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TTL_MS),
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: "DEMO_KEY".to_string(),
            base_url: "https://api.nasa.gov".to_string(),
            server_port: 3000,
            default_ttl_ms: DEFAULT_TTL_MS,
            http_timeout_secs: 10,
        }
    }
}
