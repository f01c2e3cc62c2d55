//! Rate Limit Monitor Module
//!
//! Passive observer of upstream rate-limit headers. Records the limit and
//! remaining quota NASA reports per API, counts outgoing requests, and
//! flags APIs approaching their quota. Purely diagnostic: nothing here
//! throttles or blocks a request.

use std::collections::HashMap;

use reqwest::header::HeaderMap;
use serde::Serialize;

/// Header carrying the total request quota.
pub const HEADER_LIMIT: &str = "x-ratelimit-limit";
/// Header carrying the remaining request quota.
pub const HEADER_REMAINING: &str = "x-ratelimit-remaining";

/// Quota assumed when the upstream sends an unparsable header value.
const FALLBACK_QUOTA: u64 = 1000;
/// Usage fraction above which an API counts as near its limit.
const WARNING_THRESHOLD: f64 = 0.8;

// == Rate Limit Info ==
/// Last observed quota state for one upstream API.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RateLimitInfo {
    /// Total request quota per window
    pub limit: u64,
    /// Requests left in the current window
    pub remaining: u64,
    /// Assumed end of the current window (Unix milliseconds)
    pub reset_at: i64,
}

// == Usage Report ==
/// Per-API usage summary for the diagnostics endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct RateLimitUsage {
    pub limit: u64,
    pub remaining: u64,
    pub used: u64,
    pub usage_percentage: f64,
    pub request_count: u64,
    pub near_limit: bool,
}

// == Rate Limit Monitor ==
/// Tracks upstream quota headers and request counts per API name.
#[derive(Debug, Default)]
pub struct RateLimitMonitor {
    limits: HashMap<String, RateLimitInfo>,
    request_counts: HashMap<String, u64>,
}

impl RateLimitMonitor {
    /// Creates an empty monitor.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record ==
    /// Stores the quota headers from one upstream response and counts the
    /// request. NASA does not expose the window end, so `reset_at` assumes
    /// a one-hour window from now.
    pub fn record(&mut self, api_name: &str, headers: &HeaderMap) {
        let limit = parse_header(headers, HEADER_LIMIT);
        let remaining = parse_header(headers, HEADER_REMAINING);
        let reset_at = chrono::Utc::now().timestamp_millis() + 60 * 60 * 1000;

        self.limits.insert(
            api_name.to_string(),
            RateLimitInfo {
                limit,
                remaining,
                reset_at,
            },
        );

        *self.request_counts.entry(api_name.to_string()).or_insert(0) += 1;
    }

    /// Returns the last observed quota state for an API, if any.
    pub fn info(&self, api_name: &str) -> Option<RateLimitInfo> {
        self.limits.get(api_name).copied()
    }

    // == Usage ==
    /// Fraction of the quota consumed, 0–100. Unknown APIs report 0.
    pub fn usage_percentage(&self, api_name: &str) -> f64 {
        match self.info(api_name) {
            Some(info) if info.limit > 0 => {
                info.limit.saturating_sub(info.remaining) as f64 / info.limit as f64 * 100.0
            }
            _ => 0.0,
        }
    }

    /// True once usage crosses the warning threshold.
    pub fn is_near_limit(&self, api_name: &str) -> bool {
        self.usage_percentage(api_name) >= WARNING_THRESHOLD * 100.0
    }

    /// Number of requests recorded against an API.
    pub fn request_count(&self, api_name: &str) -> u64 {
        self.request_counts.get(api_name).copied().unwrap_or(0)
    }

    // == Report ==
    /// Builds the per-API usage summary for diagnostics.
    pub fn report(&self) -> HashMap<String, RateLimitUsage> {
        self.limits
            .iter()
            .map(|(api_name, info)| {
                (
                    api_name.clone(),
                    RateLimitUsage {
                        limit: info.limit,
                        remaining: info.remaining,
                        used: info.limit.saturating_sub(info.remaining),
                        usage_percentage: self.usage_percentage(api_name),
                        request_count: self.request_count(api_name),
                        near_limit: self.is_near_limit(api_name),
                    },
                )
            })
            .collect()
    }

    /// Forgets all recorded quota state and counts.
    pub fn reset(&mut self) {
        self.limits.clear();
        self.request_counts.clear();
    }
}

/// Reads a numeric header, falling back when absent or unparsable.
fn parse_header(headers: &HeaderMap, name: &str) -> u64 {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
        .unwrap_or(FALLBACK_QUOTA)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers(limit: &str, remaining: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(HEADER_LIMIT, HeaderValue::from_str(limit).unwrap());
        map.insert(HEADER_REMAINING, HeaderValue::from_str(remaining).unwrap());
        map
    }

    #[test]
    fn test_record_parses_headers() {
        let mut monitor = RateLimitMonitor::new();
        monitor.record("apod", &headers("2000", "1500"));

        let info = monitor.info("apod").unwrap();
        assert_eq!(info.limit, 2000);
        assert_eq!(info.remaining, 1500);
        assert!(info.reset_at > 0);
    }

    #[test]
    fn test_record_falls_back_on_garbage() {
        let mut monitor = RateLimitMonitor::new();
        monitor.record("apod", &headers("not-a-number", ""));

        let info = monitor.info("apod").unwrap();
        assert_eq!(info.limit, FALLBACK_QUOTA);
        assert_eq!(info.remaining, FALLBACK_QUOTA);
    }

    #[test]
    fn test_usage_percentage() {
        let mut monitor = RateLimitMonitor::new();
        monitor.record("apod", &headers("1000", "250"));

        assert!((monitor.usage_percentage("apod") - 75.0).abs() < f64::EPSILON);
        assert_eq!(monitor.usage_percentage("unknown"), 0.0);
    }

    #[test]
    fn test_near_limit_threshold() {
        let mut monitor = RateLimitMonitor::new();

        monitor.record("apod", &headers("1000", "201"));
        assert!(!monitor.is_near_limit("apod"));

        monitor.record("apod", &headers("1000", "200"));
        assert!(monitor.is_near_limit("apod"));
    }

    #[test]
    fn test_request_count_increments() {
        let mut monitor = RateLimitMonitor::new();
        assert_eq!(monitor.request_count("apod"), 0);

        monitor.record("apod", &headers("1000", "999"));
        monitor.record("apod", &headers("1000", "998"));
        monitor.record("epic", &headers("1000", "999"));

        assert_eq!(monitor.request_count("apod"), 2);
        assert_eq!(monitor.request_count("epic"), 1);
    }

    #[test]
    fn test_limit_only_header_never_underflows() {
        // Some responses carry only the limit header; remaining then takes
        // the fallback quota, which can exceed the reported limit.
        let mut map = HeaderMap::new();
        map.insert(HEADER_LIMIT, HeaderValue::from_static("40"));

        let mut monitor = RateLimitMonitor::new();
        monitor.record("apod", &map);

        let info = monitor.info("apod").unwrap();
        assert_eq!(info.limit, 40);
        assert_eq!(info.remaining, FALLBACK_QUOTA);

        assert_eq!(monitor.usage_percentage("apod"), 0.0);
        assert!(!monitor.is_near_limit("apod"));

        let report = monitor.report();
        assert_eq!(report.get("apod").unwrap().used, 0);
    }

    #[test]
    fn test_report_shape() {
        let mut monitor = RateLimitMonitor::new();
        monitor.record("apod", &headers("1000", "100"));

        let report = monitor.report();
        let usage = report.get("apod").unwrap();
        assert_eq!(usage.used, 900);
        assert_eq!(usage.request_count, 1);
        assert!(usage.near_limit);
    }

    #[test]
    fn test_reset() {
        let mut monitor = RateLimitMonitor::new();
        monitor.record("apod", &headers("1000", "999"));

        monitor.reset();
        assert!(monitor.info("apod").is_none());
        assert_eq!(monitor.request_count("apod"), 0);
        assert!(monitor.report().is_empty());
    }
}
