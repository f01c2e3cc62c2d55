//! Cache Policy Module
//!
//! The key-naming and TTL policy for every upstream data source. The cache
//! itself is agnostic to all of this: call sites build a deterministic key
//! from their request parameters so identical requests collapse to identical
//! keys, and pick the TTL matching the source's real-world update cadence.

const MINUTE_MS: u64 = 60 * 1000;
const HOUR_MS: u64 = 60 * MINUTE_MS;

// == Data Sources ==
/// The upstream feeds the proxy caches, each with a fixed TTL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// Astronomy Picture of the Day, updates daily
    Apod,
    /// Mars rover photography
    MarsPhotos,
    /// Near-Earth object feed (NeoWs)
    NeoFeed,
    /// Space weather events (DONKI), changes frequently
    Donki,
    /// Exoplanet Archive, relatively static
    Exoplanets,
    /// EPIC Earth imaging
    Epic,
    /// NASA image and video library search
    MediaLibrary,
    /// EONET natural event tracker, changes frequently
    Eonet,
}

impl DataSource {
    /// Returns the TTL for this source in milliseconds.
    pub const fn ttl_ms(self) -> u64 {
        match self {
            DataSource::Apod => 24 * HOUR_MS,
            DataSource::MarsPhotos => HOUR_MS,
            DataSource::NeoFeed => HOUR_MS,
            DataSource::Donki => 30 * MINUTE_MS,
            DataSource::Exoplanets => 24 * HOUR_MS,
            DataSource::Epic => HOUR_MS,
            DataSource::MediaLibrary => HOUR_MS,
            DataSource::Eonet => 30 * MINUTE_MS,
        }
    }

    /// Short name used for rate-limit bookkeeping and logs.
    pub const fn name(self) -> &'static str {
        match self {
            DataSource::Apod => "apod",
            DataSource::MarsPhotos => "mars-rover",
            DataSource::NeoFeed => "asteroids",
            DataSource::Donki => "donki",
            DataSource::Exoplanets => "exoplanets",
            DataSource::Epic => "epic",
            DataSource::MediaLibrary => "nasa-library",
            DataSource::Eonet => "eonet",
        }
    }
}

// == Key Builders ==
// Omitted parameters collapse to fixed placeholders so that e.g. an
// unspecified APOD date and today's explicit date stay distinct keys.

pub fn apod_key(date: Option<&str>) -> String {
    format!("apod_{}", date.unwrap_or("today"))
}

pub fn mars_photos_key(
    rover: &str,
    sol: Option<u32>,
    earth_date: Option<&str>,
    camera: Option<&str>,
    page: u32,
) -> String {
    let sol = sol.map_or_else(|| "sol".to_string(), |s| s.to_string());
    format!(
        "mars_{}_{}_{}_{}_{}",
        rover,
        sol,
        earth_date.unwrap_or("date"),
        camera.unwrap_or("all"),
        page
    )
}

pub fn asteroids_key(start_date: &str, end_date: &str) -> String {
    format!("asteroids_{}_{}", start_date, end_date)
}

pub fn donki_key(event_type: &str) -> String {
    format!("donki_{}", event_type)
}

pub fn exoplanets_key(table: &str) -> String {
    format!("exoplanets_{}", table)
}

pub fn epic_key(date: Option<&str>) -> String {
    format!("epic_{}", date.unwrap_or("recent"))
}

pub fn nasa_library_key(query: &str, page: u32) -> String {
    format!("nasa_lib_{}_{}", query, page)
}

pub fn eonet_key(limit: u32) -> String {
    format!("eonet_{}", limit)
}
