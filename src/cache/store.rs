//! Cache Store Module
//!
//! The response cache: a keyed map of upstream payloads with per-entry TTL
//! and lazy expiration. Entries are only ever evicted by a read that finds
//! them stale, or by `clear`; there is no background sweep and no size
//! bound. Every operation is synchronous and total; sharing across tasks
//! is layered on by the caller.

use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cache::{CacheEntry, CacheStats, Clock, SystemClock, DEFAULT_TTL_MS};

// == Api Cache ==
/// In-memory response cache keyed by deterministic request strings.
pub struct ApiCache {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Time source, injectable for deterministic tests
    clock: Arc<dyn Clock>,
    /// TTL in milliseconds applied when a caller passes none
    default_ttl_ms: u64,
}

impl ApiCache {
    // == Constructors ==
    /// Creates a cache on the system clock with the given default TTL.
    pub fn new(default_ttl_ms: u64) -> Self {
        Self::with_clock(default_ttl_ms, Arc::new(SystemClock))
    }

    /// Creates a cache on an explicit clock.
    pub fn with_clock(default_ttl_ms: u64, clock: Arc<dyn Clock>) -> Self {
        let default_ttl_ms = if default_ttl_ms == 0 {
            DEFAULT_TTL_MS
        } else {
            default_ttl_ms
        };
        Self {
            entries: HashMap::new(),
            clock,
            default_ttl_ms,
        }
    }

    // == Set ==
    /// Stores a payload under `key`, wholesale replacing any prior entry.
    ///
    /// A missing or zero `ttl_ms` falls back to the default TTL. Always
    /// succeeds; overwriting is silent and total.
    pub fn set(&mut self, key: impl Into<String>, value: Value, ttl_ms: Option<u64>) {
        let now = self.clock.now_ms();
        let ttl = match ttl_ms {
            Some(ttl) if ttl > 0 => ttl,
            _ => self.default_ttl_ms,
        };
        self.entries.insert(key.into(), CacheEntry::new(value, now, ttl));
    }

    // == Get ==
    /// Returns the payload for `key` if a live entry exists.
    ///
    /// Reading a stale entry deletes it before returning `None`; expiration
    /// is enforced exactly at read time, never earlier.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        let now = self.clock.now_ms();
        match self.entries.get(key) {
            Some(entry) if !entry.is_expired_at(now) => Some(entry.value.clone()),
            Some(_) => {
                self.entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Typed accessor over the type-erased map.
    ///
    /// Returns `None` for a miss, an expired entry, or a payload that does
    /// not deserialize into `T`; the caller owns knowing what a key holds.
    pub fn get_as<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        self.get(key)
            .and_then(|value| serde_json::from_value(value).ok())
    }

    // == Has ==
    /// Reports whether a live entry exists for `key`.
    ///
    /// Shares `get`'s liveness semantics and deletion side effect, so
    /// `has(k)` is true exactly when an immediately following `get(k)`
    /// would return a value.
    pub fn has(&mut self, key: &str) -> bool {
        let now = self.clock.now_ms();
        match self.entries.get(key) {
            Some(entry) if !entry.is_expired_at(now) => true,
            Some(_) => {
                self.entries.remove(key);
                false
            }
            None => false,
        }
    }

    // == Clear ==
    /// Removes all entries unconditionally, live or expired.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Stats ==
    /// Takes a point-in-time occupancy snapshot.
    ///
    /// A pure observer: stale entries are counted, never evicted, so the
    /// snapshot may include entries a read would already treat as absent.
    pub fn stats(&self) -> CacheStats {
        let now = self.clock.now_ms();
        let valid = self
            .entries
            .values()
            .filter(|entry| !entry.is_expired_at(now))
            .count();
        CacheStats::from_counts(self.entries.len(), valid)
    }

    // == Length ==
    /// Returns the current number of entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for ApiCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCache")
            .field("entries", &self.entries.len())
            .field("default_ttl_ms", &self.default_ttl_ms)
            .finish()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use serde_json::json;

    fn cache_at(start_ms: u64) -> (ApiCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(start_ms));
        let cache = ApiCache::with_clock(DEFAULT_TTL_MS, clock.clone());
        (cache, clock)
    }

    #[test]
    fn test_set_and_get_roundtrip() {
        let (mut cache, _clock) = cache_at(0);

        cache.set("apod_today", json!({"title": "Pillars of Creation"}), Some(1_000));

        assert_eq!(
            cache.get("apod_today"),
            Some(json!({"title": "Pillars of Creation"}))
        );
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_get_missing_key() {
        let (mut cache, _clock) = cache_at(0);
        assert_eq!(cache.get("nonexistent"), None);
    }

    #[test]
    fn test_overwrite_replaces_wholesale() {
        let (mut cache, clock) = cache_at(0);

        cache.set("k", json!("v1"), Some(10));
        cache.set("k", json!("v2"), Some(1_000_000));

        assert_eq!(cache.get("k"), Some(json!("v2")));
        assert_eq!(cache.len(), 1);

        // The second TTL governs: the first would have expired by now.
        clock.advance(500);
        assert_eq!(cache.get("k"), Some(json!("v2")));
    }

    #[test]
    fn test_expiry_is_strictly_after_deadline() {
        let (mut cache, clock) = cache_at(0);
        cache.set("k", json!(42), Some(1_000));

        clock.set(1_000);
        assert_eq!(cache.get("k"), Some(json!(42)));

        clock.set(1_001);
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn test_expired_read_deletes_entry() {
        let (mut cache, clock) = cache_at(0);
        cache.set("k", json!(1), Some(100));

        clock.advance(200);
        assert_eq!(cache.get("k"), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_has_matches_get() {
        let (mut cache, clock) = cache_at(0);
        cache.set("k", json!(1), Some(100));

        assert!(cache.has("k"));
        assert!(cache.get("k").is_some());

        clock.advance(101);
        assert!(!cache.has("k"));
        assert!(cache.get("k").is_none());
        // has() on the stale entry already collected it
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_default_ttl_applies_when_missing_or_zero() {
        let (mut cache, clock) = cache_at(0);
        cache.set("implicit", json!(42), None);
        cache.set("zero", json!(42), Some(0));

        // Exactly the default one hour after insertion: both still live.
        clock.set(DEFAULT_TTL_MS);
        assert!(cache.has("implicit"));
        assert!(cache.has("zero"));

        clock.set(DEFAULT_TTL_MS + 1);
        assert!(!cache.has("implicit"));
        assert!(!cache.has("zero"));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let (mut cache, _clock) = cache_at(0);
        cache.set("a", json!(1), Some(1_000));
        cache.set("b", json!(2), Some(1));

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats::new());

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats::new());
    }

    #[test]
    fn test_stats_counts_expired_without_evicting() {
        let (mut cache, clock) = cache_at(0);
        cache.set("short", json!(1), Some(100));
        cache.set("long", json!(2), Some(10_000));

        clock.advance(200);

        let stats = cache.stats();
        assert_eq!(stats.total_entries, 2);
        assert_eq!(stats.valid_entries, 1);
        assert_eq!(stats.expired_entries, 1);

        // Snapshot after snapshot, nothing moves until a read collects it.
        assert_eq!(cache.stats(), stats);
        assert_eq!(cache.len(), 2);

        assert_eq!(cache.get("short"), None);
        let stats = cache.stats();
        assert_eq!(stats.total_entries, 1);
        assert_eq!(stats.expired_entries, 0);
    }

    #[test]
    fn test_apod_scenario_ttl_1000ms() {
        let (mut cache, clock) = cache_at(0);
        cache.set("apod_2024-01-01", json!({"title": "X"}), Some(1_000));

        clock.set(500);
        assert_eq!(cache.get("apod_2024-01-01"), Some(json!({"title": "X"})));

        clock.set(1_001);
        let stats = cache.stats();
        assert_eq!(stats.total_entries, 1);
        assert_eq!(stats.valid_entries, 0);
        assert_eq!(stats.expired_entries, 1);

        clock.set(1_002);
        assert_eq!(cache.get("apod_2024-01-01"), None);
        assert_eq!(cache.stats().total_entries, 0);
    }

    #[test]
    fn test_distinct_keys_coexist() {
        let (mut cache, _clock) = cache_at(0);
        cache.set("mars_curiosity_5_2021-01-01_FHAZ_1", json!("A"), Some(1_000));
        cache.set("mars_curiosity_5_2021-01-01_FHAZ_2", json!("B"), Some(1_000));

        assert_eq!(cache.get("mars_curiosity_5_2021-01-01_FHAZ_1"), Some(json!("A")));
        assert_eq!(cache.get("mars_curiosity_5_2021-01-01_FHAZ_2"), Some(json!("B")));
    }

    #[test]
    fn test_get_as_typed_access() {
        #[derive(serde::Deserialize, PartialEq, Debug)]
        struct Payload {
            title: String,
        }

        let (mut cache, _clock) = cache_at(0);
        cache.set("apod_today", json!({"title": "X"}), None);

        let payload: Option<Payload> = cache.get_as("apod_today");
        assert_eq!(payload, Some(Payload { title: "X".into() }));

        // Shape mismatch reads as absent rather than erroring.
        let wrong: Option<Vec<u32>> = cache.get_as("apod_today");
        assert_eq!(wrong, None);
    }
}
