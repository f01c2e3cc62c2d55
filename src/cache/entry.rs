//! Cache Entry Module
//!
//! Defines the structure for individual cached API responses.

use serde_json::Value;

// == Cache Entry ==
/// A single cached upstream response with its expiry metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored response payload
    pub value: Value,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl_ms` after `now_ms`.
    /// A TTL too large to represent saturates, so the entry never expires.
    pub fn new(value: Value, now_ms: u64, ttl_ms: u64) -> Self {
        Self {
            value,
            created_at: now_ms,
            expires_at: now_ms.saturating_add(ttl_ms),
        }
    }

    // == Is Expired ==
    /// Checks whether the entry is stale at the given instant.
    ///
    /// An entry is live up to and including its expiry instant and stale
    /// strictly after it, so `now_ms == expires_at` still counts as live.
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        now_ms > self.expires_at
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds at the given instant,
    /// or 0 once the entry has expired.
    pub fn ttl_remaining_ms(&self, now_ms: u64) -> u64 {
        self.expires_at.saturating_sub(now_ms)
    }
}
