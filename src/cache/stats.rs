//! Cache Statistics Module
//!
//! Point-in-time snapshot of cache occupancy for diagnostics.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of cache occupancy at a single instant.
///
/// `total_entries` includes expired entries that no read has lazily
/// collected yet, so it can exceed what `get`/`has` would report as
/// present. Taking a snapshot never evicts anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Current map size, including not-yet-collected expired entries
    pub total_entries: usize,
    /// Entries still within their TTL
    pub valid_entries: usize,
    /// Entries past their TTL but still occupying memory
    pub expired_entries: usize,
}

impl CacheStats {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a snapshot from a total size and the number of live entries.
    pub fn from_counts(total_entries: usize, valid_entries: usize) -> Self {
        Self {
            total_entries,
            valid_entries,
            expired_entries: total_entries - valid_entries,
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.valid_entries, 0);
        assert_eq!(stats.expired_entries, 0);
    }

    #[test]
    fn test_stats_from_counts() {
        let stats = CacheStats::from_counts(5, 3);
        assert_eq!(stats.total_entries, 5);
        assert_eq!(stats.valid_entries, 3);
        assert_eq!(stats.expired_entries, 2);
    }

    #[test]
    fn test_stats_serialize() {
        let stats = CacheStats::from_counts(2, 2);
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"total_entries\":2"));
        assert!(json.contains("\"valid_entries\":2"));
        assert!(json.contains("\"expired_entries\":0"));
    }
}
