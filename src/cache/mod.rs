//! Cache Module
//!
//! In-memory response cache with per-entry TTL and lazy expiration.

mod clock;
mod entry;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::ApiCache;

// == Public Constants ==
/// TTL applied when a caller stores an entry without one: 1 hour.
pub const DEFAULT_TTL_MS: u64 = 60 * 60 * 1000;
