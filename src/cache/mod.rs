//! Cache Module
//!
//! Provides a fixed-capacity in-memory cache with LRU eviction and
//! per-entry idle TTL expiry.

mod entry;
mod expiry;
mod recency;
mod stats;
mod store;


// Re-export public types
pub use entry::{AccessStamp, CacheEntry};
pub use expiry::{ExpiryQueue, ExpiryReceiver, PendingExpiry};
pub use recency::RecencyIndex;
pub use stats::CacheStats;
pub use store::CacheStore;
