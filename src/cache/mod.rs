//! Cache Module
//!
//! Provides in-memory caching with per-entry expiration and LRU reclamation.

mod entry;
mod lru;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use entry::{expiry_after, CacheEntry};
pub use lru::AccessOrder;
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::{CacheStore, ReclaimReport};
