//! Cache Module
//!
//! Fixed-capacity in-memory caching with LRU eviction and lazy TTL expiration.

mod entry;
mod list;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use list::{RecencyList, SlotId};
pub use shared::SharedCache;
pub use stats::{CacheStats, ReadOutcome};
pub use store::LruCache;
