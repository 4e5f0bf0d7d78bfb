//! ttl_lru - A fixed-capacity in-memory LRU cache with lazy TTL expiration
//!
//! The engine pairs a hash index with an arena-backed doubly-linked recency
//! list, giving O(1) lookup, recency refresh and eviction. Expired entries are
//! reclaimed only when a read finds them.
//!
//! ```
//! use std::time::Duration;
//! use ttl_lru::LruCache;
//!
//! let mut cache = LruCache::new(2).unwrap();
//! cache.set("a", 1, Duration::ZERO);
//! cache.set("b", 2, Duration::from_secs(60));
//! cache.get(&"a");
//! cache.set("c", 3, Duration::ZERO); // evicts "b"
//!
//! assert_eq!(cache.get(&"b"), None);
//! assert_eq!(cache.len(), 2);
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{CacheStats, LruCache, SharedCache};
pub use config::Config;
pub use error::{CacheError, Result};
