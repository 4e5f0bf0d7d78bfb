//! Shared Cache Module
//!
//! Thread-safe handle around [`LruCache`].
//!
//! `get` is not read-only (it reorders the recency list and may delete an
//! expired entry), so every operation takes the same exclusive lock for its
//! whole duration. There is no reader path.

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::cache::{CacheStats, LruCache};
use crate::error::Result;

// == Shared Cache ==
/// Cloneable, thread-safe cache handle. Clones share the same cache.
#[derive(Debug)]
pub struct SharedCache<K, V> {
    inner: Arc<Mutex<LruCache<K, V>>>,
}

impl<K, V> Clone for SharedCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> From<LruCache<K, V>> for SharedCache<K, V> {
    fn from(cache: LruCache<K, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }
}

impl<K, V> SharedCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Creates a shared cache holding at most `capacity` entries.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidCapacity` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        LruCache::new(capacity).map(Self::from)
    }

    /// Retrieves a clone of the value and marks it most recently used.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Stores a key-value pair, see [`LruCache::set`].
    pub fn set(&self, key: K, value: V, ttl: Duration) {
        self.inner.lock().set(key, value, ttl);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    /// Runs [`LruCache::check_integrity`] under the lock.
    pub fn check_integrity(&self) -> Result<()> {
        self.inner.lock().check_integrity()
    }
}
