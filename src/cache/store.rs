//! Cache Store Module
//!
//! The cache engine: a hash index from key to slot handle combined with the
//! recency list, with lazy TTL expiration.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, ReadOutcome, RecencyList, SlotId};
use crate::error::{CacheError, Result};

// == LRU Cache ==
/// Fixed-capacity LRU cache with optional per-entry TTL.
///
/// Expired entries are only reclaimed when a `get` finds them. Until then they
/// keep occupying capacity and drift towards the LRU end like any other
/// untouched entry.
#[derive(Debug)]
pub struct LruCache<K, V> {
    /// Key -> slot in the recency list
    index: HashMap<K, SlotId>,
    /// Entries ordered from least to most recently used
    list: RecencyList<CacheEntry<K, V>>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidCapacity` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }

        Ok(Self {
            index: HashMap::with_capacity(capacity),
            list: RecencyList::with_capacity(capacity),
            stats: CacheStats::new(),
            capacity,
        })
    }

    // == Get ==
    /// Retrieves a value by key and marks it most recently used.
    ///
    /// An expired entry is removed and reported as a miss, indistinguishable
    /// from a key that was never stored.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_at(key, Instant::now())
    }

    pub(crate) fn get_at<Q>(&mut self, key: &Q, now: Instant) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(&id) = self.index.get(key) else {
            self.stats.record_read(ReadOutcome::Absent);
            return None;
        };

        let expired = self
            .list
            .get(id)
            .map_or(false, |entry| entry.is_expired_at(now));

        if expired {
            self.index.remove(key);
            self.list.remove(id);
            self.stats.record_read(ReadOutcome::Expired);
            debug!(entries = self.index.len(), "removed expired entry on read");
            return None;
        }

        self.list.touch(id);
        self.stats.record_read(ReadOutcome::Hit);
        self.list.get(id).map(|entry| &entry.value)
    }

    // == Set ==
    /// Stores a key-value pair and marks it most recently used.
    ///
    /// A zero `ttl` means no expiration. For an existing key the value is
    /// overwritten whether or not the entry has expired; its expiry is only
    /// replaced when `ttl` is non-zero. Inserting a new key into a full cache
    /// evicts the least recently used entry first, expired or not.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - Time to live, `Duration::ZERO` for none
    pub fn set(&mut self, key: K, value: V, ttl: Duration) {
        self.set_at(key, value, ttl, Instant::now());
    }

    pub(crate) fn set_at(&mut self, key: K, value: V, ttl: Duration, now: Instant) {
        if let Some(&id) = self.index.get(&key) {
            if let Some(entry) = self.list.get_mut(id) {
                entry.refresh(value, ttl, now);
            }
            self.list.touch(id);
            return;
        }

        if self.index.len() >= self.capacity {
            self.evict_lru();
        }

        let entry = CacheEntry::new(key.clone(), value, ttl, now);
        let id = self.list.push_mru(entry);
        self.index.insert(key, id);
    }

    fn evict_lru(&mut self) {
        let Some(id) = self.list.lru() else {
            return;
        };

        if let Some(evicted) = self.list.remove(id) {
            self.index.remove(&evicted.key);
            self.stats.record_eviction();
            debug!(
                capacity = self.capacity,
                had_ttl = evicted.expires_at.is_some(),
                "evicted least recently used entry"
            );
        }
    }

    // == Keys ==
    /// Iterates keys from the LRU end to the MRU end without touching them.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.list.iter().map(|(_, entry)| &entry.key)
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.index.len());
        stats
    }

    // == Integrity Check ==
    /// Verifies the index and recency list describe the same set of entries.
    ///
    /// Every index handle must resolve to a live slot holding the same key,
    /// the list must be a well-formed chain with one slot per index key, and
    /// the entry count must be within capacity.
    pub fn check_integrity(&self) -> Result<()> {
        self.list.check_integrity()?;

        if self.index.len() != self.list.len() {
            return Err(CacheError::Corrupted(format!(
                "index holds {} keys but list holds {} entries",
                self.index.len(),
                self.list.len()
            )));
        }
        if self.index.len() > self.capacity {
            return Err(CacheError::Corrupted(format!(
                "{} entries exceed capacity {}",
                self.index.len(),
                self.capacity
            )));
        }

        for (key, &id) in &self.index {
            match self.list.get(id) {
                Some(entry) if entry.key == *key => {}
                Some(_) => {
                    return Err(CacheError::Corrupted(
                        "index handle resolves to a different key".to_string(),
                    ))
                }
                None => {
                    return Err(CacheError::Corrupted(
                        "index handle resolves to a vacant slot".to_string(),
                    ))
                }
            }
        }

        Ok(())
    }

    // == Length ==
    /// Returns the current number of entries, expired-but-unread included.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
