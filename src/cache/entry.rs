//! Cache Entry Module
//!
//! Defines the payload held by each live slot of the recency list.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cached key-value pair with its optional expiry instant.
#[derive(Debug, Clone)]
pub struct CacheEntry<K, V> {
    /// The lookup key, kept so eviction can clear the index
    pub key: K,
    /// The stored value
    pub value: V,
    /// Absolute expiry instant, None = never expires
    pub expires_at: Option<Instant>,
}

impl<K, V> CacheEntry<K, V> {
    // == Constructor ==
    /// Creates a new entry, computing its expiry from `ttl` relative to `now`.
    ///
    /// # Arguments
    /// * `key` - The lookup key
    /// * `value` - The value to store
    /// * `ttl` - Time to live, `Duration::ZERO` means no expiration
    /// * `now` - The instant the entry is written
    pub fn new(key: K, value: V, ttl: Duration, now: Instant) -> Self {
        Self {
            key,
            value,
            expires_at: expiry_from(ttl, now),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired as of `now`.
    ///
    /// Expiry is strict: an entry read exactly at its expiry instant is still
    /// live, it only becomes expired once `now` is past `expires_at`.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now > expires,
            None => false,
        }
    }

    // == Refresh ==
    /// Overwrites the value and, for a non-zero `ttl`, the expiry.
    ///
    /// A zero `ttl` leaves any existing expiry in place.
    pub fn refresh(&mut self, value: V, ttl: Duration, now: Instant) {
        self.value = value;
        if !ttl.is_zero() {
            self.expires_at = expiry_from(ttl, now);
        }
    }
}

// == Utility Functions ==
/// Computes the absolute expiry for `ttl` written at `now`.
///
/// Zero means no expiry. A TTL too large to represent as an `Instant` is also
/// treated as no expiry.
pub fn expiry_from(ttl: Duration, now: Instant) -> Option<Instant> {
    if ttl.is_zero() {
        None
    } else {
        now.checked_add(ttl)
    }
}
