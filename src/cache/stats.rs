//! Cache Statistics Module
//!
//! Counters for read outcomes and capacity evictions.

use serde::Serialize;

/// How a single `get` resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// Live entry returned and touched
    Hit,
    /// Key was not in the index
    Absent,
    /// Entry was past its expiry and has been reclaimed
    Expired,
}

// == Cache Stats ==
/// Snapshot of cache activity since construction.
///
/// `misses` counts both absent and expired reads, which callers cannot tell
/// apart. `expirations` breaks out the second kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Entries dropped from the LRU end to admit a new key
    pub evictions: u64,
    /// Expired entries reclaimed on read
    pub expirations: u64,
    /// Entries currently held, including expired ones not yet read
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of reads that hit, 0.0 before the first read.
    pub fn hit_rate(&self) -> f64 {
        match self.hits + self.misses {
            0 => 0.0,
            reads => self.hits as f64 / reads as f64,
        }
    }

    /// Counts one `get` by how it resolved.
    pub fn record_read(&mut self, outcome: ReadOutcome) {
        match outcome {
            ReadOutcome::Hit => self.hits += 1,
            ReadOutcome::Absent => self.misses += 1,
            ReadOutcome::Expired => {
                self.misses += 1;
                self.expirations += 1;
            }
        }
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
