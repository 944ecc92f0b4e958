//! Cache Statistics Module
//!
//! Tracks lookup outcomes and removals for the preflight cache.

use serde::Serialize;

// == Cache Stats ==
/// Counters describing how the preflight cache has been used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups that allowed the preflight to be skipped
    pub hits: u64,
    /// Lookups that found no entry
    pub misses: u64,
    /// Lookups whose entry did not cover the request
    pub denials: u64,
    /// Entries removed lazily after being found expired
    pub expirations: u64,
    /// Entries removed by a capacity purge
    pub evictions: u64,
    /// Current number of origins with at least one entry
    pub total_origins: usize,
    /// Current number of entries across all origins
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Fraction of lookups that skipped a preflight, or 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.lookups();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Total lookups, expired ones counted as misses of a kind.
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses + self.denials + self.expirations
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_denial(&mut self) {
        self.denials += 1;
    }

    pub fn record_expiration(&mut self) {
        self.expirations += 1;
    }

    // == Record Evictions ==
    /// Adds `count` purge removals.
    pub fn record_evictions(&mut self, count: usize) {
        self.evictions += count as u64;
    }

    // == Update Sizes ==
    /// Updates the current origin and entry counts.
    pub fn set_sizes(&mut self, origins: usize, entries: usize) {
        self.total_origins = origins;
        self.total_entries = entries;
    }
}
