//! Store Statistics Module
//!
//! Tracks store activity: inserts, updates, hits, misses and evictions.

use serde::Serialize;

use crate::store::StoreEvent;

// == Store Stats ==
/// Counters folded from [`StoreEvent`]s plus externally recorded misses.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreStats {
    /// Number of new keys inserted
    pub adds: u64,
    /// Number of overwrites of existing keys
    pub updates: u64,
    /// Number of successful lookups
    pub hits: u64,
    /// Number of lookups for absent keys
    pub misses: u64,
    /// Number of lookups that moved a key to the most recently used slot
    pub promotions: u64,
    /// Number of entries evicted due to LRU policy
    pub evictions: u64,
    /// Current number of entries in the store
    pub total_entries: usize,
}

impl StoreStats {
    // == Constructor ==
    /// Creates a new StoreStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Event ==
    /// Folds a store notification into the counters.
    ///
    /// Lookups of the most recently used key emit nothing, so hits and
    /// misses are counted by the caller with [`StoreStats::record_hit`]
    /// and [`StoreStats::record_miss`].
    pub fn record(&mut self, event: &StoreEvent) {
        match event {
            StoreEvent::Add(_) => self.adds += 1,
            StoreEvent::Update(_) => self.updates += 1,
            StoreEvent::Remove(_) => self.evictions += 1,
            StoreEvent::Hit(_) => self.promotions += 1,
        }
    }

    // == Record Hit ==
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Update Entry Count ==
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
