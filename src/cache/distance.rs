//! Distance cache: unordered pair of solution codes → distance.

use std::hash::Hash;

use super::statistics::CacheStatistics;
use super::store::BoundedStore;

/// Memoizes distances between solution codes.
///
/// Keys are unordered: a value stored for `(a, b)` answers a later query
/// for `(b, a)`. Same enable/capacity/statistics contract as
/// [`EvaluationCache`](super::EvaluationCache).
#[derive(Debug, Clone)]
pub struct DistanceCache<K> {
    enabled: bool,
    store: BoundedStore<(K, K), f64>,
    statistics: CacheStatistics,
}

impl<K: Clone + Eq + Hash + Ord> DistanceCache<K> {
    /// Creates a cache. `capacity` 0 means unbounded.
    pub fn new(enabled: bool, capacity: usize) -> Self {
        Self {
            enabled,
            store: BoundedStore::new(capacity),
            statistics: CacheStatistics::default(),
        }
    }

    /// Creates a cache that always computes directly.
    pub fn disabled() -> Self {
        Self::new(false, 0)
    }

    /// Whether lookups are memoized.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables caching without discarding entries or statistics.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Maximum number of entries, 0 when unbounded.
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether no entry is stored.
    pub fn is_empty(&self) -> bool {
        self.store.len() == 0
    }

    /// Request/hit counters since construction or the last reset.
    pub fn statistics(&self) -> CacheStatistics {
        self.statistics
    }

    /// Re-initializes the cache: drops all entries and zeroes the statistics.
    pub fn reset(&mut self) {
        self.store.clear();
        self.statistics = CacheStatistics::default();
    }

    /// Returns the distance between `a` and `b`, computing it on a miss.
    ///
    /// `compute` is always called with the pair in canonical (ascending) order.
    pub fn get_or_compute<F>(&mut self, a: &K, b: &K, compute: F) -> f64
    where
        F: FnOnce(&K, &K) -> f64,
    {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        if !self.enabled {
            return compute(lo, hi);
        }
        let key = (lo.clone(), hi.clone());
        if let Some(distance) = self.store.get(&key) {
            self.statistics.record_hit();
            return *distance;
        }
        self.statistics.record_miss();
        let distance = compute(lo, hi);
        self.store.insert(key, distance);
        distance
    }
}

impl<K: Clone + Eq + Hash + Ord> Default for DistanceCache<K> {
    fn default() -> Self {
        Self::disabled()
    }
}
