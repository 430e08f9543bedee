//! Evaluation cache: solution code → quality triple.

use std::hash::Hash;

use super::statistics::CacheStatistics;
use super::store::BoundedStore;
use crate::solution::QualityOfSolution;

/// Memoizes solution quality by solution code.
///
/// While disabled, every request is computed directly and neither the
/// entries nor the statistics change. Toggling the cache mid-run is
/// allowed; statistics simply stop advancing while it is off.
///
/// # Examples
///
/// ```
/// use u_vns::cache::EvaluationCache;
/// use u_vns::solution::QualityOfSolution;
///
/// let mut cache = EvaluationCache::new(true, 0);
/// for _ in 0..3 {
///     let q = cache.get_or_compute(&"101".to_string(), || QualityOfSolution::new(2.0, 2.0, true));
///     assert_eq!(q.fitness, 2.0);
/// }
/// assert_eq!(cache.statistics().request_count, 3);
/// assert_eq!(cache.statistics().hit_count, 2);
/// ```
#[derive(Debug, Clone)]
pub struct EvaluationCache<K> {
    enabled: bool,
    store: BoundedStore<K, QualityOfSolution>,
    statistics: CacheStatistics,
}

impl<K: Clone + Eq + Hash> EvaluationCache<K> {
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

    /// Returns the stored quality for `code`, computing and storing it on a miss.
    pub fn get_or_compute<F>(&mut self, code: &K, compute: F) -> QualityOfSolution
    where
        F: FnOnce() -> QualityOfSolution,
    {
        match self.try_get_or_compute::<_, std::convert::Infallible>(code, || Ok(compute())) {
            Ok(quality) => quality,
            Err(never) => match never {},
        }
    }

    /// Fallible variant of [`get_or_compute`](Self::get_or_compute).
    ///
    /// Errors from `compute` propagate unchanged and nothing is stored.
    /// The request still counts as a miss.
    pub fn try_get_or_compute<F, E>(&mut self, code: &K, compute: F) -> Result<QualityOfSolution, E>
    where
        F: FnOnce() -> Result<QualityOfSolution, E>,
    {
        if !self.enabled {
            return compute();
        }
        if let Some(quality) = self.store.get(code) {
            self.statistics.record_hit();
            return Ok(*quality);
        }
        self.statistics.record_miss();
        let quality = compute()?;
        self.store.insert(code.clone(), quality);
        Ok(quality)
    }
}

impl<K: Clone + Eq + Hash> Default for EvaluationCache<K> {
    fn default() -> Self {
        Self::disabled()
    }
}
