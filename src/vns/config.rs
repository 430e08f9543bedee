//! Variable Neighborhood Search configuration.

use crate::cache::{DistanceCache, EvaluationCache};
use crate::error::{Result, VnsError};
use crate::solution::LocalSearchType;

/// Enable flag and capacity of one cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CacheConfig {
    /// Whether lookups are memoized.
    pub enabled: bool,
    /// Maximum number of entries, 0 for unbounded.
    pub capacity: usize,
}

impl CacheConfig {
    /// Enabled cache with the given capacity (0 = unbounded).
    pub fn enabled(capacity: usize) -> Self {
        Self {
            enabled: true,
            capacity,
        }
    }

    pub(crate) fn evaluation_cache<K: Clone + Eq + std::hash::Hash>(&self) -> EvaluationCache<K> {
        EvaluationCache::new(self.enabled, self.capacity)
    }

    pub(crate) fn distance_cache<K: Clone + Eq + std::hash::Hash + Ord>(&self) -> DistanceCache<K> {
        DistanceCache::new(self.enabled, self.capacity)
    }
}

/// Configuration parameters for Variable Neighborhood Search.
///
/// Termination limits use 0 for "disabled". At least one limit should be
/// active; the optimizer does not check this (a run that never exhausts
/// its neighborhoods would otherwise loop forever).
///
/// A run can also end before any limit is reached: when shaking fails at
/// every neighborhood size `k_min..=k_max` in a row, the neighborhoods are
/// exhausted and [`VnsResult::exhausted`](super::VnsResult::exhausted) is
/// set. Failed shakes perform no evaluations, so without this stop a run
/// bounded only by `evaluations_max` could never finish.
///
/// # Examples
///
/// ```
/// use u_vns::vns::{CacheConfig, VnsConfig};
/// use u_vns::solution::LocalSearchType;
///
/// let config = VnsConfig::default()
///     .with_k_range(1, 3)
///     .with_evaluations_max(10_000)
///     .with_local_search_type(LocalSearchType::BestImprovement)
///     .with_evaluation_cache(CacheConfig::enabled(0));
/// assert_eq!(config.k_max, 3);
/// assert!(config.validate(10).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VnsConfig {
    /// Smallest shaking neighborhood size.
    pub k_min: usize,
    /// Largest shaking neighborhood size.
    pub k_max: usize,
    /// Stop once this many evaluations were performed (0 = no limit).
    pub evaluations_max: u64,
    /// Stop once this many seconds elapsed (0 = no limit).
    pub seconds_max: f64,
    /// Stop once this many local optima were reached (0 = no limit).
    pub max_local_optima: usize,
    /// Move selection policy of the local search.
    pub local_search_type: LocalSearchType,
    /// If `true`, shaking diversifies against every visited solution code
    /// (initial solution and all shaken candidates) in addition to the
    /// local optima; otherwise only against local optima.
    pub keep_all_solution_codes: bool,
    /// Random seed (None for a random seed).
    pub seed: Option<u64>,
    /// Evaluation cache settings.
    pub evaluation_cache: CacheConfig,
    /// Distance cache settings.
    pub distance_cache: CacheConfig,
}

impl Default for VnsConfig {
    fn default() -> Self {
        Self {
            k_min: 1,
            k_max: 3,
            evaluations_max: 0,
            seconds_max: 10.0,
            max_local_optima: 10,
            local_search_type: LocalSearchType::FirstImprovement,
            keep_all_solution_codes: false,
            seed: None,
            evaluation_cache: CacheConfig::default(),
            distance_cache: CacheConfig::default(),
        }
    }
}

impl VnsConfig {
    /// Sets the neighborhood size bounds.
    pub fn with_k_range(mut self, k_min: usize, k_max: usize) -> Self {
        self.k_min = k_min;
        self.k_max = k_max;
        self
    }

    /// Sets the evaluation limit (0 to disable).
    pub fn with_evaluations_max(mut self, n: u64) -> Self {
        self.evaluations_max = n;
        self
    }

    /// Sets the time limit in seconds (0 to disable).
    pub fn with_seconds_max(mut self, seconds: f64) -> Self {
        self.seconds_max = seconds;
        self
    }

    /// Sets the local optima limit (0 to disable).
    pub fn with_max_local_optima(mut self, n: usize) -> Self {
        self.max_local_optima = n;
        self
    }

    /// Sets the local search move selection policy.
    pub fn with_local_search_type(mut self, kind: LocalSearchType) -> Self {
        self.local_search_type = kind;
        self
    }

    /// Sets whether shaking diversifies against every visited code.
    pub fn with_keep_all_solution_codes(mut self, keep: bool) -> Self {
        self.keep_all_solution_codes = keep;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the evaluation cache settings.
    pub fn with_evaluation_cache(mut self, cache: CacheConfig) -> Self {
        self.evaluation_cache = cache;
        self
    }

    /// Sets the distance cache settings.
    pub fn with_distance_cache(mut self, cache: CacheConfig) -> Self {
        self.distance_cache = cache;
        self
    }

    /// Validates the configuration against a problem of `dimension` decisions.
    ///
    /// Requires `1 <= k_min <= k_max <= dimension` and a finite,
    /// non-negative `seconds_max`.
    pub fn validate(&self, dimension: usize) -> Result<()> {
        if self.k_min == 0 {
            return Err(VnsError::InvalidConfig("k_min must be at least 1".into()));
        }
        if self.k_min > self.k_max {
            return Err(VnsError::InvalidConfig(format!(
                "k_min ({}) must not exceed k_max ({})",
                self.k_min, self.k_max
            )));
        }
        if self.k_max > dimension {
            return Err(VnsError::InvalidConfig(format!(
                "k_max ({}) must not exceed the problem dimension ({dimension})",
                self.k_max
            )));
        }
        if !self.seconds_max.is_finite() || self.seconds_max < 0.0 {
            return Err(VnsError::InvalidConfig(format!(
                "seconds_max must be finite and non-negative, got {}",
                self.seconds_max
            )));
        }
        Ok(())
    }
}
