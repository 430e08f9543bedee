//! Per-run evaluation state: caches and the evaluation counter.

use std::hash::Hash;

use super::quality::QualityOfSolution;
use super::types::Problem;
use crate::cache::{DistanceCache, EvaluationCache};

/// Mutable state shared by every solution operation of one search run.
///
/// Owned by the optimizer and passed explicitly to evaluation, distance,
/// shaking and local search, so no cache is ever ambient or global.
#[derive(Debug, Clone)]
pub struct SolutionContext<K> {
    /// Solution code → quality.
    pub evaluation_cache: EvaluationCache<K>,
    /// Unordered pair of codes → distance.
    pub distance_cache: DistanceCache<K>,
    evaluations: u64,
}

impl<K: Clone + Eq + Hash + Ord> SolutionContext<K> {
    pub fn new(evaluation_cache: EvaluationCache<K>, distance_cache: DistanceCache<K>) -> Self {
        Self {
            evaluation_cache,
            distance_cache,
            evaluations: 0,
        }
    }

    /// Number of evaluations performed so far, cached or not.
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// Computes quality without consulting the cache. Counts as one evaluation.
    pub fn evaluate_directly<P: Problem>(
        &mut self,
        problem: &P,
        representation: &P::Representation,
    ) -> QualityOfSolution {
        self.evaluations += 1;
        problem.quality(representation)
    }

    pub(crate) fn record_evaluations(&mut self, count: u64) {
        self.evaluations += count;
    }
}

impl<K: Clone + Eq + Hash + Ord> Default for SolutionContext<K> {
    fn default() -> Self {
        Self::new(EvaluationCache::disabled(), DistanceCache::disabled())
    }
}
