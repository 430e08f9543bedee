//! Problem and solution contracts.
//!
//! The optimizer is generic over these traits; any type providing the
//! capability set below is a valid solution.

use std::fmt::Debug;
use std::hash::Hash;

use rand::Rng;

use super::context::SolutionContext;
use super::local_search;
use super::quality::QualityOfSolution;
use crate::error::Result;

/// Defines an optimization problem.
///
/// # Thread Safety
///
/// `Problem` must be `Send + Sync` because neighbor scans may call
/// [`quality`](Problem::quality) in parallel (`parallel` feature).
pub trait Problem: Send + Sync {
    /// Representation this problem knows how to evaluate.
    type Representation;

    /// Number of independent decisions encoded by a representation.
    fn dimension(&self) -> usize;

    /// `true` if lower fitness is better.
    fn is_minimization(&self) -> bool;

    /// Pure quality function. Must be deterministic: the caches rely on
    /// recomputation being indistinguishable from a stored value.
    fn quality(&self, representation: &Self::Representation) -> QualityOfSolution;
}

/// A candidate solution.
///
/// Cloning must produce an independent value: mutating the clone never
/// affects the original.
///
/// Local search operates on a neighborhood of indexed single-step moves
/// ([`move_count`](Solution::move_count) / [`apply_move`](Solution::apply_move)).
/// Every move must be its own inverse, so applying it twice restores the
/// representation; for bit vectors a move is a single bit flip.
///
/// # Implementing
///
/// ```ignore
/// impl Solution for MySolution {
///     type Representation = u32;
///     type Code = String;
///     type Problem = MyProblem;
///
///     fn representation(&self) -> &u32 { &self.bits }
///     fn set_representation(&mut self, r: u32) { self.bits = r; self.quality = None; }
///     fn quality(&self) -> Option<QualityOfSolution> { self.quality }
///     fn set_quality(&mut self, q: QualityOfSolution) { self.quality = Some(q); }
///     // random_init, encode, decode, code_distance, move_count, apply_move ...
/// }
/// ```
pub trait Solution: Clone + Send + Sync {
    /// Internal representation.
    type Representation: Clone + PartialEq + Debug + Send + Sync;

    /// Canonical encoding of a representation, used as cache key and
    /// distance input.
    type Code: Clone + Eq + Hash + Ord + Debug + Send + Sync;

    /// The problem this solution belongs to.
    type Problem: Problem<Representation = Self::Representation>;

    fn representation(&self) -> &Self::Representation;

    /// Replaces the representation and forgets the stored quality.
    fn set_representation(&mut self, representation: Self::Representation);

    /// Quality stored by the last evaluation, if any.
    fn quality(&self) -> Option<QualityOfSolution>;

    fn set_quality(&mut self, quality: QualityOfSolution);

    /// Draws a representation uniformly over the problem's encoding space.
    fn random_init<R: Rng>(&mut self, problem: &Self::Problem, rng: &mut R);

    /// Encodes a representation. Must be a bijection with [`decode`](Solution::decode).
    fn encode(representation: &Self::Representation) -> Self::Code;

    /// Decodes a code produced by [`encode`](Solution::encode).
    fn decode(code: &Self::Code) -> Result<Self::Representation>;

    /// Problem metric between two codes. Must be symmetric and zero on equal codes.
    fn code_distance(a: &Self::Code, b: &Self::Code) -> f64;

    /// Size of the single-step neighborhood.
    fn move_count(&self, problem: &Self::Problem) -> usize;

    /// Applies move `index` (< `move_count`) in place.
    ///
    /// Does not touch the stored quality; callers re-evaluate.
    fn apply_move(&mut self, problem: &Self::Problem, index: usize);

    fn code(&self) -> Self::Code {
        Self::encode(self.representation())
    }

    fn fitness(&self) -> Option<f64> {
        self.quality().map(|q| q.fitness)
    }

    /// Evaluates through the evaluation cache and stores the result.
    fn evaluate(
        &mut self,
        problem: &Self::Problem,
        context: &mut SolutionContext<Self::Code>,
    ) -> QualityOfSolution {
        let code = self.code();
        let representation = self.representation();
        let quality = context
            .evaluation_cache
            .get_or_compute(&code, || problem.quality(representation));
        context.record_evaluations(1);
        self.set_quality(quality);
        quality
    }

    /// Distance from this solution to `other`, through the distance cache.
    fn distance(&self, other: &Self::Code, context: &mut SolutionContext<Self::Code>) -> f64 {
        let code = self.code();
        context
            .distance_cache
            .get_or_compute(&code, other, Self::code_distance)
    }

    /// Applies the strictly best improving move, if any.
    ///
    /// Returns `Ok(false)` when no move improves (local optimum).
    fn best_improvement_step(
        &mut self,
        problem: &Self::Problem,
        context: &mut SolutionContext<Self::Code>,
    ) -> Result<bool> {
        local_search::best_improvement_step(self, problem, context)
    }

    /// Applies the first improving move in index order, if any.
    fn first_improvement_step(
        &mut self,
        problem: &Self::Problem,
        context: &mut SolutionContext<Self::Code>,
    ) -> Result<bool> {
        local_search::first_improvement_step(self, problem, context)
    }
}
