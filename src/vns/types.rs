//! Neighborhood support trait for Variable Neighborhood Search.

use std::collections::BTreeSet;

use rand::Rng;

use crate::error::Result;
use crate::solution::{local_search, LocalSearchOutcome, LocalSearchType, Solution, SolutionContext};

/// Problem-specific shaking and local search used by the optimizer.
///
/// [`RandomMoveShaking`](super::RandomMoveShaking) implements this for
/// every [`Solution`]; implement it yourself to shake with a different
/// perturbation.
pub trait VnsSupport<S: Solution> {
    /// Perturbs `solution` within neighborhood size `k` (shaking).
    ///
    /// The accepted candidate must differ from `solution` and be farther
    /// than `k` from every code in `visited` other than the code of
    /// `solution` itself. On success the candidate replaces `solution`, is
    /// evaluated, and `true` is returned. When no acceptable candidate is
    /// found, `solution` is left unchanged and `false` is returned.
    fn shake<R: Rng>(
        &self,
        k: usize,
        problem: &S::Problem,
        solution: &mut S,
        visited: &BTreeSet<S::Code>,
        context: &mut SolutionContext<S::Code>,
        rng: &mut R,
    ) -> bool;

    /// Runs local search from `solution` until a local optimum or until
    /// `stop` returns `true`.
    fn local_search<F>(
        &self,
        kind: LocalSearchType,
        problem: &S::Problem,
        solution: &mut S,
        context: &mut SolutionContext<S::Code>,
        stop: F,
    ) -> Result<LocalSearchOutcome>
    where
        F: FnMut(&SolutionContext<S::Code>) -> bool,
    {
        local_search::run(kind, problem, solution, context, stop)
    }
}
