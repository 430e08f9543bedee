//! Bounded-retry random shaking.

use std::collections::BTreeSet;

use rand::seq::IteratorRandom;
use rand::Rng;

use super::types::VnsSupport;
use crate::solution::{Solution, SolutionContext};

/// Default number of candidates drawn before shaking gives up.
pub const DEFAULT_MAX_TRIES: usize = 10_000;

/// Shakes by applying `k` distinct, uniformly drawn moves.
///
/// A candidate equal to the solution being shaken is never accepted. A
/// candidate is accepted only if its distance to every visited code
/// exceeds `k`; the code of the solution being shaken is exempt from that
/// check, since no candidate can leave its k-neighborhood. Every attempt
/// counts toward `max_tries`; once they are used up the shake fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomMoveShaking {
    max_tries: usize,
}

impl RandomMoveShaking {
    /// Creates a shaker that gives up after `max_tries` candidates.
    pub fn new(max_tries: usize) -> Self {
        Self { max_tries }
    }

    /// Candidate budget per shake.
    pub fn max_tries(&self) -> usize {
        self.max_tries
    }
}

impl Default for RandomMoveShaking {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TRIES)
    }
}

impl<S: Solution> VnsSupport<S> for RandomMoveShaking {
    fn shake<R: Rng>(
        &self,
        k: usize,
        problem: &S::Problem,
        solution: &mut S,
        visited: &BTreeSet<S::Code>,
        context: &mut SolutionContext<S::Code>,
        rng: &mut R,
    ) -> bool {
        let n = solution.move_count(problem);
        if n == 0 {
            return false;
        }
        let threshold = k as f64;
        let origin = solution.code();

        for _ in 0..self.max_tries {
            let mut candidate = solution.clone();
            for index in (0..n).choose_multiple(rng, k) {
                candidate.apply_move(problem, index);
            }

            let code = candidate.code();
            if code == origin {
                continue;
            }
            let diverse = visited.iter().filter(|other| **other != origin).all(|other| {
                context
                    .distance_cache
                    .get_or_compute(&code, other, S::code_distance)
                    > threshold
            });
            if diverse {
                candidate.evaluate(problem, context);
                *solution = candidate;
                return true;
            }
        }

        tracing::trace!(k, tries = self.max_tries, "shaking exhausted");
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{DistanceCache, EvaluationCache};
    use crate::problems::max_ones::{MaxOnesProblem, MaxOnesSolution};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn context() -> SolutionContext<String> {
        SolutionContext::new(EvaluationCache::new(true, 0), DistanceCache::new(true, 0))
    }

    #[test]
    fn test_empty_visited_first_attempt_succeeds() {
        let problem = MaxOnesProblem::new(5).unwrap();
        let shaker = RandomMoveShaking::new(1);
        let mut rng = StdRng::seed_from_u64(42);
        let mut context = context();

        for k in 1..=3 {
            let mut solution = MaxOnesSolution::from_representation(&problem, 0b11111).unwrap();
            assert!(shaker.shake(k, &problem, &mut solution, &BTreeSet::new(), &mut context, &mut rng));
            assert!(solution.quality().is_some(), "shaken solution must be evaluated");
            let flipped = (solution.representation() ^ 0b11111).count_ones() as usize;
            assert_eq!(flipped, k);
        }
    }

    #[test]
    fn test_accepted_candidate_is_farther_than_k_from_visited() {
        let problem = MaxOnesProblem::new(5).unwrap();
        let shaker = RandomMoveShaking::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut context = context();

        // 00000 and 00001 are remembered; from 11111, one flip stays at
        // distance >= 3 from both.
        let visited: BTreeSet<String> = ["0".to_string(), "1".to_string()].into_iter().collect();
        for k in 1..=2 {
            let mut solution = MaxOnesSolution::from_representation(&problem, 0b11111).unwrap();
            assert!(shaker.shake(k, &problem, &mut solution, &visited, &mut context, &mut rng));
            for code in &visited {
                let d = MaxOnesSolution::code_distance(&solution.code(), code);
                assert!(d > k as f64, "distance {d} to {code} not above k={k}");
            }
        }
    }

    #[test]
    fn test_origin_code_is_exempt() {
        let problem = MaxOnesProblem::new(5).unwrap();
        let shaker = RandomMoveShaking::new(1);
        let mut rng = StdRng::seed_from_u64(3);
        let mut context = context();

        let mut solution = MaxOnesSolution::from_representation(&problem, 0b11111).unwrap();
        let visited: BTreeSet<String> = [solution.code()].into_iter().collect();

        assert!(shaker.shake(2, &problem, &mut solution, &visited, &mut context, &mut rng));
        assert_eq!(context.distance_cache.statistics().request_count, 0);
    }

    #[test]
    fn test_never_returns_the_origin() {
        let problem = MaxOnesProblem::new(5).unwrap();
        let shaker = RandomMoveShaking::new(1);
        let origin = MaxOnesSolution::from_representation(&problem, 0b11111).unwrap();
        let visited: BTreeSet<String> = [origin.code()].into_iter().collect();

        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut solution = origin.clone();
            assert!(shaker.shake(2, &problem, &mut solution, &visited, &mut context(), &mut rng));
            assert_ne!(solution.code(), origin.code(), "seed {seed} shook to the origin");
            let d = MaxOnesSolution::code_distance(&solution.code(), &origin.code());
            assert_eq!(d, 2.0);
        }
    }

    #[test]
    fn test_one_distance_request_per_remembered_code() {
        let problem = MaxOnesProblem::new(5).unwrap();
        let shaker = RandomMoveShaking::new(1);
        let mut rng = StdRng::seed_from_u64(8);
        let mut context = context();

        let mut solution = MaxOnesSolution::from_representation(&problem, 0b11111).unwrap();
        let visited: BTreeSet<String> = ["0", "1", "11111"].into_iter().map(String::from).collect();

        assert!(shaker.shake(1, &problem, &mut solution, &visited, &mut context, &mut rng));
        assert_eq!(context.distance_cache.statistics().request_count, 2);
    }

    #[test]
    fn test_fails_when_every_neighbor_is_remembered() {
        let problem = MaxOnesProblem::new(2).unwrap();
        let shaker = RandomMoveShaking::new(200);
        let mut rng = StdRng::seed_from_u64(3);
        let mut context = context();

        let mut solution = MaxOnesSolution::from_representation(&problem, 0b11).unwrap();
        let visited: BTreeSet<String> =
            ["0", "1", "10"].into_iter().map(String::from).collect();

        // Both one-flip candidates (01 and 10) are remembered.
        assert!(!shaker.shake(1, &problem, &mut solution, &visited, &mut context, &mut rng));
        assert_eq!(*solution.representation(), 0b11);
        assert!(solution.quality().is_none());
        assert!(context.distance_cache.statistics().hit_count > 0);
    }

    #[test]
    fn test_zero_tries_always_fails() {
        let problem = MaxOnesProblem::new(5).unwrap();
        let shaker = RandomMoveShaking::new(0);
        let mut rng = StdRng::seed_from_u64(1);
        let mut solution = MaxOnesSolution::new();
        assert!(!shaker.shake(1, &problem, &mut solution, &BTreeSet::new(), &mut context(), &mut rng));
    }

    #[test]
    fn test_same_seed_same_candidate() {
        let problem = MaxOnesProblem::new(16).unwrap();
        let shaker = RandomMoveShaking::default();
        let mut a = MaxOnesSolution::new();
        let mut b = MaxOnesSolution::new();
        shaker.shake(3, &problem, &mut a, &BTreeSet::new(), &mut context(), &mut StdRng::seed_from_u64(9));
        shaker.shake(3, &problem, &mut b, &BTreeSet::new(), &mut context(), &mut StdRng::seed_from_u64(9));
        assert_eq!(a.representation(), b.representation());
    }
}
