//! Single-step local search over the indexed move neighborhood.
//!
//! # Policies
//!
//! - **Best improvement**: scan every move, apply the strictly best one.
//! - **First improvement**: scan moves in index order, apply the first
//!   strictly improving one.
//!
//! Scans compute quality directly (no cache). The chosen move is then
//! re-evaluated through the evaluation cache; if the recomputed fitness
//! differs from the scanned one, the step fails with
//! [`VnsError::InconsistentFitness`].

use super::context::SolutionContext;
use super::quality::{is_better_fitness, QualityOfSolution};
use super::types::{Problem, Solution};
use crate::error::{Result, VnsError};

/// Move selection policy used by a local search run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LocalSearchType {
    /// Apply the first improving move found.
    #[default]
    FirstImprovement,
    /// Apply the best improving move of a full scan.
    BestImprovement,
}

/// Outcome of a local search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalSearchOutcome {
    /// Number of improving moves applied.
    pub steps: usize,
    /// `true` if the run ended at a local optimum, `false` if `stop` interrupted it.
    pub reached_local_optimum: bool,
}

/// Applies the strictly best improving move of the neighborhood.
pub fn best_improvement_step<S: Solution>(
    solution: &mut S,
    problem: &S::Problem,
    context: &mut SolutionContext<S::Code>,
) -> Result<bool> {
    let current = current_quality(solution, problem, context);
    let is_minimization = problem.is_minimization();

    let mut best_move = None;
    let mut best_fitness = current.fitness;
    for (index, fitness) in scan_neighbors(solution, problem, context) {
        if is_better_fitness(fitness, best_fitness, is_minimization) {
            best_move = Some(index);
            best_fitness = fitness;
        }
    }

    match best_move {
        Some(index) => {
            commit_move(solution, problem, context, index, best_fitness)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Applies the first strictly improving move in index order.
pub fn first_improvement_step<S: Solution>(
    solution: &mut S,
    problem: &S::Problem,
    context: &mut SolutionContext<S::Code>,
) -> Result<bool> {
    let current = current_quality(solution, problem, context);
    let is_minimization = problem.is_minimization();

    for index in 0..solution.move_count(problem) {
        solution.apply_move(problem, index);
        let fitness = context
            .evaluate_directly(problem, solution.representation())
            .fitness;
        solution.apply_move(problem, index);

        if is_better_fitness(fitness, current.fitness, is_minimization) {
            commit_move(solution, problem, context, index, fitness)?;
            return Ok(true);
        }
    }
    Ok(false)
}

/// Repeats the chosen step until no move improves or `stop` returns `true`.
///
/// `stop` is checked before every step.
pub fn run<S, F>(
    kind: LocalSearchType,
    problem: &S::Problem,
    solution: &mut S,
    context: &mut SolutionContext<S::Code>,
    mut stop: F,
) -> Result<LocalSearchOutcome>
where
    S: Solution,
    F: FnMut(&SolutionContext<S::Code>) -> bool,
{
    let mut steps = 0;
    loop {
        if stop(context) {
            return Ok(LocalSearchOutcome {
                steps,
                reached_local_optimum: false,
            });
        }
        let improved = match kind {
            LocalSearchType::FirstImprovement => solution.first_improvement_step(problem, context)?,
            LocalSearchType::BestImprovement => solution.best_improvement_step(problem, context)?,
        };
        if !improved {
            return Ok(LocalSearchOutcome {
                steps,
                reached_local_optimum: true,
            });
        }
        steps += 1;
    }
}

fn current_quality<S: Solution>(
    solution: &mut S,
    problem: &S::Problem,
    context: &mut SolutionContext<S::Code>,
) -> QualityOfSolution {
    match solution.quality() {
        Some(quality) => quality,
        None => solution.evaluate(problem, context),
    }
}

fn commit_move<S: Solution>(
    solution: &mut S,
    problem: &S::Problem,
    context: &mut SolutionContext<S::Code>,
    index: usize,
    predicted: f64,
) -> Result<()> {
    solution.apply_move(problem, index);
    let recomputed = solution.evaluate(problem, context).fitness;
    if recomputed != predicted {
        return Err(VnsError::InconsistentFitness {
            predicted,
            recomputed,
        });
    }
    Ok(())
}

/// Fitness of every neighbor, in move index order.
#[cfg(not(feature = "parallel"))]
fn scan_neighbors<S: Solution>(
    solution: &mut S,
    problem: &S::Problem,
    context: &mut SolutionContext<S::Code>,
) -> Vec<(usize, f64)> {
    let n = solution.move_count(problem);
    let mut scored = Vec::with_capacity(n);
    for index in 0..n {
        solution.apply_move(problem, index);
        let fitness = context
            .evaluate_directly(problem, solution.representation())
            .fitness;
        solution.apply_move(problem, index);
        scored.push((index, fitness));
    }
    scored
}

/// Fitness of every neighbor, in move index order, evaluated with rayon.
///
/// Only the pure quality function runs in parallel; the evaluation
/// counter is updated once afterwards.
#[cfg(feature = "parallel")]
fn scan_neighbors<S: Solution>(
    solution: &mut S,
    problem: &S::Problem,
    context: &mut SolutionContext<S::Code>,
) -> Vec<(usize, f64)> {
    use rayon::prelude::*;

    let n = solution.move_count(problem);
    let base: &S = solution;
    let scored: Vec<(usize, f64)> = (0..n)
        .into_par_iter()
        .map(|index| {
            let mut neighbor = base.clone();
            neighbor.apply_move(problem, index);
            (index, problem.quality(neighbor.representation()).fitness)
        })
        .collect();
    context.record_evaluations(n as u64);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{DistanceCache, EvaluationCache};
    use rand::Rng;

    // ---- Minimization over Vec<bool>: fewest set bits wins ----

    struct MinOnes {
        dim: usize,
    }

    impl Problem for MinOnes {
        type Representation = Vec<bool>;

        fn dimension(&self) -> usize {
            self.dim
        }

        fn is_minimization(&self) -> bool {
            true
        }

        fn quality(&self, bits: &Vec<bool>) -> QualityOfSolution {
            let ones = bits.iter().filter(|&&b| b).count() as f64;
            QualityOfSolution::new(ones, ones, true)
        }
    }

    #[derive(Clone, Debug)]
    struct BoolSolution {
        bits: Vec<bool>,
        quality: Option<QualityOfSolution>,
    }

    impl BoolSolution {
        fn from_bits(bits: &[bool]) -> Self {
            Self {
                bits: bits.to_vec(),
                quality: None,
            }
        }
    }

    impl Solution for BoolSolution {
        type Representation = Vec<bool>;
        type Code = Vec<u8>;
        type Problem = MinOnes;

        fn representation(&self) -> &Vec<bool> {
            &self.bits
        }

        fn set_representation(&mut self, bits: Vec<bool>) {
            self.bits = bits;
            self.quality = None;
        }

        fn quality(&self) -> Option<QualityOfSolution> {
            self.quality
        }

        fn set_quality(&mut self, quality: QualityOfSolution) {
            self.quality = Some(quality);
        }

        fn random_init<R: Rng>(&mut self, problem: &MinOnes, rng: &mut R) {
            self.set_representation((0..problem.dim).map(|_| rng.random_bool(0.5)).collect());
        }

        fn encode(bits: &Vec<bool>) -> Vec<u8> {
            bits.iter().map(|&b| b as u8).collect()
        }

        fn decode(code: &Vec<u8>) -> Result<Vec<bool>> {
            Ok(code.iter().map(|&b| b != 0).collect())
        }

        fn code_distance(a: &Vec<u8>, b: &Vec<u8>) -> f64 {
            a.iter().zip(b).filter(|(x, y)| x != y).count() as f64
        }

        fn move_count(&self, _problem: &MinOnes) -> usize {
            self.bits.len()
        }

        fn apply_move(&mut self, _problem: &MinOnes, index: usize) {
            self.bits[index] = !self.bits[index];
        }
    }

    // ---- A problem whose fitness changes between calls ----

    struct Drifting {
        calls: std::sync::atomic::AtomicUsize,
    }

    impl Problem for Drifting {
        type Representation = Vec<bool>;

        fn dimension(&self) -> usize {
            3
        }

        fn is_minimization(&self) -> bool {
            false
        }

        fn quality(&self, bits: &Vec<bool>) -> QualityOfSolution {
            let n = self
                .calls
                .fetch_add(1, std::sync::atomic::Ordering::Relaxed) as f64;
            let ones = bits.iter().filter(|&&b| b).count() as f64;
            QualityOfSolution::new(ones, ones + n, true)
        }
    }

    #[derive(Clone, Debug)]
    struct DriftSolution(BoolSolution);

    impl Solution for DriftSolution {
        type Representation = Vec<bool>;
        type Code = Vec<u8>;
        type Problem = Drifting;

        fn representation(&self) -> &Vec<bool> {
            &self.0.bits
        }
        fn set_representation(&mut self, bits: Vec<bool>) {
            self.0.set_representation(bits);
        }
        fn quality(&self) -> Option<QualityOfSolution> {
            self.0.quality
        }
        fn set_quality(&mut self, quality: QualityOfSolution) {
            self.0.quality = Some(quality);
        }
        fn random_init<R: Rng>(&mut self, _problem: &Drifting, _rng: &mut R) {}
        fn encode(bits: &Vec<bool>) -> Vec<u8> {
            BoolSolution::encode(bits)
        }
        fn decode(code: &Vec<u8>) -> Result<Vec<bool>> {
            BoolSolution::decode(code)
        }
        fn code_distance(a: &Vec<u8>, b: &Vec<u8>) -> f64 {
            BoolSolution::code_distance(a, b)
        }
        fn move_count(&self, _problem: &Drifting) -> usize {
            self.0.bits.len()
        }
        fn apply_move(&mut self, _problem: &Drifting, index: usize) {
            self.0.bits[index] = !self.0.bits[index];
        }
    }

    fn caching_context() -> SolutionContext<Vec<u8>> {
        SolutionContext::new(EvaluationCache::new(true, 0), DistanceCache::new(true, 0))
    }

    #[test]
    fn test_best_improvement_minimizes() {
        let problem = MinOnes { dim: 4 };
        let mut solution = BoolSolution::from_bits(&[true, true, false, true]);
        let mut context = caching_context();

        let outcome = run(
            LocalSearchType::BestImprovement,
            &problem,
            &mut solution,
            &mut context,
            |_| false,
        )
        .unwrap();

        assert!(outcome.reached_local_optimum);
        assert_eq!(outcome.steps, 3);
        assert_eq!(solution.bits, vec![false; 4]);
        assert_eq!(solution.fitness(), Some(0.0));
    }

    #[test]
    fn test_first_improvement_takes_lowest_index() {
        let problem = MinOnes { dim: 4 };
        let mut solution = BoolSolution::from_bits(&[false, true, false, true]);
        let mut context = SolutionContext::default();

        assert!(solution.first_improvement_step(&problem, &mut context).unwrap());
        assert_eq!(solution.bits, vec![false, false, false, true]);
        assert_eq!(solution.fitness(), Some(1.0));
    }

    #[test]
    fn test_no_improvement_at_optimum() {
        let problem = MinOnes { dim: 3 };
        let mut solution = BoolSolution::from_bits(&[false, false, false]);
        let mut context = SolutionContext::default();

        assert!(!solution.best_improvement_step(&problem, &mut context).unwrap());
        assert!(!solution.first_improvement_step(&problem, &mut context).unwrap());
        assert_eq!(solution.bits, vec![false, false, false]);
    }

    #[test]
    fn test_step_counts_evaluations() {
        let problem = MinOnes { dim: 5 };
        let mut solution = BoolSolution::from_bits(&[true; 5]);
        let mut context = SolutionContext::default();

        solution.best_improvement_step(&problem, &mut context).unwrap();
        // initial evaluate + 5 scanned neighbors + re-evaluation of the chosen move
        assert_eq!(context.evaluations(), 7);
    }

    #[test]
    fn test_stop_interrupts_run() {
        let problem = MinOnes { dim: 6 };
        let mut solution = BoolSolution::from_bits(&[true; 6]);
        let mut context = SolutionContext::default();

        let outcome = run(
            LocalSearchType::FirstImprovement,
            &problem,
            &mut solution,
            &mut context,
            |ctx| ctx.evaluations() >= 5,
        )
        .unwrap();

        assert!(!outcome.reached_local_optimum);
        assert!(outcome.steps > 0);
        assert!(solution.fitness().unwrap() < 6.0);
    }

    #[test]
    fn test_stale_cache_is_fatal() {
        let problem = MinOnes { dim: 2 };
        let mut solution = BoolSolution::from_bits(&[true, true]);
        let mut context = caching_context();

        // Poison the entry the first improving move will look up.
        context.evaluation_cache.get_or_compute(&vec![0, 1], || {
            QualityOfSolution::new(9.0, 9.0, true)
        });

        let err = solution
            .first_improvement_step(&problem, &mut context)
            .unwrap_err();
        assert_eq!(
            err,
            VnsError::InconsistentFitness {
                predicted: 1.0,
                recomputed: 9.0
            }
        );
    }

    #[test]
    fn test_non_deterministic_quality_is_fatal() {
        let problem = Drifting {
            calls: std::sync::atomic::AtomicUsize::new(0),
        };
        let mut solution = DriftSolution(BoolSolution::from_bits(&[false, false, false]));
        let mut context = SolutionContext::default();

        let result = solution.best_improvement_step(&problem, &mut context);
        assert!(matches!(
            result,
            Err(VnsError::InconsistentFitness { .. })
        ));
    }
}
