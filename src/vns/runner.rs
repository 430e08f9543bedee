//! Variable Neighborhood Search execution engine.
//!
//! # Algorithm (Basic VNS)
//!
//! 1. Evaluate the initial solution x, set k = k_min
//! 2. While no termination limit is reached:
//!    a. **Shaking**: draw x' in N_k(x), far enough from remembered codes
//!    b. **Local search**: improve x' to a local optimum x''
//!    c. **Move or not**: if f(x'') is better than f(x), set x = x'' and
//!    k = k_min; otherwise k = k + 1, wrapping to k_min after k_max
//!    d. Record x as best if it beats the best so far
//! 3. Return the best solution found
//!
//! A failed shake (no diverse candidate within the retry bound) counts
//! as an iteration and advances k. When every neighborhood size fails in
//! a row, the search is exhausted and stops.
//!
//! # Reference
//!
//! Mladenović, N. & Hansen, P. (1997). "Variable neighborhood search",
//! *Computers & Operations Research* 24(11), 1097-1100.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::config::VnsConfig;
use super::types::VnsSupport;
use crate::cache::CacheStatistics;
use crate::error::Result;
use crate::solution::{Problem, QualityOfSolution, Solution, SolutionContext};

/// Lifecycle of an optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizerState {
    Initialized,
    Running,
    Terminated,
}

/// What one iteration did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationOutcome {
    /// The local optimum replaced the current solution.
    Improved,
    /// The local optimum was not better; k advanced.
    NotImproved,
    /// No sufficiently diverse candidate was found; k advanced.
    ShakeFailed,
}

/// Result of a VNS run.
#[derive(Debug, Clone)]
pub struct VnsResult<S: Clone> {
    /// Best solution found.
    pub best: S,
    /// Quality of the best solution.
    pub best_quality: QualityOfSolution,
    /// Total iterations executed, failed shakes included.
    pub iterations: usize,
    /// Total evaluations, initial evaluation included.
    pub evaluations: u64,
    /// Number of local optima reached.
    pub local_optima: usize,
    /// Wall-clock time spent in [`VnsOptimizer::optimize`].
    pub elapsed: Duration,
    /// Whether the run stopped because every neighborhood size failed to shake.
    pub exhausted: bool,
    /// `(iteration, best fitness)` at the start and after every new best.
    pub fitness_history: Vec<(usize, f64)>,
    /// Evaluation cache statistics at the end of the run.
    pub evaluation_cache: CacheStatistics,
    /// Distance cache statistics at the end of the run.
    pub distance_cache: CacheStatistics,
}

/// Limits checked between iterations and between local search steps.
#[derive(Debug, Clone, Copy)]
struct Limits {
    evaluations_max: u64,
    seconds_max: f64,
    started: Instant,
}

impl Limits {
    fn reached(&self, evaluations: u64) -> bool {
        (self.evaluations_max > 0 && evaluations >= self.evaluations_max)
            || (self.seconds_max > 0.0 && self.started.elapsed().as_secs_f64() >= self.seconds_max)
    }
}

/// Variable Neighborhood Search optimizer.
///
/// Owns the current and best solutions (the best is always a separate
/// copy), both caches, the random source and all counters.
///
/// # Examples
///
/// ```
/// use u_vns::problems::max_ones::{MaxOnesProblem, MaxOnesSolution};
/// use u_vns::vns::{RandomMoveShaking, VnsConfig, VnsOptimizer};
///
/// let problem = MaxOnesProblem::new(10).unwrap();
/// let initial = MaxOnesSolution::from_representation(&problem, 0b0000000001).unwrap();
/// let config = VnsConfig::default().with_max_local_optima(5).with_seed(42);
///
/// let mut optimizer =
///     VnsOptimizer::new(&problem, initial, RandomMoveShaking::default(), config).unwrap();
/// let result = optimizer.optimize().unwrap();
/// assert_eq!(result.best_quality.fitness, 10.0);
/// ```
pub struct VnsOptimizer<'a, S: Solution, V: VnsSupport<S>> {
    problem: &'a S::Problem,
    support: V,
    config: VnsConfig,
    context: SolutionContext<S::Code>,
    rng: StdRng,
    current: S,
    current_quality: QualityOfSolution,
    best: S,
    best_quality: QualityOfSolution,
    visited: BTreeSet<S::Code>,
    state: OptimizerState,
    iteration: usize,
    k: usize,
    local_optima_count: usize,
    consecutive_shake_failures: usize,
    exhausted: bool,
    started: Option<Instant>,
    elapsed: Duration,
    fitness_history: Vec<(usize, f64)>,
}

impl<'a, S: Solution, V: VnsSupport<S>> VnsOptimizer<'a, S, V> {
    /// Creates an optimizer from an initial solution.
    ///
    /// The initial solution is evaluated unless it already carries a quality.
    ///
    /// # Errors
    /// [`VnsError::InvalidConfig`](crate::VnsError::InvalidConfig) if the
    /// configuration does not fit the problem's dimension.
    pub fn new(problem: &'a S::Problem, initial: S, support: V, config: VnsConfig) -> Result<Self> {
        config.validate(problem.dimension())?;

        let rng = match config.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::seed_from_u64(rand::random()),
        };
        let mut context = SolutionContext::new(
            config.evaluation_cache.evaluation_cache(),
            config.distance_cache.distance_cache(),
        );

        let mut current = initial;
        let current_quality = match current.quality() {
            Some(quality) => quality,
            None => current.evaluate(problem, &mut context),
        };

        let mut visited = BTreeSet::new();
        if config.keep_all_solution_codes {
            visited.insert(current.code());
        }

        Ok(Self {
            problem,
            support,
            k: config.k_min,
            context,
            rng,
            best: current.clone(),
            best_quality: current_quality,
            current,
            current_quality,
            visited,
            state: OptimizerState::Initialized,
            iteration: 0,
            local_optima_count: 0,
            consecutive_shake_failures: 0,
            exhausted: false,
            started: None,
            elapsed: Duration::ZERO,
            fitness_history: vec![(0, current_quality.fitness)],
            config,
        })
    }

    /// Runs iterations until a termination limit is reached.
    ///
    /// # Errors
    /// Aborts with [`VnsError::InconsistentFitness`](crate::VnsError::InconsistentFitness)
    /// if local search detects a non-deterministic or stale evaluation.
    #[tracing::instrument(level = "debug", name = "VNS", skip(self))]
    pub fn optimize(&mut self) -> Result<VnsResult<S>> {
        if self.state == OptimizerState::Terminated {
            return Ok(self.result());
        }
        let started = self.start();

        while !self.should_terminate() {
            if let Err(e) = self.step() {
                self.elapsed = started.elapsed();
                self.state = OptimizerState::Terminated;
                tracing::error!(iteration = self.iteration, "VNS aborted: {e}");
                return Err(e);
            }
        }

        self.elapsed = started.elapsed();
        self.state = OptimizerState::Terminated;
        tracing::info!(
            iterations = self.iteration,
            evaluations = self.context.evaluations(),
            local_optima = self.local_optima_count,
            exhausted = self.exhausted,
            "VNS finished with best fitness {}",
            self.best_quality.fitness
        );
        Ok(self.result())
    }

    /// Executes one iteration: shake, local search, acceptance.
    pub fn step(&mut self) -> Result<IterationOutcome> {
        let limits = Limits {
            evaluations_max: self.config.evaluations_max,
            seconds_max: self.config.seconds_max,
            started: self.start(),
        };
        let is_minimization = self.problem.is_minimization();
        self.iteration += 1;

        let mut candidate = self.current.clone();
        let shaken = self.support.shake(
            self.k,
            self.problem,
            &mut candidate,
            &self.visited,
            &mut self.context,
            &mut self.rng,
        );
        if !shaken {
            self.consecutive_shake_failures += 1;
            if self.consecutive_shake_failures >= self.config.k_max - self.config.k_min + 1 {
                self.exhausted = true;
            }
            tracing::trace!(iteration = self.iteration, k = self.k, "shake failed");
            self.advance_k();
            return Ok(IterationOutcome::ShakeFailed);
        }
        self.consecutive_shake_failures = 0;
        if self.config.keep_all_solution_codes {
            self.visited.insert(candidate.code());
        }

        let outcome = self.support.local_search(
            self.config.local_search_type,
            self.problem,
            &mut candidate,
            &mut self.context,
            |ctx| limits.reached(ctx.evaluations()),
        )?;
        if outcome.reached_local_optimum {
            self.local_optima_count += 1;
            self.visited.insert(candidate.code());
        }

        let candidate_quality = match candidate.quality() {
            Some(quality) => quality,
            None => candidate.evaluate(self.problem, &mut self.context),
        };

        let result = if candidate_quality.is_better_than(&self.current_quality, is_minimization) {
            self.current = candidate;
            self.current_quality = candidate_quality;
            self.k = self.config.k_min;
            IterationOutcome::Improved
        } else {
            self.advance_k();
            IterationOutcome::NotImproved
        };

        if self
            .current_quality
            .is_better_than(&self.best_quality, is_minimization)
        {
            self.best = self.current.clone();
            self.best_quality = self.current_quality;
            self.fitness_history
                .push((self.iteration, self.best_quality.fitness));
            tracing::debug!(
                iteration = self.iteration,
                evaluations = self.context.evaluations(),
                "new best fitness {}",
                self.best_quality.fitness
            );
        }

        Ok(result)
    }

    /// Whether any configured limit is reached or the neighborhoods are exhausted.
    pub fn should_terminate(&self) -> bool {
        if self.exhausted {
            return true;
        }
        if self.config.max_local_optima > 0 && self.local_optima_count >= self.config.max_local_optima {
            return true;
        }
        let evaluations = self.context.evaluations();
        if self.config.evaluations_max > 0 && evaluations >= self.config.evaluations_max {
            return true;
        }
        self.config.seconds_max > 0.0 && self.elapsed().as_secs_f64() >= self.config.seconds_max
    }

    pub fn state(&self) -> OptimizerState {
        self.state
    }

    pub fn current_solution(&self) -> &S {
        &self.current
    }

    pub fn best_solution(&self) -> &S {
        &self.best
    }

    pub fn best_quality(&self) -> QualityOfSolution {
        self.best_quality
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn evaluation(&self) -> u64 {
        self.context.evaluations()
    }

    /// Current neighborhood size.
    pub fn k(&self) -> usize {
        self.k
    }

    pub fn local_optima_count(&self) -> usize {
        self.local_optima_count
    }

    /// Codes shaking currently diversifies against.
    pub fn visited_codes(&self) -> &BTreeSet<S::Code> {
        &self.visited
    }

    pub fn context(&self) -> &SolutionContext<S::Code> {
        &self.context
    }

    /// Time since the first iteration started, frozen once terminated.
    pub fn elapsed(&self) -> Duration {
        match (self.state, self.started) {
            (OptimizerState::Running, Some(started)) => started.elapsed(),
            _ => self.elapsed,
        }
    }

    /// Snapshot of the run so far.
    pub fn result(&self) -> VnsResult<S> {
        VnsResult {
            best: self.best.clone(),
            best_quality: self.best_quality,
            iterations: self.iteration,
            evaluations: self.context.evaluations(),
            local_optima: self.local_optima_count,
            elapsed: self.elapsed(),
            exhausted: self.exhausted,
            fitness_history: self.fitness_history.clone(),
            evaluation_cache: self.context.evaluation_cache.statistics(),
            distance_cache: self.context.distance_cache.statistics(),
        }
    }

    fn start(&mut self) -> Instant {
        if self.state == OptimizerState::Initialized {
            self.state = OptimizerState::Running;
        }
        *self.started.get_or_insert_with(Instant::now)
    }

    fn advance_k(&mut self) {
        self.k = if self.k >= self.config.k_max {
            self.config.k_min
        } else {
            self.k + 1
        };
    }
}
