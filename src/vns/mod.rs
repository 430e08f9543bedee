//! Variable Neighborhood Search (VNS).
//!
//! A single-solution metaheuristic that systematically changes
//! neighborhood size during the search. At each step, a random
//! perturbation (shaking) of size k is followed by local search. If the
//! resulting local optimum improves on the current solution, the search
//! resets to the smallest neighborhood; otherwise it moves to the next
//! (larger) one.
//!
//! Shaking also diversifies: a shaken candidate must lie farther than k
//! from every remembered solution code (see
//! [`VnsConfig::keep_all_solution_codes`]).
//!
//! # References
//!
//! - Mladenović, N. & Hansen, P. (1997). "Variable neighborhood search",
//!   *Computers & Operations Research* 24(11), 1097-1100.
//! - Hansen, P. & Mladenović, N. (2001). "Variable neighborhood search:
//!   Principles and applications", *European Journal of Operational
//!   Research* 130(3), 449-467.

mod config;
mod runner;
mod shaking;
mod types;

pub use crate::solution::LocalSearchType;
pub use config::{CacheConfig, VnsConfig};
pub use runner::{IterationOutcome, OptimizerState, VnsOptimizer, VnsResult};
pub use shaking::{RandomMoveShaking, DEFAULT_MAX_TRIES};
pub use types::VnsSupport;
