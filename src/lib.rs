//! Generic Variable Neighborhood Search engine.
//!
//! The crate separates the search from the problem it optimizes:
//!
//! - **Solution layer** ([`solution`]): the [`Problem`](solution::Problem)
//!   and [`Solution`](solution::Solution) contracts, the
//!   [`QualityOfSolution`](solution::QualityOfSolution) triple and the
//!   first-/best-improvement local search steps.
//! - **Caches** ([`cache`]): optional memoization of quality by solution
//!   code and of distance by unordered code pair, with hit statistics.
//! - **VNS** ([`vns`]): configuration, shaking with diversification
//!   against remembered solution codes, and the optimizer loop with its
//!   evaluation, time and local-optima limits.
//! - **Problems** ([`problems`]): reference problems such as MaxOnes.
//!
//! # Example
//!
//! ```
//! use u_vns::problems::max_ones::{MaxOnesProblem, MaxOnesSolution};
//! use u_vns::vns::{RandomMoveShaking, VnsConfig, VnsOptimizer};
//!
//! let problem = MaxOnesProblem::new(12)?;
//! let config = VnsConfig::default().with_seed(42).with_seconds_max(5.0);
//! let mut optimizer = VnsOptimizer::new(
//!     &problem,
//!     MaxOnesSolution::new(),
//!     RandomMoveShaking::default(),
//!     config,
//! )?;
//! let result = optimizer.optimize()?;
//! assert_eq!(result.best_quality.fitness, 12.0);
//! # Ok::<(), u_vns::VnsError>(())
//! ```
//!
//! Run-level events are emitted through [`tracing`]; install a subscriber
//! to see them.

pub mod cache;
pub mod error;
pub mod problems;
pub mod solution;
pub mod vns;

pub use error::{Result, VnsError};
