//! Problem/solution abstraction and local search.
//!
//! # Core Traits
//!
//! - [`Problem`]: dimension, optimization sense and a pure quality function
//! - [`Solution`]: representation, canonical code, distance and the
//!   single-step local search primitives
//!
//! # Key Types
//!
//! - [`QualityOfSolution`]: (objective, fitness, feasibility) triple
//! - [`SolutionContext`]: caches and evaluation counter of one search run
//! - [`LocalSearchType`]: first- or best-improvement move selection

mod context;
pub mod local_search;
mod quality;
mod types;

pub use context::SolutionContext;
pub use local_search::{LocalSearchOutcome, LocalSearchType};
pub use quality::{is_better_fitness, QualityOfSolution};
pub use types::{Problem, Solution};
