//! Reference problems.
//!
//! Small, fully specified problems used by the tests, the benchmark and
//! the demo. They also show how to implement [`Problem`](crate::solution::Problem)
//! and [`Solution`](crate::solution::Solution) for a new domain.

pub mod max_ones;
