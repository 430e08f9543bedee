//! Caches that avoid redundant quality and distance computation.
//!
//! Both caches are plain values owned by whoever runs the search (the
//! optimizer keeps them in its [`SolutionContext`](crate::solution::SolutionContext)).
//! Each has an explicit enable flag, a capacity (0 = unbounded, oldest
//! entry evicted first otherwise) and [`CacheStatistics`].
//!
//! Neither cache is meant for concurrent mutation; callers that evaluate
//! in parallel must serialize writes.

mod distance;
mod evaluation;
mod statistics;
mod store;

pub use distance::DistanceCache;
pub use evaluation::EvaluationCache;
pub use statistics::CacheStatistics;
