//! Error types for the VNS engine.

use thiserror::Error;

/// Result type alias for fallible engine operations.
pub type Result<T> = std::result::Result<T, VnsError>;

/// Errors reported by problems, solutions and the optimizer.
///
/// Shake exhaustion is not an error: it is reported as a failed
/// iteration and absorbed by the main loop.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VnsError {
    /// Problem dimension is zero or exceeds what the representation can hold.
    #[error("invalid problem dimension {dimension}: must be in 1..={max}")]
    InvalidDimension {
        /// Requested dimension.
        dimension: usize,
        /// Largest dimension the representation supports.
        max: usize,
    },

    /// Optimizer configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A manually supplied representation does not fit the problem.
    #[error("invalid representation: {0}")]
    InvalidRepresentation(String),

    /// A solution code could not be decoded into a representation.
    #[error("invalid solution code: {0}")]
    InvalidCode(String),

    /// The fitness recomputed after applying a move differs from the
    /// fitness observed while scanning for it.
    ///
    /// Signals a non-deterministic quality function or a stale cache entry.
    #[error("fitness after applying move is {recomputed}, but the scan predicted {predicted}")]
    InconsistentFitness {
        /// Fitness observed during the neighbor scan.
        predicted: f64,
        /// Fitness computed after the move was applied.
        recomputed: f64,
    },
}
