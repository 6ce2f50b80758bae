//! Error types for the `longview-markov` crate.
//!
//! Every failure here is a violated caller precondition (weights that do
//! not sum to something positive, trajectories of unequal length). They
//! are reported eagerly rather than surfacing later as `NaN` mass.

/// Errors that can occur while normalizing, mixing, or extrapolating.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MarkovError {
    /// An operation that needs at least one input received none.
    #[error("no inputs supplied")]
    EmptyInput,

    /// The weights sum to zero, so they cannot be normalized.
    #[error("total weight is zero")]
    ZeroTotalWeight,

    /// A weight (or the running total) was negative, infinite, or `NaN`.
    #[error("invalid weight {weight}: weights must be finite and non-negative")]
    InvalidWeight {
        /// The offending weight.
        weight: f64,
    },

    /// A trajectory passed to the mixer has a different length than the first.
    #[error("trajectory {index} has {found} steps, expected {expected}")]
    LengthMismatch {
        /// Position of the offending trajectory in the input list.
        index: usize,
        /// Length of the first trajectory.
        expected: usize,
        /// Length of the offending trajectory.
        found: usize,
    },
}
