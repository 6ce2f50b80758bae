//! Discrete-time Markov chain propagation and model mixing for the
//! Longview forecast.
//!
//! This crate is generic over the outcome type. It knows nothing about
//! years or extinction; the domain state space lives in `longview-world`.
//!
//! # Modules
//!
//! - [`distribution`] -- [`Distribution`], an ordered map from outcome to
//!   probability mass, and [`Trajectory`], one distribution per step.
//! - [`chain`] -- The [`Transition`] kernel trait, single-step propagation
//!   and multi-step extrapolation.
//! - [`mix`] -- Weighted pooling of distributions and of whole trajectories,
//!   and the ensemble entry point [`extrapolate_and_mix`].
//! - [`ensemble`] -- [`Ensemble`], a normalized weighted set of kernels.
//! - [`odds`] -- Turning unnormalized weights into probabilities.
//! - [`error`] -- Error types for weight and length preconditions.
//!
//! [`Transition`]: chain::Transition
//! [`extrapolate_and_mix`]: mix::extrapolate_and_mix

pub mod chain;
pub mod distribution;
pub mod ensemble;
pub mod error;
pub mod mix;
pub mod odds;

// Re-export primary types at crate root.
pub use chain::{Transition, extrapolate, step};
pub use distribution::{Distribution, Trajectory};
pub use ensemble::{Ensemble, Weighted};
pub use error::MarkovError;
pub use mix::{extrapolate_and_mix, mix, mix_histories};
pub use odds::{normalize, probability_from_odds};
