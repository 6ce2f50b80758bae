//! Error types for the `longview-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`]. Every
//! variant is raised while building models or ensembles; once a
//! [`CombinedTransition`](crate::CombinedTransition) exists, evaluating it
//! cannot fail.

use std::fmt;

use longview_markov::MarkovError;

/// The three independent sub-model families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Family {
    /// Artificial general intelligence emergence.
    Agi,
    /// Nuclear war.
    Nuke,
    /// Pandemics.
    Plague,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Agi => "agi",
            Self::Nuke => "nuke",
            Self::Plague => "plague",
        };
        f.write_str(label)
    }
}

/// Errors that can occur while building world models.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorldError {
    /// Weight normalization or mixing failed.
    #[error("markov error: {source}")]
    Markov {
        /// The underlying engine error.
        #[from]
        source: MarkovError,
    },

    /// A sub-model family has no models at all.
    #[error("the {family} family has no models")]
    EmptyFamily {
        /// The empty family.
        family: Family,
    },

    /// The acceleration multiplier is negative or not finite.
    #[error("invalid acceleration factor {factor}: must be finite and non-negative")]
    InvalidAcceleration {
        /// The rejected multiplier.
        factor: f64,
    },

    /// A sub-model's parameters are out of range.
    #[error("invalid {family} model '{name}': {reason}")]
    InvalidModel {
        /// Family the model belongs to.
        family: Family,
        /// The model's name.
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// An odds record cannot be normalized.
    #[error("invalid odds (heaven {heaven}, dead {dead}, reset {reset}): {reason}")]
    InvalidOdds {
        /// Heaven weight.
        heaven: f64,
        /// Dead weight.
        dead: f64,
        /// Reset weight.
        reset: f64,
        /// What is wrong with the record.
        reason: String,
    },

    /// The hazard caps could together exceed certainty in a single year.
    #[error("hazard caps sum to {total}, which exceeds 1")]
    HazardBudgetExceeded {
        /// Sum of the three family caps.
        total: f64,
    },

    /// A string could not be parsed as an outcome.
    #[error("unrecognized outcome '{value}': expected a year, dead, heaven, or reset")]
    InvalidOutcome {
        /// The rejected input.
        value: String,
    },
}
