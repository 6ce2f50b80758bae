//! Error types for scenario runs.

use longview_markov::MarkovError;
use longview_world::WorldError;

use crate::config::ConfigError;

/// Errors that can occur while running or comparing scenarios.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The configuration failed validation.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// The model ensemble could not be built.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// Extrapolation or mixing failed.
    #[error("markov error: {source}")]
    Markov {
        /// The underlying engine error.
        #[from]
        source: MarkovError,
    },

    /// A run produced no distributions, so it has no final year.
    #[error("scenario {effort} produced an empty trajectory")]
    Empty {
        /// Label of the effort level that was run.
        effort: &'static str,
    },
}
