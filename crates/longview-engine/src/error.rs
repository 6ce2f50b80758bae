//! Error types for the forecast binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes between loading the config and printing the report.

use longview_core::config::ConfigError;
use longview_core::error::CoreError;

/// Top-level error for the forecast binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// A scenario run failed.
    #[error("scenario error: {source}")]
    Scenario {
        /// The underlying scenario error.
        #[from]
        source: CoreError,
    },

    /// The report could not be rendered as JSON.
    #[error("report error: {source}")]
    Report {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}
