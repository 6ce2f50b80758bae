//! Forecast binary for Longview.
//!
//! Runs the mixed ensemble forecast twice, once as the models state it
//! and once with every hazard accelerated, and reports how the fates
//! shift.
//!
//! # Sequence
//!
//! 1. Load configuration from `longview-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Run the baseline and accelerated scenarios
//! 4. Log the report rows and the headline delta
//! 5. Print the comparison as JSON on stdout

mod error;

use std::path::Path;

use longview_core::config::LongviewConfig;
use longview_core::scenario::{self, Comparison};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Config file read from the working directory.
const CONFIG_PATH: &str = "longview-config.yaml";

/// Largest tolerated deviation of a distribution's total mass from 1.
const MASS_DRIFT_TOLERANCE: f64 = 1e-9;

/// Application entry point for the forecast.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or a scenario fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let (config, from_file) = load_config()?;

    // 2. Initialize structured logging. `RUST_LOG` wins over the config.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("longview-engine starting");
    info!(
        from_file,
        start_year = config.scenario.start_year,
        horizon_years = config.scenario.horizon_years,
        acceleration_factor = config.scenario.acceleration_factor,
        ensemble_size = config.models.ensemble_size(),
        "Configuration loaded"
    );

    // 3. Run both scenarios.
    let comparison = scenario::compare(&config).map_err(EngineError::from)?;

    // 4. Report.
    log_report(&comparison);

    // 5. Emit the comparison.
    let json = serde_json::to_string_pretty(&comparison).map_err(EngineError::from)?;
    println!("{json}");

    info!("longview-engine finished");
    Ok(())
}

/// Load configuration from `longview-config.yaml`, falling back to defaults.
///
/// The flag is `true` when the file was found.
fn load_config() -> Result<(LongviewConfig, bool), EngineError> {
    let config_path = Path::new(CONFIG_PATH);
    if config_path.exists() {
        let config = LongviewConfig::from_file(config_path)?;
        Ok((config, true))
    } else {
        let mut config = LongviewConfig::default();
        config.scenario.apply_env_overrides();
        Ok((config, false))
    }
}

/// Log one line per report row, the headline, and any mass drift.
fn log_report(comparison: &Comparison) {
    for row in &comparison.rows {
        let delta = row.delta();
        info!(
            year = row.year,
            baseline_dead = row.baseline.dead,
            accelerated_dead = row.accelerated.dead,
            baseline_heaven = row.baseline.heaven,
            accelerated_heaven = row.accelerated.heaven,
            dead_delta = delta.dead,
            "Report row"
        );
    }

    let headline = &comparison.headline;
    info!(
        year = headline.year,
        acceleration_factor = comparison.acceleration_factor,
        dead_delta = headline.dead,
        heaven_delta = headline.heaven,
        reset_delta = headline.reset,
        "Headline"
    );

    let drift = comparison.max_mass_drift();
    if drift > MASS_DRIFT_TOLERANCE {
        warn!(
            drift,
            tolerance = MASS_DRIFT_TOLERANCE,
            "Probability mass drifted from 1"
        );
    }
}
