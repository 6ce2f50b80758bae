//! Scenario runs and the baseline versus accelerated comparison.
//!
//! A run extrapolates the mixed ensemble forecast from the start year to
//! the horizon. Trajectory index `i` is calendar year `start_year + i`;
//! the helpers here do that mapping so callers think in years.

use longview_markov::{Distribution, Trajectory, extrapolate_and_mix};
use longview_world::{Effort, Outcome, build_effort_ensemble};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::LongviewConfig;
use crate::error::CoreError;

/// Probability mass of one year, split by state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearSnapshot {
    /// Calendar year.
    pub year: i32,
    /// Mass still in an ordinary year.
    pub ongoing: f64,
    /// Mass that has ended dead.
    pub dead: f64,
    /// Mass that has ended in heaven.
    pub heaven: f64,
    /// Mass that has ended in a reset.
    pub reset: f64,
}

impl YearSnapshot {
    /// Summarize a distribution for `year`.
    pub fn from_distribution(year: i32, dist: &Distribution<Outcome>) -> Self {
        let ongoing = dist
            .iter()
            .filter(|(outcome, _)| !outcome.is_absorbing())
            .map(|(_, mass)| mass)
            .sum();
        Self {
            year,
            ongoing,
            dead: dist.probability(&Outcome::Dead),
            heaven: dist.probability(&Outcome::Heaven),
            reset: dist.probability(&Outcome::Reset),
        }
    }
}

/// One forecast: an effort level and its mixed trajectory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioRun {
    /// Whether hazards were accelerated.
    pub effort: Effort,
    /// Calendar year of trajectory index 0.
    pub start_year: i32,
    /// The mixed forecast, one distribution per year.
    pub trajectory: Trajectory<Outcome>,
}

impl ScenarioRun {
    /// Probability of `outcome` in calendar `year`; 0 outside the run.
    pub fn probability(&self, year: i32, outcome: Outcome) -> f64 {
        year.checked_sub(self.start_year)
            .and_then(|offset| usize::try_from(offset).ok())
            .map_or(0.0, |index| self.trajectory.probability_at(index, &outcome))
    }

    /// Calendar year of trajectory index `index`.
    pub fn year_at(&self, index: usize) -> i32 {
        let offset = i32::try_from(index).unwrap_or(i32::MAX);
        self.start_year.saturating_add(offset)
    }

    /// Summary of trajectory index `index`, if the run is that long.
    pub fn snapshot(&self, index: usize) -> Option<YearSnapshot> {
        self.trajectory
            .get(index)
            .map(|dist| YearSnapshot::from_distribution(self.year_at(index), dist))
    }

    /// Summary of the last year of the run.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Empty`] if the run has no distributions.
    pub fn final_snapshot(&self) -> Result<YearSnapshot, CoreError> {
        self.trajectory
            .len()
            .checked_sub(1)
            .and_then(|last| self.snapshot(last))
            .ok_or_else(|| CoreError::Empty {
                effort: self.effort.label(),
            })
    }
}

/// One report line: both runs at the same year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReportRow {
    /// Calendar year.
    pub year: i32,
    /// The run without extra effort.
    pub baseline: YearSnapshot,
    /// The run with every hazard accelerated.
    pub accelerated: YearSnapshot,
}

impl ReportRow {
    /// Accelerated minus baseline for each fate.
    pub const fn delta(&self) -> FateDelta {
        FateDelta {
            year: self.year,
            dead: self.accelerated.dead - self.baseline.dead,
            heaven: self.accelerated.heaven - self.baseline.heaven,
            reset: self.accelerated.reset - self.baseline.reset,
        }
    }
}

/// Accelerated minus baseline mass per fate in one year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FateDelta {
    /// Calendar year.
    pub year: i32,
    /// Change in dead mass.
    pub dead: f64,
    /// Change in heaven mass.
    pub heaven: f64,
    /// Change in reset mass.
    pub reset: f64,
}

/// The two runs side by side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    /// Hazard multiplier of the accelerated run.
    pub acceleration_factor: f64,
    /// Report rows every `report_interval_years`, plus the final year.
    pub rows: Vec<ReportRow>,
    /// Change in each fate at the final year.
    pub headline: FateDelta,
    /// The run without extra effort.
    #[serde(skip)]
    pub baseline: ScenarioRun,
    /// The run with every hazard accelerated.
    #[serde(skip)]
    pub accelerated: ScenarioRun,
}

impl Comparison {
    /// Largest mass drift of either run.
    pub fn max_mass_drift(&self) -> f64 {
        self.baseline
            .trajectory
            .max_mass_drift()
            .max(self.accelerated.trajectory.max_mass_drift())
    }
}

/// Forecast the configured scenario at one effort level.
///
/// # Errors
///
/// Returns [`CoreError::Config`] for an invalid configuration,
/// [`CoreError::World`] if the ensemble cannot be built, and
/// [`CoreError::Markov`] if mixing fails.
pub fn run_scenario(config: &LongviewConfig, effort: Effort) -> Result<ScenarioRun, CoreError> {
    config.validate()?;
    let scenario = &config.scenario;

    let ensemble = build_effort_ensemble(&config.models, effort, scenario.acceleration_factor)?;
    let steps = scenario.steps();
    debug!(
        effort = effort.label(),
        members = ensemble.len(),
        steps,
        "Running scenario"
    );

    let trajectory = extrapolate_and_mix(Outcome::Year(scenario.start_year), &ensemble, steps)?;
    info!(
        effort = effort.label(),
        start_year = scenario.start_year,
        steps = trajectory.len(),
        mass_drift = trajectory.max_mass_drift(),
        "Scenario complete"
    );

    Ok(ScenarioRun {
        effort,
        start_year: scenario.start_year,
        trajectory,
    })
}

/// Run the baseline and accelerated scenarios and line them up.
///
/// # Errors
///
/// As [`run_scenario`], plus [`CoreError::Empty`] if a run has no final
/// year.
pub fn compare(config: &LongviewConfig) -> Result<Comparison, CoreError> {
    let baseline = run_scenario(config, Effort::Baseline)?;
    let accelerated = run_scenario(config, Effort::Accelerated)?;

    let baseline_final = baseline.final_snapshot()?;
    let final_row = ReportRow {
        year: baseline_final.year,
        baseline: baseline_final,
        accelerated: accelerated.final_snapshot()?,
    };
    let headline = final_row.delta();

    let interval = usize::try_from(config.scenario.report_interval_years).unwrap_or(usize::MAX);
    let mut rows: Vec<ReportRow> = (0..baseline.trajectory.len())
        .step_by(interval.max(1))
        .filter_map(|index| {
            Some(ReportRow {
                year: baseline.year_at(index),
                baseline: baseline.snapshot(index)?,
                accelerated: accelerated.snapshot(index)?,
            })
        })
        .collect();
    if rows.last().is_none_or(|row| row.year != final_row.year) {
        rows.push(final_row);
    }

    info!(
        year = headline.year,
        dead = headline.dead,
        heaven = headline.heaven,
        reset = headline.reset,
        "Acceleration delta"
    );

    Ok(Comparison {
        acceleration_factor: config.scenario.acceleration_factor,
        rows,
        headline,
        baseline,
        accelerated,
    })
}
