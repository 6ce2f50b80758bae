//! Catastrophe sub-models.
//!
//! Each family answers the same question for a given year: how likely is
//! the event, and if it happens, how does it split across fates? The
//! [`SubModel`] trait is that question; [`AgiModel`] and
//! [`CatastropheModel`] are the two shapes of answer.
//!
//! AGI is the only family that can end in heaven. Whether an AGI arriving
//! in a given year goes well follows a logistic curve centred on
//! `heaven_midpoint_year`: the later it arrives, the better the odds.
//! Nuclear war and pandemics split their mass between dead and reset with
//! fixed odds.

use serde::Deserialize;

use crate::error::{Family, WorldError};
use crate::hazard::HazardCurve;
use crate::odds::{Hazard, SplitOdds};
use crate::outcome::Fate;

/// Year-independent inputs shared by every sub-model evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HazardContext {
    /// Year in which each curve's `base_rate` applies.
    pub reference_year: i32,
    /// Multiplier on every annual hazard.
    pub acceleration: f64,
    /// Upper bound on this family's annual hazard.
    pub cap: f64,
}

/// One candidate model within a family.
pub trait SubModel {
    /// Human-readable model name.
    fn name(&self) -> &str;

    /// Relative prior weight within the family.
    fn weight(&self) -> f64;

    /// The model's hazard for `year`.
    fn hazard(&self, year: i32, context: &HazardContext) -> Hazard;

    /// Check the model's parameters.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidModel`] describing the first bad
    /// parameter.
    fn validate(&self, family: Family) -> Result<(), WorldError>;
}

/// Build an [`WorldError::InvalidModel`] for `model`.
fn invalid(family: Family, name: &str, reason: String) -> WorldError {
    WorldError::InvalidModel {
        family,
        name: name.to_owned(),
        reason,
    }
}

/// Shared validation of a model's prior weight and hazard curve.
fn validate_common(
    family: Family,
    name: &str,
    weight: f64,
    curve: &HazardCurve,
) -> Result<(), WorldError> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(invalid(
            family,
            name,
            format!("prior weight {weight} must be finite and non-negative"),
        ));
    }
    match curve.problem() {
        Some(reason) => Err(invalid(family, name, reason)),
        None => Ok(()),
    }
}

const fn default_heaven_scale_years() -> f64 {
    10.0
}

const fn default_reset_weight() -> f64 {
    0.05
}

/// A model of when AGI arrives and whether it goes well.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AgiModel {
    /// Model name.
    pub name: String,

    /// Relative prior weight within the AGI family.
    pub weight: f64,

    /// Annual probability that AGI arrives.
    pub hazard: HazardCurve,

    /// Year at which an arriving AGI is equally likely to end in heaven or dead.
    pub heaven_midpoint_year: f64,

    /// Width of the logistic transition from dead to heaven, in years.
    #[serde(default = "default_heaven_scale_years")]
    pub heaven_scale_years: f64,

    /// Relative weight of a reset, against heaven and dead summing to 1.
    #[serde(default = "default_reset_weight")]
    pub reset_weight: f64,
}

impl AgiModel {
    /// An AGI model with the default logistic width and reset weight.
    pub fn new(name: &str, weight: f64, hazard: HazardCurve, heaven_midpoint_year: f64) -> Self {
        Self {
            name: name.to_owned(),
            weight,
            hazard,
            heaven_midpoint_year,
            heaven_scale_years: default_heaven_scale_years(),
            reset_weight: default_reset_weight(),
        }
    }

    /// Share of AGI arrivals in `year` that end in heaven (before reset).
    pub fn heaven_share(&self, year: i32) -> f64 {
        let z = (f64::from(year) - self.heaven_midpoint_year) / self.heaven_scale_years;
        1.0 / (1.0 + (-z).exp())
    }

    /// Odds for an AGI arriving in `year`.
    pub fn odds(&self, year: i32) -> SplitOdds {
        let heaven = self.heaven_share(year);
        // Both shares lie in [0, 1] and the reset weight is validated, so
        // the total is always positive.
        SplitOdds::new(heaven, 1.0 - heaven, self.reset_weight).unwrap_or(SplitOdds::ALL_DEAD)
    }
}

impl SubModel for AgiModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn hazard(&self, year: i32, context: &HazardContext) -> Hazard {
        let probability = self.hazard.rate(
            year,
            context.reference_year,
            context.acceleration,
            context.cap,
        );
        Hazard::new(probability, self.odds(year))
    }

    fn validate(&self, family: Family) -> Result<(), WorldError> {
        validate_common(family, &self.name, self.weight, &self.hazard)?;
        if !self.heaven_midpoint_year.is_finite() {
            return Err(invalid(
                family,
                &self.name,
                "heaven midpoint year must be finite".to_owned(),
            ));
        }
        if !self.heaven_scale_years.is_finite() || self.heaven_scale_years <= 0.0 {
            return Err(invalid(
                family,
                &self.name,
                format!(
                    "heaven scale {} must be finite and positive",
                    self.heaven_scale_years
                ),
            ));
        }
        if !self.reset_weight.is_finite() || self.reset_weight < 0.0 {
            return Err(invalid(
                family,
                &self.name,
                format!(
                    "reset weight {} must be finite and non-negative",
                    self.reset_weight
                ),
            ));
        }
        Ok(())
    }
}

/// A catastrophe with fixed fate odds: nuclear war or a pandemic.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatastropheModel {
    /// Model name.
    pub name: String,

    /// Relative prior weight within the family.
    pub weight: f64,

    /// Annual probability of the catastrophe.
    pub hazard: HazardCurve,

    /// How the catastrophe splits between dead and reset.
    pub odds: SplitOdds,
}

impl CatastropheModel {
    /// Create a catastrophe model.
    pub fn new(name: &str, weight: f64, hazard: HazardCurve, odds: SplitOdds) -> Self {
        Self {
            name: name.to_owned(),
            weight,
            hazard,
            odds,
        }
    }
}

impl SubModel for CatastropheModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn hazard(&self, year: i32, context: &HazardContext) -> Hazard {
        let probability = self.hazard.rate(
            year,
            context.reference_year,
            context.acceleration,
            context.cap,
        );
        Hazard::new(probability, self.odds)
    }

    fn validate(&self, family: Family) -> Result<(), WorldError> {
        validate_common(family, &self.name, self.weight, &self.hazard)?;
        if self.odds.weight(Fate::Heaven) > 0.0 {
            return Err(invalid(
                family,
                &self.name,
                "only AGI models can end in heaven".to_owned(),
            ));
        }
        Ok(())
    }
}
