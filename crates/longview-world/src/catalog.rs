//! The set of candidate sub-models, and the built-in numbers.
//!
//! A [`ModelCatalog`] lists every candidate model of each family with its
//! prior weight. The default catalog:
//!
//! | Family | Model        | Weight | Rate in 2022 | Doubling | Heaven midpoint |
//! |--------|--------------|--------|--------------|----------|-----------------|
//! | AGI    | `imminent`   | 1      | 2%           | 5 years  | 2040            |
//! | AGI    | `steady`     | 2      | 1%           | 10 years | 2050            |
//! | AGI    | `gradual`    | 2      | 0.3%         | 15 years | 2065            |
//! | AGI    | `distant`    | 1      | 0.05%        | 25 years | 2090            |
//! | Nuke   | `standoff`   | 1      | 0.4%         | --       | dead 1 : reset 9 |
//! | Plague | `engineered` | 1      | 0.1%         | 20 years | dead 1 : reset 4 |
//! | Plague | `placebo`    | 1      | 0%           | --       | --              |
//!
//! Annual hazards are capped per family (AGI 0.9, nuke 0.05, plague 0.05)
//! so that the three together can never exceed certainty in one year.

use serde::Deserialize;

use crate::error::{Family, WorldError};
use crate::hazard::HazardCurve;
use crate::model::{AgiModel, CatastropheModel, SubModel};
use crate::odds::SplitOdds;

/// Per-family upper bounds on the annual hazard.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct HazardCaps {
    /// Cap on the AGI arrival rate.
    #[serde(default = "default_agi_cap")]
    pub agi: f64,
    /// Cap on the nuclear war rate.
    #[serde(default = "default_minor_cap")]
    pub nuke: f64,
    /// Cap on the pandemic rate.
    #[serde(default = "default_minor_cap")]
    pub plague: f64,
}

impl Default for HazardCaps {
    fn default() -> Self {
        Self {
            agi: default_agi_cap(),
            nuke: default_minor_cap(),
            plague: default_minor_cap(),
        }
    }
}

impl HazardCaps {
    /// The cap for one family.
    pub const fn for_family(&self, family: Family) -> f64 {
        match family {
            Family::Agi => self.agi,
            Family::Nuke => self.nuke,
            Family::Plague => self.plague,
        }
    }

    /// Sum of all three caps.
    pub const fn total(&self) -> f64 {
        self.agi + self.nuke + self.plague
    }
}

/// Every candidate sub-model, grouped by family.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelCatalog {
    /// Year in which each hazard curve's base rate applies.
    #[serde(default = "default_reference_year")]
    pub reference_year: i32,

    /// Per-family hazard caps.
    #[serde(default)]
    pub caps: HazardCaps,

    /// Candidate AGI models.
    #[serde(default = "default_agi_models")]
    pub agi: Vec<AgiModel>,

    /// Candidate nuclear war models.
    #[serde(default = "default_nuke_models")]
    pub nukes: Vec<CatastropheModel>,

    /// Candidate pandemic models.
    #[serde(default = "default_plague_models")]
    pub plagues: Vec<CatastropheModel>,
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self {
            reference_year: default_reference_year(),
            caps: HazardCaps::default(),
            agi: default_agi_models(),
            nukes: default_nuke_models(),
            plagues: default_plague_models(),
        }
    }
}

impl ModelCatalog {
    /// Number of combined transitions the ensemble will hold.
    pub fn ensemble_size(&self) -> usize {
        self.agi
            .len()
            .saturating_mul(self.nukes.len())
            .saturating_mul(self.plagues.len())
    }

    /// Check every family and every model.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EmptyFamily`] if a family has no models,
    /// [`WorldError::HazardBudgetExceeded`] if the caps could sum past 1,
    /// and [`WorldError::InvalidModel`] for the first bad model.
    pub fn validate(&self) -> Result<(), WorldError> {
        let caps = [self.caps.agi, self.caps.nuke, self.caps.plague];
        if caps.iter().any(|cap| !(0.0..=1.0).contains(cap)) || self.caps.total() > CAP_BUDGET {
            return Err(WorldError::HazardBudgetExceeded {
                total: self.caps.total(),
            });
        }
        validate_family(Family::Agi, &self.agi)?;
        validate_family(Family::Nuke, &self.nukes)?;
        validate_family(Family::Plague, &self.plagues)?;
        Ok(())
    }
}

/// Check that a family is non-empty and every model in it is valid.
fn validate_family<M: SubModel>(family: Family, models: &[M]) -> Result<(), WorldError> {
    if models.is_empty() {
        return Err(WorldError::EmptyFamily { family });
    }
    models.iter().try_for_each(|model| model.validate(family))
}

/// Largest allowed sum of the family caps; the slack absorbs rounding.
const CAP_BUDGET: f64 = 1.0 + 1e-12;

// ---------------------------------------------------------------------------
// Built-in models
// ---------------------------------------------------------------------------

const fn default_reference_year() -> i32 {
    2022
}

const fn default_agi_cap() -> f64 {
    0.9
}

const fn default_minor_cap() -> f64 {
    0.05
}

fn default_agi_models() -> Vec<AgiModel> {
    vec![
        AgiModel::new("imminent", 1.0, HazardCurve::doubling(0.02, 5.0), 2040.0),
        AgiModel::new("steady", 2.0, HazardCurve::doubling(0.01, 10.0), 2050.0),
        AgiModel::new("gradual", 2.0, HazardCurve::doubling(0.003, 15.0), 2065.0),
        AgiModel::new("distant", 1.0, HazardCurve::doubling(0.0005, 25.0), 2090.0),
    ]
}

fn default_nuke_models() -> Vec<CatastropheModel> {
    vec![CatastropheModel::new(
        "standoff",
        1.0,
        HazardCurve::constant(0.004),
        SplitOdds::new(0.0, 1.0, 9.0).unwrap_or(SplitOdds::ALL_DEAD),
    )]
}

fn default_plague_models() -> Vec<CatastropheModel> {
    vec![
        CatastropheModel::new(
            "engineered",
            1.0,
            HazardCurve::doubling(0.001, 20.0),
            SplitOdds::new(0.0, 1.0, 4.0).unwrap_or(SplitOdds::ALL_DEAD),
        ),
        CatastropheModel::new(
            "placebo",
            1.0,
            HazardCurve::constant(0.0),
            SplitOdds::ALL_DEAD,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_is_valid() {
        let catalog = ModelCatalog::default();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.agi.len(), 4);
        assert_eq!(catalog.nukes.len(), 1);
        assert_eq!(catalog.plagues.len(), 2);
        assert_eq!(catalog.ensemble_size(), 8);
    }

    #[test]
    fn default_caps_fit_within_certainty() {
        let caps = HazardCaps::default();
        assert!(caps.total() <= CAP_BUDGET);
        assert!((caps.for_family(Family::Agi) - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn oversized_caps_are_rejected() {
        let catalog = ModelCatalog {
            caps: HazardCaps {
                agi: 0.95,
                nuke: 0.05,
                plague: 0.05,
            },
            ..ModelCatalog::default()
        };
        assert!(matches!(
            catalog.validate(),
            Err(WorldError::HazardBudgetExceeded { .. })
        ));
    }

    #[test]
    fn empty_family_is_rejected() {
        let catalog = ModelCatalog {
            nukes: Vec::new(),
            ..ModelCatalog::default()
        };
        assert!(matches!(
            catalog.validate(),
            Err(WorldError::EmptyFamily { family: Family::Nuke })
        ));
    }

    #[test]
    fn invalid_model_is_reported_by_name() {
        let mut catalog = ModelCatalog::default();
        if let Some(model) = catalog.agi.first_mut() {
            model.hazard = HazardCurve::constant(2.0);
        }
        assert!(matches!(
            catalog.validate(),
            Err(WorldError::InvalidModel { family: Family::Agi, ref name, .. }) if name == "imminent"
        ));
    }
}
