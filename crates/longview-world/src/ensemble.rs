//! Building the weighted ensemble of combined transitions.
//!
//! Each family's prior weights are normalized on their own, then every
//! (AGI, nuke, plague) triple becomes one [`CombinedTransition`] weighted
//! by the product of its three normalized weights. The families are
//! independent, so the product is the joint prior. The flat list is
//! normalized once more at the end so rounding never leaves the total
//! away from 1.

use longview_markov::{Distribution, Ensemble, Weighted, normalize};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::catalog::ModelCatalog;
use crate::error::WorldError;
use crate::model::SubModel;
use crate::transition::CombinedTransition;

/// Whether extra collective effort speeds up every hazard.
///
/// This is the boolean-like switch a scenario runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effort {
    /// Hazards as the models state them.
    Baseline,
    /// Every hazard multiplied by the acceleration factor.
    Accelerated,
}

impl Effort {
    /// Map the "extra effort" flag onto an effort level.
    pub const fn from_flag(extra_effort: bool) -> Self {
        if extra_effort {
            Self::Accelerated
        } else {
            Self::Baseline
        }
    }

    /// The hazard multiplier for this effort level.
    pub const fn multiplier(self, acceleration_factor: f64) -> f64 {
        match self {
            Self::Baseline => 1.0,
            Self::Accelerated => acceleration_factor,
        }
    }

    /// Lowercase label for logs and reports.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::Accelerated => "accelerated",
        }
    }
}

/// Build the ensemble from the built-in model catalog.
///
/// # Errors
///
/// Returns [`WorldError::InvalidAcceleration`] for a negative or
/// non-finite `acceleration`.
pub fn build_model_ensemble(acceleration: f64) -> Result<Ensemble<CombinedTransition>, WorldError> {
    build_catalog_ensemble(&ModelCatalog::default(), acceleration)
}

/// Build the ensemble for an effort level.
///
/// # Errors
///
/// As [`build_model_ensemble`].
pub fn build_effort_ensemble(
    catalog: &ModelCatalog,
    effort: Effort,
    acceleration_factor: f64,
) -> Result<Ensemble<CombinedTransition>, WorldError> {
    build_catalog_ensemble(catalog, effort.multiplier(acceleration_factor))
}

/// Build the outer-product ensemble over every (AGI, nuke, plague) triple.
///
/// Triples whose joint prior is zero are left out; they could never
/// contribute mass.
///
/// # Errors
///
/// Returns [`WorldError::InvalidAcceleration`] for a bad multiplier, any
/// catalog validation error, and [`WorldError::Markov`] if a family's
/// prior weights are all zero.
pub fn build_catalog_ensemble(
    catalog: &ModelCatalog,
    acceleration: f64,
) -> Result<Ensemble<CombinedTransition>, WorldError> {
    if !acceleration.is_finite() || acceleration < 0.0 {
        return Err(WorldError::InvalidAcceleration {
            factor: acceleration,
        });
    }
    catalog.validate()?;

    let agi_priors = family_priors(&catalog.agi)?;
    let nuke_priors = family_priors(&catalog.nukes)?;
    let plague_priors = family_priors(&catalog.plagues)?;

    let mut members = Vec::with_capacity(catalog.ensemble_size());
    for (agi, agi_weight) in weighted_models(&catalog.agi, &agi_priors) {
        for (nuke, nuke_weight) in weighted_models(&catalog.nukes, &nuke_priors) {
            for (plague, plague_weight) in weighted_models(&catalog.plagues, &plague_priors) {
                let weight = agi_weight * nuke_weight * plague_weight;
                if weight <= 0.0 {
                    continue;
                }
                let kernel = CombinedTransition::new(
                    agi.clone(),
                    nuke.clone(),
                    plague.clone(),
                    catalog.reference_year,
                    acceleration,
                    catalog.caps,
                );
                trace!(model = %kernel.label(), weight, "Ensemble member");
                members.push(Weighted::new(kernel, weight));
            }
        }
    }

    let ensemble = Ensemble::normalized(members)?;
    debug!(
        members = ensemble.len(),
        acceleration,
        "Model ensemble built"
    );
    Ok(ensemble)
}

/// Normalize a family's prior weights, keyed by model position.
fn family_priors<M: SubModel>(models: &[M]) -> Result<Distribution<usize>, WorldError> {
    Ok(normalize(
        models.iter().enumerate().map(|(index, model)| (index, model.weight())),
    )?)
}

/// Pair each model with its normalized prior.
fn weighted_models<'a, M>(
    models: &'a [M],
    priors: &'a Distribution<usize>,
) -> impl Iterator<Item = (&'a M, f64)> + 'a {
    models
        .iter()
        .enumerate()
        .map(|(index, model)| (model, priors.probability(&index)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::hazard::HazardCurve;

    #[test]
    fn default_ensemble_weights_sum_to_one() {
        for acceleration in [0.0, 1.0, 1.1, 3.0] {
            let ensemble = build_model_ensemble(acceleration).unwrap();
            assert!((ensemble.total_weight() - 1.0).abs() < 1e-12);
            assert_eq!(ensemble.len(), 8);
        }
    }

    #[test]
    fn member_weight_is_product_of_family_priors() {
        let ensemble = build_model_ensemble(1.0).unwrap();
        let steady_engineered = ensemble
            .iter()
            .find(|member| member.item.label() == "steady/standoff/engineered")
            .map(|member| member.weight)
            .unwrap();
        // steady is 2 of 6 AGI weight, the only nuke model, 1 of 2 plague weight.
        assert!((steady_engineered - (2.0 / 6.0) * 0.5).abs() < 1e-12);
    }

    #[test]
    fn zero_prior_models_are_dropped() {
        let mut catalog = ModelCatalog::default();
        if let Some(model) = catalog.agi.first_mut() {
            model.weight = 0.0;
        }
        let ensemble = build_catalog_ensemble(&catalog, 1.0).unwrap();
        assert_eq!(ensemble.len(), 6);
        assert!((ensemble.total_weight() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn all_zero_family_is_rejected() {
        let mut catalog = ModelCatalog::default();
        for model in &mut catalog.plagues {
            model.weight = 0.0;
        }
        assert!(matches!(
            build_catalog_ensemble(&catalog, 1.0),
            Err(WorldError::Markov { .. })
        ));
    }

    #[test]
    fn bad_acceleration_is_rejected() {
        for factor in [-0.5, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                build_model_ensemble(factor),
                Err(WorldError::InvalidAcceleration { .. })
            ));
        }
    }

    #[test]
    fn invalid_catalog_is_rejected() {
        let mut catalog = ModelCatalog::default();
        if let Some(model) = catalog.nukes.first_mut() {
            model.hazard = HazardCurve::constant(-0.1);
        }
        assert!(matches!(
            build_catalog_ensemble(&catalog, 1.0),
            Err(WorldError::InvalidModel { .. })
        ));
    }

    #[test]
    fn effort_maps_flag_to_multiplier() {
        assert_eq!(Effort::from_flag(false), Effort::Baseline);
        assert_eq!(Effort::from_flag(true), Effort::Accelerated);
        assert!((Effort::Baseline.multiplier(1.3) - 1.0).abs() < f64::EPSILON);
        assert!((Effort::Accelerated.multiplier(1.3) - 1.3).abs() < f64::EPSILON);

        let catalog = ModelCatalog::default();
        let ensemble = build_effort_ensemble(&catalog, Effort::Accelerated, 1.3).unwrap();
        assert!(ensemble
            .iter()
            .all(|member| (member.item.acceleration() - 1.3).abs() < f64::EPSILON));
    }
}
