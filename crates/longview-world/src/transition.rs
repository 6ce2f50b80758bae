//! The combined per-year transition over the world's state space.
//!
//! For a year `y`, one AGI model, one nuclear model and one pandemic model
//! each contribute a hazard. Their contributions to each fate add up:
//!
//! ```text
//! P(heaven) = P_agi * frac(agi, heaven)
//! P(dead)   = P_agi * frac(agi, dead)  + P_nuke * frac(nuke, dead)  + P_plague * frac(plague, dead)
//! P(reset)  = P_agi * frac(agi, reset) + P_nuke * frac(nuke, reset) + P_plague * frac(plague, reset)
//! P(y + 1)  = 1 - P(heaven) - P(dead) - P(reset)
//! ```
//!
//! The fates are absorbing and map to themselves with probability 1.

use longview_markov::{Distribution, Transition};

use crate::catalog::HazardCaps;
use crate::error::Family;
use crate::model::{AgiModel, CatastropheModel, HazardContext, SubModel};
use crate::odds::Hazard;
use crate::outcome::{Fate, Outcome};

/// One (AGI, nuke, plague) combination as a yearly transition kernel.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedTransition {
    /// The AGI model of this combination.
    agi: AgiModel,
    /// The nuclear war model of this combination.
    nuke: CatastropheModel,
    /// The pandemic model of this combination.
    plague: CatastropheModel,
    /// Year in which each curve's base rate applies.
    reference_year: i32,
    /// Multiplier on every hazard.
    acceleration: f64,
    /// Per-family caps on the annual hazard.
    caps: HazardCaps,
}

impl CombinedTransition {
    /// Combine one model from each family.
    ///
    /// The models are assumed validated (see
    /// [`ModelCatalog::validate`](crate::ModelCatalog::validate)).
    pub const fn new(
        agi: AgiModel,
        nuke: CatastropheModel,
        plague: CatastropheModel,
        reference_year: i32,
        acceleration: f64,
        caps: HazardCaps,
    ) -> Self {
        Self {
            agi,
            nuke,
            plague,
            reference_year,
            acceleration,
            caps,
        }
    }

    /// A short `agi/nuke/plague` label for logs.
    pub fn label(&self) -> String {
        format!("{}/{}/{}", self.agi.name(), self.nuke.name(), self.plague.name())
    }

    /// The acceleration multiplier applied to every hazard.
    pub const fn acceleration(&self) -> f64 {
        self.acceleration
    }

    /// The three families' hazards in `year`.
    pub fn hazards(&self, year: i32) -> [Hazard; 3] {
        let context = |family| HazardContext {
            reference_year: self.reference_year,
            acceleration: self.acceleration,
            cap: self.caps.for_family(family),
        };
        [
            self.agi.hazard(year, &context(Family::Agi)),
            self.nuke.hazard(year, &context(Family::Nuke)),
            self.plague.hazard(year, &context(Family::Plague)),
        ]
    }

    /// Distribution over `{heaven, dead, reset, year + 1}` for `year`.
    pub fn at_year(&self, year: i32) -> Distribution<Outcome> {
        let hazards = self.hazards(year);
        let mass = |fate| -> f64 { hazards.iter().map(|hazard| hazard.contribution(fate)).sum() };
        let heaven = mass(Fate::Heaven);
        let dead = mass(Fate::Dead);
        let reset = mass(Fate::Reset);
        let survive = (1.0 - heaven - dead - reset).max(0.0);

        Distribution::from_masses([
            (Outcome::Heaven, heaven),
            (Outcome::Dead, dead),
            (Outcome::Reset, reset),
            (Outcome::Year(year.saturating_add(1)), survive),
        ])
    }
}

impl Transition<Outcome> for CombinedTransition {
    fn next(&self, from: &Outcome) -> Distribution<Outcome> {
        match *from {
            Outcome::Year(year) => self.at_year(year),
            fate @ (Outcome::Dead | Outcome::Heaven | Outcome::Reset) => {
                Distribution::point_mass(fate)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;
    use crate::catalog::ModelCatalog;
    use crate::hazard::HazardCurve;
    use crate::odds::SplitOdds;

    fn kernel(acceleration: f64) -> CombinedTransition {
        let catalog = ModelCatalog::default();
        CombinedTransition::new(
            catalog.agi.first().cloned().unwrap(),
            catalog.nukes.first().cloned().unwrap(),
            catalog.plagues.first().cloned().unwrap(),
            catalog.reference_year,
            acceleration,
            catalog.caps,
        )
    }

    #[test]
    fn absorbing_states_stay_put() {
        let kernel = kernel(1.0);
        for fate in [Outcome::Dead, Outcome::Heaven, Outcome::Reset] {
            assert_eq!(kernel.next(&fate), Distribution::point_mass(fate));
        }
    }

    #[test]
    fn year_transition_sums_to_one() {
        let kernel = kernel(1.0);
        for year in [1900, 2022, 2040, 2100, 2500] {
            let dist = kernel.next(&Outcome::Year(year));
            assert!(dist.is_normalized(1e-12), "year {year} not normalized");
            assert_eq!(dist.len(), 4);
            assert!(dist.get(&Outcome::Year(year + 1)).is_some());
        }
    }

    #[test]
    fn contributions_add_per_fate() {
        let kernel = kernel(1.0);
        let [agi, nuke, plague] = kernel.hazards(2022);
        let dist = kernel.at_year(2022);

        let heaven = agi.contribution(Fate::Heaven);
        let dead = agi.contribution(Fate::Dead)
            + nuke.contribution(Fate::Dead)
            + plague.contribution(Fate::Dead);
        assert!((dist.probability(&Outcome::Heaven) - heaven).abs() < 1e-15);
        assert!((dist.probability(&Outcome::Dead) - dead).abs() < 1e-15);

        // Imminent AGI: 2% in 2022, nuke 0.4%, engineered plague 0.1%.
        let event = 0.02 + 0.004 + 0.001;
        assert!((dist.probability(&Outcome::Year(2023)) - (1.0 - event)).abs() < 1e-12);
    }

    #[test]
    fn acceleration_raises_every_hazard() {
        let base = kernel(1.0).at_year(2030);
        let fast = kernel(1.5).at_year(2030);
        assert!(fast.probability(&Outcome::Dead) > base.probability(&Outcome::Dead));
        assert!(fast.probability(&Outcome::Reset) > base.probability(&Outcome::Reset));
        assert!(fast.probability(&Outcome::Year(2031)) < base.probability(&Outcome::Year(2031)));
    }

    #[test]
    fn saturated_hazards_still_conserve_mass() {
        let dist = kernel(1.0e6).at_year(2300);
        assert!(dist.is_normalized(1e-12));
        assert!(dist.probability(&Outcome::Year(2301)) >= 0.0);
    }

    #[test]
    fn large_odds_weights_still_carry_the_event_mass() {
        let catalog = ModelCatalog::default();
        let nuke = CatastropheModel::new(
            "runaway",
            1.0,
            HazardCurve::constant(0.05),
            SplitOdds::new(0.0, 1.0e307, 1.0e307).unwrap(),
        );
        let kernel = CombinedTransition::new(
            catalog.agi.first().cloned().unwrap(),
            nuke,
            catalog.plagues.first().cloned().unwrap(),
            catalog.reference_year,
            1.0,
            catalog.caps,
        );
        let dist = kernel.next(&Outcome::Year(2022));
        let event = 0.02 + 0.05 + 0.001;
        assert!((dist.probability(&Outcome::Year(2023)) - (1.0 - event)).abs() < 1e-12);
        assert!(dist.is_normalized(1e-12));
    }

    #[test]
    fn label_names_all_three_models() {
        assert_eq!(kernel(1.0).label(), "imminent/standoff/engineered");
    }
}
