//! Odds records: how one sub-model's event mass splits across fates.
//!
//! Sub-models state relative weights ("one part dead to nine parts reset")
//! instead of hand-normalized probabilities. [`SplitOdds`] holds those
//! weights in fixed fields and normalizes them once on construction, so
//! reading a fraction back never divides and never fails.

use longview_markov::{Distribution, probability_from_odds};
use serde::Deserialize;

use crate::error::WorldError;
use crate::outcome::Fate;

/// Raw odds as written in configuration; every field defaults to 0.
#[derive(Debug, Clone, Copy, Deserialize)]
struct OddsWeights {
    #[serde(default)]
    heaven: f64,
    #[serde(default)]
    dead: f64,
    #[serde(default)]
    reset: f64,
}

/// Relative weights of the three fates for one kind of event.
///
/// Invariant: every weight is finite and non-negative, their total is
/// finite and positive, and the shares are the weights divided by that
/// total.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "OddsWeights")]
pub struct SplitOdds {
    /// Weight of a lasting good outcome.
    heaven: f64,
    /// Weight of extinction.
    dead: f64,
    /// Weight of civilizational reset.
    reset: f64,
    /// Normalized share of each fate, in [`Fate::ALL`] order.
    shares: FateShares,
}

/// Normalized per-fate shares, computed once at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
struct FateShares {
    heaven: f64,
    dead: f64,
    reset: f64,
}

impl SplitOdds {
    /// Odds that put all event mass on extinction.
    pub const ALL_DEAD: Self = Self {
        heaven: 0.0,
        dead: 1.0,
        reset: 0.0,
        shares: FateShares {
            heaven: 0.0,
            dead: 1.0,
            reset: 0.0,
        },
    };

    /// Build an odds record from relative weights.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidOdds`] if any weight is negative or not
    /// finite, all three are zero, or their total overflows.
    pub fn new(heaven: f64, dead: f64, reset: f64) -> Result<Self, WorldError> {
        let pairs = [
            (Fate::Heaven, heaven),
            (Fate::Dead, dead),
            (Fate::Reset, reset),
        ];
        let share = |fate: Fate| {
            probability_from_odds(&pairs, &fate).map_err(|source| WorldError::InvalidOdds {
                heaven,
                dead,
                reset,
                reason: source.to_string(),
            })
        };
        let shares = FateShares {
            heaven: share(Fate::Heaven)?,
            dead: share(Fate::Dead)?,
            reset: share(Fate::Reset)?,
        };
        Ok(Self {
            heaven,
            dead,
            reset,
            shares,
        })
    }

    /// The raw weight for one fate.
    pub const fn weight(&self, fate: Fate) -> f64 {
        match fate {
            Fate::Heaven => self.heaven,
            Fate::Dead => self.dead,
            Fate::Reset => self.reset,
        }
    }

    /// `(fate, weight)` pairs in [`Fate::ALL`] order.
    pub const fn as_pairs(&self) -> [(Fate, f64); 3] {
        [
            (Fate::Heaven, self.heaven),
            (Fate::Dead, self.dead),
            (Fate::Reset, self.reset),
        ]
    }

    /// Share of the event mass that goes to `fate`.
    pub const fn fraction(&self, fate: Fate) -> f64 {
        match fate {
            Fate::Heaven => self.shares.heaven,
            Fate::Dead => self.shares.dead,
            Fate::Reset => self.shares.reset,
        }
    }

    /// The odds as a normalized distribution over fates.
    pub fn to_distribution(&self) -> Distribution<Fate> {
        Distribution::from_masses(Fate::ALL.map(|fate| (fate, self.fraction(fate))))
    }
}

impl TryFrom<OddsWeights> for SplitOdds {
    type Error = WorldError;

    fn try_from(raw: OddsWeights) -> Result<Self, Self::Error> {
        Self::new(raw.heaven, raw.dead, raw.reset)
    }
}

/// One sub-model's hazard for one year: the probability that its event
/// happens, and how that event splits across fates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hazard {
    /// Probability that the event happens this year, in `[0, 1]`.
    pub probability: f64,
    /// How the event's mass splits across fates.
    pub odds: SplitOdds,
}

impl Hazard {
    /// Pair an event probability with its odds.
    pub const fn new(probability: f64, odds: SplitOdds) -> Self {
        Self { probability, odds }
    }

    /// Probability mass this hazard sends to `fate` this year.
    pub fn contribution(&self, fate: Fate) -> f64 {
        self.probability * self.odds.fraction(fate)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn fractions_sum_to_one() {
        let odds = SplitOdds::new(2.0, 1.0, 1.0).unwrap();
        let total: f64 = Fate::ALL.iter().map(|&fate| odds.fraction(fate)).sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert!((odds.fraction(Fate::Heaven) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn rejects_degenerate_weights() {
        assert!(matches!(
            SplitOdds::new(0.0, 0.0, 0.0),
            Err(WorldError::InvalidOdds { .. })
        ));
        assert!(SplitOdds::new(-1.0, 2.0, 0.0).is_err());
        assert!(SplitOdds::new(f64::INFINITY, 1.0, 0.0).is_err());
    }

    #[test]
    fn rejects_weights_whose_total_overflows() {
        assert!(matches!(
            SplitOdds::new(0.0, 1e308, 1e308),
            Err(WorldError::InvalidOdds { .. })
        ));
        assert!(serde_json::from_str::<SplitOdds>(r#"{"dead": 1e308, "reset": 1e308}"#).is_err());
    }

    #[test]
    fn huge_but_finite_weights_keep_their_shares() {
        let odds = SplitOdds::new(0.0, 1e307, 3e307).unwrap();
        assert!((odds.fraction(Fate::Dead) - 0.25).abs() < 1e-12);
        assert!((odds.fraction(Fate::Reset) - 0.75).abs() < 1e-12);
        let hazard = Hazard::new(0.04, odds);
        assert!((hazard.contribution(Fate::Dead) - 0.01).abs() < 1e-12);
    }

    #[test]
    fn all_dead_constant_matches_constructed_record() {
        assert_eq!(SplitOdds::new(0.0, 1.0, 0.0).unwrap(), SplitOdds::ALL_DEAD);
    }

    #[test]
    fn distribution_matches_fractions() {
        let odds = SplitOdds::new(0.0, 1.0, 9.0).unwrap();
        let dist = odds.to_distribution();
        assert!(dist.is_normalized(1e-12));
        for fate in Fate::ALL {
            assert!((dist.probability(&fate) - odds.fraction(fate)).abs() < 1e-12);
        }
    }

    #[test]
    fn contribution_scales_by_event_probability() {
        let hazard = Hazard::new(0.02, SplitOdds::new(0.0, 1.0, 3.0).unwrap());
        assert!((hazard.contribution(Fate::Dead) - 0.005).abs() < 1e-12);
        assert!((hazard.contribution(Fate::Reset) - 0.015).abs() < 1e-12);
        assert!(hazard.contribution(Fate::Heaven).abs() < f64::EPSILON);
    }

    #[test]
    fn deserializes_with_missing_fields_as_zero() {
        let odds: SplitOdds = serde_json::from_str(r#"{"dead": 1, "reset": 4}"#).unwrap();
        assert!(odds.weight(Fate::Heaven).abs() < f64::EPSILON);
        assert!((odds.fraction(Fate::Reset) - 0.8).abs() < 1e-12);
        assert!(serde_json::from_str::<SplitOdds>("{}").is_err());
    }
}
