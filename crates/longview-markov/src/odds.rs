//! Turning unnormalized weights into probabilities.
//!
//! Sub-models describe how an event splits across its possible results
//! with relative weights ("nine parts reset to one part dead") rather than
//! hand-normalized probabilities. These helpers do the division.

use crate::distribution::Distribution;
use crate::error::MarkovError;

/// Sum a set of weights, rejecting anything that cannot be normalized.
///
/// Fails if there are no weights, any weight is negative or not finite,
/// the total overflows, or the total is zero.
pub(crate) fn checked_total<I>(weights: I) -> Result<f64, MarkovError>
where
    I: IntoIterator<Item = f64>,
{
    let mut total = 0.0;
    let mut seen = false;
    for weight in weights {
        if !weight.is_finite() || weight < 0.0 {
            return Err(MarkovError::InvalidWeight { weight });
        }
        total += weight;
        seen = true;
    }
    if !seen {
        return Err(MarkovError::EmptyInput);
    }
    if !total.is_finite() {
        return Err(MarkovError::InvalidWeight { weight: total });
    }
    if total <= 0.0 {
        return Err(MarkovError::ZeroTotalWeight);
    }
    Ok(total)
}

/// Divide every weight by the sum of all weights.
///
/// Repeated outcomes are summed. The result sums to 1.
pub fn normalize<T, I>(weights: I) -> Result<Distribution<T>, MarkovError>
where
    T: Ord + Clone,
    I: IntoIterator<Item = (T, f64)>,
{
    let pairs: Vec<(T, f64)> = weights.into_iter().collect();
    let total = checked_total(pairs.iter().map(|&(_, weight)| weight))?;
    Ok(Distribution::from_masses(
        pairs.into_iter().map(|(outcome, weight)| (outcome, weight / total)),
    ))
}

/// Probability of `key` under an odds record: its weight over the total.
///
/// A key that does not appear in `odds` has probability 0.
pub fn probability_from_odds<T: PartialEq>(
    odds: &[(T, f64)],
    key: &T,
) -> Result<f64, MarkovError> {
    let total = checked_total(odds.iter().map(|&(_, weight)| weight))?;
    let weight: f64 = odds
        .iter()
        .filter(|(outcome, _)| outcome == key)
        .map(|&(_, weight)| weight)
        .sum();
    Ok(weight / total)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn normalize_divides_by_total() {
        let dist = normalize([("heaven", 1.0), ("dead", 3.0)]).unwrap();
        assert!((dist.probability(&"heaven") - 0.25).abs() < 1e-12);
        assert!((dist.probability(&"dead") - 0.75).abs() < 1e-12);
        assert!(dist.is_normalized(1e-12));
    }

    #[test]
    fn normalize_keeps_zero_weight_entries() {
        let dist = normalize([("a", 0.0), ("b", 2.0)]).unwrap();
        assert_eq!(dist.len(), 2);
        assert_eq!(dist.get(&"a"), Some(0.0));
    }

    #[test]
    fn normalize_rejects_zero_total() {
        let result = normalize([("a", 0.0), ("b", 0.0)]);
        assert_eq!(result, Err(MarkovError::ZeroTotalWeight));
    }

    #[test]
    fn normalize_rejects_empty_input() {
        let result = normalize(Vec::<(u8, f64)>::new());
        assert_eq!(result, Err(MarkovError::EmptyInput));
    }

    #[test]
    fn normalize_rejects_negative_and_nan() {
        assert!(matches!(
            normalize([(1, 1.0), (2, -0.5)]),
            Err(MarkovError::InvalidWeight { .. })
        ));
        assert!(matches!(
            normalize([(1, f64::NAN)]),
            Err(MarkovError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn probability_from_odds_uses_whole_record() {
        let odds = [("heaven", 0.0), ("dead", 1.0), ("reset", 9.0)];
        let dead = probability_from_odds(&odds, &"dead").unwrap();
        let reset = probability_from_odds(&odds, &"reset").unwrap();
        let heaven = probability_from_odds(&odds, &"heaven").unwrap();
        assert!((dead - 0.1).abs() < 1e-12);
        assert!((reset - 0.9).abs() < 1e-12);
        assert!(heaven.abs() < f64::EPSILON);
    }

    #[test]
    fn probability_from_odds_absent_key_is_zero() {
        let odds = [("dead", 2.0)];
        let p = probability_from_odds(&odds, &"utopia").unwrap();
        assert!(p.abs() < f64::EPSILON);
    }

    #[test]
    fn probability_from_odds_zero_sum_fails() {
        let odds = [("dead", 0.0)];
        assert_eq!(
            probability_from_odds(&odds, &"dead"),
            Err(MarkovError::ZeroTotalWeight)
        );
    }
}
