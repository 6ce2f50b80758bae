//! Weighted sets of competing transition kernels.
//!
//! An [`Ensemble`] represents uncertainty over which kernel is the true
//! one. Its weights are normalized on construction and never change.

use crate::error::MarkovError;
use crate::odds::checked_total;

/// An item paired with its weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Weighted<K> {
    /// The weighted item, typically a transition kernel.
    pub item: K,
    /// Relative (or, inside an [`Ensemble`], normalized) weight.
    pub weight: f64,
}

impl<K> Weighted<K> {
    /// Pair `item` with `weight`.
    pub const fn new(item: K, weight: f64) -> Self {
        Self { item, weight }
    }
}

/// A non-empty weighted set of kernels whose weights sum to 1.
#[derive(Debug, Clone)]
pub struct Ensemble<K> {
    /// Members with normalized weights.
    members: Vec<Weighted<K>>,
}

impl<K> Ensemble<K> {
    /// Build an ensemble, rescaling the weights so they sum to 1.
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError::EmptyInput`] for an empty member list,
    /// [`MarkovError::InvalidWeight`] for a negative or non-finite weight,
    /// and [`MarkovError::ZeroTotalWeight`] if all weights are zero.
    pub fn normalized(members: Vec<Weighted<K>>) -> Result<Self, MarkovError> {
        let total = checked_total(members.iter().map(|member| member.weight))?;
        let members = members
            .into_iter()
            .map(|member| Weighted::new(member.item, member.weight / total))
            .collect();
        Ok(Self { members })
    }

    /// An ensemble holding a single kernel with weight 1.
    pub fn single(item: K) -> Self {
        Self {
            members: vec![Weighted::new(item, 1.0)],
        }
    }

    /// Number of member kernels.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always `false`: construction rejects empty member lists.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterate the members with their normalized weights.
    pub fn iter(&self) -> impl Iterator<Item = &Weighted<K>> {
        self.members.iter()
    }

    /// The normalized weights in member order.
    pub fn weights(&self) -> Vec<f64> {
        self.members.iter().map(|member| member.weight).collect()
    }

    /// Sum of the member weights (1 up to rounding).
    pub fn total_weight(&self) -> f64 {
        self.members.iter().map(|member| member.weight).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn normalized_rescales_weights() {
        let ensemble =
            Ensemble::normalized(vec![Weighted::new("a", 1.0), Weighted::new("b", 3.0)]).unwrap();
        assert_eq!(ensemble.len(), 2);
        let weights = ensemble.weights();
        assert!((weights.first().copied().unwrap() - 0.25).abs() < 1e-12);
        assert!((weights.get(1).copied().unwrap() - 0.75).abs() < 1e-12);
        assert!((ensemble.total_weight() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn normalized_rejects_empty_and_zero() {
        assert!(matches!(
            Ensemble::<u8>::normalized(Vec::new()),
            Err(MarkovError::EmptyInput)
        ));
        assert!(matches!(
            Ensemble::normalized(vec![Weighted::new(1_u8, 0.0)]),
            Err(MarkovError::ZeroTotalWeight)
        ));
    }

    #[test]
    fn single_has_unit_weight() {
        let ensemble = Ensemble::single('k');
        assert_eq!(ensemble.len(), 1);
        assert!(!ensemble.is_empty());
        assert!((ensemble.total_weight() - 1.0).abs() < f64::EPSILON);
    }
}
