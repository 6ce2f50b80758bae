//! Weighted pooling of distributions and trajectories.
//!
//! Mixing collapses model uncertainty: each candidate's forecast is
//! weighted by how much we believe in it and the masses are summed per
//! outcome. [`extrapolate_and_mix`] does this for a whole [`Ensemble`].

use tracing::{debug, trace};

use crate::chain::{Transition, extrapolate};
use crate::distribution::{Distribution, Trajectory};
use crate::ensemble::Ensemble;
use crate::error::MarkovError;
use crate::odds::checked_total;

/// Pool weighted distributions into one.
///
/// Each input's masses are scaled by `weight / total_weight` and summed per
/// outcome. The scale factor is computed before multiplying, so a single
/// input comes back unchanged whatever its (positive) weight.
///
/// # Errors
///
/// Fails on an empty input list, a negative or non-finite weight, or a
/// zero total weight.
pub fn mix<'a, T, I>(weighted: I) -> Result<Distribution<T>, MarkovError>
where
    T: Ord + Clone + 'a,
    I: IntoIterator<Item = (&'a Distribution<T>, f64)>,
{
    let weighted: Vec<(&Distribution<T>, f64)> = weighted.into_iter().collect();
    let total = checked_total(weighted.iter().map(|&(_, weight)| weight))?;

    let mut pooled = Distribution::empty();
    for (dist, weight) in weighted {
        let factor = weight / total;
        for (outcome, mass) in dist.iter() {
            pooled.add_mass(outcome.clone(), mass * factor);
        }
    }
    Ok(pooled)
}

/// Pool weighted trajectories step by step.
///
/// The first trajectory's length is authoritative; at every index the
/// corresponding distributions are combined with [`mix`].
///
/// # Errors
///
/// Returns [`MarkovError::LengthMismatch`] if any trajectory differs in
/// length from the first, plus the weight errors of [`mix`].
pub fn mix_histories<'a, T, I>(weighted: I) -> Result<Trajectory<T>, MarkovError>
where
    T: Ord + Clone + 'a,
    I: IntoIterator<Item = (&'a Trajectory<T>, f64)>,
{
    let histories: Vec<(&Trajectory<T>, f64)> = weighted.into_iter().collect();
    let expected = histories
        .first()
        .map(|(trajectory, _)| trajectory.len())
        .ok_or(MarkovError::EmptyInput)?;

    for (index, (trajectory, _)) in histories.iter().enumerate() {
        if trajectory.len() != expected {
            return Err(MarkovError::LengthMismatch {
                index,
                expected,
                found: trajectory.len(),
            });
        }
    }

    let mut steps = Vec::with_capacity(expected);
    for index in 0..expected {
        let column = histories
            .iter()
            .filter_map(|&(trajectory, weight)| trajectory.get(index).map(|dist| (dist, weight)));
        steps.push(mix(column)?);
    }
    Ok(Trajectory::from_steps(steps))
}

/// Extrapolate every ensemble member from `start` and mix the results.
///
/// This is the marginal forecast: the trajectory you get by averaging over
/// which kernel is true, weighted by the ensemble's belief in each.
///
/// # Errors
///
/// Propagates the errors of [`mix_histories`]. A well-formed [`Ensemble`]
/// never triggers them.
pub fn extrapolate_and_mix<T, K>(
    start: T,
    ensemble: &Ensemble<K>,
    steps: usize,
) -> Result<Trajectory<T>, MarkovError>
where
    T: Ord + Clone,
    K: Transition<T>,
{
    debug!(members = ensemble.len(), steps, "Extrapolating model ensemble");

    let histories: Vec<(Trajectory<T>, f64)> = ensemble
        .iter()
        .enumerate()
        .map(|(member, weighted)| {
            trace!(member, weight = weighted.weight, "Extrapolating ensemble member");
            (extrapolate(start.clone(), &weighted.item, steps), weighted.weight)
        })
        .collect();

    mix_histories(histories.iter().map(|(trajectory, weight)| (trajectory, *weight)))
}
