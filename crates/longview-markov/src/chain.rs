//! One-step transition kernels and forward propagation.
//!
//! A [`Transition`] maps one outcome to the distribution over next
//! outcomes. [`step`] pushes a whole distribution through the kernel once;
//! [`extrapolate`] repeats that from a point mass to build a [`Trajectory`].
//!
//! If the input distribution sums to 1 and every kernel output sums to 1,
//! the stepped distribution also sums to 1. Nothing here renormalizes, so
//! any drift is visible through [`Trajectory::max_mass_drift`].

use crate::distribution::{Distribution, Trajectory};

/// A one-step stochastic kernel over outcomes of type `T`.
///
/// Implementations must be pure: the same `from` always yields the same
/// distribution, and for every reachable outcome the result sums to 1.
pub trait Transition<T: Ord + Clone> {
    /// Distribution over the outcomes that can follow `from`.
    fn next(&self, from: &T) -> Distribution<T>;
}

impl<T, F> Transition<T> for F
where
    T: Ord + Clone,
    F: Fn(&T) -> Distribution<T>,
{
    fn next(&self, from: &T) -> Distribution<T> {
        self(from)
    }
}

/// Apply one Markov step to `dist`.
///
/// Every source outcome's successor distribution is scaled by the source's
/// mass and accumulated; destinations reached from several sources sum
/// their contributions. Sources without positive mass are skipped.
pub fn step<T, K>(dist: &Distribution<T>, kernel: &K) -> Distribution<T>
where
    T: Ord + Clone,
    K: Transition<T> + ?Sized,
{
    let mut next = Distribution::empty();
    for (outcome, mass) in dist.iter() {
        if mass <= 0.0 {
            continue;
        }
        for (successor, share) in kernel.next(outcome).iter() {
            next.add_mass(successor.clone(), mass * share);
        }
    }
    next
}

/// Extrapolate a point mass on `start` forward for `steps` steps.
///
/// Each distribution is recorded before it is stepped, so index 0 is the
/// point mass on `start` and the last index holds the result of
/// `steps - 1` applications. The trajectory has exactly `steps` entries;
/// zero steps yields an empty trajectory.
pub fn extrapolate<T, K>(start: T, kernel: &K, steps: usize) -> Trajectory<T>
where
    T: Ord + Clone,
    K: Transition<T> + ?Sized,
{
    let mut recorded = Vec::with_capacity(steps);
    if steps == 0 {
        return Trajectory::from_steps(recorded);
    }
    let mut current = Distribution::point_mass(start);
    for _ in 1..steps {
        let next = step(&current, kernel);
        recorded.push(current);
        current = next;
    }
    recorded.push(current);
    Trajectory::from_steps(recorded)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::arithmetic_side_effects,
    clippy::trivially_copy_pass_by_ref
)]
mod tests {
    use std::cell::Cell;

    use super::*;

    /// Random walk on 0..=3 with 0 and 3 absorbing.
    fn walk(from: &i32) -> Distribution<i32> {
        match *from {
            0 | 3 => Distribution::point_mass(*from),
            n => Distribution::from_masses([(n - 1, 0.5), (n + 1, 0.5)]),
        }
    }

    #[test]
    fn step_conserves_mass() {
        let dist = Distribution::from_masses([(1, 0.3), (2, 0.7)]);
        let next = step(&dist, &walk);
        assert!(next.is_normalized(1e-12));
        assert!((next.probability(&0) - 0.15).abs() < 1e-12);
        assert!((next.probability(&3) - 0.35).abs() < 1e-12);
    }

    #[test]
    fn step_merges_shared_destinations() {
        let dist = Distribution::from_masses([(1, 0.5), (3, 0.5)]);
        let next = step(&dist, &walk);
        assert!((next.probability(&3) - 0.5).abs() < 1e-12);
        assert!((next.probability(&2) - 0.25).abs() < 1e-12);
        assert!((next.probability(&0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn step_skips_zero_mass_sources() {
        let dist = Distribution::from_masses([(0, 1.0), (1, 0.0)]);
        let next = step(&dist, &walk);
        assert_eq!(next.len(), 1);
        assert_eq!(next.get(&2), None);
    }

    #[test]
    fn extrapolate_records_before_stepping() {
        let traj = extrapolate(1, &walk, 3);
        assert_eq!(traj.len(), 3);
        assert_eq!(traj.get(0), Some(&Distribution::point_mass(1)));
        assert!((traj.probability_at(1, &0) - 0.5).abs() < 1e-12);
        assert!((traj.probability_at(1, &2) - 0.5).abs() < 1e-12);
        assert!((traj.probability_at(2, &0) - 0.5).abs() < 1e-12);
        assert!((traj.probability_at(2, &1) - 0.25).abs() < 1e-12);
        assert!((traj.probability_at(2, &3) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn extrapolate_zero_steps_is_empty() {
        assert!(extrapolate(1, &walk, 0).is_empty());
    }

    #[test]
    fn extrapolate_applies_kernel_once_per_recorded_step() {
        let calls = Cell::new(0_usize);
        let counting = |from: &u8| {
            calls.set(calls.get() + 1);
            Distribution::point_mass(*from)
        };

        let traj = extrapolate(7_u8, &counting, 4);
        assert_eq!(traj.len(), 4);
        assert_eq!(calls.get(), 3);

        calls.set(0);
        assert_eq!(extrapolate(7_u8, &counting, 1).len(), 1);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn extrapolate_accepts_closures() {
        let stay = |from: &u8| Distribution::point_mass(*from);
        let traj = extrapolate(4_u8, &stay, 5);
        assert!(traj.iter().all(|d| d.get(&4) == Some(1.0)));
    }
}
