//! Probability distributions over an arbitrary ordered outcome type.
//!
//! A [`Distribution`] maps each outcome to its probability mass. Keys are
//! kept in a `BTreeMap` so iteration order, floating-point accumulation
//! order, and serialized output are identical from run to run.
//!
//! A [`Trajectory`] is the time-indexed sequence produced by extrapolating
//! a start state forward: index 0 is the start, index `i` is the
//! distribution after `i` transitions.
//!
//! Both types are immutable once published. The only mutation path is the
//! crate-internal [`Distribution::add_mass`], used while a new value is
//! being accumulated by the step engine or the mixer.

use std::collections::BTreeMap;

use serde::Serialize;

/// A mapping from outcome to probability mass.
///
/// When the distribution is a complete probability measure its masses sum
/// to 1 (within floating-point tolerance). Nothing enforces this at the
/// type level; the step engine and the mixer preserve it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Distribution<T: Ord> {
    /// Probability mass per outcome.
    masses: BTreeMap<T, f64>,
}

impl<T: Ord + Clone> Distribution<T> {
    /// Create an empty distribution (total mass 0).
    pub const fn empty() -> Self {
        Self {
            masses: BTreeMap::new(),
        }
    }

    /// Create a distribution with all mass on a single outcome.
    pub fn point_mass(outcome: T) -> Self {
        let mut masses = BTreeMap::new();
        masses.insert(outcome, 1.0);
        Self { masses }
    }

    /// Build a distribution from `(outcome, mass)` pairs.
    ///
    /// Repeated outcomes have their masses summed. The masses are taken
    /// as given; use [`crate::odds::normalize`] for unnormalized weights.
    pub fn from_masses<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (T, f64)>,
    {
        let mut dist = Self::empty();
        for (outcome, mass) in pairs {
            dist.add_mass(outcome, mass);
        }
        dist
    }

    /// Return the mass recorded for an outcome, if it has an entry.
    pub fn get(&self, outcome: &T) -> Option<f64> {
        self.masses.get(outcome).copied()
    }

    /// Return the mass of an outcome, treating an absent entry as 0.
    pub fn probability(&self, outcome: &T) -> f64 {
        self.get(outcome).unwrap_or(0.0)
    }

    /// Sum of all masses.
    pub fn total_mass(&self) -> f64 {
        self.masses.values().sum()
    }

    /// Whether the total mass is within `tolerance` of 1.
    pub fn is_normalized(&self, tolerance: f64) -> bool {
        (self.total_mass() - 1.0).abs() <= tolerance
    }

    /// Number of outcomes with an entry.
    pub fn len(&self) -> usize {
        self.masses.len()
    }

    /// Whether the distribution has no entries.
    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    /// Iterate `(outcome, mass)` pairs in outcome order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, f64)> {
        self.masses.iter().map(|(outcome, &mass)| (outcome, mass))
    }

    /// Iterate outcomes in order.
    pub fn outcomes(&self) -> impl Iterator<Item = &T> {
        self.masses.keys()
    }

    /// Accumulate `mass` onto `outcome`.
    pub(crate) fn add_mass(&mut self, outcome: T, mass: f64) {
        *self.masses.entry(outcome).or_insert(0.0) += mass;
    }
}

impl<T: Ord + Clone> Default for Distribution<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// An ordered sequence of distributions, one per elapsed step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Trajectory<T: Ord> {
    /// Distribution at each step, starting from the initial state.
    steps: Vec<Distribution<T>>,
}

impl<T: Ord + Clone> Trajectory<T> {
    /// Wrap an already-computed sequence of distributions.
    pub const fn from_steps(steps: Vec<Distribution<T>>) -> Self {
        Self { steps }
    }

    /// Distribution after `index` steps, if the trajectory is that long.
    pub fn get(&self, index: usize) -> Option<&Distribution<T>> {
        self.steps.get(index)
    }

    /// Mass of `outcome` after `index` steps.
    ///
    /// Returns 0 when the index is out of range or the outcome is absent.
    pub fn probability_at(&self, index: usize, outcome: &T) -> f64 {
        self.get(index).map_or(0.0, |dist| dist.probability(outcome))
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether no steps were recorded.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The final recorded distribution.
    pub fn last(&self) -> Option<&Distribution<T>> {
        self.steps.last()
    }

    /// Iterate the distributions in step order.
    pub fn iter(&self) -> impl Iterator<Item = &Distribution<T>> {
        self.steps.iter()
    }

    /// Largest deviation of any step's total mass from 1.
    ///
    /// An empty trajectory has zero drift.
    pub fn max_mass_drift(&self) -> f64 {
        self.steps
            .iter()
            .map(|dist| (dist.total_mass() - 1.0).abs())
            .fold(0.0, f64::max)
    }
}
