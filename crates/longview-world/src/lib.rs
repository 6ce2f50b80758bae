//! World states, catastrophe sub-models, and the combined yearly
//! transition for the Longview forecast.
//!
//! The world is either in an ordinary year or has ended in one of three
//! absorbing fates. Three independent families of sub-models (AGI, nuclear
//! war, pandemics) each put a hazard on every year; the combined transition
//! adds those hazards up and advances whatever mass is left to the next
//! year. Uncertainty over which sub-models are right becomes a weighted
//! [`Ensemble`] of combined transitions.
//!
//! # Modules
//!
//! - [`outcome`] -- [`Outcome`] (year or fate) and [`Fate`].
//! - [`odds`] -- [`SplitOdds`], the fixed-field odds record, and
//!   [`Hazard`], one sub-model's contribution for one year.
//! - [`hazard`] -- [`HazardCurve`]: exponentially growing annual rates.
//! - [`model`] -- The [`SubModel`] trait, [`AgiModel`], and
//!   [`CatastropheModel`] (nuclear and pandemic families).
//! - [`catalog`] -- [`ModelCatalog`] and the built-in model numbers.
//! - [`transition`] -- [`CombinedTransition`], the per-year kernel.
//! - [`ensemble`] -- Building the weighted ensemble of kernels.
//! - [`error`] -- Error types for model validation.
//!
//! [`Ensemble`]: longview_markov::Ensemble

pub mod catalog;
pub mod ensemble;
pub mod error;
pub mod hazard;
pub mod model;
pub mod odds;
pub mod outcome;
pub mod transition;

// Re-export primary types at crate root.
pub use catalog::{HazardCaps, ModelCatalog};
pub use ensemble::{Effort, build_catalog_ensemble, build_effort_ensemble, build_model_ensemble};
pub use error::{Family, WorldError};
pub use hazard::HazardCurve;
pub use model::{AgiModel, CatastropheModel, HazardContext, SubModel};
pub use odds::{Hazard, SplitOdds};
pub use outcome::{Fate, Outcome};
pub use transition::CombinedTransition;
