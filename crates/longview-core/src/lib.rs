//! Configuration and scenario comparison for the Longview forecast.
//!
//! This crate sits between the probability engine and the binary: it
//! reads `longview-config.yaml`, runs the forecast once without and once
//! with the acceleration factor, and condenses the two trajectories into
//! a report.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `longview-config.yaml` into
//!   strongly-typed structs.
//! - [`scenario`] -- [`run_scenario`] and [`compare`]: the baseline versus
//!   accelerated comparison and its report rows.
//! - [`error`] -- [`CoreError`], wrapping failures from the layers below.
//!
//! [`run_scenario`]: scenario::run_scenario
//! [`compare`]: scenario::compare
//! [`CoreError`]: error::CoreError

pub mod config;
pub mod error;
pub mod scenario;
