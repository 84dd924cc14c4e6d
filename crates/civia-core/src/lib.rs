//! # civia-core
//!
//! Shared data model for the CIVIA interaction surface: parameter records,
//! concentration points, model results, sampling axes and iso-level requests.
//!
//! Nothing in here evaluates the model; see `civia-model` for the formula and
//! `civia-field` for grid evaluation.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Error type and `Result` alias.
pub mod error;
/// Model parameter records.
pub mod params;
/// Points, results, axes and iso-levels.
pub mod types;

pub use error::{Error, Result};
pub use params::ModelParameters;
pub use types::{AxisSpec, ConcentrationPoint, DrugAxis, IsoLevelSpec, ModelResult};

/// Crate version, shared by every workspace member.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
