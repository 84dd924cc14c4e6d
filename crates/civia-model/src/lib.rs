//! Hierarchical interaction model for propofol, sevoflurane and remifentanil.
//!
//! This crate hosts the pointwise model:
//! - stable logistic helpers
//! - the interaction formula (`U`, `P`, `eMAC`)
//! - published parameter presets

#![warn(missing_docs)]
#![warn(clippy::all)]

/// `U`, `P` and `eMAC` kernels and pointwise evaluation.
pub mod interaction;
/// Numerically-stable logistic helpers.
pub mod math;
/// Named parameter presets.
pub mod presets;

pub use interaction::{evaluate, evaluate_array, evaluate_batch};
pub use presets::{Preset, preset};
