//! # civia-field
//!
//! Dense 3D probability fields for the CIVIA interaction model, iso-band
//! selection over those fields, and plot-friendly JSON artifacts.
//!
//! Surface extraction itself is left to the renderer: the artifacts carry
//! flat arrays (C order) that plotting libraries can consume directly.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Point and field artifacts (the two call-style entry points).
pub mod artifact;

/// Rectilinear grid evaluation.
pub mod grid;

/// Iso-band selection.
pub mod iso;

pub use artifact::{
    AxisArtifact, CUSTOM_PARAMS_LABEL, FIELD_SCHEMA_VERSION, FieldArtifact, PointArtifact,
    evaluate_field, evaluate_field_with_params, evaluate_point, evaluate_point_with_params,
};
pub use grid::{ScalarField, build_field};
pub use iso::{IsoBand, in_band_mask, select_bands};
