//! Plot-friendly artifacts for the two call-style entry points.
//!
//! `evaluate_point` annotates a single query; `evaluate_field` samples the
//! whole domain and attaches one in-band mask per requested iso-level. Both
//! accept a preset name; the `_with_params` variants take a custom record.

use crate::grid::build_field;
use crate::iso::{IsoBand, select_bands};
use civia_core::{AxisSpec, DrugAxis, IsoLevelSpec, ModelParameters, Result};
use serde::{Deserialize, Serialize};

/// Schema tag carried by every `FieldArtifact`.
pub const FIELD_SCHEMA_VERSION: &str = "civia_field_v0";

/// Label used when a caller supplies its own parameter record.
pub const CUSTOM_PARAMS_LABEL: &str = "custom";

/// Model output at one query point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointArtifact {
    /// Concentrations in axis order.
    pub concentrations: [f64; 3],
    /// Interaction index.
    pub u: f64,
    /// Probability of no response.
    pub p: f64,
    /// Equivalent MAC; `null` when it is undefined (`p` saturated to 1.0).
    pub emac: Option<f64>,
    /// Whether eMAC is undefined at this point.
    pub degenerate: bool,
}

/// Coordinates and labelling of one field axis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxisArtifact {
    /// Which drug this axis carries.
    pub drug: DrugAxis,
    /// Axis label (e.g. `CeProp`).
    pub label: String,
    /// Concentration unit.
    pub unit: String,
    /// Coordinates, ascending, both ends inclusive.
    pub values: Vec<f64>,
}

/// Sampled probability field plus the requested iso-bands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldArtifact {
    /// Always `FIELD_SCHEMA_VERSION`.
    pub schema_version: String,
    /// Preset name, or `custom`.
    pub params_name: String,
    /// Parameters the field was evaluated with.
    pub params: ModelParameters,
    /// One entry per drug, in field order.
    pub axes: Vec<AxisArtifact>,
    /// `[n0, n1, n2]`.
    pub shape: [usize; 3],
    /// Flat probability values, C order (axis 0 slowest).
    pub field: Vec<f64>,
    /// Smallest probability in the field.
    pub p_min: f64,
    /// Largest probability in the field.
    pub p_max: f64,
    /// One band per requested iso-level, in request order.
    pub bands: Vec<IsoBand>,
    /// Optional query point to draw inside the surfaces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point: Option<PointArtifact>,
}

impl FieldArtifact {
    /// Attach a query point annotation.
    pub fn with_point(mut self, point: PointArtifact) -> Self {
        self.point = Some(point);
        self
    }
}

/// Evaluate one concentration triple with a named preset.
pub fn evaluate_point(concentration: [f64; 3], params_name: &str) -> Result<PointArtifact> {
    let params = civia_model::preset(params_name)?;
    evaluate_point_with_params(concentration, &params)
}

/// Evaluate one concentration triple with an explicit parameter record.
pub fn evaluate_point_with_params(
    concentration: [f64; 3],
    params: &ModelParameters,
) -> Result<PointArtifact> {
    let r = civia_model::evaluate_array(concentration, params)?;
    Ok(PointArtifact {
        concentrations: concentration,
        u: r.u,
        p: r.p,
        emac: r.emac,
        degenerate: r.is_degenerate(),
    })
}

/// Sample the field over `ranges` (`(min, max)` per axis) at `resolutions`
/// with a named preset and select the requested iso-bands.
pub fn evaluate_field(
    ranges: [(f64, f64); 3],
    resolutions: [usize; 3],
    params_name: &str,
    iso_levels: &[IsoLevelSpec],
) -> Result<FieldArtifact> {
    let preset = civia_model::Preset::from_name(params_name)?;
    let axes = [
        AxisSpec::new(ranges[0].0, ranges[0].1, resolutions[0])?,
        AxisSpec::new(ranges[1].0, ranges[1].1, resolutions[1])?,
        AxisSpec::new(ranges[2].0, ranges[2].1, resolutions[2])?,
    ];
    evaluate_field_with_params(&axes, &preset.parameters(), preset.name(), iso_levels)
}

/// Sample the field with an explicit parameter record.
///
/// `params_name` is only recorded in the artifact; pass
/// `CUSTOM_PARAMS_LABEL` for records that are not presets.
pub fn evaluate_field_with_params(
    axes: &[AxisSpec; 3],
    params: &ModelParameters,
    params_name: &str,
    iso_levels: &[IsoLevelSpec],
) -> Result<FieldArtifact> {
    let field = build_field(axes, params)?;
    let bands = select_bands(&field, iso_levels)?;
    let shape = field.shape();
    let (p_min, p_max) = field.value_range();
    let (coords, values) = field.into_parts();

    let axes = DrugAxis::ALL
        .into_iter()
        .zip(coords)
        .map(|(drug, values)| AxisArtifact {
            drug,
            label: drug.label().to_string(),
            unit: drug.unit().to_string(),
            values,
        })
        .collect();

    Ok(FieldArtifact {
        schema_version: FIELD_SCHEMA_VERSION.to_string(),
        params_name: params_name.to_string(),
        params: *params,
        axes,
        shape,
        field: values,
        p_min,
        p_max,
        bands,
        point: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use civia_core::Error;

    #[test]
    fn test_point_artifact() {
        let a = evaluate_point([1.6, 0.4, 1.8], "reference").unwrap();
        assert_eq!(a.concentrations, [1.6, 0.4, 1.8]);
        assert!((a.p - 0.7704).abs() < 1e-4);
        assert!(!a.degenerate);
    }

    #[test]
    fn test_point_unknown_preset() {
        assert!(matches!(evaluate_point([1.0, 1.0, 1.0], "nope"), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_field_artifact_shape() {
        let art = evaluate_field(
            [(0.0, 6.0), (0.0, 3.0), (0.0, 4.0)],
            [6, 5, 4],
            "reference",
            &IsoLevelSpec::standard(),
        )
        .unwrap();
        assert_eq!(art.schema_version, FIELD_SCHEMA_VERSION);
        assert_eq!(art.params_name, "reference");
        assert_eq!(art.shape, [6, 5, 4]);
        assert_eq!(art.field.len(), 120);
        assert_eq!(art.axes.len(), 3);
        assert_eq!(art.axes[0].label, "CeProp");
        assert_eq!(art.axes[2].values.len(), 4);
        assert_eq!(art.bands.len(), 2);
        assert!(art.bands.iter().all(|b| b.mask.len() == 120));
        assert_eq!(art.p_min, 0.0);
        assert!(art.point.is_none());
    }

    #[test]
    fn test_field_rejects_single_sample() {
        let r = evaluate_field(
            [(0.0, 6.0), (0.0, 3.0), (0.0, 4.0)],
            [25, 1, 25],
            "reference",
            &IsoLevelSpec::standard(),
        );
        assert!(matches!(r, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_field_serialization() {
        let art = evaluate_field(
            [(0.0, 6.0), (0.0, 3.0), (0.0, 4.0)],
            [3, 3, 3],
            "reference",
            &IsoLevelSpec::standard(),
        )
        .unwrap()
        .with_point(evaluate_point([1.0, 1.0, 1.0], "reference").unwrap());
        let json = serde_json::to_string(&art).unwrap();
        let back: FieldArtifact = serde_json::from_str(&json).unwrap();
        assert_eq!(back.shape, [3, 3, 3]);
        assert!(back.point.is_some());
    }
}
