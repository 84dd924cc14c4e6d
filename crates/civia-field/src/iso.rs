//! Selection of field nodes inside iso-probability bands.

use crate::grid::ScalarField;
use civia_core::{IsoLevelSpec, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Nodes of a field whose probability lies inside one iso-level band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsoBand {
    /// Band name.
    pub name: String,
    /// Target probability.
    pub target: f64,
    /// Half-width of the band.
    pub half_width: f64,
    /// Number of in-band nodes.
    pub n_in_band: usize,
    /// In-band flag per node, same layout as `ScalarField::values`.
    pub mask: Vec<bool>,
}

/// In-band flag for every node: `|p - target| <= half_width`.
pub fn in_band_mask(field: &ScalarField, level: &IsoLevelSpec) -> Vec<bool> {
    field.values().par_iter().map(|&p| level.contains(p)).collect()
}

/// Validate `levels` and compute one band per level, in request order.
pub fn select_bands(field: &ScalarField, levels: &[IsoLevelSpec]) -> Result<Vec<IsoBand>> {
    for level in levels {
        level.validate()?;
    }

    let bands: Vec<IsoBand> = levels
        .iter()
        .map(|level| {
            let mask = in_band_mask(field, level);
            let n_in_band = mask.iter().filter(|&&m| m).count();
            log::debug!("iso band '{}' (p={}): {} nodes", level.name, level.target, n_in_band);
            IsoBand {
                name: level.name.clone(),
                target: level.target,
                half_width: level.half_width,
                n_in_band,
                mask,
            }
        })
        .collect();
    Ok(bands)
}
