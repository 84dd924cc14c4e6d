//! `ScalarField` construction.
//!
//! Axis 0 is the slowest-varying index: `values[(i * n1 + j) * n2 + k]` is
//! the probability at `(axes[0][i], axes[1][j], axes[2][k])`, the same layout
//! as a flattened `meshgrid(..., indexing="ij")`.

use civia_core::{AxisSpec, ConcentrationPoint, DrugAxis, Error, ModelParameters, Result};
use civia_model::interaction;
use rayon::prelude::*;
use serde::Serialize;
use std::time::Instant;

/// Probability of no response sampled on a rectilinear grid.
#[derive(Debug, Clone, Serialize)]
pub struct ScalarField {
    axes: [Vec<f64>; 3],
    values: Vec<f64>,
}

impl ScalarField {
    /// Grid dimensions `[n0, n1, n2]`.
    pub fn shape(&self) -> [usize; 3] {
        [self.axes[0].len(), self.axes[1].len(), self.axes[2].len()]
    }

    /// Coordinate sequences in axis order.
    pub fn axes(&self) -> &[Vec<f64>; 3] {
        &self.axes
    }

    /// Coordinates along one drug axis.
    pub fn axis(&self, axis: DrugAxis) -> &[f64] {
        &self.axes[axis.index()]
    }

    /// Flat probability values, C order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of grid nodes.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a field built by `build_field` (every axis has at
    /// least 2 samples).
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Flat index of node `(i, j, k)`, if in range.
    pub fn flat_index(&self, i: usize, j: usize, k: usize) -> Option<usize> {
        let [n0, n1, n2] = self.shape();
        if i >= n0 || j >= n1 || k >= n2 {
            return None;
        }
        Some((i * n1 + j) * n2 + k)
    }

    /// Probability at node `(i, j, k)`.
    pub fn get(&self, i: usize, j: usize, k: usize) -> Option<f64> {
        self.flat_index(i, j, k).map(|idx| self.values[idx])
    }

    /// Concentrations at node `(i, j, k)`.
    pub fn point(&self, i: usize, j: usize, k: usize) -> Option<ConcentrationPoint> {
        self.flat_index(i, j, k)?;
        ConcentrationPoint::from_array([self.axes[0][i], self.axes[1][j], self.axes[2][k]]).ok()
    }

    /// `(min, max)` of the probability values.
    pub fn value_range(&self) -> (f64, f64) {
        self.values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }

    /// Split into `(axes, values)`.
    pub fn into_parts(self) -> ([Vec<f64>; 3], Vec<f64>) {
        (self.axes, self.values)
    }
}

/// Evaluate the interaction model on every node of the grid spanned by `axes`.
///
/// Each entry is computed with the same kernel as `civia_model::evaluate`, so
/// a node equals the pointwise result at its coordinates. First-axis slabs are
/// evaluated in parallel.
///
/// Fails with `InvalidInput` for an invalid axis or when the node count
/// `n0 * n1 * n2` does not fit in `usize`.
pub fn build_field(axes: &[AxisSpec; 3], params: &ModelParameters) -> Result<ScalarField> {
    for axis in axes {
        axis.validate()?;
    }

    let [n0, n1, n2] = [axes[0].samples, axes[1].samples, axes[2].samples];
    let (slab, nodes) = node_count(n0, n1, n2).ok_or_else(|| {
        Error::InvalidInput(format!("grid {}x{}x{} has too many nodes", n0, n1, n2))
    })?;

    let coords = [axes[0].coordinates(), axes[1].coordinates(), axes[2].coordinates()];
    let mut values = vec![0.0f64; nodes];

    let start = Instant::now();
    values.par_chunks_mut(slab).zip(coords[0].par_iter()).for_each(|(chunk, &x)| {
        for (row, &y) in chunk.chunks_mut(n2).zip(&coords[1]) {
            for (out, &z) in row.iter_mut().zip(&coords[2]) {
                let u = interaction::interaction_index([x, y, z], params);
                *out = interaction::probability(u, params);
            }
        }
    });
    log::debug!(
        "probability field built: {} nodes in {:.1} ms",
        values.len(),
        start.elapsed().as_secs_f64() * 1e3
    );

    Ok(ScalarField { axes: coords, values })
}

/// `(n1 * n2, n0 * n1 * n2)`, or `None` on overflow.
fn node_count(n0: usize, n1: usize, n2: usize) -> Option<(usize, usize)> {
    let slab = n1.checked_mul(n2)?;
    Some((slab, n0.checked_mul(slab)?))
}
