//! Hierarchical three-drug interaction model.
//!
//! ```text
//! U    = (c0/C50_0 + c1/C50_1) * (1 + (c2/C50_2)^gamma0)
//! P    = U^gamma / (1 + U^gamma)
//! eMAC = (P / (1 - P))^(1/gamma)
//! ```
//!
//! The sedative-hypnotic and the volatile add on a normalized scale; the
//! opioid multiplies that sum. All functions are pure.

use crate::math;
use civia_core::{ConcentrationPoint, ModelParameters, ModelResult, Result};

/// Interaction index `U` for a concentration triple in axis order.
///
/// The caller guarantees finite, non-negative components (true for any
/// `ConcentrationPoint` and for coordinates of a validated `AxisSpec`).
/// A zero primary sum gives `U = 0` whatever the opioid term, including when
/// that term overflows to infinity.
#[inline]
pub fn interaction_index(c: [f64; 3], params: &ModelParameters) -> f64 {
    let c50 = params.c50();
    let normalized_primary = c[0] / c50[0] + c[1] / c50[1];
    if normalized_primary == 0.0 {
        return 0.0;
    }
    let synergy_factor = 1.0 + (c[2] / c50[2]).powf(params.gamma0());
    normalized_primary * synergy_factor
}

/// Probability of no response for interaction index `u`.
#[inline]
pub fn probability(u: f64, params: &ModelParameters) -> f64 {
    math::hill(u, params.gamma())
}

/// eMAC for probability `p`; `None` once `p` has saturated to 1.0 or the
/// result is not finite.
#[inline]
pub fn emac(p: f64, params: &ModelParameters) -> Option<f64> {
    if p.is_nan() || p >= 1.0 {
        return None;
    }
    let value = (p / (1.0 - p)).powf(1.0 / params.gamma());
    value.is_finite().then_some(value)
}

/// Evaluate the model at one point.
pub fn evaluate(point: &ConcentrationPoint, params: &ModelParameters) -> ModelResult {
    let u = interaction_index(point.as_array(), params);
    let p = probability(u, params);
    ModelResult { u, p, emac: emac(p, params) }
}

/// Validate a raw triple, then evaluate it.
pub fn evaluate_array(c: [f64; 3], params: &ModelParameters) -> Result<ModelResult> {
    let point = ConcentrationPoint::from_array(c)?;
    Ok(evaluate(&point, params))
}

/// Evaluate every point in `points`, preserving order.
pub fn evaluate_batch(points: &[ConcentrationPoint], params: &ModelParameters) -> Vec<ModelResult> {
    points.iter().map(|pt| evaluate(pt, params)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::Preset;
    use approx::assert_relative_eq;
    use civia_core::Error;

    fn reference() -> ModelParameters {
        Preset::Reference.parameters()
    }

    #[test]
    fn test_origin_is_zero() {
        let r = evaluate_array([0.0, 0.0, 0.0], &reference()).unwrap();
        assert_eq!(r.u, 0.0);
        assert_eq!(r.p, 0.0);
        assert_eq!(r.emac, Some(0.0));
    }

    #[test]
    fn test_reference_case() {
        let r = evaluate_array([1.6, 0.4, 1.8], &reference()).unwrap();
        assert_relative_eq!(r.u, 1.353_486_756_6, max_relative = 1e-9);
        assert_relative_eq!(r.p, 0.770_429_182_0, max_relative = 1e-9);
        assert_relative_eq!(r.emac.unwrap(), r.u, max_relative = 1e-9);
    }

    #[test]
    fn test_half_effect_alone_gives_half() {
        let params = reference();
        let c50 = params.c50();
        let prop = evaluate_array([c50[0], 0.0, 0.0], &params).unwrap();
        assert_relative_eq!(prop.p, 0.5, epsilon = 1e-12);
        let sevo = evaluate_array([0.0, c50[1], 0.0], &params).unwrap();
        assert_relative_eq!(sevo.p, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_opioid_alone_has_no_effect() {
        // Remifentanil only scales the hypnotic/volatile sum.
        let r = evaluate_array([0.0, 0.0, 3.0], &reference()).unwrap();
        assert_eq!(r.u, 0.0);
        assert_eq!(r.p, 0.0);
    }

    #[test]
    fn test_saturation_is_degenerate_not_nan() {
        let r = evaluate_array([1e6, 1e6, 1e3], &reference()).unwrap();
        assert!(r.u.is_finite());
        assert_eq!(r.p, 1.0);
        assert!(r.is_degenerate());
        assert!(matches!(r.emac_value(), Err(Error::NumericDegenerate(_))));
    }

    #[test]
    fn test_overflowing_opioid_term_without_primary_is_zero() {
        let r = evaluate_array([0.0, 0.0, 1e300], &reference()).unwrap();
        assert_eq!(r.u, 0.0);
        assert_eq!(r.p, 0.0);
        assert_eq!(r.emac, Some(0.0));

        let steep = ModelParameters::new([3.4, 2.6, 0.01], 4.0, 200.0).unwrap();
        let r = evaluate_array([0.0, 0.0, 10.0], &steep).unwrap();
        assert_eq!(r.u, 0.0);
        assert_eq!(r.p, 0.0);
        assert!(!r.is_degenerate());
    }

    #[test]
    fn test_overflowing_opioid_term_with_primary_saturates() {
        let steep = ModelParameters::new([3.4, 2.6, 0.01], 4.0, 200.0).unwrap();
        let r = evaluate_array([0.1, 0.0, 10.0], &steep).unwrap();
        assert_eq!(r.u, f64::INFINITY);
        assert_eq!(r.p, 1.0);
        assert!(r.is_degenerate());
    }

    #[test]
    fn test_emac_never_nan() {
        let params = reference();
        assert_eq!(emac(f64::NAN, &params), None);
        assert_eq!(emac(1.0, &params), None);
        // Tiny gamma: (P/(1-P))^(1/gamma) overflows before P reaches 1.0.
        let flat = ModelParameters::new([3.4, 2.6, 1.7], 1e-3, 2.71).unwrap();
        assert_eq!(emac(0.999, &flat), None);
    }

    #[test]
    fn test_negative_rejected() {
        let params = reference();
        assert!(matches!(evaluate_array([-0.1, 0.0, 0.0], &params), Err(Error::InvalidInput(_))));
        assert!(matches!(evaluate_array([0.0, 0.0, -2.0], &params), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_batch_preserves_order() {
        let params = reference();
        let pts: Vec<ConcentrationPoint> = (0..10)
            .map(|i| ConcentrationPoint::new(i as f64 * 0.5, 0.2, 1.0).unwrap())
            .collect();
        let out = evaluate_batch(&pts, &params);
        assert_eq!(out.len(), pts.len());
        for (pt, r) in pts.iter().zip(&out) {
            assert_eq!(*r, evaluate(pt, &params));
        }
    }
}
