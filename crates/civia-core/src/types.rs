//! Common data types for CIVIA

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// The three concentration axes of the interaction surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrugAxis {
    /// Sedative-hypnotic (propofol effect-site concentration).
    Propofol,
    /// Volatile anesthetic (end-tidal sevoflurane).
    Sevoflurane,
    /// Opioid (remifentanil effect-site concentration).
    Remifentanil,
}

impl DrugAxis {
    /// All axes in field order.
    pub const ALL: [DrugAxis; 3] =
        [DrugAxis::Propofol, DrugAxis::Sevoflurane, DrugAxis::Remifentanil];

    /// Position of this axis in a concentration triple.
    pub fn index(self) -> usize {
        match self {
            DrugAxis::Propofol => 0,
            DrugAxis::Sevoflurane => 1,
            DrugAxis::Remifentanil => 2,
        }
    }

    /// Short axis label.
    pub fn label(self) -> &'static str {
        match self {
            DrugAxis::Propofol => "CeProp",
            DrugAxis::Sevoflurane => "EtSevo",
            DrugAxis::Remifentanil => "CeRemi",
        }
    }

    /// Concentration unit.
    pub fn unit(self) -> &'static str {
        match self {
            DrugAxis::Propofol => "µg/mL",
            DrugAxis::Sevoflurane => "%",
            DrugAxis::Remifentanil => "ng/mL",
        }
    }
}

/// A concentration triple (propofol, sevoflurane, remifentanil).
///
/// All components are finite and `>= 0`. Negative values are rejected rather
/// than clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConcentrationPoint {
    values: [f64; 3],
}

impl ConcentrationPoint {
    /// Create a validated point.
    pub fn new(propofol: f64, sevoflurane: f64, remifentanil: f64) -> Result<Self> {
        Self::from_array([propofol, sevoflurane, remifentanil])
    }

    /// Create a validated point from a triple in axis order.
    pub fn from_array(values: [f64; 3]) -> Result<Self> {
        for axis in DrugAxis::ALL {
            let v = values[axis.index()];
            if !v.is_finite() || v < 0.0 {
                return Err(Error::InvalidInput(format!(
                    "{} concentration must be finite and >= 0, got {}",
                    axis.label(),
                    v
                )));
            }
        }
        Ok(Self { values })
    }

    /// Concentration along `axis`.
    pub fn get(&self, axis: DrugAxis) -> f64 {
        self.values[axis.index()]
    }

    /// Triple in axis order.
    pub fn as_array(&self) -> [f64; 3] {
        self.values
    }
}

/// Output of one interaction model evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelResult {
    /// Interaction index `U >= 0`.
    pub u: f64,
    /// Probability of no response.
    pub p: f64,
    /// Equivalent MAC. `None` when `p` saturated to 1.0 or eMAC overflowed.
    pub emac: Option<f64>,
}

impl ModelResult {
    /// Whether eMAC is undefined (`p` saturated to 1.0 or eMAC overflowed).
    pub fn is_degenerate(&self) -> bool {
        self.emac.is_none()
    }

    /// eMAC, or `Error::NumericDegenerate` when it is undefined.
    pub fn emac_value(&self) -> Result<f64> {
        self.emac.ok_or_else(|| {
            Error::NumericDegenerate(format!("eMAC undefined at U={} (P={})", self.u, self.p))
        })
    }
}

/// One sampling axis: `samples` evenly spaced coordinates over `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    /// First coordinate.
    pub min: f64,
    /// Last coordinate (inclusive).
    pub max: f64,
    /// Number of coordinates.
    pub samples: usize,
}

impl AxisSpec {
    /// Create a validated axis.
    pub fn new(min: f64, max: f64, samples: usize) -> Result<Self> {
        let spec = Self { min, max, samples };
        spec.validate()?;
        Ok(spec)
    }

    /// Check `0 <= min < max` (both finite) and `samples >= 2`.
    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(Error::InvalidInput(format!(
                "axis bounds must be finite, got [{}, {}]",
                self.min, self.max
            )));
        }
        if self.min < 0.0 {
            return Err(Error::InvalidInput(format!("axis min must be >= 0, got {}", self.min)));
        }
        if self.max <= self.min {
            return Err(Error::InvalidInput(format!(
                "axis span must be positive, got [{}, {}]",
                self.min, self.max
            )));
        }
        if self.samples < 2 {
            return Err(Error::InvalidInput(format!(
                "axis needs at least 2 samples, got {}",
                self.samples
            )));
        }
        Ok(())
    }

    /// Coordinate spacing.
    pub fn step(&self) -> f64 {
        (self.max - self.min) / (self.samples - 1) as f64
    }

    /// Coordinates, evenly spaced, `min` and `max` included exactly.
    pub fn coordinates(&self) -> Vec<f64> {
        let n = self.samples;
        let span = self.max - self.min;
        let mut out: Vec<f64> = (0..n)
            .map(|i| self.min + span * (i as f64 / (n - 1) as f64))
            .collect();
        if let Some(last) = out.last_mut() {
            *last = self.max;
        }
        out
    }

    /// Reference sampling domain: propofol 0-6, sevoflurane 0-3, remifentanil 0-4,
    /// 60 samples each.
    pub fn reference_domain() -> [AxisSpec; 3] {
        [
            AxisSpec { min: 0.0, max: 6.0, samples: 60 },
            AxisSpec { min: 0.0, max: 3.0, samples: 60 },
            AxisSpec { min: 0.0, max: 4.0, samples: 60 },
        ]
    }
}

/// A named probability threshold with a tolerance band.
///
/// A field node is in-band iff `|p - target| <= half_width`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsoLevelSpec {
    /// Band name (e.g. `loss_of_response`).
    pub name: String,
    /// Target probability in `[0, 1]`.
    pub target: f64,
    /// Half-width of the band, `>= 0`.
    pub half_width: f64,
}

impl IsoLevelSpec {
    /// Create a validated iso-level.
    pub fn new(name: impl Into<String>, target: f64, half_width: f64) -> Result<Self> {
        let spec = Self { name: name.into(), target, half_width };
        spec.validate()?;
        Ok(spec)
    }

    /// Check the name is non-empty, `target` in `[0, 1]` and `half_width >= 0`.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidInput("iso-level name must not be empty".into()));
        }
        if !self.target.is_finite() || !(0.0..=1.0).contains(&self.target) {
            return Err(Error::InvalidInput(format!(
                "iso-level '{}' target must be in [0, 1], got {}",
                self.name, self.target
            )));
        }
        if !self.half_width.is_finite() || self.half_width < 0.0 {
            return Err(Error::InvalidInput(format!(
                "iso-level '{}' half-width must be finite and >= 0, got {}",
                self.name, self.half_width
            )));
        }
        Ok(())
    }

    /// Loss-of-response boundary, P = 0.50 ± 0.01.
    pub fn loss_of_response() -> Self {
        Self { name: "loss_of_response".into(), target: 0.50, half_width: 0.01 }
    }

    /// High-probability boundary, P = 0.95 ± 0.01.
    pub fn high_probability() -> Self {
        Self { name: "high_probability".into(), target: 0.95, half_width: 0.01 }
    }

    /// The two bands always drawn together.
    pub fn standard() -> Vec<Self> {
        vec![Self::loss_of_response(), Self::high_probability()]
    }

    /// In-band predicate.
    #[inline]
    pub fn contains(&self, p: f64) -> bool {
        (p - self.target).abs() <= self.half_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_point_rejects_negative_and_non_finite() {
        assert!(ConcentrationPoint::new(1.0, 0.5, 0.0).is_ok());
        assert!(matches!(ConcentrationPoint::new(-0.1, 0.5, 0.0), Err(Error::InvalidInput(_))));
        assert!(matches!(ConcentrationPoint::new(1.0, 0.5, -1e-12), Err(Error::InvalidInput(_))));
        assert!(ConcentrationPoint::new(f64::NAN, 0.0, 0.0).is_err());
        assert!(ConcentrationPoint::new(0.0, f64::INFINITY, 0.0).is_err());
    }

    #[test]
    fn test_point_accessors() {
        let p = ConcentrationPoint::new(1.6, 0.4, 1.8).unwrap();
        assert_eq!(p.get(DrugAxis::Propofol), 1.6);
        assert_eq!(p.get(DrugAxis::Sevoflurane), 0.4);
        assert_eq!(p.get(DrugAxis::Remifentanil), 1.8);
        assert_eq!(p.as_array(), [1.6, 0.4, 1.8]);
    }

    #[test]
    fn test_emac_value_degenerate() {
        let ok = ModelResult { u: 1.0, p: 0.5, emac: Some(1.0) };
        assert!(!ok.is_degenerate());
        assert_eq!(ok.emac_value().unwrap(), 1.0);

        let sat = ModelResult { u: 1e12, p: 1.0, emac: None };
        assert!(sat.is_degenerate());
        assert!(matches!(sat.emac_value(), Err(Error::NumericDegenerate(_))));
    }

    #[test]
    fn test_axis_validation() {
        assert!(AxisSpec::new(0.0, 6.0, 2).is_ok());
        assert!(AxisSpec::new(0.0, 6.0, 1).is_err());
        assert!(AxisSpec::new(0.0, 6.0, 0).is_err());
        assert!(AxisSpec::new(2.0, 2.0, 10).is_err());
        assert!(AxisSpec::new(3.0, 2.0, 10).is_err());
        assert!(AxisSpec::new(-1.0, 2.0, 10).is_err());
        assert!(AxisSpec::new(0.0, f64::INFINITY, 10).is_err());
    }

    #[test]
    fn test_axis_coordinates_inclusive() {
        let axis = AxisSpec::new(0.0, 3.0, 60).unwrap();
        let xs = axis.coordinates();
        assert_eq!(xs.len(), 60);
        assert_eq!(xs[0], 0.0);
        assert_eq!(xs[59], 3.0);
        assert_relative_eq!(xs[1] - xs[0], axis.step(), epsilon = 1e-12);
        assert!(xs.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_reference_domain_is_valid() {
        for axis in AxisSpec::reference_domain() {
            axis.validate().unwrap();
            assert_eq!(axis.samples, 60);
        }
    }

    #[test]
    fn test_iso_level_validation_and_contains() {
        let lor = IsoLevelSpec::loss_of_response();
        lor.validate().unwrap();
        assert!(lor.contains(0.5));
        assert!(lor.contains(0.505));
        assert!(!lor.contains(0.52));

        assert!(IsoLevelSpec::new("", 0.5, 0.01).is_err());
        assert!(IsoLevelSpec::new("x", 1.5, 0.01).is_err());
        assert!(IsoLevelSpec::new("x", 0.5, -0.01).is_err());
        assert_eq!(IsoLevelSpec::standard().len(), 2);
    }
}
