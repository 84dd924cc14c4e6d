//! Interaction model parameter records.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Immutable parameter set of the hierarchical interaction model.
///
/// `c50` holds the half-effect concentrations of the sedative-hypnotic, the
/// volatile and the opioid axis (in that order). `gamma` is the steepness of
/// the final logistic; `gamma0` is the synergy exponent applied to the opioid
/// axis.
///
/// Every constructor (including deserialization) validates that all five
/// values are finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawModelParameters")]
pub struct ModelParameters {
    c50: [f64; 3],
    gamma: f64,
    gamma0: f64,
}

#[derive(Deserialize)]
struct RawModelParameters {
    c50: [f64; 3],
    gamma: f64,
    gamma0: f64,
}

impl TryFrom<RawModelParameters> for ModelParameters {
    type Error = Error;

    fn try_from(raw: RawModelParameters) -> Result<Self> {
        Self::new(raw.c50, raw.gamma, raw.gamma0)
    }
}

impl ModelParameters {
    /// Create a validated parameter set.
    pub fn new(c50: [f64; 3], gamma: f64, gamma0: f64) -> Result<Self> {
        for (i, &c) in c50.iter().enumerate() {
            if !c.is_finite() || c <= 0.0 {
                return Err(Error::InvalidInput(format!(
                    "c50[{}] must be finite and > 0, got {}",
                    i, c
                )));
            }
        }
        if !gamma.is_finite() || gamma <= 0.0 {
            return Err(Error::InvalidInput(format!("gamma must be finite and > 0, got {}", gamma)));
        }
        if !gamma0.is_finite() || gamma0 <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "gamma0 must be finite and > 0, got {}",
                gamma0
            )));
        }
        Ok(Self { c50, gamma, gamma0 })
    }

    /// Build a record without validation, for compile-time constants.
    ///
    /// The caller guarantees every value is finite and strictly positive.
    pub const fn new_unchecked(c50: [f64; 3], gamma: f64, gamma0: f64) -> Self {
        Self { c50, gamma, gamma0 }
    }

    /// Parse and validate a JSON record `{"c50": [..3], "gamma": .., "gamma0": ..}`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Half-effect concentrations, one per drug axis.
    pub fn c50(&self) -> [f64; 3] {
        self.c50
    }

    /// Primary steepness exponent.
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Synergy exponent on the opioid axis.
    pub fn gamma0(&self) -> f64 {
        self.gamma0
    }
}
