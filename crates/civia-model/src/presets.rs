//! Named, published parameter sets.

use civia_core::{Error, ModelParameters, Result};
use serde::Serialize;

/// A published parameter set.
///
/// Each preset expands to an immutable `ModelParameters`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Zhang et al. (2025) formulation with Ce50 values from Heyse (2012),
    /// Hannivoort (2016), Short (2002) and Bouillon (2004):
    /// propofol 3.4 µg/mL, sevoflurane 2.6 %, remifentanil 1.7 ng/mL,
    /// gamma 4.0, gamma0 2.71.
    Reference,
}

impl Preset {
    /// All presets.
    pub const ALL: [Preset; 1] = [Preset::Reference];

    /// Canonical lookup name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Reference => "reference",
        }
    }

    /// Literature the constants were taken from.
    pub fn citation(self) -> &'static str {
        match self {
            Self::Reference => {
                "Zhang et al. (2025); Ce50 from Heyse (2012), Hannivoort (2016), \
                 Short (2002), Bouillon (2004)"
            }
        }
    }

    /// Parameter record for this preset.
    pub fn parameters(self) -> ModelParameters {
        match self {
            Self::Reference => REFERENCE,
        }
    }

    /// Case-insensitive lookup. `civia` is accepted as an alias of `reference`.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "reference" | "civia" => Ok(Self::Reference),
            other => Err(Error::InvalidInput(format!(
                "unknown parameter preset '{}' (available: {})",
                other,
                Preset::ALL.map(|p| p.name()).join(", ")
            ))),
        }
    }
}

// Checked by `test_presets_are_valid`.
const REFERENCE: ModelParameters = ModelParameters::new_unchecked([3.4, 2.6, 1.7], 4.0, 2.71);

/// Parameters for a preset name.
pub fn preset(name: &str) -> Result<ModelParameters> {
    Ok(Preset::from_name(name)?.parameters())
}
