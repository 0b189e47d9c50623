//! Detailing settings, loadable from TOML.

use std::path::Path;

use rebar_detail_math::Tolerance;
use serde::{Deserialize, Serialize};

use crate::error::{DetailError, Result};

/// Number of numbered body slots on the reference detail symbol.
pub const DEFAULT_MAX_BODY_SLOTS: usize = 18;

/// Name of the reference detail symbol.
pub const DEFAULT_SYMBOL_NAME: &str = "Simple_Bending_Detail";

/// Parameters shared by every bar of one detailing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailSettings {
    /// Tolerance for every length and angle comparison.
    pub tolerance: Tolerance,
    /// Numbered body slots available on the symbol.
    pub max_body_slots: usize,
    /// Symbol (family type) the detail is placed as.
    pub symbol_name: String,
}

impl Default for DetailSettings {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::DEFAULT,
            max_body_slots: DEFAULT_MAX_BODY_SLOTS,
            symbol_name: DEFAULT_SYMBOL_NAME.to_string(),
        }
    }
}

impl DetailSettings {
    /// Parse settings from a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let settings: Self = toml::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read and parse a TOML settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        let Tolerance { linear, angular } = self.tolerance;
        if !linear.is_finite() || !angular.is_finite() {
            return Err(DetailError::InvalidSettings(
                "tolerances must be finite".into(),
            ));
        }
        if linear <= 0.0 || angular <= 0.0 {
            return Err(DetailError::InvalidSettings(
                "tolerances must be positive".into(),
            ));
        }
        if self.tolerance.angular >= std::f64::consts::FRAC_PI_4 {
            return Err(DetailError::InvalidSettings(
                "angular tolerance must be well below a quarter turn".into(),
            ));
        }
        if self.max_body_slots == 0 {
            return Err(DetailError::InvalidSettings(
                "max_body_slots must be at least 1".into(),
            ));
        }
        if self.symbol_name.trim().is_empty() {
            return Err(DetailError::InvalidSettings(
                "symbol_name must not be empty".into(),
            ));
        }
        Ok(())
    }
}
