//! Net-run-rate proxy tuning.
//!
//! The proxy is a heuristic, not run-rate arithmetic: a win is worth
//! `base + scale * strength + noise`, floored at `floor`, where `strength`
//! is how lopsided the pre-match probability of the drawn outcome was.

use crate::error::{Result, SimError};
use serde::{Deserialize, Serialize};

/// Margin model parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarginModel {
    /// Margin of a coin-flip win (default 0.08)
    pub base: f64,
    /// Extra margin for a certain win (default 0.25)
    pub scale: f64,
    /// Half-width of the uniform noise band (default 0.03)
    pub noise: f64,
    /// Minimum margin; must be positive (default 0.02)
    pub floor: f64,
}

impl Default for MarginModel {
    fn default() -> Self {
        Self { base: 0.08, scale: 0.25, noise: 0.03, floor: 0.02 }
    }
}

impl MarginModel {
    /// No noise band, so margins depend only on the matchup.
    pub fn deterministic() -> Self {
        Self { noise: 0.0, ..Self::default() }
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("base", self.base),
            ("scale", self.scale),
            ("noise", self.noise),
            ("floor", self.floor),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(SimError::InvalidConfig(format!("margin.{name} must be finite, got {value}")));
        }
        if self.noise < 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "margin.noise must be >= 0, got {}",
                self.noise
            )));
        }
        if self.floor <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "margin.floor must be > 0, got {}",
                self.floor
            )));
        }
        Ok(())
    }
}
