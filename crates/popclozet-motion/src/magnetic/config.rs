//! Magnetic pointer configuration

use serde::{Deserialize, Serialize};
use crate::error::MotionError;

/// Magnetic effect settings
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MagneticConfig {
    /// Fraction of the remaining distance closed per frame, in (0, 1]
    pub strength: f64,
    /// Pointer distance from center that activates the effect
    pub activation_radius_px: f64,
    /// Fraction of the raw pointer offset the element travels
    pub travel_factor: f64,
    /// Scale while active
    pub hover_scale: f64,
    /// Per-axis distance below which the element counts as settled
    pub settle_epsilon_px: f64,
}

impl Default for MagneticConfig {
    fn default() -> Self {
        Self {
            strength: 0.3,
            activation_radius_px: 50.0,
            travel_factor: 0.3,
            hover_scale: 1.05,
            settle_epsilon_px: 0.01,
        }
    }
}

impl MagneticConfig {
    /// Parse from a JSON object, filling missing keys with defaults
    pub fn from_json(json: &str) -> Result<Self, MotionError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MotionError> {
        if !(self.strength > 0.0 && self.strength <= 1.0) {
            return Err(MotionError::out_of_range("strength", "in (0, 1]", self.strength));
        }
        if !(self.activation_radius_px.is_finite() && self.activation_radius_px >= 0.0) {
            return Err(MotionError::out_of_range(
                "activationRadiusPx",
                "finite and >= 0",
                self.activation_radius_px,
            ));
        }
        if !(self.travel_factor.is_finite() && self.travel_factor >= 0.0) {
            return Err(MotionError::out_of_range("travelFactor", "finite and >= 0", self.travel_factor));
        }
        if !(self.hover_scale.is_finite() && self.hover_scale > 0.0) {
            return Err(MotionError::out_of_range("hoverScale", "finite and > 0", self.hover_scale));
        }
        if !(self.settle_epsilon_px.is_finite() && self.settle_epsilon_px > 0.0) {
            return Err(MotionError::out_of_range(
                "settleEpsilonPx",
                "finite and > 0",
                self.settle_epsilon_px,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navbar_button_config() {
        let config = MagneticConfig::from_json(r#"{"strength": 0.4, "activationRadiusPx": 80}"#).unwrap();
        assert_eq!(config.strength, 0.4);
        assert_eq!(config.activation_radius_px, 80.0);
        assert_eq!(config.travel_factor, 0.3);
    }

    #[test]
    fn test_strength_bounds() {
        assert!(MagneticConfig { strength: 1.0, ..Default::default() }.validate().is_ok());
        assert!(MagneticConfig { strength: 0.0, ..Default::default() }.validate().is_err());
        assert!(MagneticConfig { strength: 1.5, ..Default::default() }.validate().is_err());
        assert!(MagneticConfig { strength: f64::NAN, ..Default::default() }.validate().is_err());
    }
}
