//! Tilt configuration

use serde::{Deserialize, Serialize};
use crate::error::MotionError;

/// Tilt effect settings
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TiltConfig {
    /// Rotation bound on each axis, in degrees
    pub max_angle_deg: f64,
    /// CSS perspective distance
    pub perspective_px: f64,
    /// Uniform scale while hovered
    pub hover_scale: f64,
    /// Transform transition duration
    pub transition_ms: f64,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            max_angle_deg: 15.0,
            perspective_px: 1000.0,
            hover_scale: 1.05,
            transition_ms: 1000.0,
        }
    }
}

impl TiltConfig {
    /// Parse from a JSON object, filling missing keys with defaults
    pub fn from_json(json: &str) -> Result<Self, MotionError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MotionError> {
        if !(self.max_angle_deg.is_finite() && self.max_angle_deg >= 0.0) {
            return Err(MotionError::out_of_range("maxAngleDeg", "finite and >= 0", self.max_angle_deg));
        }
        if !(self.perspective_px.is_finite() && self.perspective_px > 0.0) {
            return Err(MotionError::out_of_range("perspectivePx", "finite and > 0", self.perspective_px));
        }
        if !(self.hover_scale.is_finite() && self.hover_scale > 0.0) {
            return Err(MotionError::out_of_range("hoverScale", "finite and > 0", self.hover_scale));
        }
        if !(self.transition_ms.is_finite() && self.transition_ms >= 0.0) {
            return Err(MotionError::out_of_range("transitionMs", "finite and >= 0", self.transition_ms));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = TiltConfig::from_json(r#"{"maxAngleDeg": 8, "hoverScale": 1.03, "transitionMs": 400}"#).unwrap();
        assert_eq!(config.max_angle_deg, 8.0);
        assert_eq!(config.hover_scale, 1.03);
        assert_eq!(config.transition_ms, 400.0);
        assert_eq!(config.perspective_px, 1000.0);
    }

    #[test]
    fn test_rejects_negative_angle() {
        let err = TiltConfig::from_json(r#"{"maxAngleDeg": -1}"#).unwrap_err();
        assert!(matches!(err, MotionError::OutOfRange { field: "maxAngleDeg", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(TiltConfig::from_json("{"), Err(MotionError::InvalidJson(_))));
    }
}
