//! Pointer tilt
//!
//! Rotates an element in 3D proportionally to the pointer's offset from
//! its center. Each pointer event maps directly to one frame; there are no
//! timers, the browser's CSS transition smooths between frames.

mod config;

pub use config::TiltConfig;

use serde::Serialize;
use crate::error::MotionError;
use crate::math::{Rect, Vec2};

/// CSS transition applied to the transform
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TiltTransition {
    pub duration_ms: f64,
}

impl TiltTransition {
    /// Value for the `transition` style property
    pub fn css(&self) -> String {
        format!("transform {}ms ease-out", self.duration_ms)
    }
}

/// One computed tilt transform
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TiltFrame {
    pub perspective_px: f64,
    /// Rotation about the horizontal axis
    pub rotate_x_deg: f64,
    /// Rotation about the vertical axis
    pub rotate_y_deg: f64,
    pub scale: f64,
    pub transition: TiltTransition,
}

impl TiltFrame {
    /// Value for the `transform` style property
    pub fn transform_css(&self) -> String {
        format!(
            "perspective({}px) rotateX({}deg) rotateY({}deg) scale3d({s}, {s}, {s})",
            self.perspective_px,
            self.rotate_x_deg,
            self.rotate_y_deg,
            s = self.scale,
        )
    }

    /// True for the un-hovered transform
    pub fn is_rest(&self) -> bool {
        self.rotate_x_deg == 0.0 && self.rotate_y_deg == 0.0 && self.scale == 1.0
    }
}

/// Tilt state for one element
#[derive(Clone, Debug)]
pub struct Tilt {
    config: TiltConfig,
    hovering: bool,
}

impl Tilt {
    pub fn new(config: TiltConfig) -> Result<Self, MotionError> {
        config.validate()?;
        Ok(Self { config, hovering: false })
    }

    pub fn config(&self) -> &TiltConfig {
        &self.config
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    /// Pointer entered: arm the transition so the first move animates
    pub fn pointer_enter(&mut self) -> TiltTransition {
        self.hovering = true;
        self.transition()
    }

    /// Pointer moved over the element
    pub fn pointer_move(&mut self, pointer: Vec2, bounds: Rect) -> TiltFrame {
        self.hovering = true;
        let max = self.config.max_angle_deg;
        let rel = bounds.normalized_offset(pointer).unwrap_or(Vec2::ZERO);

        // `+ 0.0` folds -0.0 so the CSS never reads "rotateX(-0deg)"
        let rotate_x = (-max * rel.y).clamp(-max, max) + 0.0;
        let rotate_y = (max * rel.x).clamp(-max, max) + 0.0;

        TiltFrame {
            perspective_px: self.config.perspective_px,
            rotate_x_deg: rotate_x,
            rotate_y_deg: rotate_y,
            scale: self.config.hover_scale,
            transition: self.transition(),
        }
    }

    /// Pointer left: animate back to rest
    pub fn pointer_leave(&mut self) -> TiltFrame {
        self.hovering = false;
        self.rest_frame()
    }

    /// Transform with zero rotation and unit scale
    pub fn rest_frame(&self) -> TiltFrame {
        TiltFrame {
            perspective_px: self.config.perspective_px,
            rotate_x_deg: 0.0,
            rotate_y_deg: 0.0,
            scale: 1.0,
            transition: self.transition(),
        }
    }

    fn transition(&self) -> TiltTransition {
        TiltTransition { duration_ms: self.config.transition_ms }
    }
}
