//! Magnetic pointer
//!
//! The element eases toward a scaled copy of the pointer offset while the
//! pointer is within the activation radius, and decays back to rest once it
//! leaves. Pointer handlers only move the target; the per-frame [`Magnetic::step`]
//! is the sole writer of `current`.
//!
//! The loop lives only while it has work: it keeps rescheduling while the
//! pointer is inside the radius or the element has not yet settled, then
//! stops. At most one frame is ever pending.

mod config;

pub use config::MagneticConfig;

use serde::Serialize;
use crate::error::MotionError;
use crate::math::{Rect, Vec2};

/// What the caller should do after feeding a pointer event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameRequest {
    /// Request a new animation frame
    Schedule,
    /// A frame is already pending, it will pick up the new target
    AlreadyPending,
    /// Nothing to animate
    Idle,
}

/// Transform for one animation frame
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MagneticFrame {
    pub offset: Vec2,
    pub scale: f64,
}

impl MagneticFrame {
    /// Value for the `transform` style property
    pub fn transform_css(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.offset.x, self.offset.y, self.scale
        )
    }
}

/// Result of one frame step
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MagneticStep {
    pub frame: MagneticFrame,
    /// Request another frame
    pub reschedule: bool,
}

/// Magnetic state for one attached element
#[derive(Clone, Debug)]
pub struct Magnetic {
    config: MagneticConfig,
    current: Vec2,
    target: Vec2,
    active: bool,
    frame_pending: bool,
}

impl Magnetic {
    pub fn new(config: MagneticConfig) -> Result<Self, MotionError> {
        config.validate()?;
        Ok(Self {
            config,
            current: Vec2::ZERO,
            target: Vec2::ZERO,
            active: false,
            frame_pending: false,
        })
    }

    pub fn config(&self) -> &MagneticConfig {
        &self.config
    }

    pub fn current(&self) -> Vec2 {
        self.current
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_frame_pending(&self) -> bool {
        self.frame_pending
    }

    /// True when the element rests on its target
    pub fn is_settled(&self) -> bool {
        !(self.target - self.current).exceeds(self.config.settle_epsilon_px)
    }

    /// Pointer moved anywhere in the window
    pub fn pointer_moved(&mut self, pointer: Vec2, bounds: Rect) -> FrameRequest {
        let offset = pointer - bounds.center();
        if offset.length() < self.config.activation_radius_px {
            self.active = true;
            self.target = offset * self.config.travel_factor;
        } else {
            self.release();
        }
        self.request_frame()
    }

    /// Pointer left the element
    pub fn pointer_left(&mut self) -> FrameRequest {
        self.release();
        self.request_frame()
    }

    /// Advance one frame. Call only from the frame callback.
    pub fn step(&mut self) -> MagneticStep {
        self.frame_pending = false;
        self.current += (self.target - self.current) * self.config.strength;

        let reschedule = self.active || !self.is_settled();
        if reschedule {
            self.frame_pending = true;
        } else {
            self.current = self.target;
            log::trace!("magnetic: settled at ({}, {})", self.current.x, self.current.y);
        }

        MagneticStep {
            frame: self.frame(),
            reschedule,
        }
    }

    /// Forget the pending frame (the owner cancelled it)
    pub fn cancel_frame(&mut self) {
        self.frame_pending = false;
    }

    /// Current transform
    pub fn frame(&self) -> MagneticFrame {
        MagneticFrame {
            offset: self.current,
            scale: if self.active { self.config.hover_scale } else { 1.0 },
        }
    }

    fn release(&mut self) {
        self.active = false;
        self.target = Vec2::ZERO;
    }

    fn request_frame(&mut self) -> FrameRequest {
        if !self.active && self.is_settled() {
            return FrameRequest::Idle;
        }
        if self.frame_pending {
            return FrameRequest::AlreadyPending;
        }
        self.frame_pending = true;
        FrameRequest::Schedule
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button() -> Rect {
        Rect::new(100.0, 100.0, 40.0, 20.0)
    }

    /// Drive frames until the loop stops, returning the number of frames run
    fn run_until_idle(magnetic: &mut Magnetic, limit: usize) -> usize {
        let mut frames = 0;
        while frames < limit {
            frames += 1;
            if !magnetic.step().reschedule {
                break;
            }
        }
        frames
    }

    #[test]
    fn test_pointer_inside_radius_activates() {
        let mut magnetic = Magnetic::new(MagneticConfig::default()).unwrap();
        let request = magnetic.pointer_moved(Vec2::new(130.0, 110.0), button());

        assert_eq!(request, FrameRequest::Schedule);
        assert!(magnetic.is_active());
        assert!((magnetic.target().x - 3.0).abs() < 1e-9);
        assert!((magnetic.target().y - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut magnetic = Magnetic::new(MagneticConfig::default()).unwrap();
        assert_eq!(magnetic.pointer_moved(Vec2::new(130.0, 110.0), button()), FrameRequest::Schedule);
        assert_eq!(magnetic.pointer_moved(Vec2::new(131.0, 112.0), button()), FrameRequest::AlreadyPending);
        assert_eq!(magnetic.pointer_moved(Vec2::new(125.0, 108.0), button()), FrameRequest::AlreadyPending);
        assert!(magnetic.is_frame_pending());
    }

    #[test]
    fn test_far_pointer_never_moves_element() {
        let mut magnetic = Magnetic::new(MagneticConfig::default()).unwrap();
        for i in 0..50 {
            let request = magnetic.pointer_moved(Vec2::new(400.0 + i as f64, 400.0), button());
            assert_eq!(request, FrameRequest::Idle);
        }
        assert_eq!(magnetic.current(), Vec2::ZERO);
        assert!(!magnetic.is_frame_pending());
    }

    #[test]
    fn test_first_step_closes_strength_fraction() {
        let mut magnetic = Magnetic::new(MagneticConfig::default()).unwrap();
        magnetic.pointer_moved(Vec2::new(150.0, 110.0), button());

        let step = magnetic.step();
        // target = 30 * 0.3 = 9, one step closes 30% of it
        assert!((step.frame.offset.x - 2.7).abs() < 1e-9);
        assert_eq!(step.frame.scale, 1.05);
        assert!(step.reschedule);
        assert_eq!(step.frame.transform_css(), format!("translate({}px, 0px) scale(1.05)", step.frame.offset.x));
    }

    #[test]
    fn test_active_loop_keeps_running_when_settled() {
        let mut magnetic = Magnetic::new(MagneticConfig::default()).unwrap();
        magnetic.pointer_moved(Vec2::new(130.0, 110.0), button());
        for _ in 0..200 {
            assert!(magnetic.step().reschedule);
        }
        assert!(magnetic.is_settled());
    }

    #[test]
    fn test_decays_to_rest_and_stops() {
        let mut magnetic = Magnetic::new(MagneticConfig::default()).unwrap();
        magnetic.pointer_moved(Vec2::new(150.0, 120.0), button());
        for _ in 0..10 {
            magnetic.step();
        }

        // The loop is still pending, so leaving does not schedule a second one
        assert_eq!(magnetic.pointer_left(), FrameRequest::AlreadyPending);
        let frames = run_until_idle(&mut magnetic, 1_000);
        assert!(frames < 1_000);
        assert_eq!(magnetic.current(), Vec2::ZERO);
        assert_eq!(magnetic.frame().scale, 1.0);
        assert!(!magnetic.is_frame_pending());
    }

    #[test]
    fn test_leaving_radius_releases() {
        let mut magnetic = Magnetic::new(MagneticConfig::default()).unwrap();
        magnetic.pointer_moved(Vec2::new(130.0, 110.0), button());
        magnetic.step();
        magnetic.pointer_moved(Vec2::new(500.0, 500.0), button());
        assert!(!magnetic.is_active());
        assert_eq!(magnetic.target(), Vec2::ZERO);
    }

    #[test]
    fn test_convergence_is_monotonic() {
        let mut magnetic = Magnetic::new(MagneticConfig { strength: 0.2, ..Default::default() }).unwrap();
        magnetic.pointer_moved(Vec2::new(150.0, 125.0), button());
        let target = magnetic.target();

        let mut last = (target - magnetic.current()).length();
        for _ in 0..40 {
            magnetic.step();
            let remaining = (target - magnetic.current()).length();
            assert!(remaining < last);
            last = remaining;
        }
    }

    #[test]
    fn test_full_strength_jumps_to_target() {
        let mut magnetic = Magnetic::new(MagneticConfig { strength: 1.0, ..Default::default() }).unwrap();
        magnetic.pointer_moved(Vec2::new(130.0, 110.0), button());
        magnetic.step();
        assert_eq!(magnetic.current(), magnetic.target());
    }

    #[test]
    fn test_cancel_frame_allows_restart() {
        let mut magnetic = Magnetic::new(MagneticConfig::default()).unwrap();
        magnetic.pointer_moved(Vec2::new(130.0, 110.0), button());
        magnetic.cancel_frame();
        assert_eq!(magnetic.pointer_moved(Vec2::new(131.0, 110.0), button()), FrameRequest::Schedule);
    }
}
