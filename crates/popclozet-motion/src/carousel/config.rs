//! Carousel configuration

use serde::{Deserialize, Serialize};
use crate::error::CarouselError;
use super::LOCK_DURATION_MS;

/// Default autoplay period
pub const AUTOPLAY_INTERVAL_MS: u32 = 5000;

/// Default visible slide transition (300ms exit followed by 300ms enter)
pub const SLIDE_TRANSITION_MS: u32 = 600;

/// Carousel timing settings
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CarouselConfig {
    /// Period between autoplay advances
    pub autoplay_interval_ms: u32,
    /// How long navigation stays locked after a move
    pub lock_ms: u32,
    /// Duration of the visible slide animation
    pub slide_transition_ms: u32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay_interval_ms: AUTOPLAY_INTERVAL_MS,
            lock_ms: LOCK_DURATION_MS,
            slide_transition_ms: SLIDE_TRANSITION_MS,
        }
    }
}

impl CarouselConfig {
    /// Config with a custom autoplay interval and default timings otherwise
    pub fn with_autoplay_interval(autoplay_interval_ms: u32) -> Self {
        Self {
            autoplay_interval_ms,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), CarouselError> {
        if self.autoplay_interval_ms == 0 {
            return Err(CarouselError::ZeroAutoplayInterval);
        }
        if self.lock_ms < self.slide_transition_ms {
            return Err(CarouselError::LockShorterThanTransition {
                lock_ms: self.lock_ms,
                transition_ms: self.slide_transition_ms,
            });
        }
        Ok(())
    }
}
