//! Error types for the interaction primitives.

use thiserror::Error;

/// Invalid effect configuration.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum MotionError {
    /// A numeric setting is outside its allowed range
    #[error("{field} must be {expected}, got {value}")]
    OutOfRange {
        /// Config field name (camelCase, as written in `data-*` attributes)
        field: &'static str,
        /// Human-readable allowed range
        expected: &'static str,
        /// The rejected value
        value: f64,
    },

    /// Config JSON could not be parsed
    #[error("invalid config: {0}")]
    InvalidJson(String),
}

impl MotionError {
    pub(crate) fn out_of_range(field: &'static str, expected: &'static str, value: f64) -> Self {
        Self::OutOfRange { field, expected, value }
    }
}

impl From<serde_json::Error> for MotionError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidJson(err.to_string())
    }
}

/// Errors from carousel construction and navigation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CarouselError {
    /// The carousel was created without any slides
    #[error("carousel needs at least one item")]
    Empty,

    /// `go_to` was asked for a slide that does not exist
    #[error("slide index {index} out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    /// The lock would release before the visible transition ends
    #[error("transition lock ({lock_ms}ms) must outlast the slide transition ({transition_ms}ms)")]
    LockShorterThanTransition { lock_ms: u32, transition_ms: u32 },

    /// Autoplay interval of zero would spin
    #[error("autoplay interval must be greater than zero")]
    ZeroAutoplayInterval,
}

/// Errors from the signup flow.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SignupError {
    /// The input is not shaped like an email address
    #[error("not a valid email address: {0:?}")]
    InvalidEmail(String),

    /// The sink could not be reached
    #[error("signup transport failed: {0}")]
    Transport(String),

    /// The sink answered but refused the signup
    #[error("signup rejected with status {status}")]
    Rejected { status: u16 },
}
