//! Carousel phase and autoplay state

use serde::{Serialize, Serializer};

/// Slide-in direction of the last move
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    /// Previous slide enters from the left
    Backward,
    /// No move yet
    #[default]
    None,
    /// Next slide enters from the right
    Forward,
}

impl Direction {
    /// Sign as -1, 0 or +1
    #[inline]
    pub fn sign(self) -> i8 {
        match self {
            Direction::Backward => -1,
            Direction::None => 0,
            Direction::Forward => 1,
        }
    }

    /// Direction from the sign of `to - from`
    pub fn between(from: usize, to: usize) -> Self {
        match to.cmp(&from) {
            std::cmp::Ordering::Greater => Direction::Forward,
            std::cmp::Ordering::Less => Direction::Backward,
            std::cmp::Ordering::Equal => Direction::None,
        }
    }
}

impl Serialize for Direction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(self.sign())
    }
}

/// Navigation lock state
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Phase {
    /// Accepting moves
    Idle,
    /// A move is in flight; navigation locked until `until_ms`
    Transitioning {
        direction: Direction,
        until_ms: f64,
    },
}

impl Phase {
    #[inline]
    pub(crate) fn is_transitioning(&self) -> bool {
        matches!(self, Phase::Transitioning { .. })
    }

    pub(crate) fn deadline(&self) -> Option<f64> {
        match self {
            Phase::Idle => None,
            Phase::Transitioning { until_ms, .. } => Some(*until_ms),
        }
    }
}

/// Autoplay state. Once `Stopped` it never runs again.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Autoplay {
    Running { next_at_ms: f64 },
    Stopped,
}

impl Autoplay {
    #[inline]
    pub(crate) fn is_running(&self) -> bool {
        matches!(self, Autoplay::Running { .. })
    }

    pub(crate) fn deadline(&self) -> Option<f64> {
        match self {
            Autoplay::Running { next_at_ms } => Some(*next_at_ms),
            Autoplay::Stopped => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_between() {
        assert_eq!(Direction::between(0, 3), Direction::Forward);
        assert_eq!(Direction::between(4, 1), Direction::Backward);
        assert_eq!(Direction::between(2, 2), Direction::None);
    }

    #[test]
    fn test_direction_serializes_as_sign() {
        assert_eq!(serde_json::to_string(&Direction::Backward).unwrap(), "-1");
        assert_eq!(serde_json::to_string(&Direction::Forward).unwrap(), "1");
    }
}
