//! Geometry types for pointer math
//!
//! Coordinates are CSS pixels in viewport space, matching what the
//! browser reports for pointer events and bounding boxes.

mod rect;
mod vec2;

pub use rect::Rect;
pub use vec2::Vec2;
