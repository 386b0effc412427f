//! Interaction primitives for the Popclozet landing page
//!
//! This crate provides the only stateful behaviour on the page:
//! - Pointer tilt (3D rotation following the cursor over an element)
//! - Magnetic pointer (element eases toward a nearby cursor, then relaxes)
//! - Slide carousel (index, direction, autoplay, transition lock)
//! - Email signup form flow and navigation bar state
//!
//! ## Architecture
//!
//! - [`math`]: Geometry types (`Vec2`, `Rect`)
//! - [`tilt`]: Pointer tilt frames
//! - [`magnetic`]: Magnetic pointer smoothing loop
//! - [`carousel`]: Carousel state machine
//! - [`signup`]: Signup sink / notifier contracts and the form controller
//! - [`nav`]: Scroll spy and navigation bar state
//!
//! ## Example
//!
//! ```rust
//! use popclozet_motion::{Carousel, CarouselConfig};
//!
//! let mut carousel = Carousel::new(vec!["a", "b", "c"], CarouselConfig::default(), 0.0).unwrap();
//! carousel.next(0.0);
//! assert_eq!(carousel.index(), 1);
//! assert!(carousel.is_transitioning());
//!
//! carousel.tick(700.0);
//! assert!(!carousel.is_transitioning());
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Rust Core**: All state is plain Rust, testable without a browser
//! 2. **Time Abstraction**: Timed behaviour takes `now_ms`, the caller owns the clock
//! 3. **Owned Handles**: DOM bindings own their listeners, timers and frames

pub mod carousel;
pub mod magnetic;
pub mod math;
pub mod nav;
pub mod signup;
pub mod tilt;

mod error;

// DOM bindings (only available with "wasm" feature)
#[cfg(feature = "wasm")]
pub mod wasm;

pub use carousel::{
    Carousel, CarouselConfig, CarouselSnapshot, Direction, SubscriptionId, LOCK_DURATION_MS,
};
pub use error::{CarouselError, MotionError, SignupError};
pub use magnetic::{FrameRequest, Magnetic, MagneticConfig, MagneticFrame, MagneticStep};
pub use math::{Rect, Vec2};
pub use nav::{NavState, ScrollSpy, Section};
pub use signup::{
    EmailAddress, Notifier, PendingSignup, SignupForm, SignupSink, SignupSource, SubmitOutcome,
};
pub use tilt::{Tilt, TiltConfig, TiltFrame, TiltTransition};
