//! Browser entry point for the Popclozet landing page
//!
//! This crate runs on the page's main thread. It finds the interactive
//! elements through `data-*` attributes and binds them to the primitives in
//! `popclozet-motion`.
//!
//! ## Module Structure
//!
//! - `config` - Page configuration and boot errors
//! - `logger` - Console backend for the `log` facade
//! - `page` - Boot and teardown of every binding on the page
//! - `signup` - HTTP signup sink, toast bridge, and form bindings
//! - `nav` - Navigation bar binding
//!
//! ## Markup contract
//!
//! | attribute | effect |
//! |---|---|
//! | `data-tilt='{"maxAngleDeg":8}'` | pointer tilt |
//! | `data-magnetic='{"strength":0.4}'` | magnetic pointer |
//! | `data-carousel='{"autoplayIntervalMs":5000}'` | carousel root, slides marked `data-carousel-item` |
//! | `data-carousel-prev`, `data-carousel-next`, `data-carousel-dot="N"` | carousel controls |
//! | `data-signup-source="hero"` | email form |
//! | `data-nav` | navigation bar, `data-nav-toggle` opens the mobile menu |

// =============================================================================
// Module declarations
// =============================================================================

pub(crate) mod config;
pub(crate) mod logger;
pub(crate) mod nav;
pub(crate) mod page;
pub(crate) mod signup;

// =============================================================================
// Public re-exports
// =============================================================================

pub use config::{BootError, LandingConfig};
pub use page::LandingPage;
pub use signup::{HttpSignupSink, ToastBridge};

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    pub(crate) fn log(s: &str);
}
