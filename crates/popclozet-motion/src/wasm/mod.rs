//! DOM bindings for the interaction primitives
//!
//! Each `attach*` call owns its listeners, timers and animation frames and
//! releases them on `dispose()` or drop. Attaching to a missing element
//! returns an inert handle.

mod carousel;
mod magnetic;
mod tilt;

pub use carousel::CarouselController;
pub use magnetic::{attach_magnetic, MagneticHandle};
pub use tilt::{attach_tilt, TiltHandle};

use std::fmt::Display;

use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, MouseEvent};

use crate::math::{Rect, Vec2};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);

    #[wasm_bindgen(js_namespace = Date, js_name = now)]
    fn date_now() -> f64;
}

/// Viewport bounding box of an element
pub(crate) fn bounds_of(element: &Element) -> Rect {
    let r = element.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.width(), r.height())
}

/// Pointer position of a mouse event in viewport coordinates
pub(crate) fn pointer_of(event: &MouseEvent) -> Vec2 {
    Vec2::new(f64::from(event.client_x()), f64::from(event.client_y()))
}

pub(crate) fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(e) = element.style().set_property(property, value) {
        log(&format!("[motion] failed to set {}: {:?}", property, e));
    }
}

pub(crate) fn to_js(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
