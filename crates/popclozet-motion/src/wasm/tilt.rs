//! Tilt binding

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, MouseEvent};

use crate::error::MotionError;
use crate::tilt::{Tilt, TiltConfig, TiltFrame};
use super::{bounds_of, pointer_of, set_style, to_js};

/// Listeners of one tilted element
#[wasm_bindgen]
pub struct TiltHandle {
    listeners: Vec<EventListener>,
}

#[wasm_bindgen]
impl TiltHandle {
    /// Remove all listeners
    #[wasm_bindgen]
    pub fn dispose(&mut self) {
        self.listeners.clear();
    }

    /// False for handles attached to a missing element or disposed
    #[wasm_bindgen(getter)]
    pub fn attached(&self) -> bool {
        !self.listeners.is_empty()
    }
}

/// Attach tilt to `element`
pub fn attach_tilt(element: Option<&HtmlElement>, config: TiltConfig) -> Result<TiltHandle, MotionError> {
    let tilt = Tilt::new(config)?;
    let Some(element) = element else {
        return Ok(TiltHandle { listeners: Vec::new() });
    };
    let tilt = Rc::new(RefCell::new(tilt));
    let mut listeners = Vec::with_capacity(3);

    let el = element.clone();
    let state = tilt.clone();
    listeners.push(EventListener::new(element, "mouseenter", move |_| {
        let transition = state.borrow_mut().pointer_enter();
        set_style(&el, "transition", &transition.css());
    }));

    let el = element.clone();
    let state = tilt.clone();
    listeners.push(EventListener::new(element, "mousemove", move |event| {
        let Some(event) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let frame = state.borrow_mut().pointer_move(pointer_of(event), bounds_of(&el));
        apply(&el, &frame);
    }));

    let el = element.clone();
    listeners.push(EventListener::new(element, "mouseleave", move |_| {
        let frame = tilt.borrow_mut().pointer_leave();
        apply(&el, &frame);
    }));

    Ok(TiltHandle { listeners })
}

fn apply(element: &HtmlElement, frame: &TiltFrame) {
    set_style(element, "transform", &frame.transform_css());
    set_style(element, "transition", &frame.transition.css());
}

/// Attach tilt from JS. `config_json` keys are camelCase; missing keys use defaults.
#[wasm_bindgen(js_name = attachTilt)]
pub fn attach_tilt_js(element: Option<HtmlElement>, config_json: Option<String>) -> Result<TiltHandle, JsValue> {
    let config = match config_json.as_deref() {
        Some(json) => TiltConfig::from_json(json).map_err(to_js)?,
        None => TiltConfig::default(),
    };
    attach_tilt(element.as_ref(), config).map_err(to_js)
}
