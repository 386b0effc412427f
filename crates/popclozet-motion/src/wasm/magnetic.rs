//! Magnetic pointer binding
//!
//! Pointer moves are observed on the window so the effect can start before
//! the pointer reaches the element. The frame loop holds only a weak
//! reference, so dropping the handle ends it.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, MouseEvent};

use crate::error::MotionError;
use crate::magnetic::{FrameRequest, Magnetic, MagneticConfig};
use super::{bounds_of, log, pointer_of, set_style, to_js};

struct MagneticShared {
    element: HtmlElement,
    state: RefCell<Magnetic>,
    frame: RefCell<Option<AnimationFrame>>,
}

impl MagneticShared {
    fn handle(self: &Rc<Self>, request: FrameRequest) {
        if request == FrameRequest::Schedule {
            self.schedule();
        }
    }

    fn schedule(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        let handle = request_animation_frame(move |_| {
            if let Some(shared) = weak.upgrade() {
                shared.on_frame();
            }
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn on_frame(self: &Rc<Self>) {
        self.frame.borrow_mut().take();
        let step = self.state.borrow_mut().step();
        set_style(&self.element, "transform", &step.frame.transform_css());
        if step.reschedule {
            self.schedule();
        }
    }

    fn cancel(&self) {
        self.frame.borrow_mut().take();
        self.state.borrow_mut().cancel_frame();
    }
}

/// Listeners and frame loop of one magnetic element
#[wasm_bindgen]
pub struct MagneticHandle {
    shared: Option<Rc<MagneticShared>>,
    listeners: Vec<EventListener>,
}

#[wasm_bindgen]
impl MagneticHandle {
    /// Remove listeners and cancel any pending frame
    #[wasm_bindgen]
    pub fn dispose(&mut self) {
        self.listeners.clear();
        if let Some(shared) = self.shared.take() {
            shared.cancel();
        }
    }

    #[wasm_bindgen(getter)]
    pub fn attached(&self) -> bool {
        self.shared.is_some()
    }
}

impl Drop for MagneticHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Attach the magnetic effect to `element`
pub fn attach_magnetic(
    element: Option<&HtmlElement>,
    config: MagneticConfig,
) -> Result<MagneticHandle, MotionError> {
    let magnetic = Magnetic::new(config)?;
    let inert = || MagneticHandle {
        shared: None,
        listeners: Vec::new(),
    };
    let Some(element) = element else {
        return Ok(inert());
    };
    let Some(window) = web_sys::window() else {
        log("[magnetic] no window, effect disabled");
        return Ok(inert());
    };

    let shared = Rc::new(MagneticShared {
        element: element.clone(),
        state: RefCell::new(magnetic),
        frame: RefCell::new(None),
    });
    let mut listeners = Vec::with_capacity(2);

    let s = shared.clone();
    listeners.push(EventListener::new(&window, "mousemove", move |event| {
        let Some(event) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let request = s.state.borrow_mut().pointer_moved(pointer_of(event), bounds_of(&s.element));
        s.handle(request);
    }));

    let s = shared.clone();
    listeners.push(EventListener::new(element, "mouseleave", move |_| {
        let request = s.state.borrow_mut().pointer_left();
        s.handle(request);
    }));

    Ok(MagneticHandle {
        shared: Some(shared),
        listeners,
    })
}

/// Attach the magnetic effect from JS
#[wasm_bindgen(js_name = attachMagnetic)]
pub fn attach_magnetic_js(
    element: Option<HtmlElement>,
    config_json: Option<String>,
) -> Result<MagneticHandle, JsValue> {
    let config = match config_json.as_deref() {
        Some(json) => MagneticConfig::from_json(json).map_err(to_js)?,
        None => MagneticConfig::default(),
    };
    attach_magnetic(element.as_ref(), config).map_err(to_js)
}
