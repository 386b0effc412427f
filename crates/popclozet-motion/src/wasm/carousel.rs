//! Carousel binding
//!
//! Slides are the `[data-carousel-item]` children of a root element. The
//! controller keeps one timeout armed for the carousel's next deadline and
//! re-arms it after every change. JS subscribers are called after all
//! borrows are released, so they may navigate from inside the callback.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use crate::carousel::{Carousel, CarouselConfig, CarouselSnapshot, SubscriptionId};
use crate::error::CarouselError;
use super::{date_now, log, to_js};

/// Selector for slides under the carousel root
pub const ITEM_SELECTOR: &str = "[data-carousel-item]";

struct CarouselShared {
    root: HtmlElement,
    carousel: RefCell<Carousel<Element>>,
    render: Cell<Option<SubscriptionId>>,
    timer: RefCell<Option<Timeout>>,
    listeners: RefCell<Vec<(u32, js_sys::Function)>>,
    next_listener: Cell<u32>,
    disposed: Cell<bool>,
}

impl CarouselShared {
    /// Run an operation against the carousel, then re-arm and notify
    fn run<R>(self: &Rc<Self>, op: impl FnOnce(&mut Carousel<Element>, f64) -> R) -> Option<R> {
        if self.disposed.get() {
            return None;
        }
        let (result, changed) = {
            let mut carousel = self.carousel.borrow_mut();
            let before = carousel.snapshot();
            let result = op(&mut carousel, date_now());
            let after = carousel.snapshot();
            (result, (after != before).then_some(after))
        };
        self.arm();
        if let Some(snapshot) = changed {
            self.notify(&snapshot);
        }
        Some(result)
    }

    fn arm(self: &Rc<Self>) {
        let deadline = self.carousel.borrow().next_deadline();
        let mut timer = self.timer.borrow_mut();
        timer.take();
        if self.disposed.get() {
            return;
        }
        if let Some(deadline) = deadline {
            let delay = (deadline - date_now()).max(0.0).ceil() as u32;
            let weak = Rc::downgrade(self);
            *timer = Some(Timeout::new(delay, move || {
                if let Some(shared) = weak.upgrade() {
                    shared.run(|carousel, now| carousel.tick(now));
                }
            }));
        }
    }

    fn notify(&self, snapshot: &CarouselSnapshot) {
        let listeners: Vec<js_sys::Function> =
            self.listeners.borrow().iter().map(|(_, f)| f.clone()).collect();
        if listeners.is_empty() {
            return;
        }
        let value = snapshot_value(snapshot);
        for listener in listeners {
            if let Err(e) = listener.call1(&JsValue::NULL, &value) {
                log(&format!("[carousel] subscriber threw: {:?}", e));
            }
        }
    }
}

fn snapshot_value(snapshot: &CarouselSnapshot) -> JsValue {
    serde_json::to_string(snapshot)
        .ok()
        .and_then(|json| js_sys::JSON::parse(&json).ok())
        .unwrap_or(JsValue::NULL)
}

/// Reflect a snapshot onto the DOM: only the current slide is visible
fn render(root: &HtmlElement, items: &[Element], snapshot: &CarouselSnapshot) {
    for (i, item) in items.iter().enumerate() {
        let result = if i == snapshot.index {
            item.remove_attribute("hidden")
        } else {
            item.set_attribute("hidden", "")
        };
        if let Err(e) = result {
            log(&format!("[carousel] failed to toggle slide {}: {:?}", i, e));
        }
    }
    let dataset = root.dataset();
    let entries = [
        ("direction", snapshot.direction.sign().to_string()),
        ("transitioning", snapshot.transitioning.to_string()),
        ("autoplay", snapshot.autoplaying.to_string()),
    ];
    for (key, value) in entries {
        if let Err(e) = dataset.set(key, &value) {
            log(&format!("[carousel] failed to set data-{}: {:?}", key, e));
        }
    }
}

/// Carousel bound to a root element
#[wasm_bindgen]
pub struct CarouselController {
    shared: Rc<CarouselShared>,
}

impl CarouselController {
    /// Bind to the slides under `root`
    pub fn attach(root: &HtmlElement, config: CarouselConfig) -> Result<Self, CarouselError> {
        let mut items = Vec::new();
        if let Ok(nodes) = root.query_selector_all(ITEM_SELECTOR) {
            for i in 0..nodes.length() {
                if let Some(element) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                    items.push(element);
                }
            }
        }

        let mut carousel = Carousel::new(items, config, date_now())?;
        let render_root = root.clone();
        let render_items = carousel.items().to_vec();
        render(root, &render_items, &carousel.snapshot());
        let render_id = carousel.subscribe(move |snapshot| render(&render_root, &render_items, snapshot));

        let shared = Rc::new(CarouselShared {
            root: root.clone(),
            carousel: RefCell::new(carousel),
            render: Cell::new(Some(render_id)),
            timer: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(0),
            disposed: Cell::new(false),
        });
        shared.arm();
        Ok(Self { shared })
    }

    pub fn snapshot(&self) -> CarouselSnapshot {
        self.shared.carousel.borrow().snapshot()
    }

    pub fn root(&self) -> &HtmlElement {
        &self.shared.root
    }

    /// Register a Rust observer. It runs while the carousel is borrowed, so
    /// it must only touch the DOM, never this controller.
    pub fn observe(&self, observer: impl FnMut(&CarouselSnapshot) + 'static) -> SubscriptionId {
        self.shared.carousel.borrow_mut().subscribe(observer)
    }
}

#[wasm_bindgen]
impl CarouselController {
    /// Bind from JS. `config_json` keys: autoplayIntervalMs, lockMs, slideTransitionMs.
    #[wasm_bindgen(constructor)]
    pub fn new(root: HtmlElement, config_json: Option<String>) -> Result<CarouselController, JsValue> {
        let config = match config_json.as_deref() {
            Some(json) => serde_json::from_str(json).map_err(to_js)?,
            None => CarouselConfig::default(),
        };
        Self::attach(&root, config).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn next(&self) -> bool {
        self.shared.run(|c, now| c.next(now)).unwrap_or(false)
    }

    #[wasm_bindgen]
    pub fn previous(&self) -> bool {
        self.shared.run(|c, now| c.previous(now)).unwrap_or(false)
    }

    #[wasm_bindgen(js_name = goTo)]
    pub fn go_to(&self, index: usize) -> Result<bool, JsValue> {
        match self.shared.run(|c, now| c.go_to(index, now)) {
            Some(result) => result.map_err(to_js),
            None => Ok(false),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn index(&self) -> usize {
        self.shared.carousel.borrow().index()
    }

    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.shared.carousel.borrow().len()
    }

    /// Current state as JSON
    #[wasm_bindgen]
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Call `listener(snapshot)` after every change. Returns an id for `unsubscribe`.
    #[wasm_bindgen]
    pub fn subscribe(&self, listener: js_sys::Function) -> u32 {
        let id = self.shared.next_listener.get();
        self.shared.next_listener.set(id.wrapping_add(1));
        self.shared.listeners.borrow_mut().push((id, listener));
        id
    }

    #[wasm_bindgen]
    pub fn unsubscribe(&self, id: u32) -> bool {
        let mut listeners = self.shared.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    /// Clear timers and subscribers; later calls are no-ops
    #[wasm_bindgen]
    pub fn dispose(&self) {
        if self.shared.disposed.replace(true) {
            return;
        }
        self.shared.timer.borrow_mut().take();
        self.shared.listeners.borrow_mut().clear();
        if let Some(id) = self.shared.render.take() {
            self.shared.carousel.borrow_mut().unsubscribe(id);
        }
    }
}

impl Drop for CarouselController {
    fn drop(&mut self) {
        self.dispose();
    }
}
