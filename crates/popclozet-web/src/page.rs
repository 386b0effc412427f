//! Page boot and teardown

use std::rc::Rc;

use gloo::events::EventListener;
use popclozet_motion::wasm::{attach_magnetic, attach_tilt, CarouselController, MagneticHandle, TiltHandle};
use popclozet_motion::{CarouselConfig, CarouselSnapshot, MagneticConfig, Notifier, SignupSink, TiltConfig};
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::config::{BootError, LandingConfig};
use crate::log;
use crate::logger;
use crate::nav::NavBinding;
use crate::signup::{HttpSignupSink, SignupBinding, ToastBridge};

/// All elements matching `selector` that are `HtmlElement`s
fn html_elements(parent: &Document, selector: &str) -> Vec<HtmlElement> {
    let mut out = Vec::new();
    if let Ok(nodes) = parent.query_selector_all(selector) {
        for i in 0..nodes.length() {
            if let Some(element) = nodes.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
                out.push(element);
            }
        }
    }
    out
}

/// Parse the JSON in `attribute`; an empty attribute means defaults
fn element_config<C: DeserializeOwned + Default>(element: &Element, attribute: &str) -> Result<C, String> {
    match element.get_attribute(attribute) {
        Some(raw) if !raw.trim().is_empty() => serde_json::from_str(&raw).map_err(|e| e.to_string()),
        _ => Ok(C::default()),
    }
}

fn set_flag(element: &Element, attribute: &str, on: bool) {
    let result = if on {
        element.set_attribute(attribute, "")
    } else {
        element.remove_attribute(attribute)
    };
    if let Err(e) = result {
        log(&format!("[page] failed to toggle {}: {:?}", attribute, e));
    }
}

/// Wire prev/next/dot controls inside a carousel root
fn bind_carousel_controls(controller: &Rc<CarouselController>, listeners: &mut Vec<EventListener>) {
    let root = controller.root().clone();

    for selector in ["[data-carousel-prev]", "[data-carousel-next]"] {
        let Ok(Some(button)) = root.query_selector(selector) else {
            continue;
        };
        let c = controller.clone();
        let forward = selector == "[data-carousel-next]";
        listeners.push(EventListener::new(&button, "click", move |_| {
            if forward {
                c.next();
            } else {
                c.previous();
            }
        }));
    }

    let mut dots: Vec<(usize, Element)> = Vec::new();
    if let Ok(nodes) = root.query_selector_all("[data-carousel-dot]") {
        for i in 0..nodes.length() {
            let Some(dot) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            match dot.get_attribute("data-carousel-dot").and_then(|v| v.trim().parse::<usize>().ok()) {
                Some(index) => dots.push((index, dot)),
                None => log("[page] carousel dot without a numeric index"),
            }
        }
    }
    for (index, dot) in &dots {
        let c = controller.clone();
        let index = *index;
        listeners.push(EventListener::new(dot, "click", move |_| {
            if let Err(e) = c.go_to(index) {
                log(&format!("[page] {:?}", e));
            }
        }));
    }

    let buttons: Vec<Element> = ["[data-carousel-prev]", "[data-carousel-next]"]
        .iter()
        .filter_map(|s| root.query_selector(s).ok().flatten())
        .collect();
    let reflect = move |snapshot: &CarouselSnapshot| {
        for button in &buttons {
            set_flag(button, "disabled", snapshot.transitioning);
        }
        for (index, dot) in &dots {
            set_flag(dot, "aria-current", *index == snapshot.index);
        }
    };
    reflect(&controller.snapshot());
    controller.observe(reflect);
}

/// Every binding on the landing page
#[wasm_bindgen]
pub struct LandingPage {
    tilts: Vec<TiltHandle>,
    magnets: Vec<MagneticHandle>,
    carousels: Vec<Rc<CarouselController>>,
    signups: Vec<SignupBinding>,
    nav: Option<NavBinding>,
    listeners: Vec<EventListener>,
}

impl LandingPage {
    /// Bind every annotated element in `document`
    pub fn attach(config: LandingConfig) -> Result<Self, BootError> {
        let window = web_sys::window().ok_or(BootError::NoWindow)?;
        let document = window.document().ok_or(BootError::NoDocument)?;

        let mut page = LandingPage {
            tilts: Vec::new(),
            magnets: Vec::new(),
            carousels: Vec::new(),
            signups: Vec::new(),
            nav: None,
            listeners: Vec::new(),
        };

        for element in html_elements(&document, "[data-tilt]") {
            match element_config::<TiltConfig>(&element, "data-tilt")
                .and_then(|c| attach_tilt(Some(&element), c).map_err(|e| e.to_string()))
            {
                Ok(handle) => page.tilts.push(handle),
                Err(e) => log(&format!("[page] tilt skipped: {}", e)),
            }
        }

        for element in html_elements(&document, "[data-magnetic]") {
            match element_config::<MagneticConfig>(&element, "data-magnetic")
                .and_then(|c| attach_magnetic(Some(&element), c).map_err(|e| e.to_string()))
            {
                Ok(handle) => page.magnets.push(handle),
                Err(e) => log(&format!("[page] magnetic skipped: {}", e)),
            }
        }

        for element in html_elements(&document, "[data-carousel]") {
            match element_config::<CarouselConfig>(&element, "data-carousel")
                .and_then(|c| CarouselController::attach(&element, c).map_err(|e| e.to_string()))
            {
                Ok(controller) => {
                    let controller = Rc::new(controller);
                    bind_carousel_controls(&controller, &mut page.listeners);
                    page.carousels.push(controller);
                }
                Err(e) => log(&format!("[page] carousel skipped: {}", e)),
            }
        }

        let forms = html_elements(&document, "[data-signup-source]");
        match &config.signup_endpoint {
            Some(endpoint) => {
                let sink: Rc<dyn SignupSink> = Rc::new(HttpSignupSink::new(endpoint.clone()));
                let notifier: Rc<dyn Notifier> = Rc::new(ToastBridge);
                for form in &forms {
                    if let Some(binding) = SignupBinding::bind(form, sink.clone(), notifier.clone()) {
                        page.signups.push(binding);
                    }
                }
            }
            None if !forms.is_empty() => log("[page] no signup endpoint configured, forms left unbound"),
            None => {}
        }

        if let Some(root) = html_elements(&document, "[data-nav]").into_iter().next() {
            let threshold = config.nav_scrolled_threshold_px.map(f64::from);
            page.nav = Some(NavBinding::bind(&window, &document, &root, threshold));
        }

        log(&format!(
            "[page] bound {} tilt, {} magnetic, {} carousel, {} signup",
            page.tilts.len(),
            page.magnets.len(),
            page.carousels.len(),
            page.signups.len()
        ));
        Ok(page)
    }
}

#[wasm_bindgen]
impl LandingPage {
    /// Boot from `<meta>` configuration
    #[wasm_bindgen]
    pub fn boot() -> Result<LandingPage, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str(&BootError::NoDocument.to_string()))?;
        start(LandingConfig::from_document(&document))
    }

    /// Boot with explicit JSON configuration; unset keys fall back to `<meta>` tags
    #[wasm_bindgen(js_name = bootWith)]
    pub fn boot_with(config_json: &str) -> Result<LandingPage, JsValue> {
        let mut config = LandingConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            let meta = LandingConfig::from_document(&document);
            config.signup_endpoint = config.signup_endpoint.or(meta.signup_endpoint);
            config.log_level = config.log_level.or(meta.log_level);
        }
        start(config)
    }

    #[wasm_bindgen(getter)]
    pub fn carousel_count(&self) -> usize {
        self.carousels.len()
    }

    /// Current slide of the `index`-th carousel, in document order
    #[wasm_bindgen]
    pub fn carousel_index(&self, index: usize) -> Option<usize> {
        self.carousels.get(index).map(|c| c.snapshot().index)
    }

    /// Release every listener, timer and animation frame
    #[wasm_bindgen]
    pub fn dispose(&mut self) {
        self.listeners.clear();
        for tilt in &mut self.tilts {
            tilt.dispose();
        }
        for magnet in &mut self.magnets {
            magnet.dispose();
        }
        for carousel in &self.carousels {
            carousel.dispose();
        }
        self.tilts.clear();
        self.magnets.clear();
        self.carousels.clear();
        self.signups.clear();
        self.nav = None;
    }
}

/// Install the panic hook and console logger, then bind the page
fn start(config: LandingConfig) -> Result<LandingPage, JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logger::init(logger::parse_level(config.log_level.as_deref()));

    LandingPage::attach(config).map_err(|e| JsValue::from_str(&e.to_string()))
}
