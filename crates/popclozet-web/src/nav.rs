//! Navigation bar binding
//!
//! Sections are the elements whose ids are targeted by the bar's in-page
//! links. Their offsets are measured at bind time and again on resize.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use popclozet_motion::{NavState, ScrollSpy, Section};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, Window};

use crate::log;

const LINK_SELECTOR: &str = "a[href^=\"#\"]";
const TOGGLE_SELECTOR: &str = "[data-nav-toggle]";

struct NavShared {
    root: HtmlElement,
    document: Document,
    links: Vec<(String, Element)>,
    state: RefCell<NavState>,
}

impl NavShared {
    fn measure(&self) -> Vec<Section> {
        self.links
            .iter()
            .filter_map(|(id, _)| {
                let target: HtmlElement = self.document.get_element_by_id(id)?.dyn_into().ok()?;
                Some(Section::new(
                    id.clone(),
                    f64::from(target.offset_top()),
                    f64::from(target.offset_height()),
                ))
            })
            .collect()
    }

    fn render(&self) {
        let state = self.state.borrow();
        let dataset = self.root.dataset();
        let mut entries = vec![
            ("scrolled", state.is_scrolled().to_string()),
            ("open", state.is_menu_open().to_string()),
        ];
        match state.active_section() {
            Some(id) => entries.push(("active", id.to_string())),
            None => dataset.delete("active"),
        }
        for (key, value) in entries {
            if let Err(e) = dataset.set(key, &value) {
                log(&format!("[nav] failed to set data-{}: {:?}", key, e));
            }
        }

        for (id, link) in &self.links {
            let result = if state.active_section() == Some(id.as_str()) {
                link.set_attribute("aria-current", "true")
            } else {
                link.remove_attribute("aria-current")
            };
            if let Err(e) = result {
                log(&format!("[nav] failed to mark link #{}: {:?}", id, e));
            }
        }
    }

    fn scroll(&self, window: &Window) {
        let y = window.scroll_y().unwrap_or(0.0);
        if self.state.borrow_mut().on_scroll(y) {
            self.render();
        }
    }
}

/// Listeners of the navigation bar
pub struct NavBinding {
    _listeners: Vec<EventListener>,
}

impl NavBinding {
    pub fn bind(window: &Window, document: &Document, root: &HtmlElement, scrolled_threshold: Option<f64>) -> Self {
        let mut links = Vec::new();
        if let Ok(nodes) = root.query_selector_all(LINK_SELECTOR) {
            for i in 0..nodes.length() {
                let Some(link) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                    continue;
                };
                let Some(href) = link.get_attribute("href") else {
                    continue;
                };
                let id = href.trim_start_matches('#');
                if !id.is_empty() {
                    links.push((id.to_string(), link));
                }
            }
        }

        let mut state = NavState::new(ScrollSpy::new(Vec::new()));
        if let Some(threshold) = scrolled_threshold {
            state = state.with_scrolled_threshold(threshold);
        }
        let shared = Rc::new(NavShared {
            root: root.clone(),
            document: document.clone(),
            links,
            state: RefCell::new(state),
        });
        let sections = shared.measure();
        shared.state.borrow_mut().spy_mut().set_sections(sections);
        shared.scroll(window);
        shared.render();

        let mut listeners = Vec::new();

        let s = shared.clone();
        let w = window.clone();
        listeners.push(EventListener::new(window, "scroll", move |_| s.scroll(&w)));

        let s = shared.clone();
        let w = window.clone();
        listeners.push(EventListener::new(window, "resize", move |_| {
            let sections = s.measure();
            s.state.borrow_mut().spy_mut().set_sections(sections);
            s.scroll(&w);
        }));

        if let Ok(Some(toggle)) = root.query_selector(TOGGLE_SELECTOR) {
            let s = shared.clone();
            listeners.push(EventListener::new(&toggle, "click", move |_| {
                let open = s.state.borrow_mut().toggle_menu();
                s.render();
                if let Ok(Some(toggle)) = s.root.query_selector(TOGGLE_SELECTOR) {
                    if let Err(e) = toggle.set_attribute("aria-expanded", &open.to_string()) {
                        log(&format!("[nav] failed to set aria-expanded: {:?}", e));
                    }
                }
            }));
        }

        for (id, link) in &shared.links {
            let s = shared.clone();
            let id = id.clone();
            let options = EventListenerOptions::enable_prevent_default();
            listeners.push(EventListener::new_with_options(link, "click", options, move |event| {
                if !s.state.borrow_mut().navigate_to(&id) {
                    return;
                }
                event.prevent_default();
                if let Some(target) = s.document.get_element_by_id(&id) {
                    let options = ScrollIntoViewOptions::new();
                    options.set_behavior(ScrollBehavior::Smooth);
                    target.scroll_into_view_with_scroll_into_view_options(&options);
                }
                s.render();
            }));
        }

        Self { _listeners: listeners }
    }
}
