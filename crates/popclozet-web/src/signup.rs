//! Signup sink, toast bridge and form bindings
//!
//! The toast UI lives in JS. `window.PopclozetToast.success(title, detail)`
//! and `.error(title, detail)` are called when present; otherwise the
//! message goes to the console.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use gloo::events::{EventListener, EventListenerOptions};
use gloo::net::http::Request;
use popclozet_motion::{EmailAddress, Notifier, SignupError, SignupForm, SignupSink, SignupSource};
use serde::Serialize;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlInputElement};

use crate::log;

/// Posts signups as JSON to a hosted endpoint
#[derive(Clone, Debug)]
pub struct HttpSignupSink {
    endpoint: String,
}

impl HttpSignupSink {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into() }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Row stored by the endpoint
#[derive(Serialize)]
struct SignupRow<'a> {
    email: &'a EmailAddress,
    source: SignupSource,
}

#[async_trait(?Send)]
impl SignupSink for HttpSignupSink {
    async fn submit_signup(&self, email: &EmailAddress, source: SignupSource) -> Result<(), SignupError> {
        let response = Request::post(&self.endpoint)
            .json(&SignupRow { email, source })
            .map_err(|e| SignupError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| SignupError::Transport(e.to_string()))?;

        if response.ok() {
            Ok(())
        } else {
            Err(SignupError::Rejected { status: response.status() })
        }
    }
}

/// Forwards notifications to `window.PopclozetToast`
#[derive(Clone, Copy, Debug, Default)]
pub struct ToastBridge;

impl ToastBridge {
    fn show(&self, kind: &str, title: &str, detail: &str) {
        let called = web_sys::window()
            .and_then(|window| js_sys::Reflect::get(&window, &"PopclozetToast".into()).ok())
            .filter(|toast| !toast.is_undefined() && !toast.is_null())
            .and_then(|toast| {
                let f = js_sys::Reflect::get(&toast, &kind.into())
                    .ok()?
                    .dyn_into::<js_sys::Function>()
                    .ok()?;
                f.call2(&toast, &title.into(), &detail.into()).ok()
            })
            .is_some();
        if !called {
            log(&format!("[toast:{}] {} {}", kind, title, detail));
        }
    }
}

impl Notifier for ToastBridge {
    fn success(&self, title: &str, detail: &str) {
        self.show("success", title, detail);
    }

    fn error(&self, title: &str, detail: &str) {
        self.show("error", title, detail);
    }
}

/// One email form bound to the sink
pub struct SignupBinding {
    _listeners: Vec<EventListener>,
}

impl SignupBinding {
    /// Bind `form` (carrying `data-signup-source`). Returns `None` if the
    /// form has no email input or an unknown source.
    pub fn bind(form: &HtmlElement, sink: Rc<dyn SignupSink>, notifier: Rc<dyn Notifier>) -> Option<Self> {
        let source = match form.get_attribute("data-signup-source")?.parse::<SignupSource>() {
            Ok(source) => source,
            Err(e) => {
                log(&format!("[signup] {}", e));
                return None;
            }
        };
        let input: HtmlInputElement = form
            .query_selector("input[type=\"email\"]")
            .ok()
            .flatten()?
            .dyn_into()
            .ok()?;

        let state = Rc::new(RefCell::new(SignupForm::new(source)));
        let mut listeners = Vec::with_capacity(2);

        let s = state.clone();
        let field = input.clone();
        listeners.push(EventListener::new(&input, "input", move |_| {
            s.borrow_mut().set_input(field.value());
        }));

        let form_el = form.clone();
        let options = EventListenerOptions::enable_prevent_default();
        listeners.push(EventListener::new_with_options(form, "submit", options, move |event| {
            event.prevent_default();
            let pending = {
                let mut form = state.borrow_mut();
                // Restored or autofilled values may never fire `input`
                form.set_input(input.value());
                match form.begin(notifier.as_ref()) {
                    Ok(pending) => pending,
                    Err(_) => return,
                }
            };
            if let Err(e) = form_el.dataset().set("submitting", "true") {
                log(&format!("[signup] failed to set data-submitting: {:?}", e));
            }

            let state = state.clone();
            let sink = sink.clone();
            let notifier = notifier.clone();
            let form_el = form_el.clone();
            let input = input.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = sink.submit_signup(&pending.email, pending.source).await;
                let mut form = state.borrow_mut();
                form.finish(pending, result, notifier.as_ref());
                input.set_value(form.input());
                form_el.dataset().delete("submitting");
            });
        }));

        Some(Self { _listeners: listeners })
    }
}
