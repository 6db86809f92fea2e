//! Browser binding.
//!
//! Discovers the dropdown markup with `web-sys`, runs the switcher's init,
//! and attaches listeners that forward browser events to it. Elements that
//! are missing simply get no listener.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, KeyboardEvent, Storage};

use crate::config::SwitcherConfig;
use crate::events::{Dispatch, Key, Target, UiEvent};
use crate::host::{Host, HostError};
use crate::switcher::ThemeSwitcher;

/// Host backed by the live DOM and `window.localStorage`.
pub struct WebHost {
    body: Option<HtmlElement>,
    storage: Option<Storage>,
    toggle: Option<HtmlElement>,
    panel: Option<Element>,
    options: Vec<HtmlElement>,
    dropdown_selector: String,
    open_class: String,
    theme_attribute: String,
}

impl WebHost {
    pub fn discover(window: &web_sys::Window, document: &Document, config: &SwitcherConfig) -> Self {
        let toggle = document
            .get_element_by_id(&config.toggle_id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        let panel = document.get_element_by_id(&config.menu_id);

        let mut options = Vec::new();
        if let Ok(list) = document.query_selector_all(&config.option_selector) {
            for i in 0..list.length() {
                if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
                    options.push(el);
                }
            }
        }

        tracing::debug!(
            toggle = toggle.is_some(),
            panel = panel.is_some(),
            options = options.len(),
            "Discovered theme dropdown markup"
        );

        Self {
            body: document.body(),
            storage: window.local_storage().ok().flatten(),
            toggle,
            panel,
            options,
            dropdown_selector: config.dropdown_selector.clone(),
            open_class: config.open_class.clone(),
            theme_attribute: config.theme_attribute.clone(),
        }
    }

    /// Classify a document-level event target.
    fn classify(&self, event: &Event) -> Target {
        let inside = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest(&self.dropdown_selector).ok().flatten())
            .is_some();
        if inside {
            Target::Dropdown
        } else {
            Target::Page
        }
    }
}

fn js_reason(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

impl Host for WebHost {
    fn stored_preference(&self, key: &str) -> Result<Option<String>, HostError> {
        let storage = self.storage.as_ref().ok_or(HostError::StorageUnavailable)?;
        storage.get_item(key).map_err(|e| HostError::ReadFailed {
            key: key.to_string(),
            reason: js_reason(e),
        })
    }

    fn store_preference(&mut self, key: &str, value: &str) -> Result<(), HostError> {
        let storage = self.storage.as_ref().ok_or(HostError::StorageUnavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| HostError::WriteRejected {
                key: key.to_string(),
                reason: js_reason(e),
            })
    }

    fn add_marker(&mut self, class: &str) {
        if let Some(body) = &self.body {
            let _ = body.class_list().add_1(class);
        }
    }

    fn remove_marker(&mut self, class: &str) {
        if let Some(body) = &self.body {
            let _ = body.class_list().remove_1(class);
        }
    }

    fn set_panel_open(&mut self, open: bool) {
        if let Some(panel) = &self.panel {
            let classes = panel.class_list();
            let _ = if open {
                classes.add_1(&self.open_class)
            } else {
                classes.remove_1(&self.open_class)
            };
        }
    }

    fn option_count(&self) -> usize {
        self.options.len()
    }

    fn option_theme(&self, index: usize) -> Option<String> {
        self.options
            .get(index)
            .and_then(|el| el.get_attribute(&self.theme_attribute))
    }

    fn focus_toggle(&mut self) {
        if let Some(toggle) = &self.toggle {
            let _ = toggle.focus();
        }
    }

    fn focus_option(&mut self, index: usize) {
        if let Some(option) = self.options.get(index) {
            let _ = option.focus();
        }
    }
}

type Shared = Rc<RefCell<ThemeSwitcher<WebHost>>>;

fn apply(event: &Event, outcome: Dispatch) {
    if outcome.propagation_stopped {
        event.stop_propagation();
    }
    if outcome.default_prevented {
        event.prevent_default();
    }
}

fn key_of(event: &Event) -> Key {
    event
        .dyn_ref::<KeyboardEvent>()
        .map(|e| Key::from_dom(&e.key()))
        .unwrap_or_else(|| Key::Other(String::new()))
}

/// Attach `handler` for `kind` events on `target`. The closure lives as long
/// as the page, so it is leaked deliberately.
fn listen(
    target: &EventTarget,
    kind: &str,
    switcher: &Shared,
    handler: impl Fn(&mut ThemeSwitcher<WebHost>, &Event) + 'static,
) {
    let switcher = Rc::clone(switcher);
    let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        // A handler that moves focus can synchronously fire another event
        match switcher.try_borrow_mut() {
            Ok(mut switcher) => handler(&mut switcher, &event),
            Err(_) => tracing::debug!("Skipping nested {} event", event.type_()),
        }
    });

    if let Err(e) = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref()) {
        tracing::warn!("Failed to attach {} listener: {}", kind, js_reason(e));
    }
    closure.forget();
}

/// Mount with the default configuration.
#[wasm_bindgen]
pub fn mount() {
    mount_with_config(SwitcherConfig::default());
}

/// Mount with a JS options object; missing fields take their defaults.
#[wasm_bindgen(js_name = mountWith)]
pub fn mount_with(options: JsValue) -> Result<(), JsValue> {
    let config: SwitcherConfig = if options.is_undefined() || options.is_null() {
        SwitcherConfig::default()
    } else {
        serde_wasm_bindgen::from_value(options)?
    };
    mount_with_config(config);
    Ok(())
}

pub fn mount_with_config(config: SwitcherConfig) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let host = WebHost::discover(&window, &document, &config);
    let toggle = host.toggle.clone();
    let options = host.options.clone();

    let mut switcher = ThemeSwitcher::new(host, &config);
    switcher.init();
    let switcher: Shared = Rc::new(RefCell::new(switcher));

    if let Some(toggle) = toggle {
        listen(&toggle, "click", &switcher, |s, event| {
            apply(event, s.on_target(&UiEvent::Click { target: Target::Toggle }));
        });
    } else {
        tracing::debug!("No #{} element, toggle disabled", config.toggle_id);
    }

    for (index, option) in options.iter().enumerate() {
        listen(option, "click", &switcher, move |s, event| {
            let click = UiEvent::Click {
                target: Target::Option(index),
            };
            apply(event, s.on_target(&click));
        });
        listen(option, "keydown", &switcher, move |s, event| {
            let key_down = UiEvent::KeyDown {
                key: key_of(event),
                target: Target::Option(index),
            };
            apply(event, s.on_target(&key_down));
        });
    }

    listen(&document, "click", &switcher, |s, event| {
        let target = s.host().classify(event);
        s.on_document(&UiEvent::Click { target });
    });

    listen(&document, "keydown", &switcher, |s, event| {
        s.on_document(&UiEvent::KeyDown {
            key: key_of(event),
            target: Target::Page,
        });
    });

    listen(&window, "blur", &switcher, |s, _| {
        s.dispatch(&UiEvent::Blur);
    });
}
