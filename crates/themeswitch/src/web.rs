//! Browser bindings: `localStorage`, the DOM and `matchMedia`.
//!
//! Requires the `web` feature and a browser environment.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, MediaQueryList, Storage, Window};

use crate::config::ThemeConfig;
use crate::controller::{ThemeController, ThemeEvent};
use crate::page::ThemeDocument;
use crate::scheme::ColorSchemeSource;
use crate::store::{MemoryStore, PreferenceStore, StoreError};
use crate::theme::{ColorMode, ThemePreference};

const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

/// A controller wired to the live page.
pub type WebController = ThemeController<Box<dyn PreferenceStore>, WebDocument, MediaQueryColorScheme>;

fn js_error(e: JsValue) -> StoreError {
    StoreError::Unavailable(format!("{e:?}"))
}

/// Preference store over `window.localStorage`.
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    /// Fails when storage is disabled (private browsing, sandboxed frames).
    pub fn from_window(window: &Window) -> Result<Self, StoreError> {
        match window.local_storage() {
            Ok(Some(storage)) => Ok(Self { storage }),
            Ok(None) => Err(StoreError::Unavailable("localStorage is not available".into())),
            Err(e) => Err(js_error(e)),
        }
    }
}

impl PreferenceStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage.get_item(key).map_err(js_error)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage.set_item(key, value).map_err(js_error)
    }
}

/// The live document. Events are dispatched on `window`.
#[derive(Debug, Clone)]
pub struct WebDocument {
    window: Window,
    document: Document,
}

impl WebDocument {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    fn toggle(element: &Element, class: &str, on: bool) {
        let classes = element.class_list();
        let result = if on {
            classes.add_1(class)
        } else {
            classes.remove_1(class)
        };
        if let Err(e) = result {
            warn!(error = ?e, class, "failed to toggle class");
        }
    }
}

impl ThemeDocument for WebDocument {
    fn root_attribute(&self, name: &str) -> Option<String> {
        self.document.document_element()?.get_attribute(name)
    }

    fn set_root_attribute(&mut self, name: &str, value: &str) {
        let Some(root) = self.document.document_element() else {
            return;
        };
        if let Err(e) = root.set_attribute(name, value) {
            warn!(error = ?e, name, "failed to set root attribute");
        }
    }

    fn dispatch_event(&mut self, name: &str) {
        match Event::new(name) {
            Ok(event) => {
                if let Err(e) = self.window.dispatch_event(&event) {
                    warn!(error = ?e, event = name, "failed to dispatch event");
                }
            }
            Err(e) => warn!(error = ?e, event = name, "failed to create event"),
        }
    }

    fn contains_id(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn set_class_where_attribute(
        &mut self,
        attribute: &str,
        class: &str,
        predicate: &dyn Fn(&str) -> bool,
    ) {
        let Ok(nodes) = self.document.query_selector_all(&format!("[{attribute}]")) else {
            return;
        };
        for i in 0..nodes.length() {
            let Some(element) = nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let value = element.get_attribute(attribute).unwrap_or_default();
            Self::toggle(&element, class, predicate(&value));
        }
    }

    fn set_class_where_id(
        &mut self,
        marker_class: &str,
        class: &str,
        predicate: &dyn Fn(&str) -> bool,
    ) {
        let elements = self.document.get_elements_by_class_name(marker_class);
        for i in 0..elements.length() {
            if let Some(element) = elements.item(i) {
                Self::toggle(&element, class, predicate(&element.id()));
            }
        }
    }
}

/// The `prefers-color-scheme: dark` media query.
#[derive(Debug, Clone)]
pub struct MediaQueryColorScheme {
    list: Option<MediaQueryList>,
}

impl MediaQueryColorScheme {
    pub fn from_window(window: &Window) -> Self {
        Self {
            list: window.match_media(DARK_SCHEME_QUERY).ok().flatten(),
        }
    }

    /// Registers `callback` for `change` notifications of the query.
    pub fn subscribe(&self, callback: &Closure<dyn FnMut()>) {
        let Some(list) = &self.list else {
            return;
        };
        if let Err(e) = list.add_event_listener_with_callback("change", callback.as_ref().unchecked_ref()) {
            warn!(error = ?e, "failed to watch color scheme");
        }
    }
}

impl ColorSchemeSource for MediaQueryColorScheme {
    fn color_mode(&self) -> ColorMode {
        ColorMode::from_dark(self.list.as_ref().is_some_and(MediaQueryList::matches))
    }
}

/// Builds a controller for the current page, initializes it and wires the
/// OS-change and option-click listeners.
///
/// Falls back to an in-memory store when `localStorage` is unavailable, so
/// the page still themes correctly for the session. Returns `None` outside a
/// browser.
pub fn install(config: ThemeConfig) -> Option<Rc<RefCell<WebController>>> {
    let window = web_sys::window()?;
    let document = window.document()?;

    let store: Box<dyn PreferenceStore> = match LocalStorageStore::from_window(&window) {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!(error = %e, "theme choice will not persist");
            Box::new(MemoryStore::new())
        }
    };
    let scheme = MediaQueryColorScheme::from_window(&window);
    let option_attribute = config.option_attribute.clone();

    let controller = Rc::new(RefCell::new(ThemeController::new(
        config,
        store,
        WebDocument::new(window, document.clone()),
        scheme,
    )));
    controller.borrow_mut().initialize();

    let on_change = {
        let controller = Rc::clone(&controller);
        Closure::<dyn FnMut()>::new(move || {
            WebController::handle_shared(&controller, ThemeEvent::OsPreferenceChanged);
        })
    };
    controller.borrow().scheme().subscribe(&on_change);
    on_change.forget();

    if let Ok(options) = document.query_selector_all(&format!("[{option_attribute}]")) {
        for i in 0..options.length() {
            let Some(option) = options.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let on_click = {
                let controller = Rc::clone(&controller);
                let element = option.clone();
                let attribute = option_attribute.clone();
                Closure::<dyn FnMut()>::new(move || {
                    let raw = element.get_attribute(&attribute).unwrap_or_default();
                    let value = ThemePreference::parse_lenient(&raw);
                    WebController::handle_shared(&controller, ThemeEvent::OptionClicked(value));
                })
            };
            if let Err(e) =
                option.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            {
                warn!(error = ?e, "failed to wire theme option");
            }
            on_click.forget();
        }
    }

    Some(controller)
}
