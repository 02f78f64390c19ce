//! In-memory document.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::ThemeDocument;
use crate::config::ThemeConfig;
use crate::theme::ThemePreference;

/// A node of a [`MemoryPage`]: an optional id, attributes and classes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    id: Option<String>,
    attributes: BTreeMap<String, String>,
    classes: BTreeSet<String>,
}

impl Element {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.insert(class.to_string());
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    fn toggle_class(&mut self, class: &str, on: bool) {
        if on {
            self.classes.insert(class.to_string());
        } else {
            self.classes.remove(class);
        }
    }
}

type Listener = Box<dyn FnMut()>;

/// A document held in memory.
///
/// Elements live in a flat list; nesting plays no part in how the
/// controller finds them. Dispatched events are recorded in order and
/// delivered synchronously to registered listeners.
///
/// # Example
///
/// ```rust
/// use themeswitch::{MemoryPage, ThemeConfig, ThemePreference};
///
/// let config = ThemeConfig::default();
/// let page = MemoryPage::new().with_selector(&config);
/// assert!(page.element_by_id("theme-selector").is_some());
/// assert_eq!(page.elements_with_class(&config.icon_class).count(), ThemePreference::ALL.len());
/// ```
#[derive(Default)]
pub struct MemoryPage {
    root: BTreeMap<String, String>,
    elements: Vec<Element>,
    events: Vec<String>,
    listeners: Vec<(String, Listener)>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a root attribute, as a page would declare it in its markup.
    pub fn with_root_attribute(mut self, name: &str, value: &str) -> Self {
        self.root.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    /// Adds the standard selector control described by `config`: a
    /// container, one option per preference and one icon per preference.
    pub fn with_selector(mut self, config: &ThemeConfig) -> Self {
        self.elements.push(Element::new().with_id(&config.selector_id));
        for pref in ThemePreference::ALL {
            self.elements.push(
                Element::new()
                    .with_attribute(&config.option_attribute, pref.as_str())
                    .with_class("dropdown-item"),
            );
        }
        for pref in ThemePreference::ALL {
            self.elements.push(
                Element::new()
                    .with_id(&config.icon_id(pref))
                    .with_class(&config.icon_class),
            );
        }
        self
    }

    pub fn element_by_id(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|el| el.id() == Some(id))
    }

    pub fn elements_with_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements.iter().filter(move |el| el.has_class(class))
    }

    pub fn elements_with_attribute<'a>(
        &'a self,
        attribute: &'a str,
    ) -> impl Iterator<Item = &'a Element> {
        self.elements
            .iter()
            .filter(move |el| el.attribute(attribute).is_some())
    }

    /// Values of the options currently marked active.
    pub fn active_options(&self, config: &ThemeConfig) -> Vec<String> {
        self.elements_with_attribute(&config.option_attribute)
            .filter(|el| el.has_class(&config.active_class))
            .filter_map(|el| el.attribute(&config.option_attribute))
            .map(str::to_string)
            .collect()
    }

    /// Ids of the selector icons not carrying the hidden class.
    pub fn visible_icons(&self, config: &ThemeConfig) -> Vec<String> {
        self.elements_with_class(&config.icon_class)
            .filter(|el| !el.has_class(&config.hidden_class))
            .map(|el| el.id().unwrap_or_default().to_string())
            .collect()
    }

    /// Every event dispatched so far, oldest first.
    pub fn events(&self) -> &[String] {
        &self.events
    }

    pub fn event_count(&self, name: &str) -> usize {
        self.events.iter().filter(|e| *e == name).count()
    }

    /// Registers a callback run whenever `name` is dispatched.
    pub fn add_event_listener(&mut self, name: &str, listener: impl FnMut() + 'static) {
        self.listeners.push((name.to_string(), Box::new(listener)));
    }
}

impl fmt::Debug for MemoryPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryPage")
            .field("root", &self.root)
            .field("elements", &self.elements)
            .field("events", &self.events)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ThemeDocument for MemoryPage {
    fn root_attribute(&self, name: &str) -> Option<String> {
        self.root.get(name).cloned()
    }

    fn set_root_attribute(&mut self, name: &str, value: &str) {
        self.root.insert(name.to_string(), value.to_string());
    }

    fn dispatch_event(&mut self, name: &str) {
        self.events.push(name.to_string());
        for (event, listener) in &mut self.listeners {
            if event.as_str() == name {
                listener();
            }
        }
    }

    fn contains_id(&self, id: &str) -> bool {
        self.element_by_id(id).is_some()
    }

    fn set_class_where_attribute(
        &mut self,
        attribute: &str,
        class: &str,
        predicate: &dyn Fn(&str) -> bool,
    ) {
        for el in &mut self.elements {
            if let Some(value) = el.attributes.get(attribute) {
                let on = predicate(value);
                el.toggle_class(class, on);
            }
        }
    }

    fn set_class_where_id(
        &mut self,
        marker_class: &str,
        class: &str,
        predicate: &dyn Fn(&str) -> bool,
    ) {
        for el in &mut self.elements {
            if el.has_class(marker_class) {
                let on = predicate(el.id().unwrap_or_default());
                el.toggle_class(class, on);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_root_attribute_roundtrip() {
        let mut page = MemoryPage::new().with_root_attribute("data-bs-theme", "dark");
        assert_eq!(page.root_attribute("data-bs-theme").as_deref(), Some("dark"));

        page.set_root_attribute("data-bs-theme", "light");
        assert_eq!(page.root_attribute("data-bs-theme").as_deref(), Some("light"));
        assert_eq!(page.root_attribute("lang"), None);
    }

    #[test]
    fn test_with_selector_layout() {
        let config = ThemeConfig::default();
        let page = MemoryPage::new().with_selector(&config);

        assert!(page.contains_id("theme-selector"));
        assert_eq!(page.elements_with_attribute(&config.option_attribute).count(), 3);
        assert!(page.element_by_id("theme-icon-light").is_some());
        assert!(page.element_by_id("theme-icon-dark").is_some());
        assert!(page.element_by_id("theme-icon-auto").is_some());
        assert!(page.active_options(&config).is_empty());
        assert_eq!(page.visible_icons(&config).len(), 3);
    }

    #[test]
    fn test_set_class_where_attribute() {
        let mut page = MemoryPage::new()
            .with_element(Element::new().with_attribute("data-v", "a").with_class("on"))
            .with_element(Element::new().with_attribute("data-v", "b"))
            .with_element(Element::new().with_class("unrelated"));

        page.set_class_where_attribute("data-v", "on", &|v: &str| v == "b");

        let on: Vec<_> = page
            .elements_with_class("on")
            .filter_map(|el| el.attribute("data-v"))
            .collect();
        assert_eq!(on, vec!["b"]);
        assert_eq!(page.elements_with_class("on").count(), 1);
    }

    #[test]
    fn test_set_class_where_id_skips_unmarked() {
        let mut page = MemoryPage::new()
            .with_element(Element::new().with_id("x").with_class("icon"))
            .with_element(Element::new().with_id("y").with_class("icon"))
            .with_element(Element::new().with_id("z"));

        page.set_class_where_id("icon", "hidden", &|id: &str| id != "x");

        assert!(!page.element_by_id("x").unwrap().has_class("hidden"));
        assert!(page.element_by_id("y").unwrap().has_class("hidden"));
        assert!(!page.element_by_id("z").unwrap().has_class("hidden"));
    }

    #[test]
    fn test_dispatch_records_and_notifies() {
        let hits = Rc::new(Cell::new(0));
        let seen = Rc::clone(&hits);

        let mut page = MemoryPage::new();
        page.add_event_listener("changed.bs.theme", move || seen.set(seen.get() + 1));

        page.dispatch_event("changed.bs.theme");
        page.dispatch_event("other");
        page.dispatch_event("changed.bs.theme");

        assert_eq!(hits.get(), 2);
        assert_eq!(page.events().len(), 3);
        assert_eq!(page.event_count("changed.bs.theme"), 2);
    }

    #[test]
    fn test_debug_hides_listeners() {
        let mut page = MemoryPage::new();
        page.add_event_listener("e", || {});
        let debug = format!("{:?}", page);
        assert!(debug.contains("listeners: 1"));
    }
}
