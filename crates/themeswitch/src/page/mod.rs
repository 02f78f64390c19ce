//! The document the theme is applied to.
//!
//! This module provides:
//!
//! - [`ThemeDocument`]: The DOM-shaped seam the controller writes through
//! - [`MemoryPage`]: An in-memory document for tests and native hosts
//! - [`Element`]: A node of a [`MemoryPage`]
//!
//! The controller never creates or removes elements. It reads and writes
//! one attribute on the root, dispatches one event, and toggles classes on
//! elements the page already carries.

mod memory;

pub use memory::{Element, MemoryPage};

/// Operations the controller needs from a document.
pub trait ThemeDocument {
    /// Returns `name` on the root element, if set.
    fn root_attribute(&self, name: &str) -> Option<String>;

    /// Sets `name` on the root element.
    fn set_root_attribute(&mut self, name: &str, value: &str);

    /// Broadcasts an event without payload to whoever listens for `name`.
    fn dispatch_event(&mut self, name: &str);

    /// Whether an element with this id exists.
    fn contains_id(&self, id: &str) -> bool;

    /// For every element carrying `attribute`, adds `class` when
    /// `predicate(value)` holds and removes it otherwise.
    fn set_class_where_attribute(
        &mut self,
        attribute: &str,
        class: &str,
        predicate: &dyn Fn(&str) -> bool,
    );

    /// For every element carrying `marker_class`, adds `class` when
    /// `predicate(id)` holds and removes it otherwise. Elements without an
    /// id are tested against the empty string.
    fn set_class_where_id(
        &mut self,
        marker_class: &str,
        class: &str,
        predicate: &dyn Fn(&str) -> bool,
    );
}

impl<D: ThemeDocument + ?Sized> ThemeDocument for &mut D {
    fn root_attribute(&self, name: &str) -> Option<String> {
        (**self).root_attribute(name)
    }

    fn set_root_attribute(&mut self, name: &str, value: &str) {
        (**self).set_root_attribute(name, value)
    }

    fn dispatch_event(&mut self, name: &str) {
        (**self).dispatch_event(name)
    }

    fn contains_id(&self, id: &str) -> bool {
        (**self).contains_id(id)
    }

    fn set_class_where_attribute(
        &mut self,
        attribute: &str,
        class: &str,
        predicate: &dyn Fn(&str) -> bool,
    ) {
        (**self).set_class_where_attribute(attribute, class, predicate)
    }

    fn set_class_where_id(
        &mut self,
        marker_class: &str,
        class: &str,
        predicate: &dyn Fn(&str) -> bool,
    ) {
        (**self).set_class_where_id(marker_class, class, predicate)
    }
}
