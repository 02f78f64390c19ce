//! Persistent key-value storage for the theme preference.
//!
//! This module provides:
//!
//! - [`PreferenceStore`]: The `get`/`set` seam the controller talks to
//! - [`MemoryStore`]: An in-memory map, for tests and ephemeral hosts
//! - [`FileStore`]: A JSON file on disk, for native hosts
//! - [`StoreError`]: Failures a store may report
//!
//! Stores hand back raw strings. Deciding whether a string is a usable
//! preference is the controller's job, so a store never rejects a value.

mod error;
mod file;

use std::collections::BTreeMap;

pub use error::StoreError;
pub use file::FileStore;

/// A string-valued key-value store that survives reloads.
pub trait PreferenceStore {
    /// Returns the raw value under `key`, or `None` when nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// In-memory preference store.
///
/// # Example
///
/// ```rust
/// use themeswitch::{MemoryStore, PreferenceStore};
///
/// let mut store = MemoryStore::new();
/// store.set("theme", "dark").unwrap();
/// assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw value, returning the store for chaining.
    ///
    /// Any string is accepted, which makes it easy to simulate a corrupted
    /// entry left behind by some other script.
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    /// Direct read without the `Result` wrapper.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
