//! The theme controller: resolve, apply, sync, persist.

use std::cell::RefCell;

use tracing::{debug, warn};

use crate::config::ThemeConfig;
use crate::page::ThemeDocument;
use crate::scheme::ColorSchemeSource;
use crate::store::PreferenceStore;
use crate::theme::{ColorMode, StoredValue, ThemePreference};

/// Something that warrants re-resolving the theme after startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeEvent {
    /// The OS colour-scheme signal flipped.
    OsPreferenceChanged,
    /// The user picked an option in the selector control.
    OptionClicked(ThemePreference),
}

/// Keeps a document's theme in line with the stored preference and the OS.
///
/// Each run is a pure function of the stored preference, the OS signal and
/// the page-declared default: it writes the effective mode to the root
/// attribute, broadcasts the change event and marks the selector. Nothing
/// is surfaced as an error; unreadable or unknown stored values degrade to
/// [`ThemePreference::Auto`].
///
/// # Example
///
/// ```rust
/// use themeswitch::{
///     ColorMode, ManualColorScheme, MemoryPage, MemoryStore, ThemeConfig, ThemeController,
///     ThemeEvent, ThemePreference,
/// };
///
/// let config = ThemeConfig::default();
/// let page = MemoryPage::new().with_selector(&config);
/// let mut controller = ThemeController::new(
///     config,
///     MemoryStore::new(),
///     page,
///     ManualColorScheme::new(ColorMode::Dark),
/// );
///
/// // First visit: auto follows the OS and gets persisted.
/// assert_eq!(controller.initialize(), ColorMode::Dark);
/// assert_eq!(controller.store().value("theme"), Some("auto"));
///
/// // The user forces light.
/// let applied = controller.handle(ThemeEvent::OptionClicked(ThemePreference::Light));
/// assert_eq!(applied, ColorMode::Light);
/// ```
#[derive(Debug)]
pub struct ThemeController<S, D, C> {
    config: ThemeConfig,
    store: S,
    document: D,
    scheme: C,
    page_default: Option<String>,
}

impl<S, D, C> ThemeController<S, D, C>
where
    S: PreferenceStore,
    D: ThemeDocument,
    C: ColorSchemeSource,
{
    /// Creates a controller.
    ///
    /// The page-declared default is read from the root attribute here, once,
    /// before anything overwrites it.
    pub fn new(config: ThemeConfig, store: S, document: D, scheme: C) -> Self {
        let page_default = document
            .root_attribute(&config.root_attribute)
            .filter(|value| !value.is_empty());
        Self {
            config,
            store,
            document,
            scheme,
            page_default,
        }
    }

    /// Reads the stored preference, failing open to `auto`.
    ///
    /// A blank entry falls through to the page-declared default when that
    /// default names a preference.
    pub fn resolve_preference(&self) -> ThemePreference {
        self.preference_from(self.read_stored())
    }

    fn preference_from(&self, stored: StoredValue) -> ThemePreference {
        match stored {
            StoredValue::Preference(pref) => pref,
            StoredValue::Blank => self.page_default().unwrap_or_default(),
            StoredValue::Missing => ThemePreference::Auto,
            StoredValue::Malformed(raw) => {
                warn!(value = %raw, key = %self.config.storage_key, "ignoring malformed stored theme preference");
                ThemePreference::Auto
            }
        }
    }

    /// Resolves `pref` to a concrete mode, asking the OS only for `auto`.
    pub fn resolve_effective(&self, pref: ThemePreference) -> ColorMode {
        match pref {
            ThemePreference::Auto => self.scheme.color_mode(),
            ThemePreference::Light => ColorMode::Light,
            ThemePreference::Dark => ColorMode::Dark,
        }
    }

    /// Writes `mode` to the root attribute and broadcasts the change event.
    pub fn apply_theme(&mut self, mode: ColorMode) {
        self.document
            .set_root_attribute(&self.config.root_attribute, mode.as_str());
        self.document.dispatch_event(&self.config.change_event);
        debug!(theme = %mode, "applied theme");
    }

    /// Marks the option for `pref` active and shows only its icon.
    ///
    /// Does nothing on pages without the selector control.
    pub fn sync_selector_ui(&mut self, pref: ThemePreference) {
        if !self.document.contains_id(&self.config.selector_id) {
            debug!(selector = %self.config.selector_id, "no theme selector on page");
            return;
        }

        let value = pref.as_str();
        self.document.set_class_where_attribute(
            &self.config.option_attribute,
            &self.config.active_class,
            &|option: &str| option == value,
        );

        let icon_id = self.config.icon_id(pref);
        self.document.set_class_where_id(
            &self.config.icon_class,
            &self.config.hidden_class,
            &|id: &str| id != icon_id,
        );
    }

    /// Runs the page-load sequence and returns the applied mode.
    ///
    /// On a first visit (no valid stored preference and no page-declared
    /// default) `auto` is persisted so later runs find a value.
    pub fn initialize(&mut self) -> ColorMode {
        let stored = self.read_stored();
        let first_visit = stored.preference().is_none();
        let pref = self.preference_from(stored);
        let mode = self.refresh(pref);

        if first_visit && self.page_default.is_none() {
            debug!("first visit, storing auto theme preference");
            self.persist(ThemePreference::Auto);
        }
        mode
    }

    /// Re-resolves after the OS colour scheme changed.
    ///
    /// The stored preference is read again; a fixed preference yields the
    /// same result as before.
    pub fn on_os_preference_change(&mut self) -> ColorMode {
        let pref = self.resolve_preference();
        self.refresh(pref)
    }

    /// Persists `value` and applies it without reading the store back.
    pub fn on_selector_option_clicked(&mut self, value: ThemePreference) -> ColorMode {
        self.persist(value);
        self.refresh(value)
    }

    /// Routes an event to its handler.
    pub fn handle(&mut self, event: ThemeEvent) -> ColorMode {
        match event {
            ThemeEvent::OsPreferenceChanged => self.on_os_preference_change(),
            ThemeEvent::OptionClicked(value) => self.on_selector_option_clicked(value),
        }
    }

    /// Routes `event` to a controller shared with event callbacks.
    ///
    /// An event raised while the controller is still handling another one
    /// (a change listener that clicks an option, say) is logged and dropped.
    pub fn handle_shared(controller: &RefCell<Self>, event: ThemeEvent) -> Option<ColorMode> {
        match controller.try_borrow_mut() {
            Ok(mut controller) => Some(controller.handle(event)),
            Err(_) => {
                warn!(?event, "theme event raised during another, dropping it");
                None
            }
        }
    }

    /// The page-declared default, when it names a preference.
    pub fn page_default(&self) -> Option<ThemePreference> {
        self.page_default.as_deref().and_then(|raw| raw.parse().ok())
    }

    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn scheme(&self) -> &C {
        &self.scheme
    }

    fn refresh(&mut self, pref: ThemePreference) -> ColorMode {
        let mode = self.resolve_effective(pref);
        self.apply_theme(mode);
        self.sync_selector_ui(pref);
        mode
    }

    fn read_stored(&self) -> StoredValue {
        match self.store.get(&self.config.storage_key) {
            Ok(raw) => StoredValue::classify(raw.as_deref()),
            Err(e) => {
                warn!(error = %e, "theme preference unreadable, falling back to auto");
                StoredValue::Missing
            }
        }
    }

    fn persist(&mut self, pref: ThemePreference) {
        if let Err(e) = self.store.set(&self.config.storage_key, pref.as_str()) {
            warn!(error = %e, preference = %pref, "failed to store theme preference");
        }
    }
}
