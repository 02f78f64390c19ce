//! Light/dark/auto theme switching with a persisted preference.
//!
//! `themeswitch` keeps a document's colour theme in line with three inputs:
//! the preference the user stored (`light`, `dark` or `auto`), a default the
//! page may declare on its root element, and the OS colour scheme. The
//! resolved mode is written to a root attribute, a change event is
//! broadcast, and an optional selector control is kept in sync.
//!
//! # Quick start
//!
//! ```rust
//! use themeswitch::{
//!     ColorMode, ManualColorScheme, MemoryPage, MemoryStore, ThemeConfig, ThemeController,
//!     ThemeDocument,
//! };
//!
//! let mut controller = ThemeController::new(
//!     ThemeConfig::default(),
//!     MemoryStore::new().with("theme", "dark"),
//!     MemoryPage::new(),
//!     ManualColorScheme::new(ColorMode::Light),
//! );
//!
//! controller.initialize();
//! assert_eq!(
//!     controller.document().root_attribute("data-bs-theme").as_deref(),
//!     Some("dark")
//! );
//! ```
//!
//! # Seams
//!
//! The controller is generic over three traits so it runs the same way in a
//! browser, a native host or a test:
//!
//! - [`PreferenceStore`]: where the preference lives ([`MemoryStore`],
//!   [`FileStore`], or `localStorage` with the `web` feature)
//! - [`ThemeDocument`]: what gets themed ([`MemoryPage`], or the live DOM)
//! - [`ColorSchemeSource`]: the OS signal ([`SystemColorScheme`] via
//!   `dark-light`, [`ManualColorScheme`], or `matchMedia`)
//!
//! Nothing in the resolve path returns an error. Unreadable or unknown
//! stored values resolve to `auto`, missing selector markup is skipped, and
//! failures are reported through `tracing`.
//!
//! # Testing
//!
//! [`set_theme_detector`] replaces the process-wide OS detector used by
//! [`SystemColorScheme`]:
//!
//! ```rust
//! use themeswitch::{set_theme_detector, ColorMode, ColorSchemeSource, SystemColorScheme};
//!
//! set_theme_detector(|| ColorMode::Dark);
//! assert_eq!(SystemColorScheme.color_mode(), ColorMode::Dark);
//! ```

pub mod config;
pub mod controller;
pub mod page;
pub mod scheme;
pub mod store;
pub mod theme;
#[cfg(feature = "web")]
pub mod web;

pub use config::{ConfigError, ThemeConfig};
pub use controller::{ThemeController, ThemeEvent};
pub use page::{Element, MemoryPage, ThemeDocument};
pub use scheme::{ColorSchemeSource, ManualColorScheme, SystemColorScheme};
pub use store::{FileStore, MemoryStore, PreferenceStore, StoreError};
pub use theme::{
    detect_color_mode, reset_theme_detector, set_theme_detector, ColorMode,
    ParsePreferenceError, StoredValue, ThemePreference,
};
