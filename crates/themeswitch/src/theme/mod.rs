//! Theme values and their resolution.
//!
//! This module provides:
//!
//! - [`ThemePreference`]: The user's choice, `light`, `dark` or `auto`
//! - [`ColorMode`]: The concrete mode a preference resolves to
//! - [`StoredValue`]: Classification of raw persisted strings
//! - OS detection through a replaceable process-wide detector
//!
//! `auto` is the only preference whose outcome depends on the OS; the
//! other two pass through [`ThemePreference::resolve`] unchanged.

mod adaptive;
mod preference;

pub use adaptive::{detect_color_mode, reset_theme_detector, set_theme_detector, ColorMode};
pub use preference::{ParsePreferenceError, StoredValue, ThemePreference};
