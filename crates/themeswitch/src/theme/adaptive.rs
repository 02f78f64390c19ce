//! Effective colour mode and OS colour-scheme detection.

use std::fmt;
use std::sync::Mutex;

use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// The concrete theme applied to a document.
///
/// This is what a [`ThemePreference`](super::ThemePreference) resolves to
/// once `auto` has been replaced by the OS colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Light,
    Dark,
}

impl ColorMode {
    /// Maps a "prefers dark" signal onto a colour mode.
    pub fn from_dark(prefers_dark: bool) -> Self {
        if prefers_dark {
            ColorMode::Dark
        } else {
            ColorMode::Light
        }
    }

    /// The attribute value written to the document root.
    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::Light => "light",
            ColorMode::Dark => "dark",
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, ColorMode::Dark)
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type ThemeDetector = fn() -> ColorMode;

static THEME_DETECTOR: Lazy<Mutex<ThemeDetector>> = Lazy::new(|| Mutex::new(os_theme_detector));

/// Overrides the detector used to determine whether the user prefers a light or dark theme.
///
/// This is useful for testing or when you want to force a specific color mode.
pub fn set_theme_detector(detector: ThemeDetector) {
    let mut guard = THEME_DETECTOR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = detector;
}

/// Restores the `dark-light` backed detector.
pub fn reset_theme_detector() {
    set_theme_detector(os_theme_detector);
}

/// Asks the installed detector for the current OS colour mode.
pub fn detect_color_mode() -> ColorMode {
    let detector = THEME_DETECTOR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    (*detector)()
}

fn os_theme_detector() -> ColorMode {
    match detect_os_theme() {
        OsThemeMode::Dark => ColorMode::Dark,
        OsThemeMode::Light => ColorMode::Light,
    }
}
