//! Sources of the OS colour-scheme signal.

use std::cell::Cell;

use crate::theme::{detect_color_mode, ColorMode};

/// Reports whether the OS currently prefers a light or dark scheme.
pub trait ColorSchemeSource {
    fn color_mode(&self) -> ColorMode;
}

impl<C: ColorSchemeSource + ?Sized> ColorSchemeSource for &C {
    fn color_mode(&self) -> ColorMode {
        (**self).color_mode()
    }
}

/// Asks the process-wide detector, which defaults to `dark-light`.
///
/// See [`set_theme_detector`](crate::set_theme_detector) to override it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemColorScheme;

impl ColorSchemeSource for SystemColorScheme {
    fn color_mode(&self) -> ColorMode {
        detect_color_mode()
    }
}

/// A colour scheme set by hand.
///
/// Interior mutability lets a host flip the signal while the controller
/// holds a shared reference, the same way the OS flips it underneath a page.
#[derive(Debug, Clone, Default)]
pub struct ManualColorScheme {
    mode: Cell<Option<ColorMode>>,
}

impl ManualColorScheme {
    pub fn new(mode: ColorMode) -> Self {
        Self {
            mode: Cell::new(Some(mode)),
        }
    }

    pub fn set(&self, mode: ColorMode) {
        self.mode.set(Some(mode));
    }
}

impl ColorSchemeSource for ManualColorScheme {
    /// An unset scheme reports light, as a browser with no preference does.
    fn color_mode(&self) -> ColorMode {
        self.mode.get().unwrap_or(ColorMode::Light)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{reset_theme_detector, set_theme_detector};
    use serial_test::serial;

    #[test]
    fn test_manual_default_is_light() {
        assert_eq!(ManualColorScheme::default().color_mode(), ColorMode::Light);
    }

    #[test]
    fn test_manual_set_through_shared_ref() {
        let scheme = ManualColorScheme::new(ColorMode::Light);
        let shared = &scheme;
        shared.set(ColorMode::Dark);
        assert_eq!(shared.color_mode(), ColorMode::Dark);
        assert_eq!(scheme.color_mode(), ColorMode::Dark);
    }

    #[test]
    #[serial]
    fn test_system_scheme_uses_detector() {
        set_theme_detector(|| ColorMode::Dark);
        assert_eq!(SystemColorScheme.color_mode(), ColorMode::Dark);

        set_theme_detector(|| ColorMode::Light);
        assert_eq!(SystemColorScheme.color_mode(), ColorMode::Light);

        reset_theme_detector();
    }
}
