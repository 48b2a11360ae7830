//! Ambient (system) color-mode preference.

use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};
use once_cell::sync::Lazy;
use std::sync::Mutex;
use tracing::debug;

use super::signal::{Signal, Subscription};

/// The system's light/dark display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Light,
    Dark,
}

impl ColorMode {
    pub fn is_dark(self) -> bool {
        self == ColorMode::Dark
    }
}

impl From<bool> for ColorMode {
    fn from(dark: bool) -> Self {
        if dark {
            ColorMode::Dark
        } else {
            ColorMode::Light
        }
    }
}

type ThemeDetector = fn() -> ColorMode;

static THEME_DETECTOR: Lazy<Mutex<ThemeDetector>> = Lazy::new(|| Mutex::new(os_theme_detector));

/// Overrides the detector used to determine whether the system prefers a dark theme.
///
/// This is useful for testing or when you want to force a specific color mode.
pub fn set_theme_detector(detector: ThemeDetector) {
    let mut guard = THEME_DETECTOR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = detector;
}

/// Restores the operating-system detector.
pub fn reset_theme_detector() {
    set_theme_detector(os_theme_detector);
}

/// Queries the configured detector for the current system color mode.
pub fn detect_color_mode() -> ColorMode {
    let detector = THEME_DETECTOR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    (*detector)()
}

// Anything the platform doesn't report as dark counts as light.
fn os_theme_detector() -> ColorMode {
    match detect_os_theme() {
        OsThemeMode::Dark => ColorMode::Dark,
        _ => ColorMode::Light,
    }
}

/// A readable, subscribable view of the ambient preference.
///
/// The host either pushes changes with [`AmbientPreference::set`] or asks
/// for the detector to be polled again with [`AmbientPreference::refresh`].
#[derive(Debug, Clone)]
pub struct AmbientPreference {
    dark: Signal<bool>,
    detect: bool,
}

impl AmbientPreference {
    /// Tracks the system preference through the configured detector.
    pub fn system() -> Self {
        let dark = detect_color_mode().is_dark();
        debug!(dark, "detected ambient color mode");
        Self {
            dark: Signal::new(dark),
            detect: true,
        }
    }

    /// A preference that only changes when [`set`](Self::set) is called.
    pub fn fixed(dark: bool) -> Self {
        Self {
            dark: Signal::new(dark),
            detect: false,
        }
    }

    pub fn is_dark(&self) -> bool {
        self.dark.get()
    }

    /// Records a change notification from the host.
    pub fn set(&self, dark: bool) {
        if self.dark.set(dark) {
            debug!(dark, "ambient color mode changed");
        }
    }

    /// Polls the detector again; a no-op for fixed preferences.
    ///
    /// Returns `true` when the preference changed.
    pub fn refresh(&self) -> bool {
        if !self.detect {
            return false;
        }
        let dark = detect_color_mode().is_dark();
        let changed = self.dark.set(dark);
        if changed {
            debug!(dark, "ambient color mode changed");
        }
        changed
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&bool) + 'static,
    {
        self.dark.subscribe(callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    #[serial]
    fn test_system_uses_detector() {
        set_theme_detector(|| ColorMode::Dark);
        assert!(AmbientPreference::system().is_dark());

        set_theme_detector(|| ColorMode::Light);
        assert!(!AmbientPreference::system().is_dark());

        reset_theme_detector();
    }

    #[test]
    #[serial]
    fn test_refresh_picks_up_detector_change() {
        set_theme_detector(|| ColorMode::Light);
        let ambient = AmbientPreference::system();
        let changes = Rc::new(Cell::new(0));
        let counter = changes.clone();
        let _sub = ambient.subscribe(move |_| counter.set(counter.get() + 1));

        assert!(!ambient.refresh());
        set_theme_detector(|| ColorMode::Dark);
        assert!(ambient.refresh());
        assert!(ambient.is_dark());
        assert_eq!(changes.get(), 1);

        reset_theme_detector();
    }

    #[test]
    #[serial]
    fn test_fixed_ignores_detector() {
        set_theme_detector(|| ColorMode::Dark);
        let ambient = AmbientPreference::fixed(false);
        assert!(!ambient.refresh());
        assert!(!ambient.is_dark());
        reset_theme_detector();
    }

    #[test]
    fn test_set_pushes_change() {
        let ambient = AmbientPreference::fixed(false);
        ambient.set(true);
        assert!(ambient.is_dark());
    }

    #[test]
    fn test_color_mode_from_bool() {
        assert_eq!(ColorMode::from(true), ColorMode::Dark);
        assert_eq!(ColorMode::from(false), ColorMode::Light);
    }
}
