//! The effective dark-mode value derived from the persisted and ambient preferences.

use std::fmt;
use std::rc::Rc;

use tracing::info;

use super::ambient::AmbientPreference;
use super::preference::ColorScheme;
use super::signal::{Signal, Subscription};
use super::storage::PersistedScheme;

struct DarkModeInner {
    // Cancelled first on drop, detaching the recompute callbacks from both sources.
    _sources: [Subscription; 2],
    ambient: AmbientPreference,
    preference: PersistedScheme,
    value: Signal<bool>,
}

/// Read/write handle to the effective dark-mode value.
///
/// Reading yields the persisted preference resolved against the ambient one.
/// Writing never stores the boolean directly: a value matching the ambient
/// preference resets the stored preference to `auto`, anything else stores
/// the explicit `light`/`dark` choice. The value is recomputed whenever
/// either input changes.
///
/// Clones share the same cell.
///
/// # Example
///
/// ```rust
/// use jjaw_site::{AmbientPreference, ColorScheme, DarkMode, MemoryStorage, PersistedScheme};
/// use std::rc::Rc;
///
/// let ambient = AmbientPreference::fixed(false);
/// let preference = PersistedScheme::bind(Rc::new(MemoryStorage::new()), "scheme");
/// let dark_mode = DarkMode::new(ambient.clone(), preference.clone());
///
/// dark_mode.set(true);
/// assert_eq!(preference.get(), ColorScheme::Dark);
///
/// ambient.set(true);
/// dark_mode.set(true);
/// assert_eq!(preference.get(), ColorScheme::Auto);
/// ```
#[derive(Clone)]
pub struct DarkMode {
    inner: Rc<DarkModeInner>,
}

impl DarkMode {
    pub fn new(ambient: AmbientPreference, preference: PersistedScheme) -> Self {
        let value = Signal::new(preference.get().is_dark(ambient.is_dark()));

        let on_preference = {
            let ambient = ambient.clone();
            let value = value.clone();
            preference
                .signal()
                .subscribe(move |scheme: &ColorScheme| {
                    value.set(scheme.is_dark(ambient.is_dark()));
                })
        };
        let on_ambient = {
            let preference = preference.clone();
            let value = value.clone();
            ambient.subscribe(move |dark: &bool| {
                value.set(preference.get().is_dark(*dark));
            })
        };

        Self {
            inner: Rc::new(DarkModeInner {
                _sources: [on_preference, on_ambient],
                ambient,
                preference,
                value,
            }),
        }
    }

    /// Whether dark mode is currently in effect.
    pub fn get(&self) -> bool {
        self.inner.value.get()
    }

    /// Requests the effective value `dark`, updating the persisted preference.
    pub fn set(&self, dark: bool) {
        let ambient_dark = self.inner.ambient.is_dark();
        let scheme = ColorScheme::for_value(dark, ambient_dark);
        info!(dark, ambient_dark, %scheme, "color scheme preference updated");
        self.inner.preference.set(scheme);
    }

    /// Flips the effective value and returns the new one.
    pub fn toggle(&self) -> bool {
        let next = !self.get();
        self.set(next);
        next
    }

    /// Runs `callback` after every change of the effective value.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&bool) + 'static,
    {
        self.inner.value.subscribe(callback)
    }

    /// The stored preference backing this value.
    pub fn preference(&self) -> ColorScheme {
        self.inner.preference.get()
    }

    pub fn ambient(&self) -> &AmbientPreference {
        &self.inner.ambient
    }
}

impl fmt::Debug for DarkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DarkMode")
            .field("value", &self.get())
            .field("preference", &self.preference())
            .field("ambient", &self.inner.ambient.is_dark())
            .finish()
    }
}
