//! The persisted three-state color-scheme preference.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The user's stored color-scheme override.
///
/// `Auto` defers to the ambient (system) preference; `Light` and `Dark` pin
/// the effective value regardless of what the system reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Auto,
    Light,
    Dark,
}

impl ColorScheme {
    /// All states, in declaration order.
    pub const ALL: [ColorScheme; 3] = [ColorScheme::Auto, ColorScheme::Light, ColorScheme::Dark];

    /// Returns the plain-text form written to storage.
    pub fn as_str(self) -> &'static str {
        match self {
            ColorScheme::Auto => "auto",
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }

    /// Resolves the effective dark-mode value against the ambient preference.
    ///
    /// # Example
    ///
    /// ```rust
    /// use jjaw_site::ColorScheme;
    ///
    /// assert!(ColorScheme::Auto.is_dark(true));
    /// assert!(!ColorScheme::Light.is_dark(true));
    /// assert!(ColorScheme::Dark.is_dark(false));
    /// ```
    pub fn is_dark(self, ambient_dark: bool) -> bool {
        match self {
            ColorScheme::Auto => ambient_dark,
            ColorScheme::Light => false,
            ColorScheme::Dark => true,
        }
    }

    /// Picks the preference to store when the effective value is set to `dark`.
    ///
    /// A choice that matches the ambient preference collapses to `Auto`, so an
    /// explicit state is only ever stored when it differs from the system.
    pub fn for_value(dark: bool, ambient_dark: bool) -> ColorScheme {
        if dark == ambient_dark {
            ColorScheme::Auto
        } else if dark {
            ColorScheme::Dark
        } else {
            ColorScheme::Light
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown color-scheme name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown color scheme '{0}' (expected auto, light or dark)")]
pub struct ParseColorSchemeError(pub String);

impl FromStr for ColorScheme {
    type Err = ParseColorSchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "auto" => Ok(ColorScheme::Auto),
            "light" => Ok(ColorScheme::Light),
            "dark" => Ok(ColorScheme::Dark),
            other => Err(ParseColorSchemeError(other.to_string())),
        }
    }
}
