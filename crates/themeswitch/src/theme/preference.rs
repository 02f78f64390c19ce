//! The user-facing three-valued theme preference.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The theme a user picked: a fixed mode, or `auto` to follow the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    Auto,
}

impl ThemePreference {
    /// All preferences, in the order a selector control lists them.
    pub const ALL: [ThemePreference; 3] = [
        ThemePreference::Light,
        ThemePreference::Dark,
        ThemePreference::Auto,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
            ThemePreference::Auto => "auto",
        }
    }

    /// Parses an untrusted value, treating anything unrecognised as `auto`.
    pub fn parse_lenient(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of `light`, `dark` or `auto`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme preference '{0}' (expected light, dark or auto)")]
pub struct ParsePreferenceError(pub String);

impl FromStr for ThemePreference {
    type Err = ParsePreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            "auto" => Ok(ThemePreference::Auto),
            other => Err(ParsePreferenceError(other.to_string())),
        }
    }
}

/// Classification of whatever raw string sits in the preference store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredValue {
    /// A valid preference.
    Preference(ThemePreference),
    /// Nothing stored, or a stringified "no value" (`undefined`, `null`).
    Missing,
    /// An empty string.
    Blank,
    /// Anything else.
    Malformed(String),
}

impl StoredValue {
    /// Markers a script writes when it stringifies an absent value.
    pub const ABSENT_MARKERS: [&'static str; 2] = ["undefined", "null"];

    pub fn classify(raw: Option<&str>) -> Self {
        match raw {
            None => StoredValue::Missing,
            Some("") => StoredValue::Blank,
            Some(s) if Self::ABSENT_MARKERS.contains(&s) => StoredValue::Missing,
            Some(s) => match s.parse() {
                Ok(pref) => StoredValue::Preference(pref),
                Err(_) => StoredValue::Malformed(s.to_string()),
            },
        }
    }

    pub fn preference(&self) -> Option<ThemePreference> {
        match self {
            StoredValue::Preference(pref) => Some(*pref),
            _ => None,
        }
    }
}
