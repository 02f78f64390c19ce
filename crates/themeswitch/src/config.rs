//! Names of the storage key, attributes, classes and event the controller touches.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::theme::ThemePreference;

/// Errors from loading or validating a [`ThemeConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON")]
    Parse(#[from] serde_json::Error),
    /// A name that must be non-empty was empty.
    #[error("config field '{0}' must not be empty")]
    Empty(&'static str),
}

/// Markup and storage contract shared by the controller and the page.
///
/// The defaults follow Bootstrap's colour-mode conventions: the theme is
/// written to `data-bs-theme` on the root element, options carry
/// `data-bs-theme-value`, and hidden icons get `d-none`.
///
/// Every field has a default, so a JSON file only needs the fields it
/// changes:
///
/// ```rust
/// use themeswitch::ThemeConfig;
///
/// let config = ThemeConfig::from_json_str(r#"{ "storage_key": "site-theme" }"#).unwrap();
/// assert_eq!(config.storage_key, "site-theme");
/// assert_eq!(config.root_attribute, "data-bs-theme");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Key of the persisted preference.
    pub storage_key: String,
    /// Root element attribute holding the effective theme.
    pub root_attribute: String,
    /// Event broadcast after every application.
    pub change_event: String,
    /// Id of the selector control; its absence disables UI sync.
    pub selector_id: String,
    /// Attribute carrying each option's preference value.
    pub option_attribute: String,
    /// Class shared by all selector icons.
    pub icon_class: String,
    /// Icon ids are this prefix followed by the preference name.
    pub icon_id_prefix: String,
    pub active_class: String,
    pub hidden_class: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".to_string(),
            root_attribute: "data-bs-theme".to_string(),
            change_event: "changed.bs.theme".to_string(),
            selector_id: "theme-selector".to_string(),
            option_attribute: "data-bs-theme-value".to_string(),
            icon_class: "theme-select-icon".to_string(),
            icon_id_prefix: "theme-icon-".to_string(),
            active_class: "active".to_string(),
            hidden_class: "d-none".to_string(),
        }
    }
}

impl ThemeConfig {
    /// Parses and validates a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ThemeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Id of the icon shown for `pref`.
    pub fn icon_id(&self, pref: ThemePreference) -> String {
        format!("{}{}", self.icon_id_prefix, pref.as_str())
    }

    /// Checks that every name the controller matches on is non-empty.
    ///
    /// `icon_id_prefix` may be empty: icons can be named `light`, `dark`, `auto`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("storage_key", &self.storage_key),
            ("root_attribute", &self.root_attribute),
            ("change_event", &self.change_event),
            ("selector_id", &self.selector_id),
            ("option_attribute", &self.option_attribute),
            ("icon_class", &self.icon_class),
            ("active_class", &self.active_class),
            ("hidden_class", &self.hidden_class),
        ];
        for (field, value) in required {
            if value.is_empty() {
                return Err(ConfigError::Empty(field));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ThemeConfig::default();
        assert_eq!(config.storage_key, "theme");
        assert_eq!(config.root_attribute, "data-bs-theme");
        assert_eq!(config.change_event, "changed.bs.theme");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_icon_id() {
        let config = ThemeConfig::default();
        assert_eq!(config.icon_id(ThemePreference::Dark), "theme-icon-dark");
        assert_eq!(config.icon_id(ThemePreference::Auto), "theme-icon-auto");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ThemeConfig::from_json_str(r#"{ "hidden_class": "hidden" }"#).unwrap();
        assert_eq!(config.hidden_class, "hidden");
        assert_eq!(config.active_class, "active");
    }

    #[test]
    fn test_empty_field_rejected() {
        let err = ThemeConfig::from_json_str(r#"{ "storage_key": "" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Empty("storage_key")));
    }

    #[test]
    fn test_empty_icon_prefix_allowed() {
        let config = ThemeConfig::from_json_str(r#"{ "icon_id_prefix": "" }"#).unwrap();
        assert_eq!(config.icon_id(ThemePreference::Light), "light");
    }

    #[test]
    fn test_invalid_json() {
        let err = ThemeConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "change_event": "theme:changed" }}"#).unwrap();

        let config = ThemeConfig::load(file.path()).unwrap();
        assert_eq!(config.change_event, "theme:changed");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ThemeConfig::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("nope.json"));
        let cause = std::error::Error::source(&err).unwrap().to_string();
        assert!(!err.to_string().contains(&cause));
    }
}
