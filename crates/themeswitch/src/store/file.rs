//! JSON-file preference store.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{PreferenceStore, StoreError};

/// A preference store persisted as a flat JSON object.
///
/// The file is read on every `get` so that edits made by another process
/// are picked up, and rewritten in full on every `set`. A missing file
/// reads as empty; it is created (with parent directories) on first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if json.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&json).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        // A corrupt file is replaced rather than blocking every future write.
        let mut entries = match self.read_entries() {
            Err(StoreError::Corrupt { .. }) => BTreeMap::new(),
            other => other?,
        };
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let json = serde_json::to_string_pretty(&entries).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json).map_err(|e| self.io_error(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("prefs.json"));
        assert_eq!(store.get("theme").unwrap(), None);
    }

    #[test]
    fn test_set_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("prefs.json");
        let mut store = FileStore::new(&path);

        store.set("theme", "dark").unwrap();

        assert!(path.exists());
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_set_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, r#"{ "font": "serif" }"#).unwrap();

        let mut store = FileStore::new(&path);
        store.set("theme", "light").unwrap();

        assert_eq!(store.get("font").unwrap().as_deref(), Some("serif"));
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_values_survive_new_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        FileStore::new(&path).set("theme", "auto").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("auto"));
    }

    #[test]
    fn test_corrupt_file_reported_then_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "not json at all").unwrap();

        let mut store = FileStore::new(&path);
        assert!(matches!(
            store.get("theme"),
            Err(StoreError::Corrupt { .. })
        ));

        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_empty_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "").unwrap();

        let store = FileStore::new(&path);
        assert_eq!(store.get("theme").unwrap(), None);
    }
}
