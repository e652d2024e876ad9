// src/preferences.rs
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Key-value store for UI preferences that must survive a restart.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

#[derive(Debug, Default, Clone)]
pub struct MemoryPreferenceStore {
    values: BTreeMap<String, String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

/// Preferences persisted as a flat JSON string map. Every mutation is written
/// through to disk; write failures are logged and the in-memory value kept.
#[derive(Debug)]
pub struct JsonFilePreferenceStore {
    values: BTreeMap<String, String>,
    path: PathBuf,
}

impl JsonFilePreferenceStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = Self::load(&path);
        Self { values, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> BTreeMap<String, String> {
        if !path.exists() {
            info!("Preferences file {:?} not found. Starting empty.", path);
            return BTreeMap::new();
        }
        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<BTreeMap<String, String>>(&content) {
                Ok(values) => {
                    debug!("Loaded {} preferences from {:?}", values.len(), path);
                    values
                }
                Err(e) => {
                    error!(
                        "Failed to parse preferences file {:?}: {}. Starting empty.",
                        path, e
                    );
                    BTreeMap::new()
                }
            },
            Err(e) => {
                error!("Failed to read preferences file {:?}: {}. Starting empty.", path, e);
                BTreeMap::new()
            }
        }
    }

    fn save(&self) {
        let content = match serde_json::to_string_pretty(&self.values) {
            Ok(content) => content,
            Err(e) => {
                error!("Failed to serialize preferences: {}", e);
                return;
            }
        };
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                error!(
                    "Failed to create parent directory {:?} for preferences: {}",
                    parent, e
                );
                return;
            }
        }
        if let Err(e) = fs::write(&self.path, content) {
            warn!("Failed to write preferences to {:?}: {}", self.path, e);
        }
    }
}

impl PreferenceStore for JsonFilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        self.save();
    }

    fn remove(&mut self, key: &str) {
        if self.values.remove(key).is_some() {
            self.save();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_get_set_remove() {
        let mut store = MemoryPreferenceStore::new();
        assert_eq!(store.get("k"), None);
        store.set("k", "v");
        assert_eq!(store.get("k").as_deref(), Some("v"));
        store.remove("k");
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config").join("preferences.json");

        let mut store = JsonFilePreferenceStore::open(&path);
        store.set("dark-mode-preference", "light");
        store.set("other", "1");
        store.remove("other");

        let reopened = JsonFilePreferenceStore::open(&path);
        assert_eq!(reopened.get("dark-mode-preference").as_deref(), Some("light"));
        assert_eq!(reopened.get("other"), None);
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "{not json").unwrap();

        let store = JsonFilePreferenceStore::open(&path);
        assert_eq!(store.get("dark-mode-preference"), None);
        assert_eq!(store.path(), path.as_path());
    }
}
