//! Preference store: a small key-value file that survives sessions
//!
//! Both `get` and `set` are synchronous and best-effort. A read failure or a
//! malformed file is treated as "nothing stored"; a write failure degrades to
//! "nothing persisted" for the session. Neither may ever crash the caller.

use crate::models::{DisplayLanguage, SavedLocation};
use directories::ProjectDirs;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, warn};

const LAST_LOCATION_KEY: &str = "aetheria_last_location";
const LANGUAGE_KEY: &str = "aetheria_language";
const DARK_MODE_KEY: &str = "aetheria_dark_mode";

/// Persistent user preferences, loaded once and flushed on every change
#[derive(Debug)]
pub struct PreferenceStore {
    path: Option<PathBuf>,
    values: Mutex<HashMap<String, String>>,
}

impl PreferenceStore {
    /// Open the store at `path`, or at the platform data directory when
    /// `path` is `None`. Never fails: an unreadable or malformed file is an
    /// empty store, and an undeterminable path means nothing gets persisted.
    pub fn open(path: Option<PathBuf>) -> Self {
        let path = path.or_else(default_path);

        let values = match &path {
            Some(p) if p.exists() => match fs::read_to_string(p) {
                Ok(contents) => match serde_json::from_str(&contents) {
                    Ok(map) => map,
                    Err(e) => {
                        warn!("Ignoring malformed preference file {}: {e}", p.display());
                        HashMap::new()
                    }
                },
                Err(e) => {
                    warn!("Could not read preference file {}: {e}", p.display());
                    HashMap::new()
                }
            },
            Some(_) => HashMap::new(),
            None => {
                warn!("No preference path available; preferences will not persist");
                HashMap::new()
            }
        };

        Self {
            path,
            values: Mutex::new(values),
        }
    }

    /// Read a raw value
    pub fn get(&self, key: &str) -> Option<String> {
        let values = self.values.lock().ok()?;
        values.get(key).cloned()
    }

    /// Write a raw value and flush to disk, swallowing any failure
    pub fn set(&self, key: &str, value: &str) {
        let snapshot = {
            let Ok(mut values) = self.values.lock() else {
                return;
            };
            values.insert(key.to_string(), value.to_string());
            values.clone()
        };

        let Some(path) = &self.path else {
            return;
        };

        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!("Could not create preference directory: {e}");
                return;
            }
        }

        match serde_json::to_string_pretty(&snapshot) {
            Ok(contents) => {
                if let Err(e) = fs::write(path, contents) {
                    warn!("Could not persist preferences: {e}");
                }
            }
            Err(e) => warn!("Could not serialize preferences: {e}"),
        }
    }

    /// Last-viewed location, if one was stored and still parses
    pub fn last_location(&self) -> Option<SavedLocation> {
        let raw = self.get(LAST_LOCATION_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(saved) => Some(saved),
            Err(e) => {
                debug!("Stored location did not parse, treating as absent: {e}");
                None
            }
        }
    }

    /// Persist the last-viewed location
    pub fn set_last_location(&self, location: &SavedLocation) {
        match serde_json::to_string(location) {
            Ok(raw) => self.set(LAST_LOCATION_KEY, &raw),
            Err(e) => warn!("Could not serialize location: {e}"),
        }
    }

    /// Stored display language, if any
    pub fn language(&self) -> Option<DisplayLanguage> {
        self.get(LANGUAGE_KEY)
            .and_then(|code| DisplayLanguage::from_code(&code))
    }

    /// Persist the display language
    pub fn set_language(&self, lang: DisplayLanguage) {
        self.set(LANGUAGE_KEY, lang.code());
    }

    /// Stored theme choice, if any
    pub fn dark_mode(&self) -> Option<bool> {
        self.get(DARK_MODE_KEY).and_then(|raw| raw.parse().ok())
    }

    /// Persist the theme choice
    pub fn set_dark_mode(&self, dark: bool) {
        self.set(DARK_MODE_KEY, if dark { "true" } else { "false" });
    }
}

fn default_path() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("dev", "aetheria", "aetheria")?;
    Some(dirs.data_dir().join("preferences.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_round_trip_and_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.json");

        let store = PreferenceStore::open(Some(path.clone()));
        store.set_language(DisplayLanguage::Es);
        store.set_last_location(&SavedLocation {
            lat: 48.8566,
            lon: 2.3522,
            name: "Paris, France".to_string(),
        });
        store.set_dark_mode(true);

        let reopened = PreferenceStore::open(Some(path));
        assert_eq!(reopened.language(), Some(DisplayLanguage::Es));
        assert_eq!(reopened.dark_mode(), Some(true));
        let saved = reopened.last_location().unwrap();
        assert_eq!(saved.name, "Paris, France");
        assert_eq!(saved.lat, 48.8566);
    }

    #[test]
    fn test_malformed_file_is_empty_store() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "{not json").unwrap();

        let store = PreferenceStore::open(Some(path));
        assert_eq!(store.language(), None);
        assert_eq!(store.last_location(), None);
    }

    #[test]
    fn test_malformed_location_value_is_absent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.json");

        let store = PreferenceStore::open(Some(path));
        store.set(LAST_LOCATION_KEY, "garbage");
        assert_eq!(store.last_location(), None);
    }

    #[test]
    fn test_unwritable_path_never_panics() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();

        // Parent of the target is a regular file, so every flush fails
        let store = PreferenceStore::open(Some(blocker.join("preferences.json")));
        store.set_language(DisplayLanguage::En);

        // The in-memory value still serves the current session
        assert_eq!(store.language(), Some(DisplayLanguage::En));
    }

    #[test]
    fn test_unknown_language_code_is_absent() {
        let dir = tempdir().unwrap();
        let store = PreferenceStore::open(Some(dir.path().join("preferences.json")));
        store.set(LANGUAGE_KEY, "de");
        assert_eq!(store.language(), None);
    }
}
