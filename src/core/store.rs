//! Key-value persistence for fee settings and the theme flag
//!
//! The backing store is an opaque string map with last-write-wins semantics.
//! [`SettingsStore`] never fails: unreadable or malformed data falls back to
//! defaults and write failures are logged and ignored, so a calculation can
//! always proceed in memory.

use crate::core::models::{FeeConfiguration, Theme};
use crate::core::settings::validate_candidate;
use crate::{debug, warn};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Storage key for the serialized fee settings
pub const SETTINGS_STORAGE_KEY: &str = "installment-settings-v1";

/// Storage key for the theme flag
pub const THEME_STORAGE_KEY: &str = "installment-theme";

/// Failures of the storage backend
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend cannot be used at all
    #[error("storage is unavailable")]
    Unavailable,
    /// Reading or writing the backing file failed
    #[error("storage I/O error at {}: {source}", .path.display())]
    Io {
        /// Backing file
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },
    /// The backing file is not a JSON object of strings
    #[error("storage file {} is corrupt: {source}", .path.display())]
    Corrupt {
        /// Backing file
        path: PathBuf,
        /// Underlying error
        source: serde_json::Error,
    },
    /// A value could not be encoded
    #[error("failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Minimal string key-value store
pub trait KeyValueStore {
    /// Read the value stored under `key`
    ///
    /// # Errors
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    /// Returns an error if the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store; can simulate an unavailable backend
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    unavailable: bool,
}

impl MemoryStore {
    /// Empty, working store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose every operation fails with [`StoreError::Unavailable`]
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            entries: BTreeMap::new(),
            unavailable: true,
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable);
        }
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable);
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a single JSON object on disk
///
/// ```json
/// { "installment-theme": "dark", "installment-settings-v1": "{...}" }
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store backed by `path`; the file is created on first write
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        // A corrupt file is replaced rather than blocking every future write
        let mut entries = match self.read_all() {
            Err(StoreError::Corrupt { .. }) => BTreeMap::new(),
            other => other?,
        };
        entries.insert(key.to_string(), value.to_string());

        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        let json = serde_json::to_string_pretty(&entries)?;
        fs::write(&self.path, json).map_err(io_err)
    }
}

/// Settings and theme persistence on top of a [`KeyValueStore`]
#[derive(Debug, Clone)]
pub struct SettingsStore<S> {
    store: S,
}

impl<S: KeyValueStore> SettingsStore<S> {
    /// Wrap a key-value backend
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the backend
    pub const fn backend(&self) -> &S {
        &self.store
    }

    /// Load persisted settings, falling back to the defaults when nothing is
    /// stored, the backend fails, or the stored blob is rejected.
    #[must_use]
    pub fn load_settings(&self) -> FeeConfiguration {
        let raw = match self.store.get(SETTINGS_STORAGE_KEY) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return FeeConfiguration::default(),
            Err(e) => {
                warn!("Could not read stored settings, using defaults: {e}");
                return FeeConfiguration::default();
            }
        };

        let candidate = match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("Stored settings are not valid JSON, using defaults: {e}");
                return FeeConfiguration::default();
            }
        };

        validate_candidate(&candidate).unwrap_or_else(|| {
            warn!("Stored settings failed validation, using defaults");
            FeeConfiguration::default()
        })
    }

    /// Persist settings. Returns `false` if the backend refused the write.
    pub fn persist_settings(&mut self, settings: &FeeConfiguration) -> bool {
        let result = serde_json::to_string(settings)
            .map_err(StoreError::from)
            .and_then(|json| self.store.set(SETTINGS_STORAGE_KEY, &json));
        match result {
            Ok(()) => {
                debug!("Persisted settings under {SETTINGS_STORAGE_KEY}");
                true
            }
            Err(e) => {
                warn!("Could not persist settings: {e}");
                false
            }
        }
    }

    /// Persist the default settings and return them
    pub fn reset_settings(&mut self) -> FeeConfiguration {
        let defaults = FeeConfiguration::default();
        self.persist_settings(&defaults);
        defaults
    }

    /// Load the theme flag; anything unexpected yields [`Theme::Dark`]
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        match self.store.get(THEME_STORAGE_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or_default(),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!("Could not read stored theme: {e}");
                Theme::default()
            }
        }
    }

    /// Persist the theme flag. Returns `false` if the backend refused the write.
    pub fn save_theme(&mut self, theme: Theme) -> bool {
        match self.store.set(THEME_STORAGE_KEY, theme.as_str()) {
            Ok(()) => true,
            Err(e) => {
                warn!("Could not persist theme: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_unavailable_store_errors() {
        let mut store = MemoryStore::unavailable();
        assert!(matches!(store.get("k"), Err(StoreError::Unavailable)));
        assert!(matches!(store.set("k", "v"), Err(StoreError::Unavailable)));
    }

    #[test]
    fn test_file_store_missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("absent.json"));
        assert_eq!(store.get(THEME_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_store_creates_parent_and_keeps_other_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("storage.json");
        let mut store = FileStore::new(&path);

        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.set("a", "3").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("a").unwrap().as_deref(), Some("3"));
        assert_eq!(reopened.get("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_file_store_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json").unwrap();
        let mut store = FileStore::new(&path);

        assert!(matches!(store.get("a"), Err(StoreError::Corrupt { .. })));
        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_theme_defaults_to_dark() {
        let mut store = MemoryStore::new();
        assert_eq!(SettingsStore::new(store.clone()).load_theme(), Theme::Dark);

        store.set(THEME_STORAGE_KEY, "purple").unwrap();
        assert_eq!(SettingsStore::new(store).load_theme(), Theme::Dark);

        assert_eq!(
            SettingsStore::new(MemoryStore::unavailable()).load_theme(),
            Theme::Dark
        );
    }

    #[test]
    fn test_theme_round_trip() {
        let mut settings = SettingsStore::new(MemoryStore::new());
        assert!(settings.save_theme(Theme::Light));
        assert_eq!(settings.load_theme(), Theme::Light);
    }
}
