//! Write-through store of button records and window preferences
//!
//! The store owns the decoded settings document. Every mutating operation
//! updates the in-memory state first and then rewrites the whole file through
//! a temporary file and an atomic rename, so a reader never observes a partial
//! write. If the write fails the error is returned and memory stays ahead of
//! disk until the next successful write.

use crate::config::document::Document;
use crate::config::models::{
    ButtonKey, ButtonRecord, ButtonUpdate, PreferencesUpdate, WindowPreferences,
};
use crate::error::{QuickLauncherError, Result};
use ini::Ini;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Application directory under `%APPDATA%`
pub const APP_DIR_NAME: &str = "QuickLauncher";

/// File name of the settings document
pub const CONFIG_FILE_NAME: &str = "setting.ini";

/// Settings file of earlier releases, relative to the working directory
pub const LEGACY_CONFIG_PATH: &str = CONFIG_FILE_NAME;

/// Persistent store of launcher buttons and window preferences
pub struct ConfigStore {
    path: PathBuf,
    records: HashMap<ButtonKey, ButtonRecord>,
    /// Listing order: file order, then creation order
    order: Vec<ButtonKey>,
    preferences: WindowPreferences,
    foreign: Ini,
}

impl ConfigStore {
    /// Directory holding the settings document and logs
    ///
    /// Returns: %APPDATA%\QuickLauncher (or .\QuickLauncher when APPDATA is unset)
    pub fn app_dir() -> PathBuf {
        let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(appdata).join(APP_DIR_NAME)
    }

    /// Path of the settings document
    pub fn default_path() -> PathBuf {
        Self::app_dir().join(CONFIG_FILE_NAME)
    }

    /// Load the store from [`ConfigStore::default_path`]
    ///
    /// Falls back to [`LEGACY_CONFIG_PATH`] when only the old file exists.
    pub fn load() -> Result<Self> {
        Self::load_or_migrate(Self::default_path(), LEGACY_CONFIG_PATH)
    }

    /// Load the store from `path`, adopting `legacy` when `path` is missing
    ///
    /// The legacy document is copied to `path` right away and left in place.
    /// If that copy fails the store still loads; the next mutation retries it.
    pub fn load_or_migrate(path: impl Into<PathBuf>, legacy: impl AsRef<Path>) -> Result<Self> {
        let path = path.into();
        let legacy = legacy.as_ref();
        if path.exists() || !legacy.is_file() {
            return Self::load_from(path);
        }

        info!(
            "Migrating settings from {} to {}",
            legacy.display(),
            path.display()
        );
        let mut store = Self::load_from(legacy)?;
        store.path = path;
        if let Err(e) = store.save() {
            warn!(
                "Failed to write migrated settings to {}: {}",
                store.path.display(),
                e
            );
        }
        Ok(store)
    }

    /// Load the store from `path`
    ///
    /// A missing file yields an empty store with default preferences. A file
    /// that is not valid UTF-8 or not valid INI is logged and treated the same
    /// way; it is replaced on the next write.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let document = match std::fs::read_to_string(&path) {
            Ok(text) => Document::parse(&text).unwrap_or_else(|e| {
                warn!(
                    "Failed to parse {}, using defaults: {}",
                    path.display(),
                    e
                );
                Document::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("Configuration file not found, using defaults");
                Document::default()
            }
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                warn!(
                    "Configuration file {} is not valid UTF-8, using defaults",
                    path.display()
                );
                Document::default()
            }
            Err(e) => return Err(e.into()),
        };

        let mut store = Self {
            path,
            records: HashMap::with_capacity(document.buttons.len()),
            order: Vec::with_capacity(document.buttons.len()),
            preferences: document.preferences,
            foreign: document.foreign,
        };
        for record in document.buttons {
            store.order.push(record.key);
            store.records.insert(record.key, record);
        }

        info!(
            "Configuration loaded from {} with {} buttons",
            store.path.display(),
            store.records.len()
        );
        Ok(store)
    }

    /// Backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All persisted button records
    pub fn list_buttons(&self) -> Vec<ButtonRecord> {
        self.iter_buttons().cloned().collect()
    }

    /// Iterate button records in listing order
    pub fn iter_buttons(&self) -> impl Iterator<Item = &ButtonRecord> {
        self.order.iter().filter_map(|key| self.records.get(key))
    }

    /// Number of button records
    pub fn button_count(&self) -> usize {
        self.records.len()
    }

    /// Look up one record
    pub fn button(&self, key: ButtonKey) -> Option<&ButtonRecord> {
        self.records.get(&key)
    }

    /// Create a record at the default position and persist it
    ///
    /// The record's toggle is inherited from the global preference.
    pub fn create_button(
        &mut self,
        name: impl Into<String>,
        address: impl Into<String>,
    ) -> Result<ButtonKey> {
        let mut key = ButtonKey::generate();
        while self.records.contains_key(&key) {
            key = ButtonKey::generate();
        }

        let record = ButtonRecord::new(
            key,
            single_line(name.into()),
            single_line(address.into()),
            self.preferences.toggle,
        );
        debug!("Creating {} ({:?})", key, record.name);

        self.order.push(key);
        self.records.insert(key, record);
        self.save()?;
        Ok(key)
    }

    /// Apply a partial update to a record and persist it
    pub fn update_button(&mut self, key: ButtonKey, update: &ButtonUpdate) -> Result<()> {
        let record = self
            .records
            .get_mut(&key)
            .ok_or(QuickLauncherError::ButtonNotFound(key))?;

        let update = ButtonUpdate {
            name: update.name.clone().map(single_line),
            address: update.address.clone().map(single_line),
            ..update.clone()
        };
        if update.apply_to(record) {
            debug!("Updated {}", key);
        }
        self.save()
    }

    /// Move several buttons and persist them with a single rewrite
    ///
    /// Keys without a record are skipped. Returns the number of records moved.
    pub fn update_positions(
        &mut self,
        positions: impl IntoIterator<Item = (ButtonKey, i32, i32)>,
    ) -> Result<usize> {
        let mut moved = 0;
        for (key, x, y) in positions {
            match self.records.get_mut(&key) {
                Some(record) => {
                    if ButtonUpdate::position(x, y).apply_to(record) {
                        moved += 1;
                    }
                }
                None => debug!("Skipping position of vanished {}", key),
            }
        }
        self.save()?;
        Ok(moved)
    }

    /// Remove a record and persist the removal
    pub fn delete_button(&mut self, key: ButtonKey) -> Result<()> {
        if self.records.remove(&key).is_none() {
            return Err(QuickLauncherError::ButtonNotFound(key));
        }
        self.order.retain(|k| *k != key);
        info!("Deleted {}", key);
        self.save()
    }

    /// Current window preferences
    pub fn preferences(&self) -> &WindowPreferences {
        &self.preferences
    }

    /// Apply a partial preferences update and persist it
    pub fn set_preferences(&mut self, update: PreferencesUpdate) -> Result<()> {
        if update.apply_to(&mut self.preferences) {
            debug!("Updated preferences: {:?}", self.preferences);
        }
        self.save()
    }

    /// Rewrite the whole document atomically
    fn save(&self) -> Result<()> {
        let bytes = Document::render(self.iter_buttons(), &self.preferences, &self.foreign)?;

        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let mut temp = tempfile::NamedTempFile::new_in(&dir)?;
        temp.write_all(&bytes)?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| e.error)?;

        debug!("Configuration saved to {}", self.path.display());
        Ok(())
    }
}

/// INI values are single lines with no surrounding whitespace
fn single_line(value: String) -> String {
    if value.contains(['\r', '\n']) {
        value.replace(['\r', '\n'], " ").trim().to_string()
    } else if value.trim().len() == value.len() {
        value
    } else {
        value.trim().to_string()
    }
}
