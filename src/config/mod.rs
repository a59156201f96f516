//! Configuration management module
//!
//! This module loads, edits and persists the launcher's settings document.
//! The document lives in %APPDATA%\QuickLauncher\setting.ini and is rewritten
//! atomically after every change.

pub mod document;
pub mod models;
pub mod store;

pub use models::{
    ButtonKey, ButtonRecord, ButtonUpdate, DEFAULT_BUTTON_LABEL, PreferencesUpdate,
    WindowPreferences,
};
pub use store::ConfigStore;
