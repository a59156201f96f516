//! `QuickLauncher` - A cursor-summoned overlay of launcher buttons
//!
//! A transparent, always-on-top overlay shows round buttons that each open a
//! URL or a filesystem path. Buttons are configured in a settings window and
//! persisted to `%APPDATA%\QuickLauncher\setting.ini`.
//!
//! The library holds everything that does not need a window:
//! - [`config`]: the INI-backed button store (write-through, atomic rewrites)
//! - [`controller`]: keeps live widgets in step with the store
//! - [`launcher`]: address classification and the desktop openers
//! - [`utils`]: logging and single-instance enforcement
//!
//! The binary adds the Slint windows, the tray icon and the global hotkey.

pub mod config;
pub mod controller;
pub mod error;
pub mod launcher;
pub mod utils;

#[cfg(test)]
mod test_utils;

pub use error::{QuickLauncherError, Result};
