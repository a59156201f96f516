//! Error types for `QuickLauncher`
//!
//! Two failure classes reach callers of the core: a referenced button that no
//! longer exists, and an I/O failure while reading or rewriting the settings
//! document. The remaining variants cover the binary's environment (paths,
//! logging, tray and hotkey setup) and the external openers.

use crate::config::ButtonKey;
use thiserror::Error;

/// Simple error type for wrapping string messages while implementing `std::error::Error`
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StringError(pub String);

impl StringError {
    /// Create a new boxed `StringError` from a message
    pub fn new(msg: impl Into<String>) -> Box<Self> {
        Box::new(Self(msg.into()))
    }
}

/// Main error type for `QuickLauncher`
#[derive(Debug, Error)]
pub enum QuickLauncherError {
    /// An operation referenced a button key absent from the store
    #[error("Button not found: {0}")]
    ButtonNotFound(ButtonKey),

    /// Reading or writing the settings document failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration environment error (paths, logging setup)
    #[error("Configuration error: {0}")]
    ConfigError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A URL or path opener failed to start
    #[error("Failed to launch: {0}")]
    LaunchFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// System tray or global hotkey setup failed
    #[error("Tray or hotkey error: {0}")]
    TrayError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type alias for `QuickLauncher` operations
pub type Result<T> = std::result::Result<T, QuickLauncherError>;

/// Convert an error to a message suitable for an error dialog
pub fn get_user_friendly_error(error: &QuickLauncherError) -> String {
    match error {
        QuickLauncherError::ButtonNotFound(key) => format!(
            "The button {key} no longer exists.\n\n\
             It may have been deleted from the settings window."
        ),
        QuickLauncherError::IoError(e) => format!(
            "Failed to read or write the settings file:\n\n{e}\n\n\
             Your changes may not persist.\n\
             Check file permissions and disk space."
        ),
        QuickLauncherError::ConfigError(_) => "Failed to prepare the configuration folder.\n\n\
             Check that you have write permissions to:\n\
             %APPDATA%\\QuickLauncher"
            .to_string(),
        QuickLauncherError::LaunchFailed(e) => format!(
            "Could not open the button's address:\n\n{e}\n\n\
             Check that the path exists or the URL is valid."
        ),
        QuickLauncherError::TrayError(_) => "Failed to set up the tray icon or global hotkey.\n\n\
             Another program may already be using Ctrl+Space."
            .to_string(),
    }
}
