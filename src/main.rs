//! `QuickLauncher` - Cursor-summoned launcher overlay
//!
//! Press Ctrl+Space to show a ring of buttons around the cursor; each one
//! opens a URL or a file. Buttons are edited in the settings window reachable
//! from the overlay or the tray icon.

// Set Windows subsystem to hide console window
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
#![expect(
    missing_docs,
    reason = "Slint-generated code from include_modules! lacks doc comments"
)]
#![allow(clippy::unwrap_used)] // Slint-generated code from include_modules! uses .unwrap() extensively

// GUI module is only in the binary, not the library
mod gui;

use anyhow::{Context, Result};
use gui::GuiController;
use quicklauncher::{QuickLauncherError, config::ConfigStore, utils};
use tracing::{error, info};

// Include Slint-generated code
slint::include_modules!();

/// Main entry point
///
/// Initializes logging, enforces a single instance, loads `setting.ini` and
/// hands control to the Slint event loop.
fn main() -> Result<()> {
    let log_path = utils::init_logging().context("Failed to initialize logging system")?;
    info!("Logging to {}", log_path.display());

    let _single_instance_guard = match utils::SingleInstanceGuard::acquire() {
        Ok(guard) => guard,
        Err(e) => {
            error!("Single instance check failed: {}", e);
            show_error_and_exit(
                "QuickLauncher is already running.\n\n\
                 Press Ctrl+Space or use the tray icon to open it.",
            );
            return Err(e.into());
        }
    };

    let store = match ConfigStore::load().context("Failed to load button configuration") {
        Ok(store) => store,
        Err(e) => {
            error!("{:#}", e);
            show_error_and_exit(&startup_error_message(&e));
            return Err(e);
        }
    };
    info!(
        "Loaded {} buttons from {}",
        store.button_count(),
        store.path().display()
    );

    let gui = GuiController::new(store).context("Failed to create windows")?;

    info!("Starting GUI event loop");
    gui.run().context("GUI event loop terminated with error")?;

    info!("QuickLauncher shutting down");
    Ok(())
}

fn startup_error_message(e: &anyhow::Error) -> String {
    let detail = match e.downcast_ref::<QuickLauncherError>() {
        Some(err) => quicklauncher::error::get_user_friendly_error(err),
        None => format!("{e:#}"),
    };
    format!("QuickLauncher could not start:\n\n{detail}")
}

/// Shows an error dialog and exits the application.
#[cfg(windows)]
fn show_error_and_exit(message: &str) {
    use rfd::MessageDialog;

    MessageDialog::new()
        .set_title("QuickLauncher - Error")
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .set_level(rfd::MessageLevel::Error)
        .show();

    std::process::exit(1);
}

/// Shows an error dialog and exits the application (non-Windows fallback).
#[cfg(not(windows))]
fn show_error_and_exit(message: &str) {
    eprintln!("ERROR: {message}");
    std::process::exit(1);
}
