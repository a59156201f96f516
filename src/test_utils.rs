//! Shared test utilities for `QuickLauncher` unit tests.
//!
//! Only compiled during testing (`#[cfg(test)]`).

use crate::config::ButtonKey;
use crate::controller::{ButtonWidget, OverlaySurface};
use crate::launcher::Opener;
use std::sync::Mutex;
use tempfile::TempDir;

/// Serializes tests that modify the APPDATA environment variable.
static APPDATA_LOCK: Mutex<()> = Mutex::new(());

/// Create a temporary directory that is removed when dropped.
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Points APPDATA at a temporary directory for the guard's lifetime.
///
/// # Safety Considerations
///
/// `std::env::set_var` and `std::env::remove_var` are unsafe because another
/// thread may read the environment concurrently. `APPDATA_LOCK` serializes
/// every test that touches APPDATA, and the original value is restored on drop
/// (including on panic).
pub struct AppdataGuard {
    original: Option<String>,
    // Held for the guard's lifetime
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[expect(
    unsafe_code,
    reason = "Test-only environment mutation serialized by APPDATA_LOCK"
)]
impl AppdataGuard {
    /// Set APPDATA to `temp_dir` until the guard is dropped.
    pub fn new(temp_dir: &TempDir) -> Self {
        let lock = APPDATA_LOCK
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let original = std::env::var("APPDATA").ok();
        // SAFETY: APPDATA_LOCK is held, no other test mutates APPDATA meanwhile.
        unsafe {
            std::env::set_var("APPDATA", temp_dir.path());
        }
        Self {
            original,
            _lock: lock,
        }
    }
}

#[expect(
    unsafe_code,
    reason = "Test-only environment mutation serialized by APPDATA_LOCK"
)]
impl Drop for AppdataGuard {
    fn drop(&mut self) {
        // SAFETY: the lock is still held until this guard's fields drop.
        if let Some(ref original) = self.original {
            unsafe {
                std::env::set_var("APPDATA", original);
            }
        } else {
            unsafe {
                std::env::remove_var("APPDATA");
            }
        }
    }
}

/// One notification received by [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// A widget was created
    Added(ButtonWidget),
    /// A widget's state changed
    Changed(ButtonWidget),
    /// A widget was removed
    Removed(ButtonKey),
    /// The overlay was hidden
    Hidden,
}

/// Surface that records every notification for later assertions
#[derive(Debug, Default)]
pub struct RecordingSurface {
    /// Notifications in arrival order
    pub events: Vec<SurfaceEvent>,
}

impl RecordingSurface {
    /// Take and clear the recorded notifications
    pub fn drain(&mut self) -> Vec<SurfaceEvent> {
        std::mem::take(&mut self.events)
    }
}

impl OverlaySurface for RecordingSurface {
    fn widget_added(&mut self, widget: &ButtonWidget) {
        self.events.push(SurfaceEvent::Added(widget.clone()));
    }

    fn widget_changed(&mut self, widget: &ButtonWidget) {
        self.events.push(SurfaceEvent::Changed(widget.clone()));
    }

    fn widget_removed(&mut self, key: ButtonKey) {
        self.events.push(SurfaceEvent::Removed(key));
    }

    fn hide_overlay(&mut self) {
        self.events.push(SurfaceEvent::Hidden);
    }
}

/// Opener that records requests instead of launching anything
#[derive(Debug, Default)]
pub struct RecordingOpener {
    /// URLs passed to `open_url`
    pub urls: Vec<String>,
    /// Paths passed to `open_path`
    pub paths: Vec<String>,
    /// When set, every request fails after being recorded
    pub fail: bool,
}

impl Opener for RecordingOpener {
    fn open_url(&mut self, url: &str) -> crate::Result<()> {
        self.urls.push(url.to_string());
        self.result()
    }

    fn open_path(&mut self, path: &str) -> crate::Result<()> {
        self.paths.push(path.to_string());
        self.result()
    }
}

impl RecordingOpener {
    fn result(&self) -> crate::Result<()> {
        if self.fail {
            Err(crate::error::QuickLauncherError::LaunchFailed(
                crate::error::StringError::new("simulated opener failure"),
            ))
        } else {
            Ok(())
        }
    }
}
