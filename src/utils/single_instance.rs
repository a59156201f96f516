//! Single instance enforcement
//!
//! A second launcher would register the same hotkey and fight over
//! `setting.ini`, so startup takes a Windows named mutex first.

use crate::error::Result;

#[cfg(windows)]
use crate::error::{QuickLauncherError, StringError};

#[cfg(windows)]
use windows::Win32::Foundation::{CloseHandle, HANDLE};
#[cfg(windows)]
use windows::Win32::System::Threading::{CreateMutexW, OpenMutexW, SYNCHRONIZATION_SYNCHRONIZE};

/// Name of the mutex held by the running launcher
pub const MUTEX_NAME: &str = "Global\\QuickLauncher_SingleInstance_Mutex";

/// Holds the named mutex until dropped
#[cfg(windows)]
pub struct SingleInstanceGuard {
    mutex_handle: HANDLE,
}

#[cfg(windows)]
impl SingleInstanceGuard {
    /// Acquire the mutex, failing if another launcher already holds it
    #[expect(unsafe_code, reason = "Windows FFI for named mutex")]
    pub fn acquire() -> Result<Self> {
        use tracing::{debug, warn};
        use windows::core::HSTRING;

        let name = HSTRING::from(MUTEX_NAME);

        // SAFETY: `name` outlives both calls; an opened handle is closed before returning.
        unsafe {
            if let Ok(existing) = OpenMutexW(SYNCHRONIZATION_SYNCHRONIZE, false, &name) {
                warn!("QuickLauncher is already running");
                let _ = CloseHandle(existing);
                return Err(QuickLauncherError::ConfigError(StringError::new(
                    "QuickLauncher is already running",
                )));
            }

            let mutex_handle = CreateMutexW(None, true, &name)
                .map_err(|e| QuickLauncherError::ConfigError(Box::new(e)))?;
            debug!("Acquired {}", MUTEX_NAME);
            Ok(Self { mutex_handle })
        }
    }
}

#[cfg(windows)]
impl Drop for SingleInstanceGuard {
    #[expect(unsafe_code, reason = "Windows FFI for named mutex")]
    fn drop(&mut self) {
        // SAFETY: the handle came from CreateMutexW and is closed exactly once.
        unsafe {
            let _ = CloseHandle(self.mutex_handle);
        }
        tracing::debug!("Released {}", MUTEX_NAME);
    }
}

/// No-op guard on platforms without named mutexes
#[cfg(not(windows))]
pub struct SingleInstanceGuard;

#[cfg(not(windows))]
impl SingleInstanceGuard {
    /// Always succeeds
    pub fn acquire() -> Result<Self> {
        Ok(Self)
    }
}
