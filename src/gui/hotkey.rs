//! Global hotkey (Ctrl+Space) that toggles the overlay

#[cfg(windows)]
use global_hotkey::{
    GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState,
    hotkey::{Code, HotKey, Modifiers},
};
#[cfg(windows)]
use quicklauncher::error::{QuickLauncherError, Result};

/// Registered Ctrl+Space hotkey; unregistered when dropped
#[cfg(windows)]
pub struct OverlayHotkey {
    manager: GlobalHotKeyManager,
    hotkey: HotKey,
}

#[cfg(windows)]
impl OverlayHotkey {
    /// Register Ctrl+Space with the system
    pub fn register() -> Result<Self> {
        let manager =
            GlobalHotKeyManager::new().map_err(|e| QuickLauncherError::TrayError(Box::new(e)))?;
        let hotkey = HotKey::new(Some(Modifiers::CONTROL), Code::Space);
        manager
            .register(hotkey)
            .map_err(|e| QuickLauncherError::TrayError(Box::new(e)))?;

        tracing::info!("Registered global hotkey Ctrl+Space");
        Ok(Self { manager, hotkey })
    }

    /// Whether the hotkey was pressed since the last poll
    ///
    /// Drains the channel so held-down repeats collapse into one toggle.
    pub fn poll(&self) -> bool {
        let mut pressed = false;
        while let Ok(event) = GlobalHotKeyEvent::receiver().try_recv() {
            if event.id == self.hotkey.id() && event.state == HotKeyState::Pressed {
                pressed = true;
            }
        }
        pressed
    }
}

#[cfg(windows)]
impl Drop for OverlayHotkey {
    fn drop(&mut self) {
        if let Err(e) = self.manager.unregister(self.hotkey) {
            tracing::warn!("Failed to unregister hotkey: {}", e);
        }
    }
}
