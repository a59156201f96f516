//! System tray integration
//!
//! The tray icon is the launcher's only permanent presence: the overlay and
//! the settings window are both hidden most of the time. Menu clicks arrive on
//! the `tray-icon` event channel and are turned into [`TrayCommand`]s, which
//! the GUI polls from its timer.

#[cfg(windows)]
use quicklauncher::error::{QuickLauncherError, Result, StringError};
#[cfg(windows)]
use tray_icon::{
    Icon, MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent,
    menu::{Menu, MenuEvent, MenuId, MenuItem, PredefinedMenuItem},
};

/// Action requested from the tray
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(not(windows), expect(dead_code, reason = "No tray outside Windows"))]
pub enum TrayCommand {
    /// Show the overlay at the cursor
    ShowOverlay,
    /// Open the settings window
    OpenSettings,
    /// Exit the application
    Quit,
}

/// System tray icon with its context menu
#[cfg(windows)]
pub struct TrayIcon {
    // Removed from the tray when dropped
    _tray: tray_icon::TrayIcon,
    show_id: MenuId,
    settings_id: MenuId,
    quit_id: MenuId,
}

#[cfg(windows)]
impl TrayIcon {
    /// Create the tray icon with "Show", "Settings" and "Quit" entries
    pub fn new() -> Result<Self> {
        use tracing::info;

        let menu = Menu::new();
        let show_item = MenuItem::new("Show", true, None);
        let settings_item = MenuItem::new("Settings", true, None);
        let quit_item = MenuItem::new("Quit", true, None);

        menu.append_items(&[
            &show_item,
            &settings_item,
            &PredefinedMenuItem::separator(),
            &quit_item,
        ])
        .map_err(|e| QuickLauncherError::TrayError(Box::new(e)))?;

        let tray = TrayIconBuilder::new()
            .with_menu(Box::new(menu))
            .with_icon(Self::create_icon()?)
            .with_tooltip("QuickLauncher (Ctrl+Space)")
            .build()
            .map_err(|e| QuickLauncherError::TrayError(Box::new(e)))?;

        info!("System tray icon created");

        Ok(Self {
            _tray: tray,
            show_id: show_item.id().clone(),
            settings_id: settings_item.id().clone(),
            quit_id: quit_item.id().clone(),
        })
    }

    /// Next pending command, if any
    ///
    /// A left click on the icon counts as "Show".
    pub fn poll(&self) -> Option<TrayCommand> {
        if let Ok(event) = MenuEvent::receiver().try_recv() {
            let command = if event.id == self.show_id {
                Some(TrayCommand::ShowOverlay)
            } else if event.id == self.settings_id {
                Some(TrayCommand::OpenSettings)
            } else if event.id == self.quit_id {
                Some(TrayCommand::Quit)
            } else {
                None
            };
            tracing::debug!("Tray menu event {:?} -> {:?}", event.id, command);
            return command;
        }

        match TrayIconEvent::receiver().try_recv() {
            Ok(TrayIconEvent::Click {
                button: MouseButton::Left,
                button_state: MouseButtonState::Up,
                ..
            }) => Some(TrayCommand::ShowOverlay),
            _ => None,
        }
    }

    /// A blue disc on a transparent background
    fn create_icon() -> Result<Icon> {
        const ICON_SIZE: u32 = 32;
        let center = f64::from(ICON_SIZE - 1) / 2.0;
        let radius = f64::from(ICON_SIZE) / 2.0 - 1.0;

        let mut rgba = Vec::with_capacity((ICON_SIZE * ICON_SIZE * 4) as usize);
        for y in 0..ICON_SIZE {
            for x in 0..ICON_SIZE {
                let distance = (f64::from(x) - center).hypot(f64::from(y) - center);
                if distance <= radius - 2.0 {
                    rgba.extend_from_slice(&[0x33, 0x66, 0xCC, 0xFF]);
                } else if distance <= radius {
                    rgba.extend_from_slice(&[0xFF, 0xFF, 0xFF, 0xFF]);
                } else {
                    rgba.extend_from_slice(&[0, 0, 0, 0]);
                }
            }
        }

        Icon::from_rgba(rgba, ICON_SIZE, ICON_SIZE).map_err(|e| {
            QuickLauncherError::TrayError(StringError::new(format!(
                "Failed to create tray icon from RGBA: {e}"
            )))
        })
    }
}
