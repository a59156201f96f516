//! GUI controller
//!
//! Owns the overlay and settings windows and wires their callbacks to the
//! [`ButtonSetController`]. Everything runs on the Slint event loop thread;
//! the controller lives in an `Rc<RefCell<..>>` shared by the callbacks, and a
//! repeating timer polls the tray and hotkey channels.

use crate::{ButtonItem, OverlayWindow, SettingsWindow};
use anyhow::{Context, Result};
use quicklauncher::config::{ButtonKey, ButtonUpdate, ConfigStore};
use quicklauncher::controller::{ButtonSetController, ButtonWidget, OverlaySurface};
use quicklauncher::error::{QuickLauncherError, get_user_friendly_error};
use quicklauncher::launcher::{SystemOpener, normalize_address};
use slint::{
    CloseRequestResponse, ComponentHandle, LogicalSize, Model, ModelRc, SharedString,
    StandardListViewItem, VecModel, Weak,
};
#[cfg(windows)]
use slint::{Timer, TimerMode};
use std::cell::RefCell;
use std::rc::Rc;
#[cfg(windows)]
use std::time::Duration;
use tracing::{debug, error, info, warn};

type Launcher = ButtonSetController<SlintSurface, SystemOpener>;

/// How often the tray and hotkey channels are checked
#[cfg(windows)]
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Half the overlay's edge in logical pixels
const OVERLAY_HALF_EXTENT: f32 = 400.0;

/// [`OverlaySurface`] backed by the overlay window's button model
pub struct SlintSurface {
    buttons: Rc<VecModel<ButtonItem>>,
    overlay: Weak<OverlayWindow>,
}

impl SlintSurface {
    fn row_of(&self, key: ButtonKey) -> Option<usize> {
        let id = SharedString::from(key.to_string());
        self.buttons.iter().position(|item| item.key == id)
    }
}

impl OverlaySurface for SlintSurface {
    fn widget_added(&mut self, widget: &ButtonWidget) {
        self.buttons.push(to_item(widget));
    }

    fn widget_changed(&mut self, widget: &ButtonWidget) {
        match self.row_of(widget.key) {
            Some(row) => self.buttons.set_row_data(row, to_item(widget)),
            None => self.buttons.push(to_item(widget)),
        }
    }

    fn widget_removed(&mut self, key: ButtonKey) {
        if let Some(row) = self.row_of(key) {
            self.buttons.remove(row);
        }
    }

    fn hide_overlay(&mut self) {
        if let Some(overlay) = self.overlay.upgrade()
            && let Err(e) = overlay.hide()
        {
            warn!("Failed to hide overlay: {}", e);
        }
    }
}

fn to_item(widget: &ButtonWidget) -> ButtonItem {
    ButtonItem {
        key: widget.key.to_string().into(),
        label: widget.label.as_str().into(),
        tooltip: widget.tooltip().into(),
        x: widget.x,
        y: widget.y,
    }
}

/// State shared by every window callback
#[derive(Clone)]
struct Shared {
    launcher: Rc<RefCell<Launcher>>,
    overlay: Weak<OverlayWindow>,
    settings: Weak<SettingsWindow>,
    buttons: Rc<VecModel<ButtonItem>>,
    entries: Rc<VecModel<StandardListViewItem>>,
    /// Keys in settings list order
    listed: Rc<RefCell<Vec<ButtonKey>>>,
}

impl Shared {
    /// Run `f` against the controller unless a callback further up the stack
    /// already holds it
    fn with_launcher<T>(&self, f: impl FnOnce(&mut Launcher) -> T) -> Option<T> {
        if let Ok(mut launcher) = self.launcher.try_borrow_mut() {
            Some(f(&mut launcher))
        } else {
            warn!("Controller busy, dropping nested UI event");
            None
        }
    }

    fn show_overlay(&self) {
        self.with_launcher(Launcher::reconcile);

        let Some(overlay) = self.overlay.upgrade() else {
            return;
        };
        if let Some((x, y)) = cursor_position() {
            let window = overlay.window();
            let half = physical_extent(OVERLAY_HALF_EXTENT, window.scale_factor());
            window.set_position(slint::PhysicalPosition::new(x - half, y - half));
        }
        if let Err(e) = overlay.show() {
            error!("Failed to show overlay: {}", e);
        }
    }

    #[cfg_attr(not(windows), expect(dead_code, reason = "Hotkey is Windows-only"))]
    fn toggle_overlay(&self) {
        let visible = self
            .overlay
            .upgrade()
            .is_some_and(|overlay| overlay.window().is_visible());
        if visible {
            self.hide_overlay();
        } else {
            self.show_overlay();
        }
    }

    fn hide_overlay(&self) {
        if let Some(Err(e)) = self.with_launcher(Launcher::hide) {
            report("Hide", &e);
        }
    }

    fn activate(&self, id: &str) {
        let Some(key) = parse_key(id) else { return };
        match self.with_launcher(|launcher| launcher.on_activate(key)) {
            Some(Ok(outcome)) => debug!("{} activated: {:?}", key, outcome),
            Some(Err(e)) => report("Launch", &e),
            None => {}
        }
    }

    /// Move the button on screen while a drag is in progress
    fn preview_drag(&self, id: &str, x: f32, y: f32) {
        let id = SharedString::from(id);
        if let Some(row) = self.buttons.iter().position(|item| item.key == id)
            && let Some(mut item) = self.buttons.row_data(row)
        {
            item.x = round_to_i32(x);
            item.y = round_to_i32(y);
            self.buttons.set_row_data(row, item);
        }
    }

    fn finish_drag(&self, id: &str, x: i32, y: i32) {
        let Some(key) = parse_key(id) else { return };
        if let Some(Err(e)) = self.with_launcher(|launcher| launcher.on_widget_moved(key, x, y)) {
            report("Move", &e);
        }
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "Window sizes are far below f32's exact integer range"
    )]
    fn open_settings(&self) {
        let Some(prefs) = self.with_launcher(|launcher| *launcher.preferences()) else {
            return;
        };
        let Some(settings) = self.settings.upgrade() else {
            return;
        };

        settings.set_global_toggle(prefs.toggle);
        settings
            .window()
            .set_size(LogicalSize::new(prefs.width as f32, prefs.height as f32));
        self.refresh_list(None);

        if let Err(e) = settings.show() {
            error!("Failed to show settings window: {}", e);
        }
    }

    /// Rebuild the settings list from the store, selecting `select` if present
    fn refresh_list(&self, select: Option<ButtonKey>) {
        let Some(rows) = self.with_launcher(|launcher| {
            launcher
                .buttons()
                .map(|record| (record.key, record.name.clone()))
                .collect::<Vec<_>>()
        }) else {
            return;
        };

        self.entries.set_vec(
            rows.iter()
                .map(|(_, name)| StandardListViewItem::from(name.as_str()))
                .collect::<Vec<_>>(),
        );
        let index = select.and_then(|key| rows.iter().position(|(k, _)| *k == key));
        *self.listed.borrow_mut() = rows.into_iter().map(|(key, _)| key).collect();

        if let Some(settings) = self.settings.upgrade() {
            settings.set_selected(index.and_then(|i| i32::try_from(i).ok()).unwrap_or(-1));
        }
        self.fill_form(index);
    }

    /// Show the record at list position `index` in the editor fields
    fn fill_form(&self, index: Option<usize>) {
        let Some(settings) = self.settings.upgrade() else {
            return;
        };
        let key = index.and_then(|i| self.listed.borrow().get(i).copied());
        let record = key.and_then(|key| {
            self.with_launcher(|launcher| launcher.store().button(key).cloned())
                .flatten()
        });

        match record {
            Some(record) => {
                settings.set_name_text(record.name.into());
                settings.set_address_text(record.address.into());
                settings.set_button_toggle(record.toggle);
            }
            None => {
                settings.set_name_text(SharedString::new());
                settings.set_address_text(SharedString::new());
                settings.set_button_toggle(true);
            }
        }
    }

    fn selected_key(&self) -> Option<ButtonKey> {
        let settings = self.settings.upgrade()?;
        let index = usize::try_from(settings.get_selected()).ok()?;
        self.listed.borrow().get(index).copied()
    }

    fn save_selected(&self) {
        let (Some(settings), Some(key)) = (self.settings.upgrade(), self.selected_key()) else {
            return;
        };
        let update = ButtonUpdate::details(
            settings.get_name_text().as_str(),
            normalize_address(&settings.get_address_text()),
            settings.get_button_toggle(),
        );

        if let Some(Err(e)) = self.with_launcher(|launcher| launcher.save_button(key, &update)) {
            report("Save", &e);
        }
        self.refresh_list(Some(key));
    }

    fn add_button(&self) {
        match self.with_launcher(Launcher::add_new) {
            Some(Ok(key)) => self.refresh_list(Some(key)),
            Some(Err(e)) => {
                report("Add", &e);
                self.refresh_list(None);
            }
            None => {}
        }
    }

    fn remove_selected(&self) {
        let Some(key) = self.selected_key() else {
            return;
        };
        if let Some(Err(e)) = self.with_launcher(|launcher| launcher.delete(key)) {
            report("Delete", &e);
        }
        self.refresh_list(None);
    }

    fn set_global_toggle(&self, enabled: bool) {
        if let Some(Err(e)) = self.with_launcher(|launcher| launcher.set_global_toggle(enabled)) {
            report("Save preferences", &e);
        }
    }

    fn browse_for_address(&self) {
        let Some(settings) = self.settings.upgrade() else {
            return;
        };
        match pick_file() {
            Some(path) => settings.set_address_text(path.into()),
            None => debug!("File selection cancelled"),
        }
    }

    /// Remember the settings window size as it closes
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "Logical window sizes are small positive values"
    )]
    fn settings_closing(&self) {
        let Some(settings) = self.settings.upgrade() else {
            return;
        };
        let window = settings.window();
        let size = window.size().to_logical(window.scale_factor());
        let (width, height) = (size.width.round() as u32, size.height.round() as u32);

        if let Some(Err(e)) =
            self.with_launcher(|launcher| launcher.set_panel_size(width, height))
        {
            report("Save window size", &e);
        }
    }

    #[cfg_attr(not(windows), expect(dead_code, reason = "Tray is Windows-only"))]
    fn quit(&self) {
        if let Some(Err(e)) = self.with_launcher(Launcher::save_all_positions) {
            report("Save positions", &e);
        }
        info!("Quit requested");
        if let Err(e) = slint::quit_event_loop() {
            error!("Failed to quit event loop: {}", e);
        }
    }
}

/// Main GUI controller
pub struct GuiController {
    overlay: OverlayWindow,
    settings: SettingsWindow,
    shared: Shared,
    #[cfg(windows)]
    poll_timer: Timer,
}

impl GuiController {
    /// Build both windows and wire their callbacks
    pub fn new(store: ConfigStore) -> Result<Self> {
        let overlay = OverlayWindow::new().context("Failed to create overlay window")?;
        let settings = SettingsWindow::new().context("Failed to create settings window")?;

        let buttons = Rc::new(VecModel::<ButtonItem>::default());
        overlay.set_buttons(ModelRc::from(buttons.clone()));
        let entries = Rc::new(VecModel::<StandardListViewItem>::default());
        settings.set_entries(ModelRc::from(entries.clone()));

        let surface = SlintSurface {
            buttons: buttons.clone(),
            overlay: overlay.as_weak(),
        };
        let mut launcher = ButtonSetController::new(store, surface, SystemOpener);
        launcher.reconcile();

        let shared = Shared {
            launcher: Rc::new(RefCell::new(launcher)),
            overlay: overlay.as_weak(),
            settings: settings.as_weak(),
            buttons,
            entries,
            listed: Rc::new(RefCell::new(Vec::new())),
        };

        let controller = Self {
            overlay,
            settings,
            shared,
            #[cfg(windows)]
            poll_timer: Timer::default(),
        };
        controller.connect_overlay();
        controller.connect_settings();
        controller.start_polling();
        Ok(controller)
    }

    fn connect_overlay(&self) {
        let shared = self.shared.clone();
        self.overlay.on_activate(move |id| shared.activate(&id));

        let shared = self.shared.clone();
        self.overlay
            .on_drag_moved(move |id, x, y| shared.preview_drag(&id, x, y));

        let shared = self.shared.clone();
        self.overlay
            .on_drag_finished(move |id, x, y| shared.finish_drag(&id, x, y));

        let shared = self.shared.clone();
        self.overlay.on_hide_requested(move || shared.hide_overlay());

        let shared = self.shared.clone();
        self.overlay
            .on_settings_requested(move || shared.open_settings());
    }

    fn connect_settings(&self) {
        let shared = self.shared.clone();
        self.settings.on_select(move |index| {
            shared.fill_form(usize::try_from(index).ok());
        });

        let shared = self.shared.clone();
        self.settings.on_save(move || shared.save_selected());

        let shared = self.shared.clone();
        self.settings.on_add(move || shared.add_button());

        let shared = self.shared.clone();
        self.settings.on_remove(move || shared.remove_selected());

        let shared = self.shared.clone();
        self.settings
            .on_global_toggled(move |enabled| shared.set_global_toggle(enabled));

        let shared = self.shared.clone();
        self.settings
            .on_browse(move || shared.browse_for_address());

        let shared = self.shared.clone();
        self.settings.window().on_close_requested(move || {
            shared.settings_closing();
            CloseRequestResponse::HideWindow
        });
    }

    /// Start the timer that turns tray and hotkey events into UI actions
    #[cfg(windows)]
    fn start_polling(&self) {
        use crate::gui::hotkey::OverlayHotkey;
        use crate::gui::tray::{TrayCommand, TrayIcon};

        let tray = TrayIcon::new()
            .inspect_err(|e| error!("Tray icon unavailable: {}", e))
            .ok();
        let hotkey = OverlayHotkey::register()
            .inspect_err(|e| warn!("Ctrl+Space unavailable: {}", e))
            .ok();

        let shared = self.shared.clone();
        self.poll_timer
            .start(TimerMode::Repeated, POLL_INTERVAL, move || {
                if hotkey.as_ref().is_some_and(OverlayHotkey::poll) {
                    shared.toggle_overlay();
                }
                match tray.as_ref().and_then(TrayIcon::poll) {
                    Some(TrayCommand::ShowOverlay) => shared.show_overlay(),
                    Some(TrayCommand::OpenSettings) => shared.open_settings(),
                    Some(TrayCommand::Quit) => shared.quit(),
                    None => {}
                }
            });
    }

    #[cfg(not(windows))]
    fn start_polling(&self) {
        debug!("No tray or hotkey on this platform");
    }

    /// Run the Slint event loop until the user quits
    pub fn run(self) -> std::result::Result<(), slint::PlatformError> {
        #[cfg(windows)]
        {
            info!("Waiting for Ctrl+Space or tray input");
            slint::run_event_loop_until_quit()
        }

        // Without a tray the overlay starts visible; hiding it ends the session
        #[cfg(not(windows))]
        {
            self.shared.show_overlay();
            slint::run_event_loop()
        }
    }
}

fn parse_key(id: &str) -> Option<ButtonKey> {
    let key = ButtonKey::from_section_name(id);
    if key.is_none() {
        warn!("UI referenced unknown button id {:?}", id);
    }
    key
}

/// Log a failed action and, on Windows, tell the user
fn report(action: &str, err: &QuickLauncherError) {
    error!("{} failed: {}", action, err);

    #[cfg(windows)]
    if !matches!(err, QuickLauncherError::ButtonNotFound(_)) {
        rfd::MessageDialog::new()
            .set_title("QuickLauncher")
            .set_description(get_user_friendly_error(err))
            .set_buttons(rfd::MessageButtons::Ok)
            .set_level(rfd::MessageLevel::Warning)
            .show();
    }
    #[cfg(not(windows))]
    debug!("{}", get_user_friendly_error(err));
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "Overlay coordinates stay within a few thousand pixels"
)]
fn round_to_i32(value: f32) -> i32 {
    value.round() as i32
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "Overlay extent times scale factor stays within i32"
)]
fn physical_extent(logical: f32, scale_factor: f32) -> i32 {
    (logical * scale_factor).round() as i32
}

/// Cursor position in physical screen coordinates
#[cfg(windows)]
#[expect(unsafe_code, reason = "Win32 FFI to read the cursor position")]
fn cursor_position() -> Option<(i32, i32)> {
    use windows::Win32::Foundation::POINT;
    use windows::Win32::UI::WindowsAndMessaging::GetCursorPos;

    let mut point = POINT::default();
    // SAFETY: `point` is a valid, writable POINT for the duration of the call.
    unsafe { GetCursorPos(&raw mut point) }.ok()?;
    Some((point.x, point.y))
}

#[cfg(not(windows))]
fn cursor_position() -> Option<(i32, i32)> {
    None
}

#[cfg(windows)]
fn pick_file() -> Option<String> {
    rfd::FileDialog::new()
        .set_title("Choose a file to launch")
        .pick_file()
        .map(|path| path.display().to_string())
}

#[cfg(not(windows))]
fn pick_file() -> Option<String> {
    info!("File browser is only available on Windows");
    None
}
