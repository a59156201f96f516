//! Integration tests for `QuickLauncher`
//!
//! Drive the button set controller against a real `setting.ini` in a temp
//! directory, with a recording surface and opener in place of the windows.

use quicklauncher::{
    config::{ButtonKey, ButtonUpdate, ConfigStore},
    controller::{Activation, ButtonSetController, ButtonWidget, OverlaySurface},
    error::{QuickLauncherError, get_user_friendly_error},
    launcher::{AddressKind, Opener},
};
use std::path::PathBuf;
use tempfile::TempDir;

#[derive(Default)]
struct Surface {
    shown: Vec<ButtonKey>,
    hidden: usize,
}

impl OverlaySurface for Surface {
    fn widget_added(&mut self, widget: &ButtonWidget) {
        self.shown.push(widget.key);
    }

    fn widget_changed(&mut self, _widget: &ButtonWidget) {}

    fn widget_removed(&mut self, key: ButtonKey) {
        self.shown.retain(|k| *k != key);
    }

    fn hide_overlay(&mut self) {
        self.hidden += 1;
    }
}

#[derive(Default)]
struct Launches(Vec<(AddressKind, String)>);

impl Opener for Launches {
    fn open_url(&mut self, url: &str) -> quicklauncher::Result<()> {
        self.0.push((AddressKind::Url, url.to_string()));
        Ok(())
    }

    fn open_path(&mut self, path: &str) -> quicklauncher::Result<()> {
        self.0.push((AddressKind::Path, path.to_string()));
        Ok(())
    }
}

fn settings_path(dir: &TempDir) -> PathBuf {
    dir.path().join("QuickLauncher").join("setting.ini")
}

fn controller_at(path: &PathBuf) -> ButtonSetController<Surface, Launches> {
    let store = ConfigStore::load_from(path).unwrap();
    let mut controller = ButtonSetController::new(store, Surface::default(), Launches::default());
    controller.reconcile();
    controller
}

/// Test a full session: add, edit, move, activate, restart
#[test]
fn test_session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = settings_path(&dir);

    let key = {
        let mut controller = controller_at(&path);
        let key = controller.add_new().unwrap();
        controller
            .save_button(key, &ButtonUpdate::details("Docs", "https://docs.rs", true))
            .unwrap();
        controller.on_widget_moved(key, 520, 140).unwrap();
        key
    };

    let mut controller = controller_at(&path);
    assert_eq!(controller.surface().shown, vec![key]);
    let widget = controller.widget(key).unwrap();
    assert_eq!(widget.label, "Docs");
    assert_eq!((widget.x, widget.y), (520, 140));

    let outcome = controller.on_activate(key).unwrap();
    assert_eq!(
        outcome,
        Activation::Dispatched {
            target: AddressKind::Url,
            hidden: true
        }
    );
    assert_eq!(
        controller.opener().0,
        vec![(AddressKind::Url, "https://docs.rs".to_string())]
    );
    assert_eq!(controller.surface().hidden, 1);
}

/// Test that a hand-written settings file loads and foreign sections survive rewrites
#[test]
fn test_hand_written_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = settings_path(&dir);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(
        &path,
        "[setting_window]\n\
         width = 640\n\
         height = 480\n\
         toggle = False\n\
         \n\
         [Button_6f1c2f0e-5b7a-4c3e-9d4a-2b1e0f9c8d7a]\n\
         name = Projects\n\
         address = D:\\work\\projects\n\
         x = 120\n\
         y = 330\n\
         toggle = True\n\
         \n\
         [notes]\n\
         kept = yes\n",
    )
    .unwrap();

    let mut controller = controller_at(&path);
    assert_eq!(controller.preferences().width, 640);
    assert!(!controller.preferences().toggle);

    let key = controller.buttons().next().unwrap().key;
    assert_eq!(key.to_string(), "Button_6f1c2f0e-5b7a-4c3e-9d4a-2b1e0f9c8d7a");

    // Global toggle off: launches but stays visible
    let outcome = controller.on_activate(key).unwrap();
    assert!(matches!(outcome, Activation::Dispatched { hidden: false, .. }));
    assert_eq!(controller.opener().0[0].1, "D:\\work\\projects");

    controller.set_global_toggle(true).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("[notes]"));
    assert!(text.contains("kept"));
    assert!(text.contains("D:\\work\\projects"));
}

/// Test that deleting removes the button from the screen and the file
#[test]
fn test_delete_is_complete() {
    let dir = tempfile::tempdir().unwrap();
    let path = settings_path(&dir);

    let mut controller = controller_at(&path);
    let keep = controller.add_new().unwrap();
    let gone = controller.add_new().unwrap();

    controller.delete(gone).unwrap();
    assert_eq!(controller.surface().shown, vec![keep]);

    let err = controller.delete(gone).unwrap_err();
    assert!(matches!(err, QuickLauncherError::ButtonNotFound(k) if k == gone));
    assert!(get_user_friendly_error(&err).contains("no longer exists"));

    let reloaded = ConfigStore::load_from(&path).unwrap();
    assert_eq!(reloaded.button_count(), 1);
    assert!(reloaded.button(keep).is_some());
}

/// Test that an unparsable settings file falls back to an empty store
#[test]
fn test_corrupt_file_loads_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = settings_path(&dir);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, [0xFF, 0xFE, 0x00, 0x5B]).unwrap();

    let controller = controller_at(&path);
    assert_eq!(controller.buttons().count(), 0);
    assert_eq!(controller.preferences().width, 400);
    assert_eq!(controller.preferences().height, 250);
}
