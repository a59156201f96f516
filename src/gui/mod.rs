//! GUI module
//!
//! Slint windows, the system tray icon and the global hotkey. Only the binary
//! compiles this module; the library stays UI-free.

pub mod gui_controller;
pub mod hotkey;
pub mod tray;

pub use gui_controller::GuiController;
