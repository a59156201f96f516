//! Button set controller module
//!
//! Keeps the live launcher widgets in step with the persisted button records.
//!
//! # Overview
//!
//! The controller owns the single [`ConfigStore`](crate::config::ConfigStore)
//! and a map from button key to widget state. UI actions call into it:
//! - **Settings window**: add, save and delete buttons, flip the global toggle
//! - **Overlay**: activate a button, drag it, hide the overlay
//!
//! Every action mutates the store first (write-through) and then reports the
//! resulting widget change to an [`OverlaySurface`].
//!
//! # Event Flow
//!
//! ```text
//! Settings / Overlay → ButtonSetController → ConfigStore → setting.ini
//!                              ↓
//!                       OverlaySurface → widgets on screen
//! ```
//!
//! # Hide After Activation
//!
//! The global toggle in `setting_window` is a master switch; a button's own
//! toggle can opt that button out. The overlay hides only when both are on.

pub mod button_set;
pub mod widget;

pub use button_set::{Activation, ButtonSetController, ReconcileReport};
pub use widget::{ButtonWidget, OverlaySurface};
