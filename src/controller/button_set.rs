//! Button set controller implementation
//!
//! This module keeps one [`ButtonWidget`] per persisted [`ButtonRecord`] and
//! routes UI actions through the [`ConfigStore`] before touching widgets.

use crate::config::{
    ButtonKey, ButtonRecord, ButtonUpdate, ConfigStore, DEFAULT_BUTTON_LABEL, PreferencesUpdate,
    WindowPreferences,
};
use crate::controller::widget::{ButtonWidget, OverlaySurface};
use crate::error::{QuickLauncherError, Result};
use crate::launcher::{AddressKind, Opener, classify};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::{debug, info, warn};

/// Changes made by one [`ButtonSetController::reconcile`] pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Widgets created for new records
    pub created: usize,
    /// Widgets updated from changed records
    pub updated: usize,
    /// Widgets removed because their record vanished
    pub removed: usize,
}

impl ReconcileReport {
    /// Whether the pass changed nothing
    pub fn is_noop(&self) -> bool {
        self.created == 0 && self.updated == 0 && self.removed == 0
    }
}

/// Result of activating a button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// The address was handed to an opener
    Dispatched {
        /// Which opener received the address
        target: AddressKind,
        /// Whether the overlay was hidden afterwards
        hidden: bool,
    },
    /// The button has no address; nothing happened
    NoAddress,
}

/// Reconciles on-screen button widgets with the persisted records
pub struct ButtonSetController<S, O> {
    store: ConfigStore,
    widgets: HashMap<ButtonKey, ButtonWidget>,
    surface: S,
    opener: O,
    /// Set while a save-all-positions pass is running
    saving_positions: bool,
}

impl<S: OverlaySurface, O: Opener> ButtonSetController<S, O> {
    /// Create a controller with no widgets; call [`Self::reconcile`] to populate
    pub fn new(store: ConfigStore, surface: S, opener: O) -> Self {
        Self {
            store,
            widgets: HashMap::new(),
            surface,
            opener,
            saving_positions: false,
        }
    }

    /// The backing store
    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Current window preferences
    pub fn preferences(&self) -> &WindowPreferences {
        self.store.preferences()
    }

    /// Persisted buttons in listing order
    pub fn buttons(&self) -> impl Iterator<Item = &ButtonRecord> {
        self.store.iter_buttons()
    }

    /// Widget for `key`, if one is live
    pub fn widget(&self, key: ButtonKey) -> Option<&ButtonWidget> {
        self.widgets.get(&key)
    }

    /// All live widgets (unordered)
    pub fn widgets(&self) -> impl Iterator<Item = &ButtonWidget> {
        self.widgets.values()
    }

    /// The surface receiving widget notifications
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The opener receiving activations
    pub fn opener(&self) -> &O {
        &self.opener
    }

    /// Make the widget set match the store exactly
    ///
    /// Creates missing widgets, removes widgets whose record vanished and
    /// re-applies changed records. Only actual changes reach the surface, so a
    /// second pass without intervening mutations is a no-op.
    pub fn reconcile(&mut self) -> ReconcileReport {
        let mut report = ReconcileReport::default();

        let stale: Vec<ButtonKey> = self
            .widgets
            .keys()
            .filter(|key| self.store.button(**key).is_none())
            .copied()
            .collect();
        for key in stale {
            self.widgets.remove(&key);
            self.surface.widget_removed(key);
            report.removed += 1;
        }

        for record in self.store.iter_buttons() {
            match self.widgets.entry(record.key) {
                Entry::Occupied(mut entry) => {
                    if entry.get_mut().sync_from(record) {
                        self.surface.widget_changed(entry.get());
                        report.updated += 1;
                    }
                }
                Entry::Vacant(entry) => {
                    let widget = entry.insert(ButtonWidget::from_record(record));
                    self.surface.widget_added(widget);
                    report.created += 1;
                }
            }
        }

        if report.is_noop() {
            debug!("Reconcile: widgets already match {} records", self.widgets.len());
        } else {
            info!(
                "Reconcile: {} created, {} updated, {} removed",
                report.created, report.updated, report.removed
            );
        }
        report
    }

    /// A widget was dragged to `(x, y)`; persist the new position
    ///
    /// The surface already shows the widget at its new place, so no
    /// notification is sent and no reconcile pass runs.
    pub fn on_widget_moved(&mut self, key: ButtonKey, x: i32, y: i32) -> Result<()> {
        if let Some(widget) = self.widgets.get_mut(&key) {
            widget.x = x;
            widget.y = y;
        }
        debug!("{} moved to ({}, {})", key, x, y);
        self.store.update_button(key, &ButtonUpdate::position(x, y))
    }

    /// Activate a button: open its address, persist its position and hide
    /// the overlay when the toggles say so
    ///
    /// Opener failures are logged, not returned. A blank address makes the
    /// whole activation a no-op.
    pub fn on_activate(&mut self, key: ButtonKey) -> Result<Activation> {
        let record = self
            .store
            .button(key)
            .ok_or(QuickLauncherError::ButtonNotFound(key))?;

        let target = classify(&record.address);
        let address = record.address.trim().to_string();
        let record_toggle = record.toggle;

        let dispatched = match target {
            AddressKind::Empty => {
                warn!("{} has no address, ignoring activation", key);
                return Ok(Activation::NoAddress);
            }
            AddressKind::Url => self.opener.open_url(&address),
            AddressKind::Path => self.opener.open_path(&address),
        };
        if let Err(e) = dispatched {
            warn!("Failed to open {:?} for {}: {}", address, key, e);
        }

        let persisted = match self.widgets.get(&key) {
            Some(widget) => self
                .store
                .update_button(key, &ButtonUpdate::position(widget.x, widget.y)),
            None => Ok(()),
        };

        let hidden = self.store.preferences().toggle && record_toggle;
        if hidden {
            self.surface.hide_overlay();
        }

        persisted?;
        Ok(Activation::Dispatched { target, hidden })
    }

    /// Create a button with the default label and show it immediately
    pub fn add_new(&mut self) -> Result<ButtonKey> {
        let key = self.store.create_button(DEFAULT_BUTTON_LABEL, "")?;
        if let Some(record) = self.store.button(key) {
            let widget = ButtonWidget::from_record(record);
            self.surface.widget_added(&widget);
            self.widgets.insert(key, widget);
        }
        info!("Added {}", key);
        Ok(key)
    }

    /// Delete a button's record and its widget
    ///
    /// A missing widget is not an error. If the rewrite fails the widget is
    /// still removed, since the record is already gone from memory.
    pub fn delete(&mut self, key: ButtonKey) -> Result<()> {
        let result = self.store.delete_button(key);
        if let Err(QuickLauncherError::ButtonNotFound(_)) = result {
            return result;
        }

        if self.widgets.remove(&key).is_some() {
            self.surface.widget_removed(key);
        } else {
            debug!("{} had no live widget", key);
        }
        result
    }

    /// Apply an edit from the settings window to the record and its widget
    pub fn save_button(&mut self, key: ButtonKey, update: &ButtonUpdate) -> Result<()> {
        let result = self.store.update_button(key, update);
        if let Err(QuickLauncherError::ButtonNotFound(_)) = result {
            return result;
        }

        if let (Some(record), Some(widget)) = (self.store.button(key), self.widgets.get_mut(&key))
            && widget.sync_from(record)
        {
            self.surface.widget_changed(widget);
        }
        result
    }

    /// Persist every widget's current position with one rewrite
    ///
    /// Re-entrant calls while a pass is in progress return `Ok(0)` at once.
    pub fn save_all_positions(&mut self) -> Result<usize> {
        if self.saving_positions {
            debug!("Position save already in progress, skipping");
            return Ok(0);
        }
        self.saving_positions = true;

        let positions: Vec<(ButtonKey, i32, i32)> = self
            .widgets
            .values()
            .map(|widget| (widget.key, widget.x, widget.y))
            .collect();
        let result = self.store.update_positions(positions);

        self.saving_positions = false;
        result
    }

    /// Save all positions and hide the overlay
    pub fn hide(&mut self) -> Result<()> {
        let saved = self.save_all_positions();
        self.surface.hide_overlay();
        saved.map(|moved| debug!("Overlay hidden, {} positions changed", moved))
    }

    /// Flip the global hide-after-activation switch
    pub fn set_global_toggle(&mut self, enabled: bool) -> Result<()> {
        info!("Global hide toggle: {}", if enabled { "ON" } else { "OFF" });
        self.store.set_preferences(PreferencesUpdate::toggle(enabled))
    }

    /// Remember the settings window size
    pub fn set_panel_size(&mut self, width: u32, height: u32) -> Result<()> {
        self.store
            .set_preferences(PreferencesUpdate::size(width, height))
    }
}
