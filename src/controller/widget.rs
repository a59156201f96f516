//! Live button widgets and the surface that renders them

use crate::config::{ButtonKey, ButtonRecord};

/// State of one on-screen launcher button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonWidget {
    /// Record this widget renders
    pub key: ButtonKey,
    /// Text on the button
    pub label: String,
    /// Target shown in the tooltip
    pub address: String,
    /// Horizontal offset inside the overlay
    pub x: i32,
    /// Vertical offset inside the overlay
    pub y: i32,
    /// Per-button hide toggle
    pub toggle: bool,
}

impl ButtonWidget {
    /// Build a widget showing `record`
    pub fn from_record(record: &ButtonRecord) -> Self {
        Self {
            key: record.key,
            label: record.name.clone(),
            address: record.address.clone(),
            x: record.x,
            y: record.y,
            toggle: record.toggle,
        }
    }

    /// Tooltip text
    pub fn tooltip(&self) -> String {
        format!("Address: {}", self.address)
    }

    /// Copy the record's fields onto the widget; returns whether anything changed
    pub fn sync_from(&mut self, record: &ButtonRecord) -> bool {
        let synced = Self::from_record(record);
        if *self == synced {
            false
        } else {
            *self = synced;
            true
        }
    }
}

/// The UI layer that displays button widgets
///
/// The controller reports each change exactly once; a surface only has to
/// mirror what it is told.
pub trait OverlaySurface {
    /// A widget was created and should be shown
    fn widget_added(&mut self, widget: &ButtonWidget);

    /// A widget's label, tooltip, position or toggle changed
    fn widget_changed(&mut self, widget: &ButtonWidget);

    /// A widget was removed
    fn widget_removed(&mut self, key: ButtonKey);

    /// Hide the whole overlay
    fn hide_overlay(&mut self);
}
