//! Configuration data models
//!
//! This module defines the records persisted in the settings document: one
//! [`ButtonRecord`] per launcher button and the [`WindowPreferences`] singleton.

use std::fmt;
use uuid::Uuid;

/// Section name prefix for button records (`Button_<uuid>`)
pub const BUTTON_SECTION_PREFIX: &str = "Button_";

/// Default horizontal offset of a newly created button
pub const DEFAULT_BUTTON_X: i32 = 200;

/// Default vertical offset of a newly created button
pub const DEFAULT_BUTTON_Y: i32 = 200;

/// Label given to buttons created from the settings window
pub const DEFAULT_BUTTON_LABEL: &str = "new button";

/// Stable identity of a button record
///
/// Displayed (and stored) as its section name, `Button_<uuid>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ButtonKey(Uuid);

impl ButtonKey {
    /// Generate a fresh random key
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Section name used in the settings document
    pub fn section_name(&self) -> String {
        self.to_string()
    }

    /// Parse a `Button_<uuid>` section name
    ///
    /// Returns `None` for any other section, including `Button_` sections
    /// whose suffix is not a UUID.
    pub fn from_section_name(section: &str) -> Option<Self> {
        let suffix = section.strip_prefix(BUTTON_SECTION_PREFIX)?;
        Uuid::parse_str(suffix).ok().map(Self)
    }
}

impl fmt::Display for ButtonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{BUTTON_SECTION_PREFIX}{}", self.0)
    }
}

/// One launcher button as persisted in the settings document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonRecord {
    /// Identity of the record
    pub key: ButtonKey,
    /// Label shown on the button
    pub name: String,
    /// File path or URL opened on activation (may be empty)
    pub address: String,
    /// Horizontal offset inside the overlay
    pub x: i32,
    /// Vertical offset inside the overlay
    pub y: i32,
    /// Whether activating this button may hide the overlay
    pub toggle: bool,
}

impl ButtonRecord {
    /// Create a record at the default position
    pub fn new(
        key: ButtonKey,
        name: impl Into<String>,
        address: impl Into<String>,
        toggle: bool,
    ) -> Self {
        Self {
            key,
            name: name.into(),
            address: address.into(),
            x: DEFAULT_BUTTON_X,
            y: DEFAULT_BUTTON_Y,
            toggle,
        }
    }
}

/// Partial update of a [`ButtonRecord`]; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonUpdate {
    /// New label
    pub name: Option<String>,
    /// New address
    pub address: Option<String>,
    /// New horizontal offset
    pub x: Option<i32>,
    /// New vertical offset
    pub y: Option<i32>,
    /// New per-button hide toggle
    pub toggle: Option<bool>,
}

impl ButtonUpdate {
    /// Update that only moves the button
    pub fn position(x: i32, y: i32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// Update issued by the settings window's "Save" action
    pub fn details(name: impl Into<String>, address: impl Into<String>, toggle: bool) -> Self {
        Self {
            name: Some(name.into()),
            address: Some(address.into()),
            toggle: Some(toggle),
            ..Self::default()
        }
    }

    /// Apply the set fields to `record`, returning whether anything changed
    pub fn apply_to(&self, record: &mut ButtonRecord) -> bool {
        let before = record.clone();
        if let Some(name) = &self.name {
            record.name.clone_from(name);
        }
        if let Some(address) = &self.address {
            record.address.clone_from(address);
        }
        if let Some(x) = self.x {
            record.x = x;
        }
        if let Some(y) = self.y {
            record.y = y;
        }
        if let Some(toggle) = self.toggle {
            record.toggle = toggle;
        }
        *record != before
    }
}

/// Settings window size and the global hide toggle (`setting_window` section)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowPreferences {
    /// Last used settings window width
    pub width: u32,
    /// Last used settings window height
    pub height: u32,
    /// Hide the overlay after a button is activated
    pub toggle: bool,
}

impl Default for WindowPreferences {
    fn default() -> Self {
        Self {
            width: 400,
            height: 250,
            toggle: true,
        }
    }
}

/// Partial update of [`WindowPreferences`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreferencesUpdate {
    /// New settings window width
    pub width: Option<u32>,
    /// New settings window height
    pub height: Option<u32>,
    /// New global hide toggle
    pub toggle: Option<bool>,
}

impl PreferencesUpdate {
    /// Update of the settings window size only
    pub fn size(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            toggle: None,
        }
    }

    /// Update of the global toggle only
    pub fn toggle(toggle: bool) -> Self {
        Self {
            toggle: Some(toggle),
            ..Self::default()
        }
    }

    /// Apply the set fields, returning whether anything changed
    pub fn apply_to(&self, prefs: &mut WindowPreferences) -> bool {
        let before = *prefs;
        if let Some(width) = self.width {
            prefs.width = width;
        }
        if let Some(height) = self.height {
            prefs.height = height;
        }
        if let Some(toggle) = self.toggle {
            prefs.toggle = toggle;
        }
        *prefs != before
    }
}
