//! INI encoding of the settings document
//!
//! Maps `Button_<uuid>` sections and the `setting_window` section to typed
//! records. Values are read and written verbatim (no escape sequences) so
//! Windows paths such as `C:\docs` survive unchanged. A name or address ending
//! in `\` would continue onto the next line, so it is written wrapped in
//! double quotes instead. Sections this module does not own are carried
//! through untouched.

use crate::config::models::{
    ButtonKey, ButtonRecord, DEFAULT_BUTTON_X, DEFAULT_BUTTON_Y, WindowPreferences,
};
use ini::{EscapePolicy, Ini, ParseError, ParseOption, Properties, WriteOption};
use std::borrow::Cow;
use std::collections::HashSet;
use std::str::FromStr;
use tracing::{debug, warn};

/// Section holding [`WindowPreferences`]
pub const SETTINGS_SECTION: &str = "setting_window";

const KEY_NAME: &str = "name";
const KEY_ADDRESS: &str = "address";
const KEY_X: &str = "x";
const KEY_Y: &str = "y";
const KEY_TOGGLE: &str = "toggle";
const KEY_WIDTH: &str = "width";
const KEY_HEIGHT: &str = "height";

/// Decoded settings document
pub struct Document {
    /// Button records in file order
    pub buttons: Vec<ButtonRecord>,
    /// The `setting_window` singleton
    pub preferences: WindowPreferences,
    /// Sections not owned by the launcher, preserved across rewrites
    pub foreign: Ini,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            buttons: Vec::new(),
            preferences: WindowPreferences::default(),
            foreign: Ini::new(),
        }
    }
}

impl Document {
    /// Decode a document from INI text
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let ini = Ini::load_from_str_opt(text, parse_option())?;

        let mut document = Self::default();
        let mut seen = HashSet::new();

        for (section, props) in ini.iter() {
            match section {
                Some(SETTINGS_SECTION) => {
                    document.preferences = read_preferences(props);
                }
                Some(name) => match ButtonKey::from_section_name(name) {
                    Some(key) if seen.insert(key) => {
                        document.buttons.push(read_button(key, props));
                    }
                    Some(key) => {
                        warn!("Ignoring duplicate section for {}", key);
                    }
                    None => {
                        debug!("Preserving unrecognized section [{}]", name);
                        copy_section(&mut document.foreign, section, props);
                    }
                },
                None => {
                    if props.iter().next().is_some() {
                        copy_section(&mut document.foreign, section, props);
                    }
                }
            }
        }

        Ok(document)
    }

    /// Encode buttons, preferences and foreign sections as INI text
    pub fn render<'a>(
        buttons: impl IntoIterator<Item = &'a ButtonRecord>,
        preferences: &WindowPreferences,
        foreign: &Ini,
    ) -> std::io::Result<Vec<u8>> {
        let mut ini = Ini::new();

        for button in buttons {
            ini.with_section(Some(button.key.section_name()))
                .set(KEY_NAME, encode_text(&button.name))
                .set(KEY_ADDRESS, encode_text(&button.address))
                .set(KEY_X, button.x.to_string())
                .set(KEY_Y, button.y.to_string())
                .set(KEY_TOGGLE, format_bool(button.toggle));
        }

        ini.with_section(Some(SETTINGS_SECTION))
            .set(KEY_WIDTH, preferences.width.to_string())
            .set(KEY_HEIGHT, preferences.height.to_string())
            .set(KEY_TOGGLE, format_bool(preferences.toggle));

        for (section, props) in foreign.iter() {
            copy_section(&mut ini, section, props);
        }

        let mut out = Vec::new();
        ini.write_to_opt(
            &mut out,
            WriteOption {
                escape_policy: EscapePolicy::Nothing,
                ..WriteOption::default()
            },
        )?;
        Ok(out)
    }
}

fn parse_option() -> ParseOption {
    ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    }
}

fn copy_section(target: &mut Ini, section: Option<&str>, props: &Properties) {
    let mut setter = target.with_section(section);
    for (key, value) in props.iter() {
        setter.set(key, value);
    }
}

fn read_button(key: ButtonKey, props: &Properties) -> ButtonRecord {
    ButtonRecord {
        key,
        name: decode_text(lookup(props, KEY_NAME).unwrap_or_default()),
        address: decode_text(lookup(props, KEY_ADDRESS).unwrap_or_default()),
        x: read_value(props, key, KEY_X, parse_number, DEFAULT_BUTTON_X),
        y: read_value(props, key, KEY_Y, parse_number, DEFAULT_BUTTON_Y),
        toggle: read_value(props, key, KEY_TOGGLE, parse_bool, true),
    }
}

/// Quote values whose trailing `\` would join the next line, and values
/// already in quotes so the outer pair is the only one stripped on read
fn encode_text(value: &str) -> Cow<'_, str> {
    if value.ends_with('\\') || unquote(value).is_some() {
        Cow::Owned(format!("\"{value}\""))
    } else {
        Cow::Borrowed(value)
    }
}

fn decode_text(raw: &str) -> String {
    unquote(raw).unwrap_or(raw).to_string()
}

fn unquote(value: &str) -> Option<&str> {
    value.strip_prefix('"')?.strip_suffix('"')
}

fn read_preferences(props: &Properties) -> WindowPreferences {
    let defaults = WindowPreferences::default();
    WindowPreferences {
        width: read_value(props, SETTINGS_SECTION, KEY_WIDTH, parse_number, defaults.width),
        height: read_value(props, SETTINGS_SECTION, KEY_HEIGHT, parse_number, defaults.height),
        toggle: read_value(props, SETTINGS_SECTION, KEY_TOGGLE, parse_bool, defaults.toggle),
    }
}

/// Read `key`, falling back to `default` when it is missing or malformed
fn read_value<T: Copy + std::fmt::Debug>(
    props: &Properties,
    section: impl std::fmt::Display,
    key: &str,
    parse: fn(&str) -> Option<T>,
    default: T,
) -> T {
    match lookup(props, key) {
        None => default,
        Some(raw) => parse(raw).unwrap_or_else(|| {
            warn!(
                "Invalid value {:?} for [{}] {}, using {:?}",
                raw, section, key, default
            );
            default
        }),
    }
}

/// Case-insensitive key lookup
fn lookup<'a>(props: &'a Properties, key: &str) -> Option<&'a str> {
    props
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v)
}

fn parse_number<T: FromStr>(raw: &str) -> Option<T> {
    raw.trim().parse().ok()
}

/// Accepts 1/0, yes/no, true/false and on/off in any case
fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

fn format_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}
