//! # Settings Registry Service
//!
//! The configuration surface of the diagram editor bridge.
//!
//! ## Philosophy
//!
//! - **Typed settings**: All settings have explicit types, not stringly-typed
//! - **Layered**: Read-only defaults + workspace overrides
//! - **Read-only to the bridge**: the host owns the registry; the bridge only
//!   reads a typed [`DiagramSettings`] snapshot out of it
//! - **Deterministic**: Settings are serializable and reproducible
//!
//! ## Example
//!
//! ```ignore
//! use services_settings::{create_default_registry, keys, DiagramSettings, SettingValue};
//!
//! let mut registry = create_default_registry();
//! registry.set_override(keys::DEBUG_LEVEL, SettingValue::Integer(1));
//!
//! let settings = DiagramSettings::from_registry(&registry);
//! assert_eq!(settings.debug_level, Some(1));
//! ```

pub mod diagram;
pub mod fonts;

pub use diagram::{DiagramSettings, DEFAULT_THEME};
pub use fonts::{font_descriptors, FontKind, FontSlot};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Setting key (path-like identifier)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SettingKey(String);

impl SettingKey {
    /// Creates a new setting key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SettingKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Setting value (strongly typed)
///
/// Only the shapes the bridge reads: the debug level is an integer, the
/// theme and font paths are strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingValue {
    Integer(i64),
    String(String),
}

impl SettingValue {
    /// Tries to get as integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            SettingValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Tries to get as string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            SettingValue::String(v) => Some(v.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Integer(v) => write!(f, "{}", v),
            SettingValue::String(v) => write!(f, "{}", v),
        }
    }
}

/// Settings registry
///
/// Two layers: defaults registered by the bridge, and overrides written by
/// the host (workspace or user configuration). Lookups prefer the override.
/// Storage of the overrides is the host's business.
#[derive(Debug, Clone, Default)]
pub struct SettingsRegistry {
    defaults: BTreeMap<SettingKey, SettingValue>,
    overrides: BTreeMap<SettingKey, SettingValue>,
}

impl SettingsRegistry {
    /// Creates an empty settings registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a default setting
    pub fn register_default(&mut self, key: impl Into<SettingKey>, value: SettingValue) {
        self.defaults.insert(key.into(), value);
    }

    /// Sets an override
    pub fn set_override(&mut self, key: impl Into<SettingKey>, value: SettingValue) {
        self.overrides.insert(key.into(), value);
    }

    /// Gets the effective value (override or default)
    pub fn get(&self, key: &SettingKey) -> Option<&SettingValue> {
        self.overrides.get(key).or_else(|| self.defaults.get(key))
    }
}

/// Setting keys read by the bridge
pub mod keys {
    pub const DEBUG_LEVEL: &str = "umlet.debugLevel";
    pub const THEME: &str = "umlet.theme";
    pub const FONT_NORMAL: &str = "umlet.fontNormal";
    pub const FONT_ITALIC: &str = "umlet.fontItalic";
    pub const FONT_BOLD: &str = "umlet.fontBold";
}

/// Creates a settings registry with the bridge's defaults
pub fn create_default_registry() -> SettingsRegistry {
    let mut registry = SettingsRegistry::new();

    registry.register_default(keys::DEBUG_LEVEL, SettingValue::Integer(0));
    registry.register_default(
        keys::THEME,
        SettingValue::String(DEFAULT_THEME.to_string()),
    );
    registry.register_default(keys::FONT_NORMAL, SettingValue::String(String::new()));
    registry.register_default(keys::FONT_ITALIC, SettingValue::String(String::new()));
    registry.register_default(keys::FONT_BOLD, SettingValue::String(String::new()));

    registry
}
