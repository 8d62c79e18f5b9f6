//! Typed view of the diagram editor settings

use crate::{keys, SettingKey, SettingsRegistry};
use crate::fonts::FontSlot;
use std::path::{Path, PathBuf};

/// Theme used when none is configured
pub const DEFAULT_THEME: &str = "VS Code setting";

/// Snapshot of the settings the bridge pushes into views
///
/// Re-read from the registry on every focus gain, so configuration changes
/// reach the view the next time it is focused.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiagramSettings {
    /// Log verbosity threshold; `None` when unset or not an integer
    pub debug_level: Option<i64>,
    /// Theme name; `None` when unset
    pub theme: Option<String>,
    pub font_normal: Option<PathBuf>,
    pub font_italic: Option<PathBuf>,
    pub font_bold: Option<PathBuf>,
}

impl DiagramSettings {
    /// Reads the typed settings out of a registry
    pub fn from_registry(registry: &SettingsRegistry) -> Self {
        let string = |key: &str| {
            registry
                .get(&SettingKey::new(key))
                .and_then(|value| value.as_string())
                .map(str::to_string)
        };
        // An empty path means "no custom font".
        let path = |key: &str| string(key).filter(|p| !p.is_empty()).map(PathBuf::from);

        Self {
            debug_level: registry
                .get(&SettingKey::new(keys::DEBUG_LEVEL))
                .and_then(|value| value.as_integer()),
            theme: string(keys::THEME),
            font_normal: path(keys::FONT_NORMAL),
            font_italic: path(keys::FONT_ITALIC),
            font_bold: path(keys::FONT_BOLD),
        }
    }

    /// The configured theme, or [`DEFAULT_THEME`]
    pub fn theme_or_default(&self) -> &str {
        self.theme.as_deref().unwrap_or(DEFAULT_THEME)
    }

    /// The configured font file for a slot
    pub fn font_path(&self, slot: FontSlot) -> Option<&Path> {
        match slot {
            FontSlot::Normal => self.font_normal.as_deref(),
            FontSlot::Italic => self.font_italic.as_deref(),
            FontSlot::Bold => self.font_bold.as_deref(),
        }
    }
}
