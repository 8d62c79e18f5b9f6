//! Pushes configuration into the focused view

use core_types::PanelId;
use host_api::{HostApi, HostError};
use ipc::HostMessage;
use services_logger::Verbosity;
use services_settings::{font_descriptors, DiagramSettings, SettingsRegistry};

/// Sends `debugLevel`, `themeSetting` and `changeFont` to a view
///
/// The theme is only sent when it differs from the last one seen; the
/// initial value is read at construction.
#[derive(Debug)]
pub struct SettingsPublisher {
    theme: String,
    verbosity: Verbosity,
}

impl SettingsPublisher {
    pub fn new(settings: &SettingsRegistry, verbosity: Verbosity) -> Self {
        let current = DiagramSettings::from_registry(settings);
        verbosity.set(current.debug_level);
        Self {
            theme: current.theme_or_default().to_string(),
            verbosity,
        }
    }

    /// Re-reads the settings and updates the log verbosity
    pub fn refresh(&self, host: &impl HostApi) -> DiagramSettings {
        let settings = DiagramSettings::from_registry(host.settings());
        self.verbosity.set(settings.debug_level);
        settings
    }

    /// Re-reads the settings and pushes them to `panel`
    pub fn publish(&mut self, host: &mut impl HostApi, panel: PanelId) -> Result<(), HostError> {
        let settings = self.refresh(&*host);

        host.post_message(
            panel,
            HostMessage::DebugLevel {
                text: settings.debug_level,
            },
        )?;

        let theme = settings.theme_or_default();
        if theme != self.theme {
            tracing::info!(theme, "Theme changed");
            self.theme = theme.to_string();
            host.post_message(
                panel,
                HostMessage::ThemeSetting {
                    text: self.theme.clone(),
                },
            )?;
        }

        let fonts = font_descriptors(&settings, |path| host.read_file(path)).join(",");
        host.post_message(panel, HostMessage::ChangeFont { text: fonts })?;
        Ok(())
    }

    /// The theme the views were last told about
    pub fn theme(&self) -> &str {
        &self.theme
    }
}
