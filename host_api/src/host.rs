//! The host trait

use crate::{EditorCommand, HostError};
use core_types::{DocumentUri, PanelId, RequestId};
use ipc::{ExportFormat, HostMessage};
use services_settings::SettingsRegistry;
use std::path::Path;

/// File type filter of a save dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveFilter {
    /// Label shown to the user
    pub label: String,
    /// Accepted extensions, without dots
    pub extensions: Vec<String>,
}

impl SaveFilter {
    pub fn new(label: impl Into<String>, extensions: &[&str]) -> Self {
        Self {
            label: label.into(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// The filter used when exporting in a format
    pub fn for_format(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Uxf => Self::new("UML Diagram", &["uxf"]),
            ExportFormat::Png => Self::new("Image", &["png"]),
            ExportFormat::Pdf => Self::new("PDF", &["pdf"]),
        }
    }
}

/// The host editor, as seen by the bridge
///
/// Multiple implementations are possible:
/// - Simulated host (for testing)
/// - An adapter over a real editor's extension API
///
/// Methods that start asynchronous work (`execute_default_command`,
/// `request_clipboard_text`, `show_save_dialog`) return once the work is
/// started; the result arrives later as a [`HostEvent`](crate::HostEvent).
pub trait HostApi {
    /// Full current text of a document
    fn document_text(&self, uri: &DocumentUri) -> Result<String, HostError>;

    /// Replaces the whole text of a document in one edit
    fn replace_document(&mut self, uri: &DocumentUri, text: &str) -> Result<(), HostError>;

    /// Posts a message into a view
    fn post_message(&mut self, panel: PanelId, message: HostMessage) -> Result<(), HostError>;

    /// Starts the platform's default implementation of a command
    ///
    /// Completion is reported by `HostEvent::DefaultCommandCompleted`.
    fn execute_default_command(&mut self, command: EditorCommand) -> Result<(), HostError>;

    /// Starts reading the system clipboard
    ///
    /// Completion is reported by `HostEvent::ClipboardText`.
    fn request_clipboard_text(&mut self, request: RequestId) -> Result<(), HostError>;

    /// Writes the system clipboard
    fn write_clipboard_text(&mut self, text: &str) -> Result<(), HostError>;

    /// Opens a save dialog
    ///
    /// Completion is reported by `HostEvent::SaveDialogClosed`.
    fn show_save_dialog(&mut self, request: RequestId, filter: SaveFilter)
        -> Result<(), HostError>;

    /// Writes a file, replacing any existing content
    fn write_file(&mut self, path: &Path, bytes: &[u8]) -> Result<(), HostError>;

    /// Reads a file
    fn read_file(&self, path: &Path) -> Result<Vec<u8>, HostError>;

    /// Current configuration
    fn settings(&self) -> &SettingsRegistry;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_filters() {
        let filter = SaveFilter::for_format(ExportFormat::Uxf);
        assert_eq!(filter.label, "UML Diagram");
        assert_eq!(filter.extensions, vec!["uxf"]);
        assert_eq!(SaveFilter::for_format(ExportFormat::Png).label, "Image");
        assert_eq!(
            SaveFilter::for_format(ExportFormat::Pdf).extensions,
            vec!["pdf"]
        );
    }
}
