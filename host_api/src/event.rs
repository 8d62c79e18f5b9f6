//! Events the host delivers to the bridge

use crate::{EditorCommand, HostError};
use core_types::{DocumentUri, PanelId, RequestId};
use ipc::{ExportFormat, ViewMessage};
use std::path::PathBuf;

/// Something that happened in the host
///
/// Completion events (`DefaultCommandCompleted`, `ClipboardText`,
/// `SaveDialogClosed`) answer an earlier request made through
/// [`HostApi`](crate::HostApi).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// A view was created for a document
    PanelOpened {
        panel: PanelId,
        uri: DocumentUri,
        title: String,
        active: bool,
        visible: bool,
    },
    /// A view was disposed
    PanelClosed { panel: PanelId },
    /// A view's focus or visibility changed
    ViewStateChanged {
        panel: PanelId,
        active: bool,
        visible: bool,
    },
    /// A host document changed
    DocumentChanged {
        uri: DocumentUri,
        /// Number of content changes in the notification; zero for
        /// dirty-flag-only notifications
        content_changes: usize,
    },
    /// A view posted a message
    ViewMessage { panel: PanelId, message: ViewMessage },
    /// The user invoked an intercepted command
    CommandInvoked(EditorCommand),
    /// A default command started by the bridge finished
    DefaultCommandCompleted(EditorCommand),
    /// A clipboard read finished
    ClipboardText {
        request: RequestId,
        result: Result<String, HostError>,
    },
    /// A save dialog was closed; `None` when cancelled
    SaveDialogClosed {
        request: RequestId,
        path: Option<PathBuf>,
    },
    /// The user asked for an export from the host UI
    ExportRequested(ExportFormat),
}

impl HostEvent {
    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            HostEvent::PanelOpened { .. } => "panel_opened",
            HostEvent::PanelClosed { .. } => "panel_closed",
            HostEvent::ViewStateChanged { .. } => "view_state_changed",
            HostEvent::DocumentChanged { .. } => "document_changed",
            HostEvent::ViewMessage { .. } => "view_message",
            HostEvent::CommandInvoked(_) => "command_invoked",
            HostEvent::DefaultCommandCompleted(_) => "default_command_completed",
            HostEvent::ClipboardText { .. } => "clipboard_text",
            HostEvent::SaveDialogClosed { .. } => "save_dialog_closed",
            HostEvent::ExportRequested(_) => "export_requested",
        }
    }
}
