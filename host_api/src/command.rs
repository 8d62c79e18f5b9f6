//! Editor commands the bridge intercepts

use std::fmt;

/// A host keyboard command that may be routed into a view
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EditorCommand {
    Copy,
    Cut,
    Paste,
    SelectAll,
    ZoomIn,
    ZoomOut,
}

impl EditorCommand {
    /// Every intercepted command
    pub const ALL: [EditorCommand; 6] = [
        EditorCommand::Copy,
        EditorCommand::Cut,
        EditorCommand::Paste,
        EditorCommand::SelectAll,
        EditorCommand::ZoomIn,
        EditorCommand::ZoomOut,
    ];

    /// Identifier of the platform's default implementation
    pub fn host_command_id(&self) -> &'static str {
        match self {
            EditorCommand::Copy => "editor.action.clipboardCopyAction",
            EditorCommand::Cut => "editor.action.clipboardCutAction",
            EditorCommand::Paste => "editor.action.clipboardPasteAction",
            EditorCommand::SelectAll => "editor.action.webvieweditor.selectAll",
            EditorCommand::ZoomIn => "workbench.action.zoomIn",
            EditorCommand::ZoomOut => "workbench.action.zoomOut",
        }
    }
}

impl fmt::Display for EditorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.host_command_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_command_ids_are_unique() {
        let mut ids: Vec<_> = EditorCommand::ALL
            .iter()
            .map(|c| c.host_command_id())
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), EditorCommand::ALL.len());
    }

    #[test]
    fn test_display_is_host_id() {
        assert_eq!(
            EditorCommand::ZoomOut.to_string(),
            "workbench.action.zoomOut"
        );
    }
}
