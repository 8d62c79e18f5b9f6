//! Loopback guard

use core_types::DocumentUri;

/// Why a host change is not forwarded to the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suppression {
    /// Echo of an edit the focused view made itself
    Loopback,
    /// Notification without content changes
    EmptyChange,
}

/// Remembers the document the view last edited
///
/// The next change notification for that document, seen by the focused
/// panel, is the echo of that edit and is swallowed exactly once.
#[derive(Debug, Default, Clone)]
pub struct LoopbackGuard {
    pending_uri: Option<DocumentUri>,
}

impl LoopbackGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that the view is about to edit `uri`
    pub fn mark_self_change(&mut self, uri: DocumentUri) {
        self.pending_uri = Some(uri);
    }

    /// Decides whether a change notification should be swallowed
    ///
    /// The guard is consulted first: a matching change reported to the
    /// focused panel consumes it even when the change is empty. A change to
    /// any other document leaves the guard untouched.
    pub fn should_suppress(
        &mut self,
        uri: &DocumentUri,
        reporter_is_focused: bool,
        change_is_empty: bool,
    ) -> Option<Suppression> {
        if reporter_is_focused && self.pending_uri.as_ref() == Some(uri) {
            self.pending_uri = None;
            return Some(Suppression::Loopback);
        }
        if change_is_empty {
            return Some(Suppression::EmptyChange);
        }
        None
    }

    pub fn pending_uri(&self) -> Option<&DocumentUri> {
        self.pending_uri.as_ref()
    }
}
