//! # Document Sync Service
//!
//! Keeps a host text document and the diagram view showing it consistent.
//!
//! ## Philosophy
//!
//! - **Whole-document transfers**: both directions ship the full text; there
//!   is no diffing or patching
//! - **Idempotent round-trips**: a view update equal to the host text is a
//!   no-op, so echoes die out after one hop
//! - **Loopback suppression**: an edit the view made itself is not pushed
//!   back to it, which would reset the view's selection
//!
//! ## Flow
//!
//! ```text
//! view --updateFiledataUxf--> view_updated --replace--> host document
//!                                  |
//!                           LoopbackGuard::mark_self_change
//!                                  |
//! host change event --> host_changed --should_suppress?--> myUpdate --> view
//! ```

pub mod guard;

pub use guard::{LoopbackGuard, Suppression};

use core_types::{DocumentUri, PanelId};
use host_api::{HostApi, HostError};
use ipc::HostMessage;
use thiserror::Error;

/// Document sync error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SyncError {
    /// The host refused a view-originated edit
    #[error("Host rejected edit to {uri}: {source}")]
    EditRejected {
        uri: DocumentUri,
        #[source]
        source: HostError,
    },

    /// Reading the document or posting to the view failed
    #[error(transparent)]
    Host(#[from] HostError),
}

/// What a sync step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The host text was posted to the view
    Pushed,
    /// The change was the echo of the view's own edit
    SuppressedLoopback,
    /// The change carried no content (dirty-flag only)
    SuppressedEmpty,
    /// The view's text was written into the host document
    Applied,
    /// The view's text already matched the host document
    Unchanged,
}

/// Bidirectional sync between host documents and diagram views
#[derive(Debug, Default)]
pub struct DocumentSyncChannel {
    guard: LoopbackGuard,
}

impl DocumentSyncChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host -> view: forwards a host document change to one panel bound to it
    ///
    /// `panel_is_current` tells whether `panel` holds input focus; only the
    /// focused panel can be the origin of a loopback.
    pub fn host_changed(
        &mut self,
        host: &mut impl HostApi,
        panel: PanelId,
        panel_is_current: bool,
        uri: &DocumentUri,
        content_changes: usize,
    ) -> Result<SyncOutcome, SyncError> {
        match self
            .guard
            .should_suppress(uri, panel_is_current, content_changes == 0)
        {
            Some(Suppression::Loopback) => {
                tracing::debug!(document = uri.file_name(), "Change came from the view itself");
                return Ok(SyncOutcome::SuppressedLoopback);
            }
            Some(Suppression::EmptyChange) => {
                tracing::debug!(document = uri.file_name(), "Dirty-flag change ignored");
                return Ok(SyncOutcome::SuppressedEmpty);
            }
            None => {}
        }

        let text = host.document_text(uri)?;
        tracing::info!(document = uri.file_name(), %panel, "Injecting host change into view");
        host.post_message(panel, HostMessage::MyUpdate { text })?;
        Ok(SyncOutcome::Pushed)
    }

    /// View -> host: writes the view's diagram text into the host document
    pub fn view_updated(
        &mut self,
        host: &mut impl HostApi,
        uri: &DocumentUri,
        text: &str,
    ) -> Result<SyncOutcome, SyncError> {
        if host.document_text(uri)? == text {
            tracing::debug!(document = uri.file_name(), "View text matches document");
            return Ok(SyncOutcome::Unchanged);
        }

        // Mark before editing: the host may report the change synchronously.
        self.guard.mark_self_change(uri.clone());
        tracing::debug!(document = uri.file_name(), "Loopback guard set");

        host.replace_document(uri, text).map_err(|source| {
            tracing::error!(document = uri.file_name(), error = %source, "Could not apply view edit");
            SyncError::EditRejected {
                uri: uri.clone(),
                source,
            }
        })?;
        Ok(SyncOutcome::Applied)
    }

    /// Document whose next change is expected to be a loopback
    pub fn pending_uri(&self) -> Option<&DocumentUri> {
        self.guard.pending_uri()
    }
}
