//! Editor service error types

use crate::export::ExportError;
use core_types::{PanelId, RequestId};
use host_api::HostError;
use ipc::ProtocolError;
use services_document_sync::SyncError;
use services_view_host::ViewHostError;
use thiserror::Error;

/// Errors surfaced by [`DiagramEditorService`](crate::DiagramEditorService)
///
/// None of them is fatal: the service stays consistent and keeps handling
/// events after returning any of these.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error(transparent)]
    ViewHost(#[from] ViewHostError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Export(#[from] ExportError),

    /// A view message arrived from a panel that is not registered
    #[error("Message from unknown panel: {0}")]
    UnknownPanel(PanelId),

    /// A completion answered a request of a different kind
    #[error("Completion does not match request {0}")]
    MismatchedCompletion(RequestId),
}
