//! Host error types

use core_types::{DocumentUri, PanelId};
use thiserror::Error;

/// Errors reported by the host
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostError {
    /// No open document with this uri
    #[error("Document not found: {0}")]
    DocumentNotFound(DocumentUri),

    /// The host refused to apply an edit
    #[error("Edit to {uri} was rejected: {reason}")]
    EditRejected { uri: DocumentUri, reason: String },

    /// The panel has been disposed or cannot receive messages
    #[error("Panel unavailable: {0}")]
    PanelUnavailable(PanelId),

    /// Reading or writing the system clipboard failed
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// A file could not be read or written
    #[error("I/O error on {path}: {reason}")]
    Io { path: String, reason: String },

    /// A default command could not be started
    #[error("Command {command} failed: {reason}")]
    CommandFailed {
        command: &'static str,
        reason: String,
    },
}
