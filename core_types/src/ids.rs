//! Unique identifiers for panels, documents and host requests

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an embedded-view panel
///
/// Panels are owned by the host. The bridge only ever holds this handle,
/// never the panel itself, so a closed panel can not be kept alive by
/// a stale focus reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PanelId(Uuid);

impl PanelId {
    /// Creates a new random panel ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a panel ID from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PanelId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Panel({})", self.0)
    }
}

/// Identity of a host text document
///
/// Compared by exact string equality, the same way the host compares
/// document URIs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentUri(String);

impl DocumentUri {
    /// Creates a document URI
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// Returns the URI as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the last path segment, used as a human-readable name in logs
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for DocumentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DocumentUri {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Correlation ID for an asynchronous host operation
///
/// Issued when the bridge asks the host for something that completes later
/// (clipboard read, save dialog). The completion event carries it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Creates a new random request ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Request({})", self.0)
    }
}
