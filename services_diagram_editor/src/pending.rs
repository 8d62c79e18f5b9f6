//! Host requests awaiting their completion event

use core_types::{PanelId, RequestId};
use ipc::{ExportFormat, PasteTarget};
use std::collections::HashMap;

/// What to do once a request completes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingRequest {
    /// Clipboard read for an intercepted paste
    Paste { panel: PanelId, target: PasteTarget },
    /// Clipboard read asked for by a view; answered to the current panel
    PasteResponse,
    /// Save dialog for an export
    Export { format: ExportFormat, bytes: Vec<u8> },
}

/// Outstanding requests by id
#[derive(Debug, Default)]
pub struct PendingRequests {
    requests: HashMap<RequestId, PendingRequest>,
}

impl PendingRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a request under a fresh id
    pub fn register(&mut self, request: PendingRequest) -> RequestId {
        let id = RequestId::new();
        self.requests.insert(id, request);
        id
    }

    /// Removes a request, returning it
    pub fn take(&mut self, id: RequestId) -> Option<PendingRequest> {
        self.requests.remove(&id)
    }

    /// Drops paste requests aimed at a closed panel
    pub fn forget_panel(&mut self, panel: PanelId) {
        self.requests.retain(|_, request| {
            !matches!(request, PendingRequest::Paste { panel: target, .. } if *target == panel)
        });
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_take() {
        let mut pending = PendingRequests::new();
        let id = pending.register(PendingRequest::PasteResponse);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending.take(id), Some(PendingRequest::PasteResponse));
        assert_eq!(pending.take(id), None);
        assert!(pending.is_empty());
    }

    #[test]
    fn test_forget_panel_drops_its_pastes() {
        let mut pending = PendingRequests::new();
        let gone = PanelId::new();
        let kept = PanelId::new();
        pending.register(PendingRequest::Paste {
            panel: gone,
            target: PasteTarget::Canvas,
        });
        let kept_id = pending.register(PendingRequest::Paste {
            panel: kept,
            target: PasteTarget::Canvas,
        });
        pending.register(PendingRequest::PasteResponse);

        pending.forget_panel(gone);
        assert_eq!(pending.len(), 2);
        assert!(pending.take(kept_id).is_some());
    }
}
