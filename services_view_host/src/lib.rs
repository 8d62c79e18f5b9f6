//! # View Host Service
//!
//! Book-keeping for the embedded diagram views the host has opened.
//!
//! ## Philosophy
//!
//! - **Handles, not lifecycles**: the host creates and disposes views; this
//!   registry only mirrors what the host reports
//! - **One document per panel**: every panel is bound to exactly one
//!   document for its whole life
//! - **Host-managed state**: `active` and `visible` are whatever the host
//!   last said they were
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A renderer
//! - A layout manager
//! - An HTML page builder

use core_types::{DocumentUri, PanelId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// View host service error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewHostError {
    #[error("Panel not found: {0}")]
    PanelNotFound(PanelId),

    #[error("Panel already exists: {0}")]
    PanelAlreadyExists(PanelId),
}

/// Focus and visibility of a panel, as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PanelState {
    /// Has input focus
    pub active: bool,
    /// Is on screen (possibly without focus)
    pub visible: bool,
}

impl PanelState {
    pub fn new(active: bool, visible: bool) -> Self {
        Self { active, visible }
    }
}

/// Panel record - what the registry knows about one view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelRecord {
    pub id: PanelId,
    /// Document shown in the panel
    pub document: DocumentUri,
    /// Tab title
    pub title: String,
    pub state: PanelState,
}

/// Registry of open panels, in opening order
#[derive(Debug, Default)]
pub struct PanelRegistry {
    panels: Vec<PanelRecord>,
}

impl PanelRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a newly opened panel
    pub fn open_panel(
        &mut self,
        id: PanelId,
        document: DocumentUri,
        title: impl Into<String>,
        state: PanelState,
    ) -> Result<(), ViewHostError> {
        if self.panel(id).is_some() {
            return Err(ViewHostError::PanelAlreadyExists(id));
        }
        self.panels.push(PanelRecord {
            id,
            document,
            title: title.into(),
            state,
        });
        Ok(())
    }

    /// Unregisters a disposed panel, returning its last record
    pub fn close_panel(&mut self, id: PanelId) -> Result<PanelRecord, ViewHostError> {
        let index = self
            .panels
            .iter()
            .position(|record| record.id == id)
            .ok_or(ViewHostError::PanelNotFound(id))?;
        Ok(self.panels.remove(index))
    }

    /// Records a focus/visibility change, returning the previous state
    pub fn update_state(
        &mut self,
        id: PanelId,
        state: PanelState,
    ) -> Result<PanelState, ViewHostError> {
        let record = self
            .panels
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or(ViewHostError::PanelNotFound(id))?;
        Ok(std::mem::replace(&mut record.state, state))
    }

    /// Looks a panel up
    pub fn panel(&self, id: PanelId) -> Option<&PanelRecord> {
        self.panels.iter().find(|record| record.id == id)
    }

    /// Document bound to a panel
    pub fn document_of(&self, id: PanelId) -> Option<&DocumentUri> {
        self.panel(id).map(|record| &record.document)
    }

    /// Every panel showing a document, in opening order
    pub fn panels_for_document(&self, document: &DocumentUri) -> Vec<PanelId> {
        self.panels
            .iter()
            .filter(|record| &record.document == document)
            .map(|record| record.id)
            .collect()
    }

    /// Whether a panel is registered and on screen
    pub fn is_visible(&self, id: PanelId) -> bool {
        self.panel(id).map_or(false, |record| record.state.visible)
    }

    /// Number of open panels
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// All open panels, in opening order
    pub fn iter(&self) -> impl Iterator<Item = &PanelRecord> {
        self.panels.iter()
    }
}
