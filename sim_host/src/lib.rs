//! # Simulated Host
//!
//! An in-process implementation of [`HostApi`] for tests.
//!
//! ## Purpose
//!
//! - Runs under `cargo test`
//! - Deterministic: asynchronous completions are queued, never raced
//! - Inspectable: every side effect is recorded
//!
//! Operations that complete asynchronously on a real host (default
//! commands, clipboard reads, save dialogs) queue their completion event.
//! Document edits queue the change notification the host would send.
//! Tests drain the queue with [`SimulatedHost::pop_event`] and feed the
//! events back into the editor service.

pub mod fault_injection;

use core_types::{DocumentUri, PanelId, RequestId};
use fault_injection::{FaultInjector, FaultPlan, HostFault, Operation};
use host_api::{EditorCommand, HostApi, HostError, HostEvent, SaveFilter};
use ipc::HostMessage;
use services_settings::{create_default_registry, SettingValue, SettingsRegistry};
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};

/// A message posted into a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedMessage {
    pub panel: PanelId,
    pub message: HostMessage,
}

/// Simulated host state
pub struct SimulatedHost {
    documents: BTreeMap<DocumentUri, String>,
    settings: SettingsRegistry,
    files: BTreeMap<PathBuf, Vec<u8>>,
    clipboard: String,
    /// Panels that reject posted messages
    disposed_panels: HashSet<PanelId>,
    /// Answer of the next save dialogs; `None` cancels
    save_paths: VecDeque<Option<PathBuf>>,
    posted: Vec<PostedMessage>,
    default_commands: Vec<EditorCommand>,
    save_dialogs: Vec<SaveFilter>,
    edits: Vec<(DocumentUri, String)>,
    pending_events: VecDeque<HostEvent>,
    faults: FaultInjector,
}

impl SimulatedHost {
    /// Creates a host with default settings and no documents
    pub fn new() -> Self {
        Self {
            documents: BTreeMap::new(),
            settings: create_default_registry(),
            files: BTreeMap::new(),
            clipboard: String::new(),
            disposed_panels: HashSet::new(),
            save_paths: VecDeque::new(),
            posted: Vec::new(),
            default_commands: Vec::new(),
            save_dialogs: Vec::new(),
            edits: Vec::new(),
            pending_events: VecDeque::new(),
            faults: FaultInjector::default(),
        }
    }

    /// Applies a fault plan
    pub fn with_fault_plan(mut self, plan: FaultPlan) -> Self {
        self.faults = FaultInjector::new(&plan);
        self
    }

    /// Adds one fault
    pub fn inject_fault(&mut self, fault: HostFault) {
        self.faults.add(fault);
    }

    /// Opens (or overwrites) a document without a change notification
    pub fn open_document(&mut self, uri: DocumentUri, text: impl Into<String>) {
        self.documents.insert(uri, text.into());
    }

    /// Edits a document as another editor would, queueing the notification
    pub fn edit_externally(&mut self, uri: &DocumentUri, text: impl Into<String>) {
        self.documents.insert(uri.clone(), text.into());
        self.pending_events.push_back(HostEvent::DocumentChanged {
            uri: uri.clone(),
            content_changes: 1,
        });
    }

    /// Queues a change notification without content (dirty flag only)
    pub fn touch_document(&mut self, uri: &DocumentUri) {
        self.pending_events.push_back(HostEvent::DocumentChanged {
            uri: uri.clone(),
            content_changes: 0,
        });
    }

    pub fn document(&self, uri: &DocumentUri) -> Option<&str> {
        self.documents.get(uri).map(String::as_str)
    }

    /// Sets a configuration value
    pub fn set_setting(&mut self, key: &str, value: SettingValue) {
        self.settings.set_override(key, value);
    }

    pub fn settings_mut(&mut self) -> &mut SettingsRegistry {
        &mut self.settings
    }

    pub fn add_file(&mut self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), bytes.into());
    }

    pub fn file(&self, path: &Path) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn set_clipboard(&mut self, text: impl Into<String>) {
        self.clipboard = text.into();
    }

    pub fn clipboard(&self) -> &str {
        &self.clipboard
    }

    /// Answer for the next save dialog; `None` cancels it
    pub fn answer_next_save_dialog(&mut self, path: Option<PathBuf>) {
        self.save_paths.push_back(path);
    }

    /// Makes posting to a panel fail, as for a disposed view
    pub fn dispose_panel(&mut self, panel: PanelId) {
        self.disposed_panels.insert(panel);
    }

    /// Every message posted so far
    pub fn posted(&self) -> &[PostedMessage] {
        &self.posted
    }

    /// Messages posted to one panel
    pub fn posted_to(&self, panel: PanelId) -> Vec<&HostMessage> {
        self.posted
            .iter()
            .filter(|posted| posted.panel == panel)
            .map(|posted| &posted.message)
            .collect()
    }

    /// Removes and returns the recorded messages
    pub fn take_posted(&mut self) -> Vec<PostedMessage> {
        std::mem::take(&mut self.posted)
    }

    /// Default commands started so far
    pub fn default_commands(&self) -> &[EditorCommand] {
        &self.default_commands
    }

    /// Filters of the save dialogs shown so far
    pub fn save_dialogs(&self) -> &[SaveFilter] {
        &self.save_dialogs
    }

    /// Edits applied through `replace_document`
    pub fn edits(&self) -> &[(DocumentUri, String)] {
        &self.edits
    }

    /// Next queued completion or notification
    pub fn pop_event(&mut self) -> Option<HostEvent> {
        self.pending_events.pop_front()
    }

    pub fn pending_event_count(&self) -> usize {
        self.pending_events.len()
    }

    /// Drops every queued event, as if the host never delivered them
    pub fn discard_events(&mut self) -> Vec<HostEvent> {
        self.pending_events.drain(..).collect()
    }
}

impl Default for SimulatedHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostApi for SimulatedHost {
    fn document_text(&self, uri: &DocumentUri) -> Result<String, HostError> {
        self.documents
            .get(uri)
            .cloned()
            .ok_or_else(|| HostError::DocumentNotFound(uri.clone()))
    }

    fn replace_document(&mut self, uri: &DocumentUri, text: &str) -> Result<(), HostError> {
        if !self.documents.contains_key(uri) {
            return Err(HostError::DocumentNotFound(uri.clone()));
        }
        if self.faults.should_fail(Operation::Edit) {
            return Err(HostError::EditRejected {
                uri: uri.clone(),
                reason: "simulated rejection".to_string(),
            });
        }
        self.documents.insert(uri.clone(), text.to_string());
        self.edits.push((uri.clone(), text.to_string()));
        self.pending_events.push_back(HostEvent::DocumentChanged {
            uri: uri.clone(),
            content_changes: 1,
        });
        Ok(())
    }

    fn post_message(&mut self, panel: PanelId, message: HostMessage) -> Result<(), HostError> {
        if self.disposed_panels.contains(&panel) {
            return Err(HostError::PanelUnavailable(panel));
        }
        self.posted.push(PostedMessage { panel, message });
        Ok(())
    }

    fn execute_default_command(&mut self, command: EditorCommand) -> Result<(), HostError> {
        self.default_commands.push(command);
        self.pending_events
            .push_back(HostEvent::DefaultCommandCompleted(command));
        Ok(())
    }

    fn request_clipboard_text(&mut self, request: RequestId) -> Result<(), HostError> {
        let result = if self.faults.should_fail(Operation::ClipboardRead) {
            Err(HostError::Clipboard("simulated read failure".to_string()))
        } else {
            Ok(self.clipboard.clone())
        };
        self.pending_events
            .push_back(HostEvent::ClipboardText { request, result });
        Ok(())
    }

    fn write_clipboard_text(&mut self, text: &str) -> Result<(), HostError> {
        if self.faults.should_fail(Operation::ClipboardWrite) {
            return Err(HostError::Clipboard("simulated write failure".to_string()));
        }
        self.clipboard = text.to_string();
        Ok(())
    }

    fn show_save_dialog(&mut self, request: RequestId, filter: SaveFilter) -> Result<(), HostError> {
        self.save_dialogs.push(filter);
        let path = self.save_paths.pop_front().flatten();
        self.pending_events
            .push_back(HostEvent::SaveDialogClosed { request, path });
        Ok(())
    }

    fn write_file(&mut self, path: &Path, bytes: &[u8]) -> Result<(), HostError> {
        if self.faults.should_fail(Operation::FileWrite) {
            return Err(HostError::Io {
                path: path.display().to_string(),
                reason: "simulated write failure".to_string(),
            });
        }
        self.files.insert(path.to_path_buf(), bytes.to_vec());
        Ok(())
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>, HostError> {
        self.files.get(path).cloned().ok_or_else(|| HostError::Io {
            path: path.display().to_string(),
            reason: "no such file".to_string(),
        })
    }

    fn settings(&self) -> &SettingsRegistry {
        &self.settings
    }
}
