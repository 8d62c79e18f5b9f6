//! # Diagram Editor Service
//!
//! The provider that connects the host editor to its embedded diagram views.
//!
//! ## Philosophy
//!
//! - **One event at a time**: the host drives the service with
//!   [`DiagramEditorService::handle_event`]; nothing runs in the background
//! - **Time is an argument**: every event carries the host's `now`, and
//!   deferred work (grace-window expiry) fires before the event is handled
//! - **State is owned here**: the focus tracker, loopback guard, command
//!   flags and pending requests live in this struct and are lent to each
//!   component per call
//! - **Nothing is fatal**: every error is logged and returned; the service
//!   stays usable afterwards
//!
//! ## Example
//!
//! ```ignore
//! use services_diagram_editor::DiagramEditorService;
//!
//! let mut service = DiagramEditorService::new(host.settings(), verbosity);
//! service.handle_event(&mut host, now, HostEvent::PanelOpened { .. })?;
//! ```

pub mod error;
pub mod export;
pub mod pending;
pub mod settings_push;

pub use error::EditorError;
pub use export::ExportError;
pub use pending::{PendingRequest, PendingRequests};
pub use settings_push::SettingsPublisher;

use core_types::{DocumentUri, Instant, PanelId, RequestId};
use host_api::{EditorCommand, HostApi, HostError, HostEvent, SaveFilter};
use ipc::{parse_flag, ExportFormat, HostMessage, ViewMessage};
use services_command_arbiter::{CommandArbiter, Route};
use services_document_sync::{DocumentSyncChannel, SyncOutcome};
use services_focus_manager::{ExpiryTicket, PanelFocusTracker};
use services_logger::Verbosity;
use services_settings::SettingsRegistry;
use services_timer_queue::TimerQueue;
use services_view_host::{PanelRegistry, PanelState};
use std::path::PathBuf;

/// How the service disposed of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Handled; any effects have been applied or requested
    Consumed,
    /// A document change was deliberately not forwarded to any view
    Suppressed,
    /// The platform's default command was started
    Delegated,
    /// The host should run its own implementation untouched
    PassThrough,
    /// Not relevant to any open diagram
    Ignored,
}

/// Diagram editor provider
pub struct DiagramEditorService {
    panels: PanelRegistry,
    focus: PanelFocusTracker,
    sync: DocumentSyncChannel,
    arbiter: CommandArbiter,
    timers: TimerQueue<ExpiryTicket>,
    publisher: SettingsPublisher,
    pending: PendingRequests,
    now: Instant,
}

impl DiagramEditorService {
    /// Creates the service, reading the initial configuration
    pub fn new(settings: &SettingsRegistry, verbosity: Verbosity) -> Self {
        Self {
            panels: PanelRegistry::new(),
            focus: PanelFocusTracker::new(),
            sync: DocumentSyncChannel::new(),
            arbiter: CommandArbiter::new(),
            timers: TimerQueue::new(),
            publisher: SettingsPublisher::new(settings, verbosity),
            pending: PendingRequests::new(),
            now: Instant::ZERO,
        }
    }

    /// Handles one host event
    ///
    /// Timers due at or before `now` fire first.
    pub fn handle_event(
        &mut self,
        host: &mut impl HostApi,
        now: Instant,
        event: HostEvent,
    ) -> Result<Dispatch, EditorError> {
        self.advance_time(now);
        tracing::trace!(event = event.kind(), "Handling host event");

        let result = self.dispatch(host, event);
        if let Err(err) = &result {
            tracing::error!(error = %err, "Host event failed");
        }
        result
    }

    /// Fires every deferred timer due at or before `now`
    pub fn advance_time(&mut self, now: Instant) {
        if now > self.now {
            self.now = now;
        }
        for timer in self.timers.drain_due(self.now) {
            tracing::trace!(timer = %timer.id, "Grace timer fired");
            self.focus.expire(timer.payload, timer.due);
        }
    }

    fn dispatch(
        &mut self,
        host: &mut impl HostApi,
        event: HostEvent,
    ) -> Result<Dispatch, EditorError> {
        match event {
            HostEvent::PanelOpened {
                panel,
                uri,
                title,
                active,
                visible,
            } => self.panel_opened(host, panel, uri, title, PanelState::new(active, visible)),
            HostEvent::PanelClosed { panel } => self.panel_closed(panel),
            HostEvent::ViewStateChanged {
                panel,
                active,
                visible,
            } => self.view_state_changed(host, panel, PanelState::new(active, visible)),
            HostEvent::DocumentChanged {
                uri,
                content_changes,
            } => self.document_changed(host, &uri, content_changes),
            HostEvent::ViewMessage { panel, message } => self.view_message(host, panel, message),
            HostEvent::CommandInvoked(command) => self.command_invoked(host, command),
            HostEvent::DefaultCommandCompleted(command) => {
                if self.arbiter.complete_default(command) {
                    tracing::debug!(%command, "Default command finished, interception restored");
                    Ok(Dispatch::Consumed)
                } else {
                    Ok(Dispatch::Ignored)
                }
            }
            HostEvent::ClipboardText { request, result } => {
                self.clipboard_text(host, request, result)
            }
            HostEvent::SaveDialogClosed { request, path } => {
                self.save_dialog_closed(host, request, path)
            }
            HostEvent::ExportRequested(format) => self.export_requested(host, format),
        }
    }

    fn panel_opened(
        &mut self,
        host: &mut impl HostApi,
        panel: PanelId,
        uri: DocumentUri,
        title: String,
        state: PanelState,
    ) -> Result<Dispatch, EditorError> {
        tracing::info!(%panel, document = uri.file_name(), "Diagram editor opened");
        self.panels.open_panel(panel, uri, title, state)?;
        if state.active {
            self.focus_gained(host, panel)?;
        } else {
            self.publisher.refresh(&*host);
        }
        Ok(Dispatch::Consumed)
    }

    fn panel_closed(&mut self, panel: PanelId) -> Result<Dispatch, EditorError> {
        let record = self.panels.close_panel(panel)?;
        self.focus.forget_panel(panel);
        self.pending.forget_panel(panel);
        tracing::info!(%panel, document = record.document.file_name(), "Diagram editor closed");
        Ok(Dispatch::Consumed)
    }

    fn view_state_changed(
        &mut self,
        host: &mut impl HostApi,
        panel: PanelId,
        state: PanelState,
    ) -> Result<Dispatch, EditorError> {
        self.panels.update_state(panel, state)?;
        if state.active {
            self.focus_gained(host, panel)?;
        } else if let Some(ticket) = self.focus.focus_lost(panel, self.now) {
            self.timers.schedule(ticket.due, ticket);
        }
        Ok(Dispatch::Consumed)
    }

    fn focus_gained(&mut self, host: &mut impl HostApi, panel: PanelId) -> Result<(), EditorError> {
        self.focus.focus_gained(panel, self.now);
        self.publisher.publish(host, panel)?;
        Ok(())
    }

    fn document_changed(
        &mut self,
        host: &mut impl HostApi,
        uri: &DocumentUri,
        content_changes: usize,
    ) -> Result<Dispatch, EditorError> {
        let panels = self.panels.panels_for_document(uri);
        if panels.is_empty() {
            return Ok(Dispatch::Ignored);
        }

        // Every panel is visited even after a failure, so the focused one
        // always gets to consume the loopback guard.
        let mut pushed = false;
        let mut first_error = None;
        for panel in panels {
            let is_current = self.focus.is_current(panel);
            match self
                .sync
                .host_changed(host, panel, is_current, uri, content_changes)
            {
                Ok(outcome) => pushed |= outcome == SyncOutcome::Pushed,
                Err(err) => {
                    tracing::warn!(%panel, error = %err, "Could not sync view");
                    first_error.get_or_insert(err);
                }
            }
        }
        if let Some(err) = first_error {
            return Err(err.into());
        }

        Ok(if pushed {
            Dispatch::Consumed
        } else {
            Dispatch::Suppressed
        })
    }

    fn view_message(
        &mut self,
        host: &mut impl HostApi,
        panel: PanelId,
        message: ViewMessage,
    ) -> Result<Dispatch, EditorError> {
        tracing::trace!(%panel, command = message.command(), "View message received");
        match message {
            ViewMessage::UpdateFiledataUxf { text } => {
                let uri = self
                    .panels
                    .document_of(panel)
                    .cloned()
                    .ok_or(EditorError::UnknownPanel(panel))?;
                self.sync.view_updated(host, &uri, &text)?;
            }
            ViewMessage::ExportUxf { text } => self.start_export(host, ExportFormat::Uxf, text)?,
            ViewMessage::ExportPng { text } => self.start_export(host, ExportFormat::Png, text)?,
            ViewMessage::ExportPdf { text } => self.start_export(host, ExportFormat::Pdf, text)?,
            ViewMessage::PostLog { text } => {
                tracing::info!("{}", text);
            }
            ViewMessage::SetClipboard { text } => {
                host.write_clipboard_text(&text)?;
            }
            ViewMessage::RequestPasteClipboard => {
                self.request_clipboard(host, PendingRequest::PasteResponse)?;
            }
            ViewMessage::PropertiesFocus { text } => {
                let focused = parse_flag("propertiesFocus", &text)?;
                tracing::debug!(focused, "Properties input focus changed");
                self.arbiter.set_properties_focus(focused);
            }
            ViewMessage::Unsupported => {
                tracing::debug!(%panel, "Ignoring unsupported view message");
                return Ok(Dispatch::Ignored);
            }
        }
        Ok(Dispatch::Consumed)
    }

    fn command_invoked(
        &mut self,
        host: &mut impl HostApi,
        command: EditorCommand,
    ) -> Result<Dispatch, EditorError> {
        match self.arbiter.route(command, &self.focus, &self.panels) {
            Route::PassThrough => Ok(Dispatch::PassThrough),
            Route::RunDefault => {
                if let Err(err) = host.execute_default_command(command) {
                    self.arbiter.complete_default(command);
                    return Err(err.into());
                }
                Ok(Dispatch::Delegated)
            }
            Route::Forward { panel, message } => {
                tracing::debug!(%panel, sent = message.command(), "Forwarding command to view");
                host.post_message(panel, message)?;
                Ok(Dispatch::Consumed)
            }
            Route::Paste { panel, target } => {
                self.request_clipboard(host, PendingRequest::Paste { panel, target })?;
                Ok(Dispatch::Consumed)
            }
            Route::Swallow { panel } => {
                tracing::debug!(%command, %panel, "Command left to the view");
                Ok(Dispatch::Consumed)
            }
        }
    }

    fn request_clipboard(
        &mut self,
        host: &mut impl HostApi,
        request: PendingRequest,
    ) -> Result<(), EditorError> {
        let id = self.pending.register(request);
        if let Err(err) = host.request_clipboard_text(id) {
            self.pending.take(id);
            return Err(err.into());
        }
        Ok(())
    }

    fn clipboard_text(
        &mut self,
        host: &mut impl HostApi,
        request: RequestId,
        result: Result<String, HostError>,
    ) -> Result<Dispatch, EditorError> {
        let Some(pending) = self.pending.take(request) else {
            tracing::debug!(%request, "Clipboard text for unknown request");
            return Ok(Dispatch::Ignored);
        };
        let text = result?;

        match pending {
            PendingRequest::Paste { panel, target } => {
                tracing::debug!(%panel, ?target, "Pasting clipboard into view");
                host.post_message(panel, HostMessage::Paste { text, target })?;
            }
            PendingRequest::PasteResponse => {
                let Some(panel) = self.focus.current() else {
                    tracing::debug!("No focused view to answer the paste request");
                    return Ok(Dispatch::Ignored);
                };
                host.post_message(panel, HostMessage::PasteResponse { text })?;
            }
            PendingRequest::Export { .. } => return Err(EditorError::MismatchedCompletion(request)),
        }
        Ok(Dispatch::Consumed)
    }

    fn start_export(
        &mut self,
        host: &mut impl HostApi,
        format: ExportFormat,
        text: String,
    ) -> Result<(), EditorError> {
        let bytes = export::decode_payload(format, text)?;
        let id = self.pending.register(PendingRequest::Export { format, bytes });
        if let Err(err) = host.show_save_dialog(id, SaveFilter::for_format(format)) {
            self.pending.take(id);
            return Err(err.into());
        }
        Ok(())
    }

    fn save_dialog_closed(
        &mut self,
        host: &mut impl HostApi,
        request: RequestId,
        path: Option<PathBuf>,
    ) -> Result<Dispatch, EditorError> {
        let (format, bytes) = match self.pending.take(request) {
            Some(PendingRequest::Export { format, bytes }) => (format, bytes),
            Some(_) => return Err(EditorError::MismatchedCompletion(request)),
            None => {
                tracing::debug!(%request, "Save dialog for unknown request");
                return Ok(Dispatch::Ignored);
            }
        };

        let Some(path) = path else {
            tracing::info!(%format, "Export cancelled");
            return Ok(Dispatch::Consumed);
        };

        host.write_file(&path, &bytes)
            .map_err(|source| ExportError::Write {
                format,
                path: path.clone(),
                source,
            })?;
        tracing::info!(%format, path = %path.display(), "Diagram exported");
        Ok(Dispatch::Consumed)
    }

    fn export_requested(
        &mut self,
        host: &mut impl HostApi,
        format: ExportFormat,
    ) -> Result<Dispatch, EditorError> {
        let Some(panel) = self.focus.export_panel() else {
            tracing::info!(%format, "No diagram to export");
            return Ok(Dispatch::Ignored);
        };
        host.post_message(panel, HostMessage::RequestExport { text: format })?;
        Ok(Dispatch::Consumed)
    }

    /// Focus state
    pub fn focus(&self) -> &PanelFocusTracker {
        &self.focus
    }

    /// Open panels
    pub fn panels(&self) -> &PanelRegistry {
        &self.panels
    }

    pub fn arbiter(&self) -> &CommandArbiter {
        &self.arbiter
    }

    /// Document whose next change is expected to echo a view edit
    pub fn pending_loopback(&self) -> Option<&DocumentUri> {
        self.sync.pending_uri()
    }

    /// Number of host requests awaiting completion
    pub fn pending_request_count(&self) -> usize {
        self.pending.len()
    }

    /// Deadline of the next deferred timer
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Latest time the service has seen
    pub fn now(&self) -> Instant {
        self.now
    }

    /// Theme last sent to the views
    pub fn theme(&self) -> &str {
        self.publisher.theme()
    }
}
