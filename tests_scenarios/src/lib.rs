//! Scenario Test Utilities
//!
//! Shared harness for end-to-end tests of the diagram editor bridge.
//!
//! ## Test Philosophy
//!
//! - **Virtual time**: the clock only moves when a test advances it
//! - **Host completions are explicit**: asynchronous host work stays queued
//!   until the test pumps it
//! - **Observable output**: log lines land in an in-memory output channel,
//!   filtered by the configured debug level exactly as in production

use core_types::{Duration, DocumentUri, Instant, PanelId};
use host_api::{EditorCommand, HostApi, HostEvent};
use ipc::{HostMessage, ViewMessage};
use services_diagram_editor::{DiagramEditorService, Dispatch, EditorError};
use services_logger::{MemorySink, OutputChannelLayer, Verbosity};
use sim_host::SimulatedHost;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::layer::SubscriberExt;

/// A running editor bridge with its simulated host and clock
pub struct Session {
    pub host: SimulatedHost,
    pub service: DiagramEditorService,
    output: MemorySink,
    now: Instant,
    _log_guard: DefaultGuard,
}

impl Session {
    /// Starts a session on a fresh simulated host
    pub fn new() -> Self {
        Self::with_host(SimulatedHost::new())
    }

    /// Starts a session on a prepared host (settings, files, faults)
    pub fn with_host(host: SimulatedHost) -> Self {
        let output = MemorySink::new();
        let verbosity = Verbosity::default();
        let subscriber = tracing_subscriber::registry()
            .with(OutputChannelLayer::new(output.clone(), verbosity.clone()));
        let log_guard = tracing::subscriber::set_default(subscriber);

        let service = DiagramEditorService::new(host.settings(), verbosity);
        Self {
            host,
            service,
            output,
            now: Instant::ZERO,
            _log_guard: log_guard,
        }
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    /// Moves the clock forward, firing due timers
    pub fn advance(&mut self, millis: u64) {
        self.now = self.now + Duration::from_millis(millis);
        self.service.advance_time(self.now);
    }

    /// Delivers one event at the current time
    pub fn dispatch(&mut self, event: HostEvent) -> Result<Dispatch, EditorError> {
        self.service.handle_event(&mut self.host, self.now, event)
    }

    /// Delivers every queued host completion and notification
    pub fn pump(&mut self) -> Vec<Result<Dispatch, EditorError>> {
        let mut results = Vec::new();
        while let Some(event) = self.host.pop_event() {
            results.push(self.dispatch(event));
        }
        results
    }

    /// Opens a document in a new visible panel
    pub fn open_panel(&mut self, name: &str, text: &str, active: bool) -> (PanelId, DocumentUri) {
        let panel = PanelId::new();
        let uri = DocumentUri::new(format!("file:///workspace/{}", name));
        self.host.open_document(uri.clone(), text);
        self.dispatch(HostEvent::PanelOpened {
            panel,
            uri: uri.clone(),
            title: name.to_string(),
            active,
            visible: true,
        })
        .expect("Failed to open panel");
        (panel, uri)
    }

    /// Opens a panel bound to an already open document
    pub fn open_panel_for(&mut self, uri: &DocumentUri, active: bool) -> PanelId {
        let panel = PanelId::new();
        self.dispatch(HostEvent::PanelOpened {
            panel,
            uri: uri.clone(),
            title: uri.file_name().to_string(),
            active,
            visible: true,
        })
        .expect("Failed to open panel");
        panel
    }

    pub fn focus(&mut self, panel: PanelId) {
        self.set_view_state(panel, true, true);
    }

    /// Takes focus away from a panel, leaving it on screen or hiding it
    pub fn blur(&mut self, panel: PanelId, visible: bool) {
        self.set_view_state(panel, false, visible);
    }

    pub fn set_view_state(&mut self, panel: PanelId, active: bool, visible: bool) {
        self.dispatch(HostEvent::ViewStateChanged {
            panel,
            active,
            visible,
        })
        .expect("Failed to change view state");
    }

    /// Invokes an intercepted command
    pub fn invoke(&mut self, command: EditorCommand) -> Dispatch {
        self.dispatch(HostEvent::CommandInvoked(command))
            .expect("Failed to route command")
    }

    /// Delivers a message from a view
    pub fn view_says(
        &mut self,
        panel: PanelId,
        message: ViewMessage,
    ) -> Result<Dispatch, EditorError> {
        self.dispatch(HostEvent::ViewMessage { panel, message })
    }

    /// Messages posted to a panel, oldest first
    pub fn messages_to(&self, panel: PanelId) -> Vec<HostMessage> {
        self.host.posted_to(panel).into_iter().cloned().collect()
    }

    /// Forgets every posted message
    pub fn clear_messages(&mut self) {
        self.host.take_posted();
    }

    /// Lines written to the output channel
    pub fn output(&self) -> Vec<String> {
        self.output.lines()
    }

    pub fn output_contains(&self, needle: &str) -> bool {
        self.output.contains(needle)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
