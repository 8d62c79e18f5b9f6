//! # Command Arbiter Service
//!
//! Decides whether a keyboard command belongs to a diagram view or to the
//! host editor.
//!
//! ## Philosophy
//!
//! - **Focus-scoped**: routing depends only on the focus tracker and the
//!   panel registry, never on ambient state
//! - **Declarative**: each command's rule lives in an [`InterceptionTable`]
//! - **Re-entrancy safe**: while a command's platform default runs, a new
//!   invocation of that command passes straight through instead of being
//!   intercepted again
//!
//! The arbiter only decides. Executing a [`Route`] (posting messages,
//! starting defaults, reading the clipboard) is the caller's job.

pub mod table;

pub use table::{Interception, InterceptionTable, TargetRule, ViewAction};

use core_types::PanelId;
use host_api::EditorCommand;
use ipc::{HostMessage, PasteTarget};
use services_focus_manager::PanelFocusTracker;
use services_view_host::PanelRegistry;
use std::collections::BTreeSet;

/// Where an invoked command goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The command's default is already running; let the platform handle it
    PassThrough,
    /// No eligible panel; run the platform default
    ///
    /// The command is now in flight until [`CommandArbiter::complete_default`].
    RunDefault,
    /// Post a message to the panel instead of running the default
    Forward { panel: PanelId, message: HostMessage },
    /// Read the clipboard and paste its text into the panel
    Paste { panel: PanelId, target: PasteTarget },
    /// The view handles the command itself
    Swallow { panel: PanelId },
}

/// Command arbiter
#[derive(Debug)]
pub struct CommandArbiter {
    table: InterceptionTable,
    in_flight: BTreeSet<EditorCommand>,
    properties_focus: bool,
}

impl CommandArbiter {
    /// Creates an arbiter with the standard interception rules
    pub fn new() -> Self {
        Self::with_table(InterceptionTable::standard())
    }

    pub fn with_table(table: InterceptionTable) -> Self {
        Self {
            table,
            in_flight: BTreeSet::new(),
            properties_focus: false,
        }
    }

    /// Routes one invocation of `command`
    pub fn route(
        &mut self,
        command: EditorCommand,
        focus: &PanelFocusTracker,
        panels: &PanelRegistry,
    ) -> Route {
        if self.in_flight.contains(&command) {
            tracing::debug!(%command, "Default already running, passing through");
            return Route::PassThrough;
        }

        let Some(rule) = self.table.get(command) else {
            return Route::PassThrough;
        };

        match rule.target.resolve(focus, panels) {
            Some(panel) => {
                let route = match &rule.action {
                    ViewAction::Forward(message) => Route::Forward {
                        panel,
                        message: message.clone(),
                    },
                    ViewAction::Paste => Route::Paste {
                        panel,
                        target: self.paste_target(),
                    },
                    ViewAction::Swallow => Route::Swallow { panel },
                };
                tracing::debug!(%command, %panel, "Command routed to view");
                route
            }
            None => {
                self.in_flight.insert(command);
                tracing::debug!(%command, "Command executed outside of the diagram editor");
                Route::RunDefault
            }
        }
    }

    /// Marks a command's platform default as finished
    ///
    /// Returns `false` if the command was not in flight.
    pub fn complete_default(&mut self, command: EditorCommand) -> bool {
        self.in_flight.remove(&command)
    }

    pub fn is_in_flight(&self, command: EditorCommand) -> bool {
        self.in_flight.contains(&command)
    }

    /// Records whether the view's properties input holds focus
    pub fn set_properties_focus(&mut self, focused: bool) {
        self.properties_focus = focused;
    }

    pub fn properties_focus(&self) -> bool {
        self.properties_focus
    }

    fn paste_target(&self) -> PasteTarget {
        if self.properties_focus {
            PasteTarget::Properties
        } else {
            PasteTarget::Canvas
        }
    }
}

impl Default for CommandArbiter {
    fn default() -> Self {
        Self::new()
    }
}
