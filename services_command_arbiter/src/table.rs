//! Per-command interception rules

use core_types::PanelId;
use host_api::EditorCommand;
use ipc::HostMessage;
use services_focus_manager::PanelFocusTracker;
use services_view_host::PanelRegistry;
use std::collections::BTreeMap;

/// Which panel, if any, may receive a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetRule {
    /// The current panel, else the last active one
    Effective,
    /// Like `Effective`, but the panel must be on screen
    EffectiveVisible,
    /// Only the panel with input focus
    Current,
    /// The panel with input focus, if it is on screen
    CurrentVisible,
}

impl TargetRule {
    /// Picks the target panel under this rule
    pub fn resolve(&self, focus: &PanelFocusTracker, panels: &PanelRegistry) -> Option<PanelId> {
        match self {
            TargetRule::Effective => focus.effective_panel(),
            TargetRule::EffectiveVisible => focus
                .effective_panel()
                .filter(|&panel| panels.is_visible(panel)),
            TargetRule::Current => focus.current(),
            TargetRule::CurrentVisible => {
                focus.current().filter(|&panel| panels.is_visible(panel))
            }
        }
    }
}

/// What the view does with a command routed to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction {
    /// Post this message
    Forward(HostMessage),
    /// Read the clipboard and post a `paste`
    Paste,
    /// Nothing; the view already handles the key itself
    Swallow,
}

/// Rule for one intercepted command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interception {
    pub target: TargetRule,
    pub action: ViewAction,
}

impl Interception {
    pub fn new(target: TargetRule, action: ViewAction) -> Self {
        Self { target, action }
    }
}

/// Interception rules keyed by command
#[derive(Debug, Clone, Default)]
pub struct InterceptionTable {
    rules: BTreeMap<EditorCommand, Interception>,
}

impl InterceptionTable {
    /// Creates an empty table (nothing intercepted)
    pub fn new() -> Self {
        Self::default()
    }

    /// The rules of the diagram editor
    pub fn standard() -> Self {
        let mut table = Self::new();
        table.insert(
            EditorCommand::Copy,
            Interception::new(TargetRule::Effective, ViewAction::Forward(HostMessage::Copy)),
        );
        table.insert(
            EditorCommand::Cut,
            Interception::new(TargetRule::Effective, ViewAction::Forward(HostMessage::Cut)),
        );
        table.insert(
            EditorCommand::Paste,
            Interception::new(TargetRule::EffectiveVisible, ViewAction::Paste),
        );
        table.insert(
            EditorCommand::SelectAll,
            Interception::new(TargetRule::Current, ViewAction::Swallow),
        );
        for zoom in [EditorCommand::ZoomIn, EditorCommand::ZoomOut] {
            table.insert(
                zoom,
                Interception::new(TargetRule::CurrentVisible, ViewAction::Swallow),
            );
        }
        table
    }

    /// Adds or replaces a rule
    pub fn insert(&mut self, command: EditorCommand, rule: Interception) -> Option<Interception> {
        self.rules.insert(command, rule)
    }

    pub fn get(&self, command: EditorCommand) -> Option<&Interception> {
        self.rules.get(&command)
    }

    /// Commands with a rule, in a stable order
    pub fn commands(&self) -> impl Iterator<Item = EditorCommand> + '_ {
        self.rules.keys().copied()
    }
}
