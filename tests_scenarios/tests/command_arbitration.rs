//! Command Arbitration Tests
//!
//! Validates which of copy, cut, paste, select-all and zoom reach a diagram
//! view and which fall back to the host's default implementation.

use host_api::{EditorCommand, HostEvent};
use ipc::{HostMessage, PasteTarget, ViewMessage};
use services_diagram_editor::{Dispatch, EditorError};
use tests_scenarios::Session;

fn properties_focus(focused: bool) -> ViewMessage {
    ViewMessage::PropertiesFocus {
        text: focused.to_string(),
    }
}

/// Test: copy with no diagram open runs the default and posts nothing
#[test]
fn test_copy_without_panel_runs_default() {
    let mut session = Session::new();

    assert_eq!(session.invoke(EditorCommand::Copy), Dispatch::Delegated);
    assert_eq!(session.host.default_commands(), &[EditorCommand::Copy]);
    assert!(session.host.posted().is_empty());
    assert!(session.service.arbiter().is_in_flight(EditorCommand::Copy));

    assert_eq!(session.pump(), vec![Ok(Dispatch::Consumed)]);
    assert!(!session.service.arbiter().is_in_flight(EditorCommand::Copy));
}

/// Test: re-invoking a command while its default runs passes through
#[test]
fn test_reentrant_invocation_passes_through() {
    let mut session = Session::new();

    assert_eq!(session.invoke(EditorCommand::Cut), Dispatch::Delegated);
    assert_eq!(session.invoke(EditorCommand::Cut), Dispatch::PassThrough);
    assert_eq!(session.host.default_commands(), &[EditorCommand::Cut]);

    session.pump();
    assert_eq!(session.invoke(EditorCommand::Cut), Dispatch::Delegated);
    assert_eq!(session.host.default_commands().len(), 2);
}

/// Test: copy and cut go to the focused diagram instead of the default
#[test]
fn test_copy_and_cut_forwarded_to_current() {
    let mut session = Session::new();
    let (a, _) = session.open_panel("a.uxf", "<diagram/>", true);
    session.clear_messages();

    assert_eq!(session.invoke(EditorCommand::Copy), Dispatch::Consumed);
    assert_eq!(session.invoke(EditorCommand::Cut), Dispatch::Consumed);

    assert_eq!(
        session.messages_to(a),
        vec![HostMessage::Copy, HostMessage::Cut]
    );
    assert!(session.host.default_commands().is_empty());
}

/// Test: copy still reaches a diagram that lost focus moments ago
#[test]
fn test_copy_inside_grace_window() {
    let mut session = Session::new();
    let (a, _) = session.open_panel("a.uxf", "<diagram/>", true);
    session.blur(a, false);
    session.clear_messages();

    session.advance(1000);
    assert_eq!(session.invoke(EditorCommand::Copy), Dispatch::Consumed);
    assert_eq!(session.messages_to(a), vec![HostMessage::Copy]);
}

/// Test: paste into a visible, recently focused diagram with the
/// properties input focused
#[test]
fn test_paste_into_properties() {
    let mut session = Session::new();
    let (a, _) = session.open_panel("a.uxf", "<diagram/>", true);
    session
        .view_says(a, properties_focus(true))
        .expect("Failed to set properties focus");
    session.blur(a, true);
    session.clear_messages();
    session.host.set_clipboard("<element/>");

    session.advance(1000);
    assert_eq!(session.invoke(EditorCommand::Paste), Dispatch::Consumed);
    assert!(session.messages_to(a).is_empty());
    assert_eq!(session.service.pending_request_count(), 1);

    assert_eq!(session.pump(), vec![Ok(Dispatch::Consumed)]);
    assert_eq!(
        session.messages_to(a),
        vec![HostMessage::Paste {
            text: "<element/>".to_string(),
            target: PasteTarget::Properties
        }]
    );
    assert!(session.host.default_commands().is_empty());
    assert_eq!(session.service.pending_request_count(), 0);
}

/// Test: paste lands on the canvas once the properties input loses focus
#[test]
fn test_paste_into_canvas() {
    let mut session = Session::new();
    let (a, _) = session.open_panel("a.uxf", "<diagram/>", true);
    session
        .view_says(a, properties_focus(true))
        .expect("Failed to set properties focus");
    session
        .view_says(a, properties_focus(false))
        .expect("Failed to clear properties focus");
    session.clear_messages();
    session.host.set_clipboard("text");

    session.invoke(EditorCommand::Paste);
    session.pump();
    assert_eq!(
        session.messages_to(a),
        vec![HostMessage::Paste {
            text: "text".to_string(),
            target: PasteTarget::Canvas
        }]
    );
}

/// Test: paste needs the diagram on screen
#[test]
fn test_paste_into_hidden_panel_runs_default() {
    let mut session = Session::new();
    let (a, _) = session.open_panel("a.uxf", "<diagram/>", true);
    session.blur(a, false);
    session.clear_messages();

    assert_eq!(session.invoke(EditorCommand::Paste), Dispatch::Delegated);
    assert_eq!(session.host.default_commands(), &[EditorCommand::Paste]);
    assert!(session.messages_to(a).is_empty());
}

/// Test: paste after the grace window runs the default
#[test]
fn test_paste_after_grace_window_runs_default() {
    let mut session = Session::new();
    let (a, _) = session.open_panel("a.uxf", "<diagram/>", true);
    session.blur(a, true);
    session.advance(2000);

    assert_eq!(session.invoke(EditorCommand::Paste), Dispatch::Delegated);
    assert_eq!(session.host.default_commands(), &[EditorCommand::Paste]);
}

/// Test: select-all belongs to the view only while it has focus
#[test]
fn test_select_all_requires_current_panel() {
    let mut session = Session::new();
    let (a, _) = session.open_panel("a.uxf", "<diagram/>", true);
    session.clear_messages();

    assert_eq!(session.invoke(EditorCommand::SelectAll), Dispatch::Consumed);
    assert!(session.messages_to(a).is_empty());
    assert!(session.host.default_commands().is_empty());

    session.blur(a, true);
    assert_eq!(session.invoke(EditorCommand::SelectAll), Dispatch::Delegated);
    assert_eq!(session.host.default_commands(), &[EditorCommand::SelectAll]);
}

/// Test: zoom stays inside a focused, visible view
#[test]
fn test_zoom_rules() {
    let mut session = Session::new();
    let (a, _) = session.open_panel("a.uxf", "<diagram/>", true);

    assert_eq!(session.invoke(EditorCommand::ZoomIn), Dispatch::Consumed);
    assert_eq!(session.invoke(EditorCommand::ZoomOut), Dispatch::Consumed);
    assert!(session.host.default_commands().is_empty());

    // Focused but not on screen
    session.set_view_state(a, true, false);
    assert_eq!(session.invoke(EditorCommand::ZoomIn), Dispatch::Delegated);

    session.blur(a, true);
    assert_eq!(session.invoke(EditorCommand::ZoomOut), Dispatch::Delegated);
    assert_eq!(
        session.host.default_commands(),
        &[EditorCommand::ZoomIn, EditorCommand::ZoomOut]
    );
}

/// Test: a malformed properties flag is a protocol error
#[test]
fn test_invalid_properties_flag() {
    let mut session = Session::new();
    let (a, _) = session.open_panel("a.uxf", "<diagram/>", true);

    let result = session.view_says(
        a,
        ViewMessage::PropertiesFocus {
            text: "maybe".to_string(),
        },
    );
    assert!(matches!(result, Err(EditorError::Protocol(_))));
    assert!(!session.service.arbiter().properties_focus());
}

/// Test: a completion for a command that was never delegated is ignored
#[test]
fn test_stray_default_completion() {
    let mut session = Session::new();
    assert_eq!(
        session.dispatch(HostEvent::DefaultCommandCompleted(EditorCommand::Copy)),
        Ok(Dispatch::Ignored)
    );
}
