//! Document Synchronization Tests
//!
//! Validates both directions of the host document <-> view protocol and the
//! loopback guard between them.

use host_api::HostEvent;
use ipc::{HostMessage, ViewMessage};
use services_diagram_editor::{Dispatch, EditorError};
use sim_host::fault_injection::HostFault;
use tests_scenarios::Session;

fn update(text: &str) -> ViewMessage {
    ViewMessage::UpdateFiledataUxf {
        text: text.to_string(),
    }
}

/// Test: an external edit is pushed to the view with the full text
#[test]
fn test_external_edit_is_pushed() {
    let mut session = Session::new();
    let (a, uri) = session.open_panel("a.uxf", "<diagram/>", true);
    session.clear_messages();

    session.host.edit_externally(&uri, "<diagram>external</diagram>");
    let results = session.pump();
    assert_eq!(results, vec![Ok(Dispatch::Consumed)]);

    assert_eq!(
        session.messages_to(a),
        vec![HostMessage::MyUpdate {
            text: "<diagram>external</diagram>".to_string()
        }]
    );
}

/// Test: pushing T to the view and receiving T back does not edit
#[test]
fn test_round_trip_is_idempotent() {
    let mut session = Session::new();
    let (a, uri) = session.open_panel("a.uxf", "T", true);

    session
        .view_says(a, update("T"))
        .expect("Failed to handle update");
    assert!(session.host.edits().is_empty());
    assert_eq!(session.host.pending_event_count(), 0);
    assert_eq!(session.service.pending_loopback(), None);
    assert_eq!(session.host.document(&uri), Some("T"));
}

/// Test: a view edit suppresses its own echo exactly once
#[test]
fn test_loopback_suppressed_once() {
    let mut session = Session::new();
    let (a, uri) = session.open_panel("a.uxf", "v1", true);
    session.clear_messages();

    session
        .view_says(a, update("v2"))
        .expect("Failed to handle update");
    assert_eq!(session.host.edits(), &[(uri.clone(), "v2".to_string())]);

    assert_eq!(session.pump(), vec![Ok(Dispatch::Suppressed)]);
    assert!(session.messages_to(a).is_empty());

    session.host.edit_externally(&uri, "v3");
    assert_eq!(session.pump(), vec![Ok(Dispatch::Consumed)]);
    assert_eq!(
        session.messages_to(a),
        vec![HostMessage::MyUpdate {
            text: "v3".to_string()
        }]
    );
}

/// Test: a change to another document never consumes the guard
#[test]
fn test_unrelated_document_keeps_guard() {
    let mut session = Session::new();
    let (b, other) = session.open_panel("b.uxf", "b1", false);
    let (a, uri) = session.open_panel("a.uxf", "a1", true);

    session
        .view_says(a, update("a2"))
        .expect("Failed to handle update");
    let echo = session.host.discard_events();

    session.host.edit_externally(&other, "b2");
    assert_eq!(session.pump(), vec![Ok(Dispatch::Consumed)]);
    assert_eq!(
        session.messages_to(b).last(),
        Some(&HostMessage::MyUpdate {
            text: "b2".to_string()
        })
    );
    assert_eq!(session.service.pending_loopback(), Some(&uri));

    for event in echo {
        assert_eq!(session.dispatch(event), Ok(Dispatch::Suppressed));
    }
    assert_eq!(session.service.pending_loopback(), None);
}

/// Test: a dirty-flag notification is never forwarded
#[test]
fn test_empty_change_not_forwarded() {
    let mut session = Session::new();
    let (a, uri) = session.open_panel("a.uxf", "<diagram/>", true);
    session.clear_messages();

    session.host.touch_document(&uri);
    assert_eq!(session.pump(), vec![Ok(Dispatch::Suppressed)]);
    assert!(session.messages_to(a).is_empty());
}

/// Test: the echo reaches an unfocused view of the same document
#[test]
fn test_split_view_receives_echo() {
    let mut session = Session::new();
    let (a, uri) = session.open_panel("a.uxf", "v1", true);
    let split = session.open_panel_for(&uri, false);
    session.focus(a);
    session.clear_messages();

    session
        .view_says(a, update("v2"))
        .expect("Failed to handle update");
    assert_eq!(session.pump(), vec![Ok(Dispatch::Consumed)]);

    assert!(session.messages_to(a).is_empty());
    assert_eq!(
        session.messages_to(split),
        vec![HostMessage::MyUpdate {
            text: "v2".to_string()
        }]
    );
}

/// Test: a rejected edit is surfaced and the guard stays armed
#[test]
fn test_rejected_edit_surfaced() {
    let mut session = Session::new();
    session
        .host
        .inject_fault(HostFault::RejectEdits { count: 1 });
    let (a, uri) = session.open_panel("a.uxf", "v1", true);

    let result = session.view_says(a, update("v2"));
    assert!(matches!(result, Err(EditorError::Sync(_))));
    assert_eq!(session.host.document(&uri), Some("v1"));
    assert_eq!(session.service.pending_loopback(), Some(&uri));
    assert!(session.output_contains("Could not apply view edit"));

    // The next view update succeeds and its echo consumes the guard.
    session
        .view_says(a, update("v2"))
        .expect("Failed to handle update");
    assert_eq!(session.pump(), vec![Ok(Dispatch::Suppressed)]);
}

/// Test: changes to documents without a panel are ignored
#[test]
fn test_change_without_panel_ignored() {
    let mut session = Session::new();
    let result = session.dispatch(HostEvent::DocumentChanged {
        uri: "file:///workspace/notes.txt".into(),
        content_changes: 3,
    });
    assert_eq!(result, Ok(Dispatch::Ignored));
}

/// Test: a disposed view does not keep the other views of its document stale
#[test]
fn test_disposed_panel_does_not_block_others() {
    let mut session = Session::new();
    let (stale, uri) = session.open_panel("a.uxf", "v1", false);
    let live = session.open_panel_for(&uri, true);
    session.host.dispose_panel(stale);
    session.clear_messages();

    session.host.edit_externally(&uri, "v2");
    let results = session.pump();

    assert!(matches!(results.as_slice(), [Err(EditorError::Sync(_))]));
    assert_eq!(
        session.messages_to(live),
        vec![HostMessage::MyUpdate {
            text: "v2".to_string()
        }]
    );
}

/// Test: the focused view consumes its echo even when an earlier view of
/// the same document fails
#[test]
fn test_disposed_panel_does_not_strand_guard() {
    let mut session = Session::new();
    let (stale, uri) = session.open_panel("a.uxf", "v1", false);
    let live = session.open_panel_for(&uri, true);
    session.host.dispose_panel(stale);

    session
        .view_says(live, update("v2"))
        .expect("Failed to handle update");
    let results = session.pump();
    assert!(matches!(results.as_slice(), [Err(EditorError::Sync(_))]));
    assert_eq!(session.service.pending_loopback(), None);

    session.clear_messages();
    session.host.edit_externally(&uri, "v3");
    session.pump();
    assert_eq!(
        session.messages_to(live),
        vec![HostMessage::MyUpdate {
            text: "v3".to_string()
        }]
    );
}
