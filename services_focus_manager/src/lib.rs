//! # Focus Manager Service
//!
//! Tracks which diagram panel owns keyboard commands.
//!
//! ## Philosophy
//!
//! - **Explicit focus**: focus changes only through host-reported events
//! - **Grace window**: a panel that just lost focus keeps receiving
//!   commands for [`GRACE_WINDOW`], so menu clicks still reach it
//! - **Inert expiry**: expiry timers are never cancelled; each carries a
//!   generation and does nothing once superseded
//! - **Auditable**: all focus changes are logged for audit
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A window manager (no Z-order, no geometry)
//! - A timer: the caller schedules [`ExpiryTicket`]s and hands them back

use core_types::{Duration, Instant, PanelId};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// How long a blurred panel stays the command target
pub const GRACE_WINDOW: Duration = Duration::from_millis(1500);

/// Number of focus events kept in the audit trail; older ones are dropped
pub const AUDIT_TRAIL_CAPACITY: usize = 256;

/// Focus event for audit trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FocusEvent {
    /// A panel became active
    Granted { panel: PanelId, at: Instant },
    /// The current panel lost focus; its grace window started
    Released { panel: PanelId, at: Instant },
    /// A grace window ran out and the last active panel was cleared
    Expired { panel: PanelId, at: Instant },
    /// A grace window ran out but a newer focus event superseded it
    ExpirySkipped { panel: PanelId, at: Instant },
    /// A closed panel was dropped from every focus slot
    Forgotten { panel: PanelId },
}

/// Deferred reset of the last active panel
///
/// Issued by [`PanelFocusTracker::focus_lost`]; the caller hands it back to
/// [`PanelFocusTracker::expire`] once `due` has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryTicket {
    pub panel: PanelId,
    /// Focus generation at the moment focus was lost
    pub generation: u64,
    pub due: Instant,
}

/// Panel focus tracker
///
/// Holds three slots:
/// - `current`: the panel with input focus right now
/// - `last_active`: the most recent current panel, kept for the grace
///   window after it lost focus
/// - `export_target`: the most recent current panel, never expires
#[derive(Debug, Default)]
pub struct PanelFocusTracker {
    current: Option<PanelId>,
    last_active: Option<PanelId>,
    export_target: Option<PanelId>,
    /// Bumped on every gain and loss
    generation: u64,
    audit_trail: VecDeque<FocusEvent>,
}

impl PanelFocusTracker {
    /// Creates a tracker with no focused panel
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `panel` became active
    pub fn focus_gained(&mut self, panel: PanelId, now: Instant) {
        self.generation += 1;
        self.current = Some(panel);
        self.last_active = Some(panel);
        self.export_target = Some(panel);
        self.record(FocusEvent::Granted { panel, at: now });
        tracing::debug!(%panel, "Panel focused");
    }

    /// Records that `panel` lost focus
    ///
    /// Only the current panel can lose focus; blur reports for any other
    /// panel are ignored and return `None`.
    pub fn focus_lost(&mut self, panel: PanelId, now: Instant) -> Option<ExpiryTicket> {
        if self.current != Some(panel) {
            tracing::debug!(%panel, "Blur ignored, another panel is current");
            return None;
        }

        self.generation += 1;
        self.current = None;
        self.record(FocusEvent::Released { panel, at: now });
        tracing::debug!(%panel, "Panel blurred, grace window started");

        Some(ExpiryTicket {
            panel,
            generation: self.generation,
            due: now + GRACE_WINDOW,
        })
    }

    /// Applies a due expiry ticket, returning whether `last_active` was cleared
    pub fn expire(&mut self, ticket: ExpiryTicket, now: Instant) -> bool {
        let still_relevant = ticket.generation == self.generation
            && self.current.is_none()
            && self.last_active == Some(ticket.panel);

        if still_relevant {
            self.last_active = None;
            self.record(FocusEvent::Expired {
                panel: ticket.panel,
                at: now,
            });
            tracing::debug!(panel = %ticket.panel, "Grace window elapsed, last active panel reset");
        } else {
            self.record(FocusEvent::ExpirySkipped {
                panel: ticket.panel,
                at: now,
            });
            tracing::debug!(panel = %ticket.panel, "Grace window superseded, last active panel kept");
        }
        still_relevant
    }

    /// Drops every reference to a closed panel
    pub fn forget_panel(&mut self, panel: PanelId) {
        let mut forgotten = false;
        for slot in [
            &mut self.current,
            &mut self.last_active,
            &mut self.export_target,
        ] {
            if *slot == Some(panel) {
                *slot = None;
                forgotten = true;
            }
        }
        if forgotten {
            self.generation += 1;
            self.record(FocusEvent::Forgotten { panel });
        }
    }

    /// The panel with input focus
    pub fn current(&self) -> Option<PanelId> {
        self.current
    }

    /// The panel that last had focus, while its grace window lasts
    pub fn last_active(&self) -> Option<PanelId> {
        self.last_active
    }

    /// Command target: the current panel, else the last active one
    pub fn effective_panel(&self) -> Option<PanelId> {
        self.current.or(self.last_active)
    }

    /// Export target: the most recently focused panel, without expiry
    pub fn export_panel(&self) -> Option<PanelId> {
        self.export_target
    }

    pub fn is_current(&self, panel: PanelId) -> bool {
        self.current == Some(panel)
    }

    /// Returns the most recent focus events, oldest first
    pub fn audit_trail(&self) -> &VecDeque<FocusEvent> {
        &self.audit_trail
    }

    fn record(&mut self, event: FocusEvent) {
        if self.audit_trail.len() == AUDIT_TRAIL_CAPACITY {
            self.audit_trail.pop_front();
        }
        self.audit_trail.push_back(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn test_initial_state() {
        let tracker = PanelFocusTracker::new();
        assert_eq!(tracker.current(), None);
        assert_eq!(tracker.effective_panel(), None);
        assert_eq!(tracker.export_panel(), None);
        assert!(tracker.audit_trail().is_empty());
    }

    #[test]
    fn test_focus_gained_sets_all_slots() {
        let mut tracker = PanelFocusTracker::new();
        let a = PanelId::new();
        tracker.focus_gained(a, at(0));

        assert_eq!(tracker.current(), Some(a));
        assert_eq!(tracker.last_active(), Some(a));
        assert_eq!(tracker.export_panel(), Some(a));
        assert!(tracker.is_current(a));
    }

    #[test]
    fn test_focus_lost_starts_grace_window() {
        let mut tracker = PanelFocusTracker::new();
        let a = PanelId::new();
        tracker.focus_gained(a, at(0));

        let ticket = tracker.focus_lost(a, at(100)).unwrap();
        assert_eq!(ticket.panel, a);
        assert_eq!(ticket.due, at(1600));
        assert_eq!(tracker.current(), None);
        assert_eq!(tracker.effective_panel(), Some(a));
    }

    #[test]
    fn test_blur_of_non_current_panel_ignored() {
        let mut tracker = PanelFocusTracker::new();
        let a = PanelId::new();
        let b = PanelId::new();
        tracker.focus_gained(a, at(0));
        tracker.focus_gained(b, at(10));

        assert_eq!(tracker.focus_lost(a, at(20)), None);
        assert_eq!(tracker.current(), Some(b));
    }

    #[test]
    fn test_expiry_clears_last_active() {
        let mut tracker = PanelFocusTracker::new();
        let a = PanelId::new();
        tracker.focus_gained(a, at(0));
        let ticket = tracker.focus_lost(a, at(0)).unwrap();

        assert!(tracker.expire(ticket, at(1500)));
        assert_eq!(tracker.effective_panel(), None);
        // Export target survives the grace window.
        assert_eq!(tracker.export_panel(), Some(a));
        assert!(matches!(
            tracker.audit_trail().back(),
            Some(FocusEvent::Expired { .. })
        ));
    }

    #[test]
    fn test_regain_inside_window_makes_expiry_inert() {
        let mut tracker = PanelFocusTracker::new();
        let a = PanelId::new();
        tracker.focus_gained(a, at(0));
        let ticket = tracker.focus_lost(a, at(0)).unwrap();
        tracker.focus_gained(a, at(1000));

        assert!(!tracker.expire(ticket, at(1500)));
        assert_eq!(tracker.last_active(), Some(a));
        assert_eq!(tracker.current(), Some(a));
    }

    #[test]
    fn test_stale_ticket_after_second_blur() {
        // Lose at 0, regain at 1000, lose again at 1200: the first ticket
        // must not cut the second grace window short.
        let mut tracker = PanelFocusTracker::new();
        let a = PanelId::new();
        tracker.focus_gained(a, at(0));
        let first = tracker.focus_lost(a, at(0)).unwrap();
        tracker.focus_gained(a, at(1000));
        let second = tracker.focus_lost(a, at(1200)).unwrap();

        assert!(!tracker.expire(first, at(1500)));
        assert_eq!(tracker.effective_panel(), Some(a));

        assert!(tracker.expire(second, at(2700)));
        assert_eq!(tracker.effective_panel(), None);
    }

    #[test]
    fn test_other_panel_focus_supersedes_expiry() {
        let mut tracker = PanelFocusTracker::new();
        let a = PanelId::new();
        let b = PanelId::new();
        tracker.focus_gained(a, at(0));
        let ticket = tracker.focus_lost(a, at(0)).unwrap();
        tracker.focus_gained(b, at(500));

        assert!(!tracker.expire(ticket, at(1500)));
        assert_eq!(tracker.last_active(), Some(b));
        assert_eq!(tracker.export_panel(), Some(b));
    }

    #[test]
    fn test_forget_panel_clears_references() {
        let mut tracker = PanelFocusTracker::new();
        let a = PanelId::new();
        let b = PanelId::new();
        tracker.focus_gained(a, at(0));
        let ticket = tracker.focus_lost(a, at(10)).unwrap();

        tracker.forget_panel(a);
        assert_eq!(tracker.effective_panel(), None);
        assert_eq!(tracker.export_panel(), None);
        assert!(!tracker.expire(ticket, at(1510)));

        tracker.focus_gained(b, at(2000));
        tracker.forget_panel(a);
        assert_eq!(tracker.current(), Some(b));
    }

    #[test]
    fn test_audit_trail_records_transitions() {
        let mut tracker = PanelFocusTracker::new();
        let a = PanelId::new();
        tracker.focus_gained(a, at(0));
        let ticket = tracker.focus_lost(a, at(5)).unwrap();
        tracker.focus_gained(a, at(6));
        tracker.expire(ticket, at(1505));

        assert_eq!(
            *tracker.audit_trail(),
            [
                FocusEvent::Granted { panel: a, at: at(0) },
                FocusEvent::Released { panel: a, at: at(5) },
                FocusEvent::Granted { panel: a, at: at(6) },
                FocusEvent::ExpirySkipped {
                    panel: a,
                    at: at(1505)
                },
            ]
        );

        let json = serde_json::to_string(tracker.audit_trail()).unwrap();
        assert!(json.contains("ExpirySkipped"));
    }

    #[test]
    fn test_audit_trail_is_bounded() {
        let mut tracker = PanelFocusTracker::new();
        let a = PanelId::new();
        for cycle in 0..1000u64 {
            let start = cycle * 3000;
            tracker.focus_gained(a, at(start));
            let ticket = tracker.focus_lost(a, at(start + 10)).unwrap();
            tracker.expire(ticket, at(start + 2000));
        }

        assert_eq!(tracker.audit_trail().len(), AUDIT_TRAIL_CAPACITY);
        assert_eq!(
            tracker.audit_trail().back(),
            Some(&FocusEvent::Expired {
                panel: a,
                at: at(999 * 3000 + 2000)
            })
        );
    }
}
