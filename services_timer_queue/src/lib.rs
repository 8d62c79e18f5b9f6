//! # Timer Queue Service
//!
//! A deterministic queue of deferred work keyed by virtual deadlines.
//!
//! ## Philosophy
//!
//! - **Deterministic**: timers fire only when the owner drains the queue
//!   with an explicit `now`; there are no hidden threads
//! - **Fire-and-forget**: timers are never cancelled; a payload that is no
//!   longer relevant must be made inert by whoever handles it
//! - **Stable order**: timers due at the same instant fire in scheduling order
//!
//! ## Example
//!
//! ```ignore
//! use core_types::{Duration, Instant};
//! use services_timer_queue::TimerQueue;
//!
//! let mut timers = TimerQueue::new();
//! timers.schedule(Instant::ZERO + Duration::from_millis(1500), "expire");
//!
//! assert!(timers.drain_due(Instant::from_millis(1000)).is_empty());
//! assert_eq!(timers.drain_due(Instant::from_millis(1500)).len(), 1);
//! ```

use core_types::Instant;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timer identifier, unique within one queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerId(u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer:{}", self.0)
    }
}

/// A timer that has come due
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiredTimer<T> {
    pub id: TimerId,
    pub due: Instant,
    pub payload: T,
}

#[derive(Debug)]
struct Scheduled<T> {
    id: TimerId,
    due: Instant,
    payload: T,
}

/// Deadline-ordered queue of pending timers
#[derive(Debug)]
pub struct TimerQueue<T> {
    pending: Vec<Scheduled<T>>,
    next_id: u64,
}

impl<T> TimerQueue<T> {
    /// Creates an empty queue
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_id: 0,
        }
    }

    /// Schedules `payload` to fire at `due`
    pub fn schedule(&mut self, due: Instant, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;

        // Insert after every timer with the same or an earlier deadline.
        let index = self.pending.partition_point(|timer| timer.due <= due);
        self.pending.insert(index, Scheduled { id, due, payload });
        id
    }

    /// Removes and returns every timer due at or before `now`, in firing order
    pub fn drain_due(&mut self, now: Instant) -> Vec<FiredTimer<T>> {
        let count = self.pending.partition_point(|timer| timer.due <= now);
        self.pending
            .drain(..count)
            .map(|timer| FiredTimer {
                id: timer.id,
                due: timer.due,
                payload: timer.payload,
            })
            .collect()
    }

    /// Deadline of the next timer to fire
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.first().map(|timer| timer.due)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
