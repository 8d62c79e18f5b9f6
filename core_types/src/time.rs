//! Virtual time
//!
//! The host stamps every event it delivers with an [`Instant`]. Nothing in
//! the bridge reads a wall clock, so tests move time forward explicitly.

use core::ops::{Add, Sub};
use serde::{Deserialize, Serialize};

/// A point in time
///
/// Opaque nanoseconds since an arbitrary epoch chosen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Instant {
    nanos: u64,
}

impl Instant {
    /// The epoch
    pub const ZERO: Instant = Instant { nanos: 0 };

    /// Creates an instant from nanoseconds
    pub const fn from_nanos(nanos: u64) -> Self {
        Self { nanos }
    }

    /// Creates an instant from milliseconds since the epoch
    pub const fn from_millis(millis: u64) -> Self {
        Self {
            nanos: millis * 1_000_000,
        }
    }

    /// Returns nanoseconds since epoch
    pub const fn as_nanos(&self) -> u64 {
        self.nanos
    }
}

impl Add<Duration> for Instant {
    type Output = Instant;

    fn add(self, duration: Duration) -> Self::Output {
        Instant::from_nanos(self.nanos.saturating_add(duration.as_nanos()))
    }
}

/// A duration of time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Duration {
    nanos: u64,
}

impl Duration {
    /// Creates a duration from nanoseconds
    pub const fn from_nanos(nanos: u64) -> Self {
        Self { nanos }
    }

    /// Creates a duration from milliseconds
    pub const fn from_millis(millis: u64) -> Self {
        Self {
            nanos: millis * 1_000_000,
        }
    }

    /// Returns the duration in nanoseconds
    pub const fn as_nanos(&self) -> u64 {
        self.nanos
    }
}

impl Add for Duration {
    type Output = Duration;

    fn add(self, other: Duration) -> Self::Output {
        Duration::from_nanos(self.nanos.saturating_add(other.nanos))
    }
}

impl Sub for Duration {
    type Output = Duration;

    fn sub(self, other: Duration) -> Self::Output {
        Duration::from_nanos(self.nanos.saturating_sub(other.nanos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_creation() {
        assert_eq!(Duration::from_millis(1), Duration::from_nanos(1_000_000));
    }

    #[test]
    fn test_duration_arithmetic() {
        let d1 = Duration::from_millis(1500);
        let d2 = Duration::from_millis(1000);

        assert_eq!(d1 + d2, Duration::from_millis(2500));
        assert_eq!(d1 - d2, Duration::from_millis(500));
        assert_eq!(d2 - d1, Duration::from_nanos(0));
    }

    #[test]
    fn test_instant_ordering() {
        assert!(Instant::from_millis(2) > Instant::from_millis(1));
        assert_eq!(Instant::ZERO, Instant::from_nanos(0));
    }

    #[test]
    fn test_instant_arithmetic() {
        let t = Instant::from_millis(1000);
        let grace = Duration::from_millis(1500);

        assert_eq!(t + grace, Instant::from_millis(2500));
        assert_eq!((t + grace).as_nanos(), 2_500_000_000);
        assert_eq!(
            Instant::from_nanos(u64::MAX) + grace,
            Instant::from_nanos(u64::MAX)
        );
    }
}
