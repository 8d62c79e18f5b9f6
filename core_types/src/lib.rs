//! # Core Types
//!
//! This crate defines the fundamental types shared by every part of the
//! diagram editor bridge.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: Panels and documents are typed identifiers,
//!   never bare strings that can be confused with each other.
//! - **Virtual time**: Every timestamp is supplied by the host, so focus
//!   expiry and other deferred work is reproducible under test.
//!
//! ## Key Types
//!
//! - [`PanelId`]: Handle to one embedded-view instance
//! - [`DocumentUri`]: Identity of a host text document
//! - [`RequestId`]: Correlates an asynchronous host operation with its completion
//! - [`Instant`] / [`Duration`]: Virtual, monotonic time

pub mod ids;
pub mod time;

pub use ids::{DocumentUri, PanelId, RequestId};
pub use time::{Duration, Instant};
