//! # Host API
//!
//! This crate defines the interface between the diagram editor bridge and
//! the host editor that embeds it.
//!
//! ## Philosophy
//!
//! The host provides **mechanisms**, the bridge decides **policy**:
//! - Document storage and whole-document edits
//! - Posting messages into embedded views
//! - Clipboard, save dialogs and file writes
//! - The platform's default command implementations
//!
//! ## Design Goals
//!
//! 1. **Testability**: the entire API can be simulated in-process
//! 2. **Explicit time**: every event arrives with an [`Instant`](core_types::Instant)
//!    supplied by the caller
//! 3. **No hidden suspension**: an operation that completes later is a
//!    request call here plus a [`HostEvent`] completion, correlated by
//!    [`RequestId`](core_types::RequestId)

pub mod command;
pub mod error;
pub mod event;
pub mod host;

pub use command::EditorCommand;
pub use error::HostError;
pub use event::HostEvent;
pub use host::{HostApi, SaveFilter};
