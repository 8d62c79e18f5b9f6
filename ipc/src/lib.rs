//! # Host <-> View Messages
//!
//! This crate defines the messages exchanged between the host editor and the
//! embedded diagram view.
//!
//! ## Philosophy
//!
//! - **Messages, not shared memory**: the view runs in a sandbox; everything
//!   crosses the boundary as a message
//! - **Typed, not stringly-typed**: each `command` discriminator maps to an
//!   enum variant with a typed payload
//! - **Tolerant reader**: commands the host does not act on decode to
//!   [`ViewMessage::Unsupported`] instead of failing
//!
//! ## Wire Shape
//!
//! Every message is a JSON object with a `command` discriminator and, for
//! most commands, a `text` payload:
//!
//! ```json
//! { "command": "myUpdate", "text": "<diagram>...</diagram>" }
//! ```

pub mod codec;
pub mod message;

pub use codec::{parse_flag, ProtocolError};
pub use message::{ExportFormat, HostMessage, PasteTarget, ViewMessage};
