//! Message types for both directions of the host/view channel

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where pasted text should land inside the view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasteTarget {
    /// The main diagram canvas
    Canvas,
    /// The properties input embedded in the view
    Properties,
}

/// Diagram export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Diagram source text
    Uxf,
    /// Rendered image
    Png,
    /// Rendered document
    Pdf,
}

impl ExportFormat {
    /// File extension used in save dialogs
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Uxf => "uxf",
            ExportFormat::Png => "png",
            ExportFormat::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Messages posted by the host into a view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command")]
pub enum HostMessage {
    /// Replace the view's document state with the host document text
    #[serde(rename = "myUpdate")]
    MyUpdate { text: String },
    /// Set the view's log verbosity threshold (`null` when unconfigured)
    #[serde(rename = "debugLevel")]
    DebugLevel { text: Option<i64> },
    /// Re-render with a new theme
    #[serde(rename = "themeSetting")]
    ThemeSetting { text: String },
    /// Apply custom font data (joined font descriptors)
    #[serde(rename = "changeFont")]
    ChangeFont { text: String },
    /// Copy the view's current selection
    #[serde(rename = "copy")]
    Copy,
    /// Cut the view's current selection
    #[serde(rename = "cut")]
    Cut,
    /// Paste clipboard text into the view
    #[serde(rename = "paste")]
    Paste { text: String, target: PasteTarget },
    /// Answer to a `requestPasteClipboard` message
    #[serde(rename = "paste-response")]
    PasteResponse { text: String },
    /// Ask the view to start an export in the given format
    #[serde(rename = "requestExport")]
    RequestExport { text: ExportFormat },
}

impl HostMessage {
    /// The wire discriminator of this message
    pub fn command(&self) -> &'static str {
        match self {
            HostMessage::MyUpdate { .. } => "myUpdate",
            HostMessage::DebugLevel { .. } => "debugLevel",
            HostMessage::ThemeSetting { .. } => "themeSetting",
            HostMessage::ChangeFont { .. } => "changeFont",
            HostMessage::Copy => "copy",
            HostMessage::Cut => "cut",
            HostMessage::Paste { .. } => "paste",
            HostMessage::PasteResponse { .. } => "paste-response",
            HostMessage::RequestExport { .. } => "requestExport",
        }
    }
}

/// Messages posted by a view to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command")]
pub enum ViewMessage {
    /// Save the diagram source through a save dialog
    #[serde(rename = "exportUxf")]
    ExportUxf { text: String },
    /// The view's diagram changed; sync it into the host document
    #[serde(rename = "updateFiledataUxf")]
    UpdateFiledataUxf { text: String },
    /// Save a rendered PNG (base64 data URI)
    #[serde(rename = "exportPng")]
    ExportPng { text: String },
    /// Save a rendered PDF (base64 data URI)
    #[serde(rename = "exportPdf")]
    ExportPdf { text: String },
    /// Forward a log line to the host's output
    #[serde(rename = "postLog")]
    PostLog { text: String },
    /// Write text to the system clipboard
    #[serde(rename = "setClipboard")]
    SetClipboard { text: String },
    /// Read the system clipboard and answer with `paste-response`
    #[serde(rename = "requestPasteClipboard")]
    RequestPasteClipboard,
    /// The properties input gained or lost focus (stringified boolean)
    #[serde(rename = "propertiesFocus")]
    PropertiesFocus { text: String },
    /// Any command the host does not act on
    #[serde(other)]
    Unsupported,
}

impl ViewMessage {
    /// The wire discriminator of this message
    pub fn command(&self) -> &'static str {
        match self {
            ViewMessage::ExportUxf { .. } => "exportUxf",
            ViewMessage::UpdateFiledataUxf { .. } => "updateFiledataUxf",
            ViewMessage::ExportPng { .. } => "exportPng",
            ViewMessage::ExportPdf { .. } => "exportPdf",
            ViewMessage::PostLog { .. } => "postLog",
            ViewMessage::SetClipboard { .. } => "setClipboard",
            ViewMessage::RequestPasteClipboard => "requestPasteClipboard",
            ViewMessage::PropertiesFocus { .. } => "propertiesFocus",
            ViewMessage::Unsupported => "unsupported",
        }
    }
}
