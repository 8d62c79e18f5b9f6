//! Custom font payloads
//!
//! Each configured font file is sniffed by its leading bytes and shipped to
//! the view as `<kind>@<base64>` inside a `<slot>@<payload>` descriptor.

use crate::DiagramSettings;
use base64::Engine;
use std::fmt;
use std::path::Path;

/// TrueType files start with the sfnt version 1.0
const TTF_SIGNATURE: [u8; 5] = [0, 1, 0, 0, 0];
/// OpenType/CFF files start with "OTTO"
const OTF_SIGNATURE: [u8; 5] = [79, 84, 84, 79, 0];

/// Font style slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontSlot {
    Normal,
    Italic,
    Bold,
}

impl FontSlot {
    /// Every slot, in the order descriptors are emitted
    pub const ALL: [FontSlot; 3] = [FontSlot::Normal, FontSlot::Italic, FontSlot::Bold];

    /// Wire name of the slot
    pub fn name(&self) -> &'static str {
        match self {
            FontSlot::Normal => "normal",
            FontSlot::Italic => "italic",
            FontSlot::Bold => "bold",
        }
    }
}

impl fmt::Display for FontSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Recognized font container formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontKind {
    Ttf,
    Otf,
}

impl FontKind {
    pub fn tag(&self) -> &'static str {
        match self {
            FontKind::Ttf => "ttf",
            FontKind::Otf => "otf",
        }
    }
}

/// Identifies a font file by its signature
pub fn detect_font_kind(bytes: &[u8]) -> Option<FontKind> {
    let head = bytes.get(..TTF_SIGNATURE.len())?;
    if head == TTF_SIGNATURE {
        Some(FontKind::Ttf)
    } else if head == OTF_SIGNATURE {
        Some(FontKind::Otf)
    } else {
        None
    }
}

/// Encodes font bytes as `<kind>@<base64>`, or `None` if not a font
pub fn encode_font(bytes: &[u8]) -> Option<String> {
    let kind = detect_font_kind(bytes)?;
    let data = base64::engine::general_purpose::STANDARD.encode(bytes);
    Some(format!("{}@{}", kind.tag(), data))
}

/// Builds the `<slot>@<payload>` descriptors for every slot
///
/// `read` loads a font file. Unset slots, unreadable files and files that
/// are neither TTF nor OTF produce an empty payload, so the list always has
/// one entry per slot.
pub fn font_descriptors<F, E>(settings: &DiagramSettings, mut read: F) -> Vec<String>
where
    F: FnMut(&Path) -> Result<Vec<u8>, E>,
    E: fmt::Display,
{
    FontSlot::ALL
        .iter()
        .map(|&slot| {
            let payload = settings
                .font_path(slot)
                .and_then(|path| load_payload(slot, path, &mut read))
                .unwrap_or_default();
            format!("{}@{}", slot.name(), payload)
        })
        .collect()
}

fn load_payload<F, E>(slot: FontSlot, path: &Path, read: &mut F) -> Option<String>
where
    F: FnMut(&Path) -> Result<Vec<u8>, E>,
    E: fmt::Display,
{
    let bytes = match read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(slot = slot.name(), path = %path.display(), error = %err,
                "Could not read {} font file", slot.name());
            return None;
        }
    };
    let payload = encode_font(&bytes);
    if payload.is_none() {
        tracing::warn!("Provided {} font file is neither a TTF nor a OTF file!", slot.name());
    }
    payload
}
