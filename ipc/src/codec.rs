//! JSON decoding of view messages

use crate::ViewMessage;
use thiserror::Error;

/// Errors raised while decoding or interpreting view messages
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Malformed message: {0}")]
    Malformed(String),

    #[error("Expected a boolean for {command}, got {value:?}")]
    InvalidBoolean {
        command: &'static str,
        value: String,
    },
}

impl ViewMessage {
    /// Decodes a message posted by a view
    ///
    /// Unknown commands decode to [`ViewMessage::Unsupported`]; only
    /// structurally broken input (not an object, no `command`, wrong payload
    /// type) is an error.
    pub fn from_json(json: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(json).map_err(|e| ProtocolError::Malformed(e.to_string()))
    }
}

/// Parses a stringified boolean the way the view sends it (`"true"` / `"false"`)
pub fn parse_flag(command: &'static str, text: &str) -> Result<bool, ProtocolError> {
    serde_json::from_str::<bool>(text.trim()).map_err(|_| ProtocolError::InvalidBoolean {
        command,
        value: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HostMessage, PasteTarget};

    #[test]
    fn test_host_message_to_json() {
        let json = serde_json::to_string(&HostMessage::ThemeSetting {
            text: "Dark theme".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"command":"themeSetting","text":"Dark theme"}"#);
    }

    #[test]
    fn test_view_message_from_json() {
        let msg = ViewMessage::from_json(r#"{"command":"setClipboard","text":"<element/>"}"#)
            .unwrap();
        assert_eq!(
            msg,
            ViewMessage::SetClipboard {
                text: "<element/>".to_string()
            }
        );
    }

    #[test]
    fn test_malformed_view_message() {
        assert!(matches!(
            ViewMessage::from_json("not json"),
            Err(ProtocolError::Malformed(_))
        ));
        assert!(matches!(
            ViewMessage::from_json(r#"{"text":"no command"}"#),
            Err(ProtocolError::Malformed(_))
        ));
        assert!(matches!(
            ViewMessage::from_json(r#"{"command":"postLog","text":42}"#),
            Err(ProtocolError::Malformed(_))
        ));
    }

    #[test]
    fn test_paste_message_encodes_target() {
        let json = serde_json::to_string(&HostMessage::Paste {
            text: "a".to_string(),
            target: PasteTarget::Canvas,
        })
        .unwrap();
        assert!(json.contains(r#""target":"canvas""#));
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("propertiesFocus", "true"), Ok(true));
        assert_eq!(parse_flag("propertiesFocus", " false "), Ok(false));
        assert_eq!(
            parse_flag("propertiesFocus", "yes"),
            Err(ProtocolError::InvalidBoolean {
                command: "propertiesFocus",
                value: "yes".to_string()
            })
        );
    }
}
