//! Export payload decoding

use base64::Engine;
use host_api::HostError;
use ipc::ExportFormat;
use std::path::PathBuf;
use thiserror::Error;

/// Prefix of the PNG data URI the view sends
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";
/// Prefix of the PDF data URI the view sends
pub const PDF_DATA_URI_PREFIX: &str = "data:application/octet-stream;base64,";

/// Export error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExportError {
    #[error("Invalid base64 in {format} export: {reason}")]
    InvalidBase64 {
        format: ExportFormat,
        reason: String,
    },

    #[error("Could not write {format} export to {}: {source}", .path.display())]
    Write {
        format: ExportFormat,
        path: PathBuf,
        #[source]
        source: HostError,
    },
}

/// Data URI prefix of a binary format
pub fn data_uri_prefix(format: ExportFormat) -> Option<&'static str> {
    match format {
        ExportFormat::Uxf => None,
        ExportFormat::Png => Some(PNG_DATA_URI_PREFIX),
        ExportFormat::Pdf => Some(PDF_DATA_URI_PREFIX),
    }
}

/// Turns the text a view sent into the bytes to write
///
/// Diagram source is written as-is. Binary formats arrive as base64 data
/// URIs; the prefix is optional.
pub fn decode_payload(format: ExportFormat, text: String) -> Result<Vec<u8>, ExportError> {
    let Some(prefix) = data_uri_prefix(format) else {
        return Ok(text.into_bytes());
    };

    let data = text.strip_prefix(prefix).unwrap_or(&text);
    base64::engine::general_purpose::STANDARD
        .decode(data.trim())
        .map_err(|e| ExportError::InvalidBase64 {
            format,
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uxf_is_written_verbatim() {
        let bytes = decode_payload(ExportFormat::Uxf, "<diagram/>".to_string()).unwrap();
        assert_eq!(bytes, b"<diagram/>");
    }

    #[test]
    fn test_png_prefix_is_stripped() {
        let text = format!("{}iVBORw0K", PNG_DATA_URI_PREFIX);
        let bytes = decode_payload(ExportFormat::Png, text).unwrap();
        assert_eq!(bytes, vec![0x89, b'P', b'N', b'G', b'\r', b'\n']);
    }

    #[test]
    fn test_pdf_prefix_is_stripped() {
        let text = format!("{}JVBERi0=", PDF_DATA_URI_PREFIX);
        assert_eq!(decode_payload(ExportFormat::Pdf, text).unwrap(), b"%PDF-");
    }

    #[test]
    fn test_missing_prefix_still_decodes() {
        assert_eq!(
            decode_payload(ExportFormat::Pdf, "JVBERi0=".to_string()).unwrap(),
            b"%PDF-"
        );
    }

    #[test]
    fn test_wrong_prefix_is_invalid() {
        let text = format!("{}JVBERi0=", PNG_DATA_URI_PREFIX);
        assert!(matches!(
            decode_payload(ExportFormat::Pdf, text),
            Err(ExportError::InvalidBase64 {
                format: ExportFormat::Pdf,
                ..
            })
        ));
    }
}
