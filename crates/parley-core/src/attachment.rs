//! Attachment ingestion: base64 data URIs and inline context.

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::SessionError;

/// Name of the synthetic attachment that carries inline context.
pub const INLINE_CONTEXT_FILE_NAME: &str = "context.txt";

/// A file decoded from a `data:<content-type>;base64,<payload>` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAttachment {
    pub content_type: String,
    pub file_name: &'static str,
    pub bytes: Vec<u8>,
}

impl DecodedAttachment {
    /// Parse and decode a data URI.
    pub fn from_data_uri(data_uri: &str) -> Result<Self, SessionError> {
        let (meta, payload) = data_uri
            .split_once(',')
            .ok_or_else(|| SessionError::MalformedAttachment("missing ',' separator".into()))?;

        let meta = meta
            .strip_prefix("data:")
            .ok_or_else(|| SessionError::MalformedAttachment("missing data: scheme".into()))?;

        let (content_type, encoding) = meta.split_once(';').ok_or_else(|| {
            SessionError::MalformedAttachment("missing ';' before encoding marker".into())
        })?;

        if content_type.is_empty() {
            return Err(SessionError::MalformedAttachment(
                "empty content type".into(),
            ));
        }
        if encoding != "base64" {
            return Err(SessionError::InvalidEncoding(format!(
                "expected base64, got {encoding:?}"
            )));
        }

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| SessionError::InvalidEncoding(e.to_string()))?;

        Ok(Self {
            content_type: content_type.to_string(),
            file_name: file_name_for(content_type),
            bytes,
        })
    }
}

impl DecodedAttachment {
    /// Content type for the upload part: the declared one when it is a
    /// well-formed `type/subtype`, otherwise [`FALLBACK_CONTENT_TYPE`].
    pub fn upload_content_type(&self) -> &str {
        if is_media_type(&self.content_type) {
            &self.content_type
        } else {
            FALLBACK_CONTENT_TYPE
        }
    }
}

/// Sent for uploads whose declared content type is not a media type.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

fn is_media_type(value: &str) -> bool {
    let is_token = |s: &str| {
        !s.is_empty()
            && s.bytes()
                .all(|b| b.is_ascii_alphanumeric() || b"!#$&-^_.+".contains(&b))
    };
    matches!(value.split_once('/'), Some((kind, subtype)) if is_token(kind) && is_token(subtype))
}

/// Display file name the backend expects for a content type.
pub fn file_name_for(content_type: &str) -> &'static str {
    match content_type {
        "image/jpeg" => "image.jpg",
        "image/png" => "image.png",
        "application/pdf" => "document.pdf",
        _ => "file",
    }
}

/// An attachment whose content travels inline in the completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub file_name: String,
    pub file_type: String,
    pub file_size: usize,
    pub extracted_content: String,
}

impl Attachment {
    /// Wrap `text` as the plain-text context attachment.
    pub fn inline_context(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            file_name: INLINE_CONTEXT_FILE_NAME.into(),
            file_type: "text/plain".into(),
            file_size: text.len(),
            extracted_content: text,
        }
    }
}
