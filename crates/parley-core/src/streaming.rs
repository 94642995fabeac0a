//! Backend event-stream decoding.
//!
//! The completion endpoint answers with newline-delimited records. Only
//! lines carrying the `data: ` marker hold a JSON event; everything else
//! (event names, keep-alive blanks, comments) is skipped.

use futures_util::StreamExt;
use serde::Deserialize;
use tokio::io::AsyncBufRead;
use tokio_util::io::StreamReader;
use tracing::debug;

/// Marker that prefixes every payload line.
pub const DATA_PREFIX: &str = "data: ";

/// A single event decoded from a payload line.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackendEvent {
    /// Stream-level type; only `"error"` is acted on.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub delta: Option<Delta>,
    #[serde(default)]
    pub error: Option<EventError>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Delta {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub thinking: Option<String>,
    #[serde(default)]
    pub partial_json: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventError {
    #[serde(default)]
    pub message: Option<String>,
}

impl BackendEvent {
    /// The in-band error message, if this is an error event that carries one.
    pub fn error_message(&self) -> Option<&str> {
        if self.kind != "error" {
            return None;
        }
        self.error
            .as_ref()
            .and_then(|e| e.message.as_deref())
            .filter(|m| !m.is_empty())
    }
}

/// Decode one raw line of the stream. Returns `None` for lines without
/// the data marker and for payloads that are not a UTF-8 JSON event.
/// Bytes outside the payload are never decoded.
pub fn parse_event_line(line: impl AsRef<[u8]>) -> Option<BackendEvent> {
    let data = line.as_ref().strip_prefix(DATA_PREFIX.as_bytes())?;
    match serde_json::from_slice(data) {
        Ok(event) => Some(event),
        Err(e) => {
            debug!(error = %e, "skipping undecodable event payload");
            None
        }
    }
}

/// Wrap a streaming response body as a buffered async reader.
pub fn response_reader(response: reqwest::Response) -> impl AsyncBufRead + Unpin + Send {
    let byte_stream = response
        .bytes_stream()
        .map(|result| result.map_err(std::io::Error::other));
    tokio::io::BufReader::new(StreamReader::new(byte_stream))
}
