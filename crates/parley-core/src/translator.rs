//! Event-stream translator.
//!
//! Reinterprets backend delta events as one text stream. Reasoning and
//! tool-call fragments are wrapped in delimiters so a plain chat client
//! can still tell them apart from the answer text.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::sink::OutputSink;
use crate::streaming::{parse_event_line, BackendEvent};
use crate::SessionError;

pub const REASONING_OPEN: &str = "<think> ";
pub const REASONING_CLOSE: &str = "</think>\n";
pub const TOOL_CALL_OPEN: &str = "\n```\n ";
pub const TOOL_CALL_CLOSE: &str = "\n```\n";

/// Which kind of segment the output is currently inside.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Segment {
    #[default]
    Text,
    Reasoning,
    ToolCall,
}

impl Segment {
    fn open_delimiter(self) -> &'static str {
        match self {
            Segment::Text => "",
            Segment::Reasoning => REASONING_OPEN,
            Segment::ToolCall => TOOL_CALL_OPEN,
        }
    }

    fn close_delimiter(self) -> &'static str {
        match self {
            Segment::Text => "",
            Segment::Reasoning => REASONING_CLOSE,
            Segment::ToolCall => TOOL_CALL_CLOSE,
        }
    }
}

/// Result of feeding one event to the translator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Nothing to emit.
    Skip,
    /// A fragment to deliver, delimiters already prepended.
    Emit(String),
    /// In-band error; the message replaces all output and the stream ends.
    Fail(String),
}

/// How a translation run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateOutcome {
    Completed,
    /// The backend sent an error event; its message was delivered as the response.
    BackendError(String),
    /// The caller went away; nothing further was emitted.
    Cancelled,
}

/// Per-invocation segment state plus the text emitted so far.
#[derive(Debug, Default)]
pub struct EventTranslator {
    segment: Segment,
    text: String,
}

impl EventTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segment(&self) -> Segment {
        self.segment
    }

    /// Everything emitted so far, in order.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn apply(&mut self, event: &BackendEvent) -> Step {
        if let Some(message) = event.error_message() {
            return Step::Fail(message.to_string());
        }
        let Some(delta) = event.delta.as_ref() else {
            return Step::Skip;
        };

        let (target, content) = match delta.kind.as_str() {
            "text_delta" => match delta.text.as_deref() {
                Some(text) if !text.is_empty() => (Segment::Text, text),
                _ => return Step::Skip,
            },
            "thinking_delta" => (Segment::Reasoning, delta.thinking.as_deref().unwrap_or("")),
            "input_json_delta" => (Segment::ToolCall, delta.partial_json.as_deref().unwrap_or("")),
            _ => return Step::Skip,
        };

        let mut chunk = self.enter(target);
        chunk.push_str(content);
        if chunk.is_empty() {
            return Step::Skip;
        }
        self.text.push_str(&chunk);
        Step::Emit(chunk)
    }

    /// Close whatever segment is still open at end of stream.
    pub fn finish(&mut self) -> String {
        let tail = self.enter(Segment::Text);
        self.text.push_str(&tail);
        tail
    }

    fn enter(&mut self, target: Segment) -> String {
        if self.segment == target {
            return String::new();
        }
        let mut delimiters = String::from(self.segment.close_delimiter());
        delimiters.push_str(target.open_delimiter());
        self.segment = target;
        delimiters
    }
}

/// Strip the `\n` or `\r\n` terminator from a raw line.
fn trim_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Drive `sink` from the event stream in `reader` until it ends, an
/// error event arrives, or `cancel` fires.
///
/// Lines are read as raw bytes; only payload lines are decoded, so stray
/// non-UTF-8 bytes on keep-alive or comment lines are skipped.
pub async fn translate<R, S>(
    mut reader: R,
    sink: &mut S,
    cancel: &CancellationToken,
) -> Result<TranslateOutcome, SessionError>
where
    R: AsyncBufRead + Unpin,
    S: OutputSink + ?Sized,
{
    let mut translator = EventTranslator::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!("client closed connection");
                return Ok(TranslateOutcome::Cancelled);
            }
            read = reader.read_until(b'\n', &mut buf) => {
                read.map_err(|e| SessionError::Stream(e.to_string()))?
            }
        };
        if read == 0 {
            break;
        }

        let line = trim_line_end(&buf);
        debug!(line = %String::from_utf8_lossy(line), "backend event line");
        let Some(event) = parse_event_line(line) else {
            continue;
        };

        match translator.apply(&event) {
            Step::Skip => {}
            Step::Emit(chunk) => sink.chunk(&chunk).await?,
            Step::Fail(message) => {
                sink.error(&message).await?;
                return Ok(TranslateOutcome::BackendError(message));
            }
        }
    }

    let tail = translator.finish();
    if !tail.is_empty() {
        sink.chunk(&tail).await?;
    }
    sink.finish(translator.text()).await?;
    Ok(TranslateOutcome::Completed)
}

#[cfg(test)]
mod tests;
