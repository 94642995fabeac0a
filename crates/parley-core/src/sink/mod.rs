//! Output sinks the translator delivers chunks to.
//!
//! A sink either forwards every chunk as it arrives (`Streaming`) or
//! holds back and emits one response with the full text at the end
//! (`Aggregated`). Either way it can short-circuit with a single error
//! message delivered as a complete response.

mod channel;
mod openai;

pub use channel::ChannelSink;
pub use openai::{ChatCompletion, ChatCompletionChunk, OpenAiSink, DONE_TOKEN};

use async_trait::async_trait;

use crate::SessionError;

/// How a sink delivers output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    Streaming,
    Aggregated,
}

impl DeliveryMode {
    pub fn from_stream_flag(stream: bool) -> Self {
        if stream {
            DeliveryMode::Streaming
        } else {
            DeliveryMode::Aggregated
        }
    }
}

/// A normalized output event as seen by an in-process consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputEvent {
    Delta(String),
    Done,
    Error(String),
}

#[async_trait]
pub trait OutputSink: Send {
    /// One translated fragment, delimiters included.
    async fn chunk(&mut self, text: &str) -> Result<(), SessionError>;

    /// End of stream. `full_text` is every fragment concatenated.
    async fn finish(&mut self, full_text: &str) -> Result<(), SessionError>;

    /// Deliver `message` as the whole response and end the output.
    async fn error(&mut self, message: &str) -> Result<(), SessionError>;
}
