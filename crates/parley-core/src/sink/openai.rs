//! OpenAI chat-completions wire format over any async writer.

use async_trait::async_trait;
use serde::Serialize;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::{DeliveryMode, OutputSink};
use crate::SessionError;

/// Termination record of a streamed response.
pub const DONE_TOKEN: &str = "data: [DONE]\n\n";

#[derive(Debug, Serialize)]
pub struct ChatCompletionChunk<'a> {
    pub id: &'a str,
    pub object: &'static str,
    pub created: i64,
    pub model: &'a str,
    pub choices: [ChunkChoice<'a>; 1],
}

#[derive(Debug, Serialize)]
pub struct ChunkChoice<'a> {
    pub index: u32,
    pub delta: ChunkDelta<'a>,
    pub finish_reason: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct ChunkDelta<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ChatCompletion<'a> {
    pub id: &'a str,
    pub object: &'static str,
    pub created: i64,
    pub model: &'a str,
    pub choices: [CompletionChoice<'a>; 1],
    pub usage: Usage,
}

#[derive(Debug, Serialize)]
pub struct CompletionChoice<'a> {
    pub index: u32,
    pub message: CompletionMessage<'a>,
    pub finish_reason: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CompletionMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

/// The backend reports no token counts; these stay zero.
#[derive(Debug, Default, Serialize)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

/// Writes OpenAI-style output: SSE chunks plus `[DONE]` when streaming,
/// a single `chat.completion` object when aggregated.
pub struct OpenAiSink<W> {
    writer: W,
    mode: DeliveryMode,
    id: String,
    model: String,
    created: i64,
}

impl<W: AsyncWrite + Unpin + Send> OpenAiSink<W> {
    pub fn new(writer: W, mode: DeliveryMode, model: impl Into<String>) -> Self {
        Self {
            writer,
            mode,
            id: format!("chatcmpl-{}", uuid::Uuid::new_v4().simple()),
            model: model.into(),
            created: chrono::Utc::now().timestamp(),
        }
    }

    pub fn mode(&self) -> DeliveryMode {
        self.mode
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn chunk_record(&self, content: &str, finish_reason: Option<&'static str>) -> Result<String, SessionError> {
        let chunk = ChatCompletionChunk {
            id: &self.id,
            object: "chat.completion.chunk",
            created: self.created,
            model: &self.model,
            choices: [ChunkChoice {
                index: 0,
                delta: ChunkDelta {
                    role: "assistant",
                    content,
                },
                finish_reason,
            }],
        };
        let json = serde_json::to_string(&chunk).map_err(|e| SessionError::Parse(e.to_string()))?;
        Ok(format!("data: {json}\n\n"))
    }

    fn completion_record(&self, content: &str) -> Result<String, SessionError> {
        let completion = ChatCompletion {
            id: &self.id,
            object: "chat.completion",
            created: self.created,
            model: &self.model,
            choices: [CompletionChoice {
                index: 0,
                message: CompletionMessage {
                    role: "assistant",
                    content,
                },
                finish_reason: "stop",
            }],
            usage: Usage::default(),
        };
        let json =
            serde_json::to_string(&completion).map_err(|e| SessionError::Parse(e.to_string()))?;
        Ok(format!("{json}\n"))
    }

    async fn write(&mut self, record: &str) -> Result<(), SessionError> {
        self.writer
            .write_all(record.as_bytes())
            .await
            .map_err(|e| SessionError::Stream(e.to_string()))?;
        self.writer
            .flush()
            .await
            .map_err(|e| SessionError::Stream(e.to_string()))
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> OutputSink for OpenAiSink<W> {
    async fn chunk(&mut self, text: &str) -> Result<(), SessionError> {
        match self.mode {
            DeliveryMode::Streaming => {
                let record = self.chunk_record(text, None)?;
                self.write(&record).await
            }
            DeliveryMode::Aggregated => Ok(()),
        }
    }

    async fn finish(&mut self, full_text: &str) -> Result<(), SessionError> {
        match self.mode {
            DeliveryMode::Streaming => self.write(DONE_TOKEN).await,
            DeliveryMode::Aggregated => {
                let record = self.completion_record(full_text)?;
                self.write(&record).await
            }
        }
    }

    async fn error(&mut self, message: &str) -> Result<(), SessionError> {
        match self.mode {
            DeliveryMode::Streaming => {
                let record = self.chunk_record(message, Some("stop"))?;
                self.write(&record).await?;
                self.write(DONE_TOKEN).await
            }
            DeliveryMode::Aggregated => {
                let record = self.completion_record(message)?;
                self.write(&record).await
            }
        }
    }
}
