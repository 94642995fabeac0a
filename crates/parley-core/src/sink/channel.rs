//! Sink that hands output events to an in-process consumer.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{DeliveryMode, OutputEvent, OutputSink};
use crate::SessionError;

pub struct ChannelSink {
    tx: mpsc::Sender<OutputEvent>,
    mode: DeliveryMode,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<OutputEvent>, mode: DeliveryMode) -> Self {
        Self { tx, mode }
    }

    async fn send(&self, event: OutputEvent) -> Result<(), SessionError> {
        self.tx
            .send(event)
            .await
            .map_err(|_| SessionError::Stream("output receiver dropped".into()))
    }
}

#[async_trait]
impl OutputSink for ChannelSink {
    async fn chunk(&mut self, text: &str) -> Result<(), SessionError> {
        match self.mode {
            DeliveryMode::Streaming => self.send(OutputEvent::Delta(text.to_string())).await,
            DeliveryMode::Aggregated => Ok(()),
        }
    }

    async fn finish(&mut self, full_text: &str) -> Result<(), SessionError> {
        if self.mode == DeliveryMode::Aggregated {
            self.send(OutputEvent::Delta(full_text.to_string())).await?;
        }
        self.send(OutputEvent::Done).await
    }

    async fn error(&mut self, message: &str) -> Result<(), SessionError> {
        self.send(OutputEvent::Error(message.to_string())).await
    }
}
