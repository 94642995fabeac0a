//! Session adapter core for Parley.
//!
//! Drives a session-based chat backend on behalf of an OpenAI-style
//! caller:
//! - Session identity, tenant resolution and request shaping
//! - Conversation lifecycle (create, complete, delete, account settings)
//! - Translation of the backend event stream into normalized output chunks
//! - Streaming and aggregated output sinks
//! - Attachment upload and inline context injection

pub mod attachment;
pub mod lifecycle;
pub mod registry;
pub mod request;
pub mod session;
pub mod settings;
pub mod sink;
pub mod streaming;
pub mod tenant;
pub mod translator;

pub use attachment::{Attachment, DecodedAttachment};
pub use lifecycle::LifecycleState;
pub use registry::SessionRegistry;
pub use request::{CompletionRequest, RequestDefaults, DEFAULT_MODEL_SENTINEL};
pub use session::{ReasoningMode, SessionClient, SessionConfig};
pub use sink::{ChannelSink, DeliveryMode, OpenAiSink, OutputEvent, OutputSink};
pub use translator::{EventTranslator, Segment, Step, TranslateOutcome};

/// Coarse classification of a [`SessionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Tenant or session not initialized, transport could not be built.
    Configuration,
    /// Unexpected status code or malformed/missing response fields.
    BackendProtocol,
    /// The backend asked us to slow down.
    RateLimited,
    /// Bad caller input: attachment data, setting keys.
    InputValidation,
    /// I/O failure while reading the event stream or writing output.
    StreamTranslation,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("tenant id not set")]
    TenantNotSet,
    #[error("no tenant found for this session")]
    NoTenantFound,
    #[error("multiple tenants and none on the default tier")]
    AmbiguousTenant,
    #[error("unexpected status code {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
    #[error("{0} not found in response")]
    MissingIdentifier(&'static str),
    #[error("Rate limited")]
    RateLimited,
    #[error("malformed attachment: {0}")]
    MalformedAttachment(String),
    #[error("invalid attachment encoding: {0}")]
    InvalidEncoding(String),
    #[error("unknown setting key: {0}")]
    UnknownSettingKey(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Stream error: {0}")]
    Stream(String),
    #[error("Transport error: {0}")]
    Transport(String),
}

impl SessionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::TenantNotSet | SessionError::Transport(_) => ErrorKind::Configuration,
            SessionError::NoTenantFound
            | SessionError::AmbiguousTenant
            | SessionError::UnexpectedStatus { .. }
            | SessionError::MissingIdentifier(_)
            | SessionError::Network(_)
            | SessionError::Parse(_) => ErrorKind::BackendProtocol,
            SessionError::RateLimited => ErrorKind::RateLimited,
            SessionError::MalformedAttachment(_)
            | SessionError::InvalidEncoding(_)
            | SessionError::UnknownSettingKey(_) => ErrorKind::InputValidation,
            SessionError::Stream(_) => ErrorKind::StreamTranslation,
        }
    }

    /// HTTP status a front end should answer with for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            SessionError::RateLimited => 429,
            SessionError::UnexpectedStatus { status, .. } => *status,
            _ => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(SessionError::TenantNotSet.kind(), ErrorKind::Configuration);
        assert_eq!(
            SessionError::UnexpectedStatus {
                status: 500,
                body: String::new()
            }
            .kind(),
            ErrorKind::BackendProtocol
        );
        assert_eq!(SessionError::RateLimited.kind(), ErrorKind::RateLimited);
        assert_eq!(
            SessionError::UnknownSettingKey("x".into()).kind(),
            ErrorKind::InputValidation
        );
        assert_eq!(
            SessionError::InvalidEncoding("x".into()).kind(),
            ErrorKind::InputValidation
        );
        assert_eq!(
            SessionError::Stream("eof".into()).kind(),
            ErrorKind::StreamTranslation
        );
    }

    #[test]
    fn status_codes() {
        assert_eq!(SessionError::RateLimited.status_code(), 429);
        assert_eq!(
            SessionError::UnexpectedStatus {
                status: 403,
                body: "forbidden".into()
            }
            .status_code(),
            403
        );
        assert_eq!(SessionError::TenantNotSet.status_code(), 500);
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            SessionError::MissingIdentifier("uuid").to_string(),
            "uuid not found in response"
        );
        assert_eq!(
            SessionError::UnknownSettingKey("bogus_key".into()).to_string(),
            "unknown setting key: bogus_key"
        );
    }
}
