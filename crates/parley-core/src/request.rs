//! Typed request bodies for conversation creation and completion.

use serde::{Deserialize, Serialize};

use crate::attachment::Attachment;

/// Model identifier the backend serves by default. Requests for it omit
/// the `model` field entirely, which the backend requires for this model.
pub const DEFAULT_MODEL_SENTINEL: &str = "claude-sonnet-4-20250514";

/// Parent anchor for the first message of a fresh conversation.
pub const ROOT_PARENT_MESSAGE_UUID: &str = "00000000-0000-4000-8000-000000000000";

/// The `model` field to send for `model`, if any.
pub fn model_field(model: &str) -> Option<&str> {
    (model != DEFAULT_MODEL_SENTINEL).then_some(model)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalizedStyle {
    #[serde(rename = "type")]
    pub kind: String,
    pub key: String,
    pub name: String,
    #[serde(rename = "nameKey")]
    pub name_key: String,
    pub prompt: String,
    pub summary: String,
    #[serde(rename = "summaryKey")]
    pub summary_key: String,
    #[serde(rename = "isDefault")]
    pub is_default: bool,
}

impl Default for PersonalizedStyle {
    fn default() -> Self {
        Self {
            kind: "default".into(),
            key: "Default".into(),
            name: "Normal".into(),
            name_key: "normal_style_name".into(),
            prompt: "Normal".into(),
            summary: "Default responses from Claude".into(),
            summary_key: "normal_style_summary".into(),
            is_default: true,
        }
    }
}

/// A backend-side tool enabled for the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSelection {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
}

impl ToolSelection {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
        }
    }
}

/// Attributes sent with every completion of a session.
///
/// Attachment and context operations mutate this; building a request
/// only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDefaults {
    pub personalized_styles: Vec<PersonalizedStyle>,
    pub tools: Vec<ToolSelection>,
    pub parent_message_uuid: String,
    pub attachments: Vec<Attachment>,
    /// Opaque references returned by the upload endpoint.
    pub files: Vec<String>,
    pub sync_sources: Vec<serde_json::Value>,
    pub locale: String,
    pub rendering_mode: String,
    pub timezone: String,
}

impl RequestDefaults {
    pub fn new(locale: impl Into<String>, timezone: impl Into<String>) -> Self {
        Self {
            personalized_styles: vec![PersonalizedStyle::default()],
            tools: vec![
                ToolSelection::new("web_search_v0", "web_search"),
                ToolSelection::new("repl_v0", "repl"),
            ],
            parent_message_uuid: ROOT_PARENT_MESSAGE_UUID.into(),
            attachments: Vec::new(),
            files: Vec::new(),
            sync_sources: Vec::new(),
            locale: locale.into(),
            rendering_mode: "messages".into(),
            timezone: timezone.into(),
        }
    }

    /// Replace all attachments with a single inline-context attachment.
    pub fn set_inline_context(&mut self, text: impl Into<String>) {
        self.attachments = vec![Attachment::inline_context(text)];
    }

    pub fn push_file(&mut self, file_ref: impl Into<String>) {
        self.files.push(file_ref.into());
    }
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self::new("en-US", "America/New_York")
    }
}

/// Body of a completion call: the session defaults plus the prompt.
#[derive(Debug, Serialize)]
pub struct CompletionRequest<'a> {
    #[serde(flatten)]
    pub defaults: &'a RequestDefaults,
    pub prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<&'a str>,
}

impl<'a> CompletionRequest<'a> {
    pub fn new(defaults: &'a RequestDefaults, prompt: &'a str, model: &'a str) -> Self {
        Self {
            defaults,
            prompt,
            model: model_field(model),
        }
    }
}

/// Body of a create-conversation call.
#[derive(Debug, Serialize)]
pub struct CreateConversationRequest<'a> {
    pub uuid: String,
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<&'a str>,
    pub include_conversation_preferences: bool,
}

impl<'a> CreateConversationRequest<'a> {
    pub fn new(model: &'a str) -> Self {
        Self {
            uuid: parley_common::new_id(),
            name: "",
            model: model_field(model),
            include_conversation_preferences: true,
        }
    }
}
