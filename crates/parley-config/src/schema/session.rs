use serde::{Deserialize, Serialize};

/// Account-level reasoning mode requested for new conversations.
///
/// `Unset` leaves whatever the account currently has alone until a
/// model choice forces a change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningSetting {
    #[default]
    Unset,
    Off,
    Extended,
}

/// Per-session request defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Model identifier; a `-think` suffix requests extended reasoning.
    pub model: String,
    pub reasoning: ReasoningSetting,
    pub locale: String,
    pub timezone: String,
    /// Emit chunks as they arrive instead of one aggregated response.
    pub stream: bool,
    /// Delete the conversation once the completion has finished.
    pub delete_after_completion: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            model: "claude-sonnet-4-20250514".into(),
            reasoning: ReasoningSetting::Unset,
            locale: "en-US".into(),
            timezone: "America/New_York".into(),
            stream: true,
            delete_after_completion: true,
        }
    }
}
