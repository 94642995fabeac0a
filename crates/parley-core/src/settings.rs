//! Account settings payload.
//!
//! The account endpoint replaces the whole settings object on every PUT,
//! so an update is always the full template with one key overlaid.

use serde_json::{json, Map, Value};

use crate::SessionError;

/// Settings key that toggles extended reasoning.
pub const REASONING_MODE_KEY: &str = "paprika_mode";
/// Value of [`REASONING_MODE_KEY`] that enables extended reasoning.
pub const REASONING_MODE_EXTENDED: &str = "extended";

/// Every key the account endpoint knows, with its inert default.
fn default_entries() -> [(&'static str, Value); 28] {
    [
        ("input_menu_pinned_items", Value::Null),
        ("has_seen_mm_examples", Value::Null),
        ("has_seen_starter_prompts", Value::Null),
        ("has_started_claudeai_onboarding", json!(true)),
        ("has_finished_claudeai_onboarding", json!(true)),
        ("dismissed_claudeai_banners", json!([])),
        ("dismissed_artifacts_announcement", Value::Null),
        ("preview_feature_uses_artifacts", json!(false)),
        ("preview_feature_uses_latex", Value::Null),
        ("preview_feature_uses_citations", Value::Null),
        ("preview_feature_uses_harmony", Value::Null),
        ("enabled_artifacts_attachments", json!(false)),
        ("enabled_turmeric", Value::Null),
        ("enable_chat_suggestions", Value::Null),
        ("dismissed_artifact_feedback_form", Value::Null),
        ("enabled_mm_pdfs", Value::Null),
        ("enabled_gdrive", Value::Null),
        ("enabled_bananagrams", Value::Null),
        ("enabled_gdrive_indexing", Value::Null),
        ("enabled_web_search", json!(true)),
        ("enabled_compass", Value::Null),
        ("enabled_sourdough", Value::Null),
        ("enabled_foccacia", Value::Null),
        ("dismissed_claude_code_spotlight", Value::Null),
        ("enabled_geolocation", Value::Null),
        ("enabled_mcp_tools", Value::Null),
        (REASONING_MODE_KEY, Value::Null),
        ("enabled_monkeys_in_a_barrel", Value::Null),
    ]
}

/// Whether `key` belongs to the account settings object.
pub fn is_known_key(key: &str) -> bool {
    default_entries().iter().any(|(k, _)| *k == key)
}

/// Full settings object with every key at its default.
pub fn default_settings() -> Map<String, Value> {
    default_entries()
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

/// Build the PUT body: the full template with `key` set to `value`.
pub fn settings_update_body(key: &str, value: Value) -> Result<Value, SessionError> {
    if !is_known_key(key) {
        return Err(SessionError::UnknownSettingKey(key.to_string()));
    }
    let mut settings = default_settings();
    settings.insert(key.to_string(), value);
    Ok(json!({ "settings": settings }))
}
