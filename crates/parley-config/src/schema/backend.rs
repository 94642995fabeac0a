use std::fmt;

use serde::{Deserialize, Serialize};

/// Backend transport and credential settings.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the chat service or a mirroring gateway.
    pub base_url: String,
    /// Value of the `sessionKey` cookie.
    pub session_key: String,
    /// Optional gateway session-data cookie; empty disables it.
    pub session_data: String,
    /// Optional proxy URL; empty means a direct connection.
    pub proxy: String,
    /// TCP connect timeout (valid range: 1-120).
    pub connect_timeout_secs: u32,
    /// Whole-request timeout, including the streamed body (valid range: 10-3600).
    pub request_timeout_secs: u32,
    pub user_agent: String,
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("base_url", &self.base_url)
            .field("session_key", &"[REDACTED]")
            .field("session_data", &"[REDACTED]")
            .field("proxy", &self.proxy)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "https://claude.ai".into(),
            session_key: String::new(),
            session_data: String::new(),
            proxy: String::new(),
            connect_timeout_secs: 10,
            request_timeout_secs: 300,
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .into(),
        }
    }
}
