//! Session client configuration.

use std::fmt;
use std::time::Duration;

use super::reasoning::ReasoningMode;

/// Everything needed to open a session against the backend.
#[derive(Clone)]
pub struct SessionConfig {
    /// Base URL of the service or a mirroring gateway, without trailing slash.
    pub base_url: String,
    pub session_key: String,
    /// Gateway session-data cookie, sent only when set.
    pub session_data: Option<String>,
    pub proxy: Option<String>,
    /// Requested model; a `-think` suffix asks for extended reasoning.
    pub model: String,
    /// Current account reasoning mode, `None` when unknown.
    pub reasoning: Option<ReasoningMode>,
    pub locale: String,
    pub timezone: String,
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("base_url", &self.base_url)
            .field("session_key", &"[REDACTED]")
            .field(
                "session_data",
                &self.session_data.as_ref().map(|_| "[REDACTED]"),
            )
            .field("proxy", &self.proxy)
            .field("model", &self.model)
            .field("reasoning", &self.reasoning)
            .field("locale", &self.locale)
            .field("timezone", &self.timezone)
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl SessionConfig {
    pub fn new(session_key: impl Into<String>) -> Self {
        Self {
            base_url: "https://claude.ai".to_string(),
            session_key: session_key.into(),
            session_data: None,
            proxy: None,
            model: crate::request::DEFAULT_MODEL_SENTINEL.to_string(),
            reasoning: None,
            locale: "en-US".to_string(),
            timezone: "America/New_York".to_string(),
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(300),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_session_data(mut self, data: impl Into<String>) -> Self {
        self.session_data = Some(data.into());
        self
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_reasoning(mut self, reasoning: Option<ReasoningMode>) -> Self {
        self.reasoning = reasoning;
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>, timezone: impl Into<String>) -> Self {
        self.locale = locale.into();
        self.timezone = timezone.into();
        self
    }

    pub fn with_timeouts(mut self, connect: Duration, request: Duration) -> Self {
        self.connect_timeout = connect;
        self.request_timeout = request;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_secrets() {
        let config = SessionConfig::new("sk-ant-secret").with_session_data("cookie-secret");
        let dbg = format!("{config:?}");
        assert!(!dbg.contains("sk-ant-secret"));
        assert!(!dbg.contains("cookie-secret"));
        assert!(dbg.contains("[REDACTED]"));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let config = SessionConfig::new("k").with_base_url("https://mirror.example.com/");
        assert_eq!(config.base_url, "https://mirror.example.com");
    }

    #[test]
    fn defaults_use_sentinel_model() {
        let config = SessionConfig::new("k");
        assert_eq!(config.model, crate::request::DEFAULT_MODEL_SENTINEL);
        assert_eq!(config.reasoning, None);
        assert_eq!(config.request_timeout, Duration::from_secs(300));
    }
}
