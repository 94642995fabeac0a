//! Session client struct, transport setup and request shaping.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;

use crate::lifecycle::LifecycleState;
use crate::request::{CompletionRequest, RequestDefaults};
use crate::SessionError;

use super::config::SessionConfig;
use super::reasoning::{ModelSelection, ReasoningMode};

pub(crate) const CLIENT_PLATFORM: &str = "web_claude_ai";
pub(crate) const SESSION_COOKIE: &str = "sessionKey";
pub(crate) const SESSION_DATA_COOKIE: &str = "_Secure-next-auth.session-data";

/// A logged-in backend session.
///
/// One session drives one conversation at a time. Methods that mutate
/// the session take `&mut self`, so concurrent use needs an owner that
/// serializes access (see [`crate::SessionRegistry`]).
pub struct SessionClient {
    pub(crate) config: SessionConfig,
    pub(crate) http: reqwest::Client,
    pub(crate) tenant_id: Option<String>,
    pub(crate) reasoning: Option<ReasoningMode>,
    pub(crate) defaults: RequestDefaults,
    pub(crate) state: LifecycleState,
}

impl SessionClient {
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .default_headers(Self::default_headers(&config)?);

        if let Some(ref proxy) = config.proxy {
            let proxy =
                reqwest::Proxy::all(proxy).map_err(|e| SessionError::Transport(e.to_string()))?;
            builder = builder.proxy(proxy);
        }

        let http = builder
            .build()
            .map_err(|e| SessionError::Transport(e.to_string()))?;

        Ok(Self {
            reasoning: config.reasoning,
            defaults: RequestDefaults::new(config.locale.clone(), config.timezone.clone()),
            config,
            http,
            tenant_id: None,
            state: LifecycleState::Uninitialized,
        })
    }

    /// Headers sent with every request, session cookies included.
    fn default_headers(config: &SessionConfig) -> Result<HeaderMap, SessionError> {
        let mut headers = HeaderMap::new();
        let fixed = [
            ("accept", "text/event-stream, text/event-stream"),
            ("accept-language", "en-US,en;q=0.9"),
            ("anthropic-client-platform", CLIENT_PLATFORM),
            ("content-type", "application/json"),
            ("priority", "u=1, i"),
        ];
        for (name, value) in fixed {
            headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
        }

        headers.insert("origin", header_value(&config.base_url)?);

        let mut cookie = format!("{SESSION_COOKIE}={}", config.session_key);
        if let Some(ref data) = config.session_data {
            cookie.push_str(&format!("; {SESSION_DATA_COOKIE}={data}"));
        }
        let mut cookie = header_value(&cookie)?;
        cookie.set_sensitive(true);
        headers.insert(reqwest::header::COOKIE, cookie);

        Ok(headers)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn tenant_id(&self) -> Option<&str> {
        self.tenant_id.as_deref()
    }

    /// Use `tenant_id` without asking the backend.
    pub fn set_tenant_id(&mut self, tenant_id: impl Into<String>) {
        self.tenant_id = Some(tenant_id.into());
        self.state.tenant_resolved();
    }

    pub fn reasoning(&self) -> Option<ReasoningMode> {
        self.reasoning
    }

    pub fn state(&self) -> &LifecycleState {
        &self.state
    }

    pub fn defaults(&self) -> &RequestDefaults {
        &self.defaults
    }

    /// Model id sent to the backend, with any reasoning suffix removed.
    pub fn effective_model(&self) -> &str {
        ModelSelection::parse(&self.config.model).model
    }

    /// Attach `text` as the session's single inline context document.
    pub fn set_inline_context(&mut self, text: impl Into<String>) {
        self.defaults.set_inline_context(text);
    }

    /// Completion body for `prompt` built from the current defaults.
    pub fn build_completion_request<'a>(&'a self, prompt: &'a str) -> CompletionRequest<'a> {
        CompletionRequest::new(&self.defaults, prompt, self.effective_model())
    }

    pub(crate) fn require_tenant(&self) -> Result<String, SessionError> {
        self.state.require_tenant()?;
        self.tenant_id.clone().ok_or(SessionError::TenantNotSet)
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    pub(crate) fn new_page_referer(&self) -> String {
        self.url("/new")
    }

    pub(crate) fn chat_referer(&self, conversation_id: &str) -> String {
        self.url(&format!("/chat/{conversation_id}"))
    }
}

fn header_value(value: &str) -> Result<HeaderValue, SessionError> {
    HeaderValue::from_str(value).map_err(|e| SessionError::Transport(format!("invalid header: {e}")))
}

/// Map rate limiting and unexpected statuses to errors, keeping a short
/// excerpt of the body for diagnostics.
pub(crate) async fn check_status(
    response: reqwest::Response,
    accepted: &[StatusCode],
) -> Result<reqwest::Response, SessionError> {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(SessionError::RateLimited);
    }
    if !accepted.contains(&status) {
        let text = response.text().await.unwrap_or_default();
        let body = text.chars().take(200).collect::<String>();
        return Err(SessionError::UnexpectedStatus {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}
