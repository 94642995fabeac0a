//! Backend calls: tenant lookup, conversation lifecycle, completion,
//! uploads and account settings.

use reqwest::StatusCode;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::attachment::DecodedAttachment;
use crate::request::CreateConversationRequest;
use crate::settings::{settings_update_body, REASONING_MODE_EXTENDED, REASONING_MODE_KEY};
use crate::sink::OutputSink;
use crate::streaming::response_reader;
use crate::tenant::{select_tenant, Tenant};
use crate::translator::{translate, TranslateOutcome};
use crate::SessionError;

use super::client::{check_status, SessionClient};
use super::reasoning::{ModelSelection, ReasoningMode};

#[derive(Debug, Deserialize)]
struct CreatedConversation {
    #[serde(default)]
    uuid: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UploadedFile {
    #[serde(default)]
    file_uuid: Option<String>,
}

fn network(e: reqwest::Error) -> SessionError {
    SessionError::Network(e.to_string())
}

fn parse(e: reqwest::Error) -> SessionError {
    SessionError::Parse(e.to_string())
}

impl SessionClient {
    /// Look up the tenant this session acts for. The result is cached;
    /// later calls return it without a request.
    pub async fn resolve_tenant(&mut self) -> Result<String, SessionError> {
        if let Some(ref tenant_id) = self.tenant_id {
            return Ok(tenant_id.clone());
        }

        let url = self.url("/api/organizations");
        debug!(url = %url, "listing tenants");

        let response = self
            .http
            .get(&url)
            .header("referer", self.new_page_referer())
            .send()
            .await
            .map_err(network)?;
        let response = check_status(response, &[StatusCode::OK]).await?;
        let tenants: Vec<Tenant> = response.json().await.map_err(parse)?;

        let tenant = select_tenant(&tenants)?;
        info!(tenant = %tenant.uuid, name = %tenant.name, "resolved tenant");
        let tenant_id = tenant.uuid.clone();
        self.set_tenant_id(tenant_id.clone());
        Ok(tenant_id)
    }

    /// Create a conversation and return its id.
    ///
    /// First brings the account reasoning mode in line with the requested
    /// model; a failure there is logged and creation goes ahead.
    pub async fn create_conversation(&mut self) -> Result<String, SessionError> {
        let tenant_id = self.require_tenant()?;
        self.sync_reasoning_mode().await;

        let url = self.url(&format!("/api/organizations/{tenant_id}/chat_conversations"));
        debug!(url = %url, model = %self.effective_model(), "creating conversation");

        let body = CreateConversationRequest::new(self.effective_model());
        let response = self
            .http
            .post(&url)
            .header("referer", self.new_page_referer())
            .json(&body)
            .send()
            .await
            .map_err(network)?;
        let response = check_status(response, &[StatusCode::CREATED]).await?;
        let created: CreatedConversation = response.json().await.map_err(parse)?;

        let conversation_id = created
            .uuid
            .filter(|id| !id.is_empty())
            .ok_or(SessionError::MissingIdentifier("uuid"))?;
        info!(conversation_id = %conversation_id, "conversation created");
        self.state.conversation_created(&conversation_id);
        Ok(conversation_id)
    }

    async fn sync_reasoning_mode(&mut self) {
        let target = ModelSelection::parse(&self.config.model);
        if !target.needs_update(self.reasoning) {
            return;
        }
        let target = target.reasoning;

        let value = match target {
            ReasoningMode::Extended => serde_json::json!(REASONING_MODE_EXTENDED),
            ReasoningMode::Off => serde_json::Value::Null,
        };
        match self.update_account_setting(REASONING_MODE_KEY, value).await {
            Ok(()) => self.reasoning = Some(target),
            Err(e) => warn!(error = %e, mode = ?target, "failed to update reasoning mode"),
        }
    }

    /// Set one account setting. The backend replaces the whole settings
    /// object, so the full template is sent with `key` overlaid.
    pub async fn update_account_setting(
        &self,
        key: &str,
        value: serde_json::Value,
    ) -> Result<(), SessionError> {
        let body = settings_update_body(key, value)?;
        let url = self.url("/api/account?statsig_hashing_algorithm=djb2");
        debug!(url = %url, key, "updating account setting");

        let response = self
            .http
            .put(&url)
            .header("referer", self.new_page_referer())
            .header("cache-control", "no-cache")
            .header("pragma", "no-cache")
            .json(&body)
            .send()
            .await
            .map_err(network)?;
        check_status(response, &[StatusCode::OK, StatusCode::ACCEPTED]).await?;

        info!(key, "account setting updated");
        Ok(())
    }

    /// Send `prompt` to a conversation and translate the reply into `sink`.
    ///
    /// An error event from the backend is delivered through the sink and
    /// reported as [`TranslateOutcome::BackendError`], not as `Err`.
    pub async fn send_message<S>(
        &mut self,
        conversation_id: &str,
        prompt: &str,
        sink: &mut S,
        cancel: &CancellationToken,
    ) -> Result<TranslateOutcome, SessionError>
    where
        S: OutputSink + ?Sized,
    {
        let tenant_id = self.require_tenant()?;
        info!(conversation_id, "sending message");

        let url = self.url(&format!(
            "/api/organizations/{tenant_id}/chat_conversations/{conversation_id}/completion"
        ));
        let response = self
            .http
            .post(&url)
            .header("referer", self.chat_referer(conversation_id))
            .header("cache-control", "no-cache")
            .json(&self.build_completion_request(prompt))
            .send()
            .await
            .map_err(network)?;

        info!(status = %response.status(), "completion response");
        let response = check_status(response, &[StatusCode::OK]).await?;

        self.state.completion_started(conversation_id);
        let outcome = translate(response_reader(response), sink, cancel).await;
        self.state.completion_finished();

        if let Ok(TranslateOutcome::BackendError(ref message)) = outcome {
            warn!(conversation_id, message = %message, "backend reported an error in-stream");
        }
        outcome
    }

    /// Delete a conversation. The backend answers "not found" the same way
    /// as success; nothing is retried here.
    pub async fn delete_conversation(&mut self, conversation_id: &str) -> Result<(), SessionError> {
        let tenant_id = self.require_tenant()?;
        let url = self.url(&format!(
            "/api/organizations/{tenant_id}/chat_conversations/{conversation_id}"
        ));
        debug!(url = %url, "deleting conversation");

        let response = self
            .http
            .delete(&url)
            .header("referer", self.chat_referer(conversation_id))
            .json(&serde_json::json!({ "uuid": conversation_id }))
            .send()
            .await
            .map_err(network)?;
        check_status(response, &[StatusCode::OK, StatusCode::NO_CONTENT]).await?;

        info!(conversation_id, "conversation deleted");
        self.state.conversation_deleted(conversation_id);
        Ok(())
    }

    /// Upload a `data:<type>;base64,<payload>` attachment and reference it
    /// in subsequent completions. Returns the backend's file reference.
    pub async fn upload_attachment(&mut self, data_uri: &str) -> Result<String, SessionError> {
        let tenant_id = self.require_tenant()?;
        let decoded = DecodedAttachment::from_data_uri(data_uri)?;
        debug!(
            content_type = %decoded.content_type,
            size = decoded.bytes.len(),
            "uploading attachment"
        );

        let content_type = decoded.upload_content_type().to_string();
        let part = reqwest::multipart::Part::bytes(decoded.bytes)
            .file_name(decoded.file_name)
            .mime_str(&content_type)
            .map_err(|e| SessionError::MalformedAttachment(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(self.url(&format!("/api/{tenant_id}/upload")))
            .header("referer", self.new_page_referer())
            .multipart(form)
            .send()
            .await
            .map_err(network)?;
        let response = check_status(response, &[StatusCode::OK]).await?;
        let uploaded: UploadedFile = response.json().await.map_err(parse)?;

        let file_ref = uploaded
            .file_uuid
            .filter(|id| !id.is_empty())
            .ok_or(SessionError::MissingIdentifier("file_uuid"))?;
        info!(file = %file_ref, name = decoded.file_name, "attachment uploaded");
        self.defaults.push_file(file_ref.clone());
        Ok(file_ref)
    }

    /// Upload several attachments in order, skipping empty entries.
    /// Stops at the first failure; earlier uploads stay referenced.
    pub async fn upload_attachments<T: AsRef<str>>(
        &mut self,
        data_uris: &[T],
    ) -> Result<Vec<String>, SessionError> {
        self.require_tenant()?;
        if data_uris.is_empty() {
            return Err(SessionError::MalformedAttachment(
                "no attachment data".into(),
            ));
        }

        let mut refs = Vec::with_capacity(data_uris.len());
        for data_uri in data_uris {
            let data_uri = data_uri.as_ref();
            if data_uri.is_empty() {
                continue;
            }
            refs.push(self.upload_attachment(data_uri).await?);
        }
        Ok(refs)
    }
}
