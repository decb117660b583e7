use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::conversation::Message;
use super::error::ServiceError;
use crate::constants::{API_KEY_ENV, ERROR_BODY_MAX_LEN};

/// A chat-completion request: the whole conversation plus sampling settings.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Message],
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Something that can turn a conversation into a single text reply.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String, ServiceError>;
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiClient {
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionBackend for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String, ServiceError> {
        let url = self.endpoint();
        tracing::debug!(%url, model = request.model, messages = request.messages.len(), "sending completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| ServiceError(format!("Failed to connect to completion API: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(ServiceError(describe_failure(status, &body_text)));
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| ServiceError(format!("Malformed completion response: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ServiceError("Completion response contained no reply".to_string()))
    }
}

/// Turn a non-success HTTP response into a human-readable message.
///
/// Prefers the provider's own `error.message` over the raw body.
fn describe_failure(status: StatusCode, body: &str) -> String {
    let provider_message = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        v.get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
            .map(str::to_string)
    });

    match status.as_u16() {
        401 => format!(
            "Authentication failed (401). Check that {} holds a valid key.",
            API_KEY_ENV
        ),
        429 => match provider_message {
            Some(msg) => format!("Rate limited (429): {}", msg),
            None => "Rate limited (429). Wait a moment and try again.".to_string(),
        },
        _ => match provider_message {
            Some(msg) => format!("API error {}: {}", status, msg),
            None => format!(
                "API error {}: {}",
                status,
                crate::utils::truncate_str(body.trim(), ERROR_BODY_MAX_LEN)
            ),
        },
    }
}
