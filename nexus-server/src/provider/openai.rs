//! OpenAI-compatible chat-completions client.
//!
//! Sends one user turn to `POST {base_url}/v1/chat/completions` and extracts
//! the first choice's assistant content. Works against any server speaking
//! the same wire format (OpenAI, Azure-style proxies, local gateways).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{ChatModel, ProviderError};
use crate::config::Config;

const COMPLETIONS_PATH: &str = "/v1/chat/completions";
/// Longest slice of an upstream error body carried into [`ProviderError::Status`].
const MAX_ERROR_BODY_CHARS: usize = 500;

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: [WireMessage<'a>; 1],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<Content>,
}

/// Assistant content is either a plain string or a list of typed parts.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Content {
    Text(String),
    Parts(Vec<serde_json::Value>),
}

impl Content {
    /// Every part contributes one slot to the join; parts without `text`
    /// contribute an empty one.
    fn into_text(self) -> String {
        match self {
            Content::Text(text) => text,
            Content::Parts(parts) => parts
                .iter()
                .map(part_text)
                .collect::<Vec<_>>()
                .join(" ")
                .trim()
                .to_owned(),
        }
    }
}

fn part_text(part: &serde_json::Value) -> String {
    match part.get("text") {
        Some(serde_json::Value::String(text)) => text.clone(),
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// [`ChatModel`] backed by an OpenAI-compatible HTTP API.
#[derive(Debug, Clone)]
pub struct OpenAiChatModel {
    client: Client,
    url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiChatModel {
    pub fn new(
        base_url: &str,
        model: impl Into<String>,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .user_agent(concat!("nexus-server/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            url: format!("{}{COMPLETIONS_PATH}", base_url.trim_end_matches('/')),
            model: model.into(),
            temperature,
            max_tokens,
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self, ProviderError> {
        Self::new(
            &cfg.provider_base_url,
            cfg.model.clone(),
            cfg.temperature,
            cfg.max_tokens,
        )
    }

    /// Full completions endpoint URL (for logging).
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ChatModel for OpenAiChatModel {
    async fn complete(&self, api_key: &str, prompt: &str) -> Result<String, ProviderError> {
        let request = CompletionRequest {
            model: &self.model,
            messages: [WireMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "calling model provider");

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "model provider returned an error status");
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: summarize_error_body(&body),
            });
        }

        let bytes = response.bytes().await?;
        let parsed: CompletionResponse =
            serde_json::from_slice(&bytes).map_err(|e| ProviderError::InvalidResponse {
                message: e.to_string(),
            })?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::InvalidResponse {
                message: "response contained no choices".into(),
            })?;

        Ok(choice
            .message
            .content
            .map(Content::into_text)
            .unwrap_or_default())
    }
}

/// Prefer the provider's own `error.message`; otherwise a bounded prefix of the body.
fn summarize_error_body(body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        return envelope.error.message;
    }
    body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect()
}

// ── Tests ──────────────────────────────────────────────────────────────────────
