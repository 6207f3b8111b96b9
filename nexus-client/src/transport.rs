//! How a chat message reaches the relay.

use async_trait::async_trait;
use nexus_types::{ChatRequest, ChatResponse};
use reqwest::{Client, Url};
use tracing::debug;

use crate::error::ClientError;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/api/chat";

/// Sends one message and returns the relayed answer.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, message: &str) -> Result<String, ClientError>;
}

/// [`ChatTransport`] that POSTs `{"message": ...}` to the relay endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
}

impl HttpTransport {
    pub fn new(endpoint: &str) -> Result<Self, ClientError> {
        let endpoint = Url::parse(endpoint).map_err(|e| ClientError::InvalidEndpoint {
            url: endpoint.to_owned(),
            message: e.to_string(),
        })?;
        let client = Client::builder()
            .user_agent(concat!("nexus-chat/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Probe `GET /health` on the endpoint's host.
    pub async fn check_backend(&self) -> Result<bool, ClientError> {
        let health = self
            .endpoint
            .join("/health")
            .map_err(|e| ClientError::InvalidEndpoint {
                url: self.endpoint.to_string(),
                message: e.to_string(),
            })?;
        let response = self.client.get(health).send().await?;
        Ok(response.status().is_success())
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, message: &str) -> Result<String, ClientError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&ChatRequest::new(message))
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(%status, size = bytes.len(), "chat response received");

        let body: ChatResponse = match serde_json::from_slice(&bytes) {
            Ok(body) => body,
            Err(_) if !status.is_success() => return Err(ClientError::Status(status.as_u16())),
            Err(e) => {
                return Err(ClientError::InvalidResponse {
                    status: status.as_u16(),
                    message: e.to_string(),
                });
            }
        };

        if let Some(message) = body.error.filter(|m| !m.trim().is_empty()) {
            return Err(ClientError::Server {
                status: status.as_u16(),
                message,
            });
        }
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }
        if body.answer.trim().is_empty() {
            return Err(ClientError::EmptyAnswer);
        }
        Ok(body.answer)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
