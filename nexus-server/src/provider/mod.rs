//! Hosted model provider seam.
//!
//! The chat route only ever sees two traits:
//! - [`ChatModel`] turns a rendered prompt into the model's text answer.
//! - [`CredentialSource`] yields the provider API key for the current request.
//!
//! [`OpenAiChatModel`] and [`EnvCredentials`] are the production implementations.

pub mod openai;

use async_trait::async_trait;
use thiserror::Error;

pub use openai::OpenAiChatModel;

/// Errors raised while talking to the model provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request never produced a response (DNS, connect, TLS, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The provider's response did not have the expected shape.
    #[error("invalid provider response: {message}")]
    InvalidResponse { message: String },
}

/// A single-shot completion call against a hosted language model.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send `prompt` as one user turn and return the assistant text as-is.
    ///
    /// An empty string is a valid return value; the caller decides how to
    /// report it.
    async fn complete(&self, api_key: &str, prompt: &str) -> Result<String, ProviderError>;
}

/// Where the provider API key comes from.
pub trait CredentialSource: Send + Sync {
    /// The key, or `None` when it is not configured. Empty keys count as missing.
    fn api_key(&self) -> Option<String>;

    /// Name shown to operators when the key is missing.
    fn describe(&self) -> String;
}

/// Reads the API key from an environment variable on every call, so a key
/// exported after startup is picked up by the next request.
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    var: String,
}

impl EnvCredentials {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl CredentialSource for EnvCredentials {
    fn api_key(&self) -> Option<String> {
        std::env::var(&self.var)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    fn describe(&self) -> String {
        self.var.clone()
    }
}
