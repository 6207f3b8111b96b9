//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::config::Config;
use crate::prompt::PromptTemplate;
use crate::provider::{ChatModel, CredentialSource, EnvCredentials, OpenAiChatModel};

/// State shared across all HTTP handlers. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Hosted model used by `POST /api/chat`.
    pub model: Arc<dyn ChatModel>,
    /// Provider key lookup, consulted once per request.
    pub credentials: Arc<dyn CredentialSource>,
    /// Instruction template wrapped around each message.
    pub prompt: Arc<PromptTemplate>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("credentials", &self.credentials.describe())
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Wire the production provider and env-based credentials from `config`.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let model = OpenAiChatModel::from_config(&config)?;
        let credentials = EnvCredentials::new(config.api_key_env.clone());
        Self::with_parts(config, Arc::new(model), Arc::new(credentials))
    }

    /// Assemble state from explicit parts; the prompt template is compiled here.
    pub fn with_parts(
        config: Config,
        model: Arc<dyn ChatModel>,
        credentials: Arc<dyn CredentialSource>,
    ) -> anyhow::Result<Self> {
        let prompt = PromptTemplate::new(config.prompt_template.clone())?;
        Ok(Self {
            config: Arc::new(config),
            model,
            credentials,
            prompt: Arc::new(prompt),
        })
    }
}
