//! Stub provider parts shared by the in-crate tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::config::Config;
use crate::provider::{ChatModel, CredentialSource, ProviderError};
use crate::state::AppState;

/// What the stub model does when called.
pub enum Reply {
    Text(&'static str),
    Fail(&'static str),
    Panic,
}

pub struct StubModel {
    reply: Reply,
    calls: AtomicUsize,
    last_prompt: std::sync::Mutex<Option<String>>,
}

impl StubModel {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
            last_prompt: std::sync::Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for StubModel {
    async fn complete(&self, _api_key: &str, prompt: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_owned());
        match self.reply {
            Reply::Text(text) => Ok(text.to_owned()),
            Reply::Fail(message) => Err(ProviderError::InvalidResponse {
                message: message.to_owned(),
            }),
            Reply::Panic => panic!("stub model exploded"),
        }
    }
}

pub struct StaticCredentials(pub Option<&'static str>);

impl CredentialSource for StaticCredentials {
    fn api_key(&self) -> Option<String> {
        self.0.map(str::to_owned)
    }

    fn describe(&self) -> String {
        "OPENAI_API_KEY".to_owned()
    }
}

pub fn state(model: Arc<StubModel>, key: Option<&'static str>) -> Arc<AppState> {
    let config = Config {
        enable_swagger: false,
        ..Config::default()
    };
    Arc::new(AppState::with_parts(config, model, Arc::new(StaticCredentials(key))).unwrap())
}
