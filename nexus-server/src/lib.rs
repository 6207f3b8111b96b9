//! nexus-server: HTTP relay between a chat front-end and a hosted language model.
//!
//! `POST /api/chat` takes `{"message": ...}`, wraps it in an instruction
//! template, forwards it to an OpenAI-compatible provider using a key read
//! from the environment and answers `{"answer": ...}` or
//! `{"answer": "", "error": ...}`.

pub mod config;
pub mod error;
pub mod middleware;
pub mod prompt;
pub mod provider;
pub mod routes;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::Config;
pub use error::ServerError;
pub use state::AppState;
