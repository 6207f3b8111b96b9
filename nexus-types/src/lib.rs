//! Types shared by the NEXUS chat endpoint and its clients.
//!
//! - [`chat`]: the `POST /api/chat` request / response bodies.
//! - [`message`]: transcript entries kept by the client.

pub mod chat;
pub mod message;

pub use chat::{ChatRequest, ChatResponse};
pub use message::{Message, Role};
