//! The chat relay route (`POST /api/chat`).
//!
//! Wraps the user's message in the configured instruction template, sends it
//! to the hosted model as a single user turn and relays the text answer.
//! Each call is independent: no history, no retries, no caching.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use nexus_types::{ChatRequest, ChatResponse};
use tracing::{debug, info};
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(chat),
    components(schemas(ChatRequest, ChatResponse))
)]
pub struct ChatApi;

/// Register the chat route.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/chat", post(chat))
}

/// Relay one message to the model (`POST /api/chat`).
///
/// The body is parsed from raw bytes; `Content-Type` is not required. A JSON
/// body that is not an object carries no message.
#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Model answered", body = ChatResponse),
        (status = 400, description = "Missing message or malformed body", body = ChatResponse),
        (status = 413, description = "Request body too large", body = ChatResponse),
        (status = 500, description = "Missing credential or provider failure", body = ChatResponse),
        (status = 502, description = "Model returned an empty answer", body = ChatResponse),
    )
)]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ChatResponse>, ServerError> {
    let body = body.map_err(|rejection| match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => ServerError::PayloadTooLarge,
        _ => ServerError::InvalidBody(rejection.body_text()),
    })?;
    let req = parse_request(&body)?;

    let message = req.trimmed_message().ok_or(ServerError::MissingMessage)?;

    let api_key = state
        .credentials
        .api_key()
        .ok_or_else(|| ServerError::MissingCredential(state.credentials.describe()))?;

    let prompt = state.prompt.render(message)?;
    debug!(message_len = message.len(), prompt_len = prompt.len(), "chat request");

    let answer = state.model.complete(&api_key, &prompt).await?;
    let answer = answer.trim();
    if answer.is_empty() {
        return Err(ServerError::EmptyAnswer);
    }

    info!(answer_len = answer.len(), "chat answer relayed");
    Ok(Json(ChatResponse::success(answer)))
}

fn parse_request(body: &[u8]) -> Result<ChatRequest, ServerError> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| ServerError::InvalidBody(e.to_string()))?;
    if !value.is_object() {
        return Ok(ChatRequest::default());
    }
    serde_json::from_value(value).map_err(|e| ServerError::InvalidBody(e.to_string()))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
