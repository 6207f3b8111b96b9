//! Unified server error type.
//!
//! Every handler returns `Result<T, ServerError>`, which implements
//! [`axum::response::IntoResponse`] so errors are automatically converted
//! to a [`ChatResponse`] failure body with an appropriate status code.
//!
//! Client-facing messages are German, matching the chat front-end. Internal
//! errors (template rendering, anyhow conversions) are logged with full
//! detail but only a generic message is returned to the caller.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use nexus_types::ChatResponse;
use thiserror::Error;
use tracing::{error, warn};

use crate::provider::ProviderError;

/// Text sent for failures whose details stay in the server log.
pub const GENERIC_ERROR: &str = "Fehler: interner Serverfehler.";

/// All errors that can occur in the nexus-server request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The request body could not be decoded as a chat request.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// The request body exceeded the configured size limit.
    #[error("request body too large")]
    PayloadTooLarge,

    /// `message` was missing, empty or whitespace-only.
    #[error("message is required")]
    MissingMessage,

    /// The provider credential variable (named here) is unset or empty.
    #[error("provider credential `{0}` is not set")]
    MissingCredential(String),

    /// The model answered, but with no text.
    #[error("model returned an empty answer")]
    EmptyAnswer,

    /// Propagated from the hosted model call.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The prompt template failed to render.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// An unclassified internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// HTTP status reported for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::InvalidBody(_) | ServerError::MissingMessage => StatusCode::BAD_REQUEST,
            ServerError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ServerError::EmptyAnswer => StatusCode::BAD_GATEWAY,
            ServerError::MissingCredential(_)
            | ServerError::Provider(_)
            | ServerError::Template(_)
            | ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Translated text placed into the response's `error` field.
    pub fn client_message(&self) -> String {
        match self {
            ServerError::InvalidBody(detail) => {
                format!("Fehler: ungültiger Request-Body ({detail}).")
            }
            ServerError::PayloadTooLarge => "Fehler: Die Nachricht ist zu lang.".to_owned(),
            ServerError::MissingMessage => "Fehler: 'message' ist erforderlich.".to_owned(),
            ServerError::MissingCredential(var) => format!("Server-Setup-Fehler: {var} fehlt."),
            ServerError::EmptyAnswer => "Die Modell-Antwort war leer.".to_owned(),
            ServerError::Provider(e) => format!("Fehler: {e}"),
            ServerError::Template(_) | ServerError::Internal(_) => GENERIC_ERROR.to_owned(),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match &self {
            ServerError::InvalidBody(_) | ServerError::MissingMessage => {}
            ServerError::PayloadTooLarge => warn!("request body over size limit"),
            ServerError::MissingCredential(var) => {
                error!(variable = %var, "provider credential missing; check server setup");
            }
            ServerError::EmptyAnswer => warn!("model returned an empty answer"),
            ServerError::Provider(e) => error!(error = %e, "model provider call failed"),
            ServerError::Template(e) => error!(error = %e, "prompt template failed to render"),
            ServerError::Internal(m) => error!(message = %m, "internal server error"),
        }
        let body = ChatResponse::failure(self.client_message());
        (self.status(), Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(e: anyhow::Error) -> Self {
        // Keep the full chain in the log; clients only see GENERIC_ERROR.
        error!(error = ?e, "converting anyhow error to ServerError::Internal");
        ServerError::Internal(e.to_string())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
