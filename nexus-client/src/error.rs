use thiserror::Error;

/// Errors returned by a [`crate::ChatTransport`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never got a response (connect, DNS, TLS, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint URL could not be parsed.
    #[error("invalid endpoint URL `{url}`: {message}")]
    InvalidEndpoint { url: String, message: String },

    /// The server reported a failure with a translated message.
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },

    /// Non-2xx status without an `error` field.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// The body was not a chat response.
    #[error("invalid response body (HTTP {status}): {message}")]
    InvalidResponse { status: u16, message: String },

    /// 2xx with an empty `answer`.
    #[error("server returned an empty answer")]
    EmptyAnswer,
}

impl ClientError {
    /// The server's own message, when it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Server { message, .. } => Some(message),
            _ => None,
        }
    }
}
