//! Per-request tracing span with a request id.
//!
//! The id is taken from an incoming `x-request-id` header when it parses as a
//! UUID, otherwise a fresh one is generated. It is forwarded to the handler
//! and echoed on the response. Request bodies are buffered up to
//! `max_body_bytes`; larger ones are answered with a JSON 413 before the
//! handler runs.

use crate::error::ServerError;
use crate::state::AppState;
use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

pub static X_REQUEST_ID: &str = "x-request-id";

/// JSON bodies up to this size are logged at `debug`.
const MAX_LOGGED_BODY: usize = 1024;

pub async fn trace_middleware(
    State(state): State<Arc<AppState>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let start_time = Instant::now();

    let request_id = req
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);

    let span = info_span!(
        "http_request",
        request_id = %request_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    async move {
        info!("→ request started");
        let header_value = HeaderValue::from_str(&request_id.to_string()).ok();

        let (parts, body) = req.into_parts();
        let response = match buffer_request(&parts.headers, body, state.config.max_body_bytes).await {
            Ok(req_bytes) => {
                let mut req = Request::from_parts(parts, Body::from(req_bytes));
                if let Some(value) = &header_value {
                    req.headers_mut().insert(X_REQUEST_ID, value.clone());
                }
                next.run(req).await
            }
            Err(e) => e.into_response(),
        };

        let (parts, body) = response.into_parts();
        let res_bytes = buffer_response(&parts.headers, body).await;
        let mut response = Response::from_parts(parts, Body::from(res_bytes));
        if let Some(value) = header_value {
            response.headers_mut().insert(X_REQUEST_ID, value);
        }

        info!(
            status = response.status().as_u16(),
            latency_ms = start_time.elapsed().as_millis(),
            "← response finished"
        );

        response
    }
    .instrument(span)
    .await
}

/// Buffer at most `limit` bytes of a request body so it can be logged and
/// re-attached.
async fn buffer_request(headers: &HeaderMap, body: Body, limit: usize) -> Result<Bytes, ServerError> {
    match Limited::new(body, limit).collect().await {
        Ok(collected) => {
            let bytes = collected.to_bytes();
            log_body("request", headers, &bytes);
            Ok(bytes)
        }
        Err(e) if e.is::<LengthLimitError>() => Err(ServerError::PayloadTooLarge),
        Err(e) => {
            warn!(error = %e, "failed to buffer request body");
            Err(ServerError::InvalidBody(e.to_string()))
        }
    }
}

async fn buffer_response(headers: &HeaderMap, body: Body) -> Bytes {
    match body.collect().await {
        Ok(collected) => {
            let bytes = collected.to_bytes();
            log_body("response", headers, &bytes);
            bytes
        }
        Err(e) => {
            warn!(error = %e, "failed to buffer response body");
            Bytes::new()
        }
    }
}

fn log_body(direction: &str, headers: &HeaderMap, bytes: &Bytes) {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if content_type.contains("application/json") && bytes.len() <= MAX_LOGGED_BODY {
        if let Ok(text) = std::str::from_utf8(bytes) {
            debug!(direction, body = %text, "body");
        }
    } else if !bytes.is_empty() {
        debug!(direction, content_type, size = bytes.len(), "body skipped");
    }
}
