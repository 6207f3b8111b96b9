//! Axum router construction.
//!
//! [`build`] assembles the complete application router, including:
//! - Middleware layers (panic recovery, CORS, per-request trace span)
//! - Optional Swagger UI / OpenAPI document endpoint (disable with `NEXUS_ENABLE_SWAGGER=false`)
//! - Health route
//! - The chat relay at `POST /api/chat`

pub mod chat;
pub mod doc;
pub mod health;

use axum::extract::DefaultBodyLimit;
use axum::{Router, middleware};
use std::sync::Arc;
use tower::ServiceBuilder;
use utoipa_swagger_ui::SwaggerUi;

use crate::middleware::{cors, panic, trace};
use crate::state::AppState;

/// Build the complete Axum [`Router`] for the application.
pub fn build(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .merge(health::router())
        .merge(chat::router());

    if state.config.enable_swagger {
        app = app.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", doc::get_docs()));
    }

    app
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        // Outermost layers execute first on the way in.
        .layer(panic::catch_panic_layer())
        .layer(ServiceBuilder::new().layer(cors::cors_layer(&state)))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            trace::trace_middleware,
        ))
        .with_state(state)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::Config;
    use crate::error::GENERIC_ERROR;
    use crate::test_support::{Reply, StubModel, state};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use nexus_types::ChatResponse;
    use tower::ServiceExt;

    fn chat_request(body: &'static str) -> Request<Body> {
        Request::post("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn panicking_model_becomes_json_500() {
        let app = build(state(StubModel::new(Reply::Panic), Some("k")));
        let response = app.oneshot(chat_request(r#"{"message":"hello"}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ChatResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.answer, "");
        assert_eq!(body.error.as_deref(), Some(GENERIC_ERROR));
    }

    #[tokio::test]
    async fn request_id_is_echoed_when_valid() {
        let app = build(state(StubModel::new(Reply::Text("hi")), Some("k")));
        let id = "6f1c1f44-4b8e-4f55-9d8a-2a7f2b9f0c11";
        let mut req = chat_request(r#"{"message":"hello"}"#);
        req.headers_mut().insert(trace::X_REQUEST_ID, id.parse().unwrap());

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[trace::X_REQUEST_ID], id);
    }

    #[tokio::test]
    async fn request_id_is_generated_when_absent() {
        let app = build(state(StubModel::new(Reply::Text("hi")), Some("k")));
        let response = app.oneshot(chat_request(r#"{"message":"hello"}"#)).await.unwrap();
        let header = response.headers()[trace::X_REQUEST_ID].to_str().unwrap();
        assert!(uuid::Uuid::parse_str(header).is_ok());
    }

    #[tokio::test]
    async fn openapi_document_lists_chat_route() {
        let model = StubModel::new(Reply::Text("hi"));
        let mut app_state = (*state(model, Some("k"))).clone();
        let mut config = (*app_state.config).clone();
        config.enable_swagger = true;
        app_state.config = Arc::new(config);

        let app = build(Arc::new(app_state));
        let response = app
            .oneshot(Request::get("/api-docs/openapi.json").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(doc["paths"]["/api/chat"]["post"].is_object());
    }

    fn with_config(app_state: Arc<AppState>, edit: impl FnOnce(&mut Config)) -> Arc<AppState> {
        let mut app_state = (*app_state).clone();
        let mut config = (*app_state.config).clone();
        edit(&mut config);
        app_state.config = Arc::new(config);
        Arc::new(app_state)
    }

    #[tokio::test]
    async fn oversized_body_is_rejected_as_json() {
        let model = StubModel::new(Reply::Text("unused"));
        let app_state = with_config(state(model.clone(), Some("k")), |c| c.max_body_bytes = 1024);
        let app = build(app_state);

        let body = format!(r#"{{"message":"{}"}}"#, "x".repeat(4096));
        let request = Request::post("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(response.headers().contains_key(trace::X_REQUEST_ID));
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ChatResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.answer, "");
        assert_eq!(body.error.as_deref(), Some("Fehler: Die Nachricht ist zu lang."));
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn body_limit_above_default_is_honoured() {
        let model = StubModel::new(Reply::Text("ok"));
        let app_state = with_config(state(model.clone(), Some("k")), |c| c.max_body_bytes = 4 * 1024 * 1024);
        let app = build(app_state);

        let body = format!(r#"{{"message":"{}"}}"#, "x".repeat(3 * 1024 * 1024));
        let request = Request::post("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(model.calls(), 1);
    }

    #[tokio::test]
    async fn wildcard_cors_when_no_origins_configured() {
        let app = build(state(StubModel::new(Reply::Text("hi")), Some("k")));
        let mut req = chat_request(r#"{"message":"hello"}"#);
        req.headers_mut().insert("origin", "https://any.example".parse().unwrap());

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }

    #[tokio::test]
    async fn cors_allow_list_only_admits_listed_origins() {
        let app_state = with_config(state(StubModel::new(Reply::Text("hi")), Some("k")), |c| {
            c.cors_allowed_origins = Some("https://a.example, https://b.example".into())
        });

        let mut allowed = chat_request(r#"{"message":"hello"}"#);
        allowed.headers_mut().insert("origin", "https://b.example".parse().unwrap());
        let response = build(app_state.clone()).oneshot(allowed).await.unwrap();
        assert_eq!(response.headers()["access-control-allow-origin"], "https://b.example");

        let mut other = chat_request(r#"{"message":"hello"}"#);
        other.headers_mut().insert("origin", "https://evil.example".parse().unwrap());
        let response = build(app_state).oneshot(other).await.unwrap();
        assert!(!response.headers().contains_key("access-control-allow-origin"));
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let app = build(state(StubModel::new(Reply::Text("hi")), Some("k")));
        let response = app
            .oneshot(Request::get("/api/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
