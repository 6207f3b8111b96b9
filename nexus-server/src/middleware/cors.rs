use crate::state::AppState;
use axum::http::HeaderValue;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

/// Browser front-ends call `/api/chat` cross-origin during development.
pub fn cors_layer(state: &Arc<AppState>) -> CorsLayer {
    let origins = parse_origins(state.config.cors_allowed_origins.as_deref());

    let layer = CorsLayer::new().allow_headers(Any).allow_methods(Any);
    if origins.is_empty() {
        // Wildcard; set NEXUS_CORS_ORIGINS in production.
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(origins)
    }
}

/// Split a comma-separated origin list, skipping blank and invalid entries.
fn parse_origins(list: Option<&str>) -> Vec<HeaderValue> {
    let Some(list) = list else {
        return Vec::new();
    };
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match s.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = s, "ignoring invalid CORS origin");
                None
            }
        })
        .collect()
}
