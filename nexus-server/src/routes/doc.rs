use crate::routes::{chat, health};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(info(
    title = "nexus-server",
    description = "NEXUS chat relay API",
    version = "0.1.0",
))]
pub struct ApiDoc;

/// Merged OpenAPI document for every public route.
pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(chat::ChatApi::openapi());
    root.merge(health::HealthApi::openapi());
    root
}
