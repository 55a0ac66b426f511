use tower_http::cors::{Any, CorsLayer};

/// Build the CORS layer. The dashboard and the preview frame are served
/// from other origins than the API.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
