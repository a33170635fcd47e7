use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

/// CORS policy for the public endpoints: any origin, POST plus the OPTIONS
/// preflight (GET is allowed for the health probes only).
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS, Method::GET])
        .allow_headers(Any)
}
