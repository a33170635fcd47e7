use axum::Json;
use agora_shared::types::api::HealthResponse;

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy("agora-feedback", env!("CARGO_PKG_VERSION")))
}
