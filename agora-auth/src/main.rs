use axum::{routing::{get, post}, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

mod config;
mod models;
mod routes;
mod schema;
mod services;

use agora_shared::clients::db::{create_pool, DbPool};
use agora_shared::middleware::cors_layer;
use config::AppConfig;

pub struct AppState {
    pub db: DbPool,
    pub config: AppConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    agora_shared::middleware::init_tracing("agora-auth");

    let config = AppConfig::load()?;
    let port = config.port;

    let db = create_pool(&config.database_url, config.database_pool_size);
    let state = Arc::new(AppState { db, config });

    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/login", post(routes::login::login))
        .route("/password-reset", post(routes::password_reset::password_reset))
        .route("/resend-verification", post(routes::resend_verification::resend_verification))
        .route("/verify", post(routes::verify::verify))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{port}");
    tracing::info!(addr = %addr, "agora-auth starting");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
