//! Liveness endpoint served next to the bot.

use axum::{routing::get, Json, Router};
use serde::Serialize;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

pub const STATUS_MESSAGE: &str = "Perfect Fit bot running";

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: STATUS_MESSAGE,
    })
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
}

/// Bind `addr` and serve the health router until the listener fails
pub async fn serve(addr: SocketAddr) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Health endpoint listening");

    axum::serve(listener, router()).await?;
    Ok(())
}
