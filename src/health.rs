//! Liveness endpoint served next to the bot.
//!
//! The payload is fixed and never looks at the gateway or the database, so it
//! answers the same whether or not the bot is connected.

use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{debug, info};

pub const SERVICE_NAME: &str = "pipeline-bot";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub ok: bool,
    pub service: String,
}

pub async fn health() -> Json<Health> {
    debug!("Health endpoint accessed");
    Json(Health {
        ok: true,
        service: SERVICE_NAME.to_string(),
    })
}

pub fn router() -> Router {
    Router::new().route("/health", get(health))
}

/// Serves [`router`] on `listener` until `shutdown` flips to `true` (or its sender is dropped).
pub async fn serve(listener: TcpListener, mut shutdown: watch::Receiver<bool>) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("Health endpoint listening on http://{}/health", addr);
    }

    axum::serve(listener, router())
        .with_graceful_shutdown(async move {
            let _ = shutdown.wait_for(|stop| *stop).await;
            info!("Health endpoint shutting down");
        })
        .await
}
