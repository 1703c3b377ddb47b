//! Florarium HTTP server
//!
//! Wires the in-memory store into the axum router and serves it on the
//! address from `FLORARIUM_ADDR` (default `127.0.0.1:8080`).

use std::sync::Arc;

use florarium_core::{ApiState, MemoryStore, create_api_router};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "127.0.0.1:8080";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let addr = std::env::var("FLORARIUM_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());

    let store = Arc::new(MemoryStore::new());
    let state = ApiState::new(store);
    let app = create_api_router().with_state(state);

    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "florarium server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    // Server stops on Ctrl-C; errors installing the handler are fatal anyway
    if signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
