//! namesweep daemon: HTTP front-end over the batch probing engine.

mod config;

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use sweep_api::{EngineHandler, HttpApi};
use sweep_client::{ClientConfig, WebProfileClient};
use sweep_engine::{BatchConfig, ProbeEngine, SessionRegistry};
use sweep_observe::logger_init;

use crate::config::DaemonConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = DaemonConfig::from_env()?;
    logger_init(&config.logger)?;

    let lookup = WebProfileClient::new(ClientConfig {
        endpoint: config.endpoint.clone(),
    })
    .context("failed to build lookup client")?;

    let engine = ProbeEngine::new(
        Arc::new(lookup),
        SessionRegistry::new(),
        BatchConfig::default(),
    );
    let router = HttpApi::new(Arc::new(EngineHandler::new(engine))).router();

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, endpoint = %config.endpoint, "sweepd listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("sweepd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
