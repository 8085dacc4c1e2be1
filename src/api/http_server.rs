// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use axum::{extract::DefaultBodyLimit, routing::post, Router};
use std::sync::Arc;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use super::analyze::analyze_handler;
use crate::config::GatewayConfig;
use crate::vision::VisionProvider;

/// Shared, read-only request state
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn VisionProvider>,
}

impl AppState {
    pub fn new(provider: Arc<dyn VisionProvider>) -> Self {
        Self { provider }
    }
}

/// Build the gateway router
pub fn create_app(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/api/analyze", post(analyze_handler))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Serve the gateway until Ctrl-C
pub async fn start_server(config: &GatewayConfig, provider: Arc<dyn VisionProvider>) -> Result<()> {
    let app = create_app(AppState::new(provider), config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!("Gateway server running on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
