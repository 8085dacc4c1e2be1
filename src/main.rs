// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vision_gateway::{
    api::start_server,
    config::{GatewayArgs, GatewayConfig},
    vision::GoogleVisionClient,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up VISION_* / GATEWAY_* settings from a local .env if present
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = GatewayConfig::from_args(GatewayArgs::parse())?;
    info!(
        "Starting {} (provider: {})",
        vision_gateway::version::get_version_string(),
        config.vision_endpoint
    );

    let provider = GoogleVisionClient::new(
        &config.vision_endpoint,
        config.credentials.clone(),
        config.provider_timeout,
    )?;

    start_server(&config, Arc::new(provider)).await
}
