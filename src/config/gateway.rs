// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Gateway startup configuration
//!
//! Every flag can also be set through the environment (or a `.env` file
//! loaded by the binary). The resulting `GatewayConfig` is immutable and
//! passed explicitly to the server.

use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::vision::{Credentials, DEFAULT_VISION_ENDPOINT};

/// Maximum accepted request body (10MB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("No vision credentials configured: set VISION_API_KEY or VISION_ACCESS_TOKEN")]
    MissingCredentials,

    #[error("Both VISION_API_KEY and VISION_ACCESS_TOKEN are set; configure only one")]
    ConflictingCredentials,

    #[error("Invalid vision endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("max upload size must be greater than zero")]
    ZeroUploadLimit,
}

/// Vision Gateway server
#[derive(Parser, Debug, Clone)]
#[command(name = "vision-gateway")]
#[command(about = "Image analysis gateway: labels, text and safe-search in one call", long_about = None)]
pub struct GatewayArgs {
    /// Address to listen on
    #[arg(long, env = "GATEWAY_LISTEN_ADDR", default_value = "127.0.0.1:5000")]
    pub listen_addr: SocketAddr,

    /// Maximum request body size in bytes
    #[arg(long, env = "GATEWAY_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,

    /// Base URL of the vision provider
    #[arg(long, env = "VISION_ENDPOINT", default_value = DEFAULT_VISION_ENDPOINT)]
    pub vision_endpoint: String,

    /// Vision API key
    #[arg(long, env = "VISION_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// OAuth2 access token for the vision provider
    #[arg(long, env = "VISION_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Provider request timeout in seconds (HTTP client default when unset)
    #[arg(long, env = "VISION_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

/// Validated, read-only gateway configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub listen_addr: SocketAddr,
    pub max_upload_bytes: usize,
    pub vision_endpoint: String,
    pub credentials: Credentials,
    pub provider_timeout: Option<Duration>,
}

impl GatewayConfig {
    pub fn from_args(args: GatewayArgs) -> Result<Self, ConfigError> {
        let credentials = match (non_empty(args.api_key), non_empty(args.access_token)) {
            (Some(key), None) => Credentials::ApiKey(key),
            (None, Some(token)) => Credentials::AccessToken(token),
            (Some(_), Some(_)) => return Err(ConfigError::ConflictingCredentials),
            (None, None) => return Err(ConfigError::MissingCredentials),
        };

        let endpoint = Url::parse(&args.vision_endpoint).map_err(|e| {
            ConfigError::InvalidEndpoint {
                endpoint: args.vision_endpoint.clone(),
                reason: e.to_string(),
            }
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEndpoint {
                endpoint: args.vision_endpoint,
                reason: format!("unsupported scheme '{}'", endpoint.scheme()),
            });
        }

        if args.max_upload_bytes == 0 {
            return Err(ConfigError::ZeroUploadLimit);
        }

        Ok(Self {
            listen_addr: args.listen_addr,
            max_upload_bytes: args.max_upload_bytes,
            vision_endpoint: args.vision_endpoint,
            credentials,
            provider_timeout: args.timeout_secs.map(Duration::from_secs),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
