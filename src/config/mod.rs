// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod gateway;

pub use gateway::{ConfigError, GatewayArgs, GatewayConfig, DEFAULT_MAX_UPLOAD_BYTES};
