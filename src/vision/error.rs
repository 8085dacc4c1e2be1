// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision provider error types

use thiserror::Error;

/// Failure of the outbound provider call. No partial results survive one.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Vision provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Vision provider returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Vision provider could not annotate image (code {code}): {message}")]
    Annotation { code: i32, message: String },

    #[error("Malformed vision provider response: {0}")]
    MalformedResponse(String),
}
