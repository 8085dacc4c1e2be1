// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::vision::ProviderError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// No `image` part, or an empty one. Detected before any provider call.
    #[error("No image uploaded")]
    MissingImage,

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error("Analysis failed: {0}")]
    AnalysisFailed(#[from] ProviderError),
}

impl ApiError {
    pub fn to_response(&self) -> ErrorResponse {
        let (error, details) = match self {
            ApiError::MissingImage => ("No image uploaded", None),
            ApiError::InvalidUpload(reason) => ("Invalid upload", Some(reason.clone())),
            ApiError::AnalysisFailed(e) => ("Analysis failed", Some(e.to_string())),
        };

        ErrorResponse {
            error: error.to_string(),
            details,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingImage | ApiError::InvalidUpload(_) => StatusCode::BAD_REQUEST,
            ApiError::AnalysisFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_response())).into_response()
    }
}
