// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Analyze endpoint handler

use axum::{extract::State, Json};
use axum_extra::extract::{multipart::MultipartRejection, Multipart};
use tracing::{error, info, warn};

use super::request::read_image_upload;
use super::response::AnalyzeResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::vision::{normalize, FeatureSet};

/// POST /api/analyze - Label, text and safe-search analysis of an image
///
/// Accepts a multipart form with a file field named `image` and runs a
/// single provider call requesting all three features.
///
/// # Response
/// - `success`: always `true`
/// - `data.labels`: up to 5 labels with percentage confidence
/// - `data.text`: full extracted text, or "No text detected in image."
/// - `data.safety`: `adult`, `violence`, `racy` likelihoods (omitted when the
///   provider returned no safe-search annotation)
///
/// # Errors
/// - 400 Bad Request: `{"error": "No image uploaded"}`
/// - 400 Bad Request: `{"error": "Invalid upload", "details": ...}`
/// - 500 Internal Server Error: `{"error": "Analysis failed", "details": ...}`
pub async fn analyze_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    // 1. Extract the image; nothing reaches the provider without one
    let multipart = multipart.map_err(|e| {
        warn!("Analyze request without multipart body: {}", e);
        ApiError::MissingImage
    })?;
    let request = read_image_upload(multipart).await.map_err(|e| {
        warn!("Analyze request rejected: {}", e);
        e
    })?;

    info!(
        "Processing multi-feature analysis ({} bytes)",
        request.size_bytes()
    );

    // 2. One provider call for every feature
    let native = state
        .provider
        .analyze(&request, &FeatureSet::all())
        .await
        .map_err(|e| {
            error!("Vision analysis failed: {}", e);
            ApiError::AnalysisFailed(e)
        })?;

    // 3. Normalize into the stable contract
    let result = normalize(&native);
    info!(
        "Analysis complete: {} labels, text={}, safety={}",
        result.labels.len(),
        native.full_text().is_some(),
        result.safety.is_some()
    );

    Ok(Json(AnalyzeResponse::new(result)))
}
