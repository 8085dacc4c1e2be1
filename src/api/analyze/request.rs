// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Multipart upload extraction for image analysis

use axum_extra::extract::Multipart;
use tracing::debug;

use crate::api::errors::ApiError;
use crate::vision::AnalysisRequest;

/// Name of the multipart field carrying the image
pub const IMAGE_FIELD: &str = "image";

/// Read the first `image` part of an upload.
///
/// Other parts are skipped. A missing or empty `image` part is a
/// `MissingImage` error; unreadable multipart framing is `InvalidUpload`.
pub async fn read_image_upload(mut multipart: Multipart) -> Result<AnalysisRequest, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidUpload(e.to_string()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            debug!("Skipping multipart field {:?}", field.name());
            continue;
        }

        debug!(
            "Reading image field: file_name={:?}, content_type={:?}",
            field.file_name(),
            field.content_type()
        );
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::InvalidUpload(e.to_string()))?;

        return AnalysisRequest::from_bytes(data).ok_or(ApiError::MissingImage);
    }

    Err(ApiError::MissingImage)
}
