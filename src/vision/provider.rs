// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision provider capability

use async_trait::async_trait;

use super::error::ProviderError;
use super::types::{AnalysisRequest, FeatureSet, NativeAnnotationResult};

/// An external service that annotates images.
///
/// Implementations make exactly one outbound call per `analyze` and never
/// retry. A failed call yields no result at all.
#[async_trait]
pub trait VisionProvider: Send + Sync {
    async fn analyze(
        &self,
        request: &AnalysisRequest,
        features: &FeatureSet,
    ) -> Result<NativeAnnotationResult, ProviderError>;
}
