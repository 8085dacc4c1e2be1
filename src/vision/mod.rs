// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision analysis via an external provider
//!
//! This module provides:
//! - The provider-native annotation model
//! - The `VisionProvider` capability and its Google Cloud Vision client
//! - Normalization of provider annotations into the stable client contract

pub mod error;
pub mod google;
pub mod normalizer;
pub mod provider;
pub mod types;

pub use error::ProviderError;
pub use google::{Credentials, GoogleVisionClient, DEFAULT_VISION_ENDPOINT};
pub use normalizer::{
    format_confidence, normalize, LabelSummary, SafetySummary, StableAnalysisResult, MAX_LABELS,
    NO_TEXT_DETECTED,
};
pub use provider::VisionProvider;
pub use types::{
    AnalysisRequest, Feature, FeatureSet, LabelAnnotation, Likelihood, NativeAnnotationResult,
    SafeSearchAnnotation, SafetyRating, TextAnnotation,
};
