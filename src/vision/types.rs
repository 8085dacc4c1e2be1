// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Provider-native annotation model and the analysis request payload

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Image analysis features that can be requested from a vision provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Feature {
    LabelDetection,
    TextDetection,
    SafeSearchDetection,
}

impl Feature {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::LabelDetection => "LABEL_DETECTION",
            Feature::TextDetection => "TEXT_DETECTION",
            Feature::SafeSearchDetection => "SAFE_SEARCH_DETECTION",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered, duplicate-free set of features for a single provider call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSet {
    features: Vec<Feature>,
}

impl FeatureSet {
    /// Label, text and safe-search detection in one round trip
    pub fn all() -> Self {
        Self {
            features: vec![
                Feature::LabelDetection,
                Feature::TextDetection,
                Feature::SafeSearchDetection,
            ],
        }
    }

    pub fn contains(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }

    pub fn iter(&self) -> impl Iterator<Item = Feature> + '_ {
        self.features.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl FromIterator<Feature> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        let mut features = Vec::new();
        for feature in iter {
            if !features.contains(&feature) {
                features.push(feature);
            }
        }
        Self { features }
    }
}

/// Uploaded image payload. Never empty.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    image: Bytes,
}

impl AnalysisRequest {
    /// Wrap uploaded bytes, returning `None` for an empty upload
    pub fn from_bytes(image: impl Into<Bytes>) -> Option<Self> {
        let image = image.into();
        if image.is_empty() {
            return None;
        }
        Some(Self { image })
    }

    pub fn image(&self) -> &[u8] {
        &self.image
    }

    pub fn size_bytes(&self) -> usize {
        self.image.len()
    }
}

/// Categorical likelihood reported per safe-search axis.
///
/// Ordered `VERY_UNLIKELY < UNLIKELY < POSSIBLE < LIKELY < VERY_LIKELY`.
/// `UNKNOWN` is the provider's "could not decide" value and sorts lowest.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Likelihood {
    #[default]
    Unknown,
    VeryUnlikely,
    Unlikely,
    Possible,
    Likely,
    VeryLikely,
}

/// Display band for a likelihood value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafetyRating {
    Safe,
    Caution,
    Unsafe,
    Unknown,
}

impl Likelihood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Likelihood::Unknown => "UNKNOWN",
            Likelihood::VeryUnlikely => "VERY_UNLIKELY",
            Likelihood::Unlikely => "UNLIKELY",
            Likelihood::Possible => "POSSIBLE",
            Likelihood::Likely => "LIKELY",
            Likelihood::VeryLikely => "VERY_LIKELY",
        }
    }

    /// Presentation band: unlikely values are safe, possible is caution,
    /// likely values are unsafe
    pub fn rating(&self) -> SafetyRating {
        match self {
            Likelihood::VeryUnlikely | Likelihood::Unlikely => SafetyRating::Safe,
            Likelihood::Possible => SafetyRating::Caution,
            Likelihood::Likely | Likelihood::VeryLikely => SafetyRating::Unsafe,
            Likelihood::Unknown => SafetyRating::Unknown,
        }
    }

    /// Label for display only, with any `VERY_` prefix removed
    pub fn display_label(&self) -> &'static str {
        let label = self.as_str();
        label.strip_prefix("VERY_").unwrap_or(label)
    }
}

impl fmt::Display for Likelihood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected object/concept tag
#[derive(Debug, Clone, PartialEq)]
pub struct LabelAnnotation {
    pub description: String,
    /// Confidence in [0, 1]
    pub score: f64,
}

/// A detected text region. The first one in a result holds the full text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextAnnotation {
    pub description: String,
}

/// Safe-search likelihoods as reported by the provider, all axes included
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SafeSearchAnnotation {
    pub adult: Likelihood,
    pub spoof: Likelihood,
    pub medical: Likelihood,
    pub violence: Likelihood,
    pub racy: Likelihood,
}

/// Everything a provider returned for one image.
///
/// Absent annotations mean "nothing detected", never an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NativeAnnotationResult {
    /// Provider order, expected to be descending by score
    pub label_annotations: Vec<LabelAnnotation>,
    pub text_annotations: Vec<TextAnnotation>,
    pub safe_search: Option<SafeSearchAnnotation>,
}

impl NativeAnnotationResult {
    /// Full extracted text block, if any text was detected
    pub fn full_text(&self) -> Option<&str> {
        self.text_annotations
            .first()
            .map(|annotation| annotation.description.as_str())
    }
}
