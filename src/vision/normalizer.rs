// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Normalization of provider annotations into the client-facing contract
//!
//! The normalizer is a pure function over `NativeAnnotationResult`: it never
//! performs I/O and never fails, whatever combination of annotations the
//! provider returned.

use serde::{Deserialize, Serialize};

use super::types::{Likelihood, NativeAnnotationResult, SafeSearchAnnotation};

/// Maximum number of labels returned to the client
pub const MAX_LABELS: usize = 5;

/// Text returned when the provider detected no text
pub const NO_TEXT_DETECTED: &str = "No text detected in image.";

/// A label with its confidence rendered as a percentage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSummary {
    pub description: String,
    /// e.g. "86.8%"
    pub confidence: String,
}

/// The three safety axes exposed to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySummary {
    pub adult: Likelihood,
    pub violence: Likelihood,
    pub racy: Likelihood,
}

impl From<&SafeSearchAnnotation> for SafetySummary {
    fn from(annotation: &SafeSearchAnnotation) -> Self {
        Self {
            adult: annotation.adult,
            violence: annotation.violence,
            racy: annotation.racy,
        }
    }
}

/// Stable analysis result returned by the gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StableAnalysisResult {
    pub labels: Vec<LabelSummary>,
    pub text: String,
    /// Omitted when the provider returned no safe-search annotation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety: Option<SafetySummary>,
}

/// Build the stable result from a provider response.
///
/// Labels keep provider order and are truncated to `MAX_LABELS`.
pub fn normalize(native: &NativeAnnotationResult) -> StableAnalysisResult {
    let labels = native
        .label_annotations
        .iter()
        .take(MAX_LABELS)
        .map(|label| LabelSummary {
            description: label.description.clone(),
            confidence: format_confidence(label.score),
        })
        .collect();

    let text = native
        .full_text()
        .map(str::to_string)
        .unwrap_or_else(|| NO_TEXT_DETECTED.to_string());

    let safety = native.safe_search.as_ref().map(SafetySummary::from);

    StableAnalysisResult {
        labels,
        text,
        safety,
    }
}

/// Render a [0, 1] score as a percentage with one decimal, rounding half up.
///
/// Scores outside [0, 1] are clamped and NaN renders as "0.0%".
pub fn format_confidence(score: f64) -> String {
    let score = if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    };
    // Round to millionths first so a decimal half-way value like 0.8675 is not
    // pulled below the midpoint by its binary representation.
    let millionths = (score * 1_000_000.0).round() as u64;
    let tenths_of_percent = (millionths + 500) / 1_000;
    format!("{}.{}%", tenths_of_percent / 10, tenths_of_percent % 10)
}
