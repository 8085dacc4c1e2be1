// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Google Cloud Vision client for the `images:annotate` REST API

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use super::error::ProviderError;
use super::provider::VisionProvider;
use super::types::{
    AnalysisRequest, Feature, FeatureSet, LabelAnnotation, Likelihood, NativeAnnotationResult,
    SafeSearchAnnotation, TextAnnotation,
};

/// Public Google Cloud Vision endpoint
pub const DEFAULT_VISION_ENDPOINT: &str = "https://vision.googleapis.com";

// --- images:annotate serde structs ---

#[derive(Serialize)]
struct AnnotateImagesRequest {
    requests: Vec<AnnotateImageRequest>,
}

#[derive(Serialize)]
struct AnnotateImageRequest {
    image: WireImage,
    features: Vec<WireFeature>,
}

#[derive(Serialize)]
struct WireImage {
    content: String,
}

#[derive(Serialize)]
struct WireFeature {
    #[serde(rename = "type")]
    kind: Feature,
}

#[derive(Deserialize)]
struct BatchAnnotateImagesResponse {
    #[serde(default)]
    responses: Option<Vec<AnnotateImageResponse>>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageResponse {
    #[serde(default)]
    label_annotations: Option<Vec<EntityAnnotation>>,
    #[serde(default)]
    text_annotations: Option<Vec<EntityAnnotation>>,
    #[serde(default)]
    safe_search_annotation: Option<WireSafeSearch>,
    #[serde(default)]
    error: Option<WireStatus>,
}

#[derive(Deserialize)]
struct EntityAnnotation {
    #[serde(default)]
    description: String,
    #[serde(default)]
    score: Option<f64>,
}

// Omitted axes carry the proto default, UNKNOWN
#[derive(Deserialize)]
struct WireSafeSearch {
    #[serde(default)]
    adult: Likelihood,
    #[serde(default)]
    spoof: Likelihood,
    #[serde(default)]
    medical: Likelihood,
    #[serde(default)]
    violence: Likelihood,
    #[serde(default)]
    racy: Likelihood,
}

#[derive(Deserialize)]
struct WireStatus {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: WireStatus,
}

impl AnnotateImageResponse {
    fn into_native(self) -> Result<NativeAnnotationResult, ProviderError> {
        if let Some(status) = self.error.filter(|status| status.code != 0) {
            return Err(ProviderError::Annotation {
                code: status.code,
                message: status.message,
            });
        }

        let label_annotations = self
            .label_annotations
            .unwrap_or_default()
            .into_iter()
            .map(|label| LabelAnnotation {
                description: label.description,
                score: label.score.unwrap_or_default(),
            })
            .collect();

        let text_annotations = self
            .text_annotations
            .unwrap_or_default()
            .into_iter()
            .map(|text| TextAnnotation {
                description: text.description,
            })
            .collect();

        let safe_search = self.safe_search_annotation.map(|s| SafeSearchAnnotation {
            adult: s.adult,
            spoof: s.spoof,
            medical: s.medical,
            violence: s.violence,
            racy: s.racy,
        });

        Ok(NativeAnnotationResult {
            label_annotations,
            text_annotations,
            safe_search,
        })
    }
}

/// Pull the human-readable message out of a Google error body
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| {
            let body = body.trim();
            if body.is_empty() {
                "empty response body".to_string()
            } else {
                body.to_string()
            }
        })
}

// --- Client ---

/// Externally provisioned credentials for the Vision API
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Sent as the `key` query parameter
    ApiKey(String),
    /// OAuth2 access token, sent as a bearer token
    AccessToken(String),
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::ApiKey(_) => f.write_str("ApiKey(<redacted>)"),
            Credentials::AccessToken(_) => f.write_str("AccessToken(<redacted>)"),
        }
    }
}

/// Client for the Google Cloud Vision `images:annotate` endpoint
pub struct GoogleVisionClient {
    client: Client,
    endpoint: String,
    credentials: Credentials,
}

impl GoogleVisionClient {
    /// Create a new client. Without a timeout the HTTP client default applies.
    pub fn new(
        endpoint: &str,
        credentials: Credentials,
        timeout: Option<Duration>,
    ) -> Result<Self, ProviderError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let endpoint = endpoint.trim_end_matches('/').to_string();
        info!(
            "Vision client configured: endpoint={}, credentials={:?}",
            endpoint, credentials
        );

        Ok(Self {
            client,
            endpoint,
            credentials,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn annotate_url(&self) -> String {
        format!("{}/v1/images:annotate", self.endpoint)
    }
}

#[async_trait]
impl VisionProvider for GoogleVisionClient {
    async fn analyze(
        &self,
        request: &AnalysisRequest,
        features: &FeatureSet,
    ) -> Result<NativeAnnotationResult, ProviderError> {
        let start = Instant::now();
        let body = AnnotateImagesRequest {
            requests: vec![AnnotateImageRequest {
                image: WireImage {
                    content: STANDARD.encode(request.image()),
                },
                features: features.iter().map(|kind| WireFeature { kind }).collect(),
            }],
        };

        let http_request = self.client.post(self.annotate_url()).json(&body);
        let http_request = match &self.credentials {
            Credentials::ApiKey(key) => http_request.query(&[("key", key.as_str())]),
            Credentials::AccessToken(token) => http_request.bearer_auth(token),
        };

        let response = http_request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(
            "images:annotate returned {} ({} bytes) in {}ms",
            status,
            text.len(),
            start.elapsed().as_millis()
        );

        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        let batch: BatchAnnotateImagesResponse = serde_json::from_str(&text)
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        batch
            .responses
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::MalformedResponse("no annotation response".to_string()))?
            .into_native()
    }
}
