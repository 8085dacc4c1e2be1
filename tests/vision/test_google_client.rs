// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! GoogleVisionClient tests against a mock images:annotate server

use serde_json::json;
use vision_gateway::vision::{
    AnalysisRequest, Credentials, FeatureSet, GoogleVisionClient, Likelihood, ProviderError,
    VisionProvider,
};
use wiremock::{
    matchers::{body_json, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

const IMAGE: &[u8] = b"fake-image-bytes";
// base64 of IMAGE
const IMAGE_BASE64: &str = "ZmFrZS1pbWFnZS1ieXRlcw==";

fn expected_request_body() -> serde_json::Value {
    json!({
        "requests": [{
            "image": {"content": IMAGE_BASE64},
            "features": [
                {"type": "LABEL_DETECTION"},
                {"type": "TEXT_DETECTION"},
                {"type": "SAFE_SEARCH_DETECTION"}
            ]
        }]
    })
}

fn image() -> AnalysisRequest {
    AnalysisRequest::from_bytes(IMAGE).unwrap()
}

fn api_key_client(server: &MockServer) -> GoogleVisionClient {
    GoogleVisionClient::new(
        &server.uri(),
        Credentials::ApiKey("test-key".to_string()),
        None,
    )
    .unwrap()
}

// ===== Request shape =====

#[tokio::test]
async fn test_api_key_request_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/images:annotate"))
        .and(query_param("key", "test-key"))
        .and(body_json(expected_request_body()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"responses": [{}]})))
        .expect(1)
        .mount(&server)
        .await;

    let result = api_key_client(&server)
        .analyze(&image(), &FeatureSet::all())
        .await
        .unwrap();

    assert!(result.label_annotations.is_empty());
    assert!(result.text_annotations.is_empty());
    assert!(result.safe_search.is_none());
}

#[tokio::test]
async fn test_access_token_sent_as_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/images:annotate"))
        .and(header("authorization", "Bearer ya29.test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"responses": [{}]})))
        .expect(1)
        .mount(&server)
        .await;

    let client = GoogleVisionClient::new(
        &format!("{}/", server.uri()),
        Credentials::AccessToken("ya29.test-token".to_string()),
        None,
    )
    .unwrap();

    assert!(client.analyze(&image(), &FeatureSet::all()).await.is_ok());
}

// ===== Response parsing =====

#[tokio::test]
async fn test_full_response_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/images:annotate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "responses": [{
                "labelAnnotations": [
                    {"mid": "/m/0k4j", "description": "Car", "score": 0.8675, "topicality": 0.8675},
                    {"mid": "/m/07yv9", "description": "Vehicle", "score": 0.81}
                ],
                "textAnnotations": [
                    {"locale": "en", "description": "TAXI\n42\n", "boundingPoly": {"vertices": []}},
                    {"description": "TAXI"},
                    {"description": "42"}
                ],
                "safeSearchAnnotation": {
                    "adult": "VERY_UNLIKELY",
                    "spoof": "UNLIKELY",
                    "medical": "VERY_UNLIKELY",
                    "violence": "UNLIKELY",
                    "racy": "POSSIBLE"
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = api_key_client(&server)
        .analyze(&image(), &FeatureSet::all())
        .await
        .unwrap();

    assert_eq!(result.label_annotations.len(), 2);
    assert_eq!(result.label_annotations[0].description, "Car");
    assert_eq!(result.full_text(), Some("TAXI\n42\n"));
    assert_eq!(result.text_annotations.len(), 3);
    let safety = result.safe_search.unwrap();
    assert_eq!(safety.adult, Likelihood::VeryUnlikely);
    assert_eq!(safety.racy, Likelihood::Possible);
}

// ===== Error mapping =====

#[tokio::test]
async fn test_http_error_uses_google_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/images:annotate"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {
                "code": 403,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "PERMISSION_DENIED"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = api_key_client(&server)
        .analyze(&image(), &FeatureSet::all())
        .await
        .unwrap_err();

    match err {
        ProviderError::Status { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "API key not valid. Please pass a valid API key.");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_http_error_plain_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = api_key_client(&server)
        .analyze(&image(), &FeatureSet::all())
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Vision provider returned HTTP 502: Bad Gateway"
    );
}

#[tokio::test]
async fn test_in_band_error_fails_whole_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "responses": [{
                "labelAnnotations": [{"description": "Sky", "score": 0.9}],
                "error": {"code": 3, "message": "Bad image data."}
            }]
        })))
        .mount(&server)
        .await;

    let err = api_key_client(&server)
        .analyze(&image(), &FeatureSet::all())
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Annotation { code: 3, .. }));
}

#[tokio::test]
async fn test_empty_responses_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"responses": []})))
        .mount(&server)
        .await;

    let err = api_key_client(&server)
        .analyze(&image(), &FeatureSet::all())
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_non_json_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = api_key_client(&server)
        .analyze(&image(), &FeatureSet::all())
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_unreachable_provider_is_transport_error() {
    let client = GoogleVisionClient::new(
        "http://127.0.0.1:59999",
        Credentials::ApiKey("test-key".to_string()),
        None,
    )
    .unwrap();

    let err = client
        .analyze(&image(), &FeatureSet::all())
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Transport(_)));
}
