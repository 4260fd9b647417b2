//! Wire-level tests for the Llama backend and the inference gateway.
//!
//! A wiremock server stands in for the Llama API so the exact request shape
//! and the failure folding can be checked without network access.

use std::io::Cursor;
use std::sync::Arc;

use astra_inference::{
    admit, ImagePayload, InferenceGateway, LlamaBackend, LlamaConfig, VisionBackend,
    SYSTEM_PROMPT,
};
use base64::Engine;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend_for(server: &MockServer, api_key: Option<&str>) -> LlamaBackend {
    LlamaBackend::new(LlamaConfig {
        base_url: server.uri(),
        api_key: api_key.map(str::to_string),
        timeout_seconds: 10,
        ..Default::default()
    })
    .expect("Failed to create backend")
}

fn completion(text: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "resp-1",
        "completion_message": {
            "role": "assistant",
            "stop_reason": "stop",
            "content": {"type": "text", "text": text}
        },
        "metrics": [
            {"metric": "num_prompt_tokens", "value": 1203, "unit": "tokens"},
            {"metric": "num_completion_tokens", "value": 42, "unit": "tokens"}
        ]
    })
}

fn png_payload(width: u32, height: u32) -> ImagePayload {
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        width,
        height,
        image::Rgb([120, 80, 40]),
    ));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    let encoded = base64::engine::general_purpose::STANDARD.encode(buf.into_inner());
    admit(&format!("data:image/png;base64,{}", encoded)).unwrap()
}

#[tokio::test]
async fn test_request_carries_fixed_parameters_and_two_messages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer LLM|test-key"))
        .and(header("Content-Type", "application/json"))
        .and(body_partial_json(serde_json::json!({
            "model": "Llama-4-Scout-17B-16E-Instruct-FP8",
            "stream": false,
            "temperature": 0.5,
            "max_completion_tokens": 2048,
            "repetition_penalty": 1,
            "tools": []
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Path is clear.")))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = InferenceGateway::new(Arc::new(backend_for(&server, Some("LLM|test-key"))));
    let text = gateway.analyze(&png_payload(20, 10), Some("Any stairs?")).await;
    assert_eq!(text, "Path is clear.");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();

    let top_p = body["top_p"].as_f64().unwrap();
    assert!((top_p - 0.9).abs() < 1e-6);

    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[0]["content"], SYSTEM_PROMPT);

    assert_eq!(messages[1]["role"], "user");
    let parts = messages[1]["content"].as_array().unwrap();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0]["type"], "text");
    assert_eq!(parts[0]["text"], "Any stairs?");
    assert_eq!(parts[1]["type"], "image_url");

    let url = parts[1]["image_url"]["url"].as_str().unwrap();
    let b64 = url
        .strip_prefix("data:image/jpeg;base64,")
        .expect("image must be sent as a JPEG data URI");
    let jpeg = base64::engine::general_purpose::STANDARD.decode(b64).unwrap();
    assert_eq!(image::guess_format(&jpeg).unwrap(), image::ImageFormat::Jpeg);
}

#[tokio::test]
async fn test_default_prompt_when_no_user_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("ok")))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = InferenceGateway::new(Arc::new(backend_for(&server, Some("k"))));
    gateway.analyze(&png_payload(4, 4), Some("")).await;

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        body["messages"][1]["content"][0]["text"],
        "Please describe this image and provide navigation guidance for a vision-impaired person."
    );
}

#[tokio::test]
async fn test_missing_api_key_sends_no_authorization() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("ok")))
        .mount(&server)
        .await;

    let backend = backend_for(&server, None);
    let text = backend
        .describe_image("sys", "prompt", "data:image/jpeg;base64,/9j/")
        .await
        .unwrap();
    assert_eq!(text, "ok");

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_upstream_401_becomes_fallback_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "title": "Authentication required",
            "status": 401
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = InferenceGateway::new(Arc::new(backend_for(&server, None)));
    let text = gateway.analyze(&png_payload(64, 48), None).await;

    assert!(text.starts_with("Error calling LLM API: "), "got: {}", text);
    assert!(text.contains("Authentication required"));
    assert!(text.ends_with(". Basic info: PNG image with dimensions 64x48."));
}

#[tokio::test]
async fn test_upstream_500_becomes_fallback_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal failure"))
        .mount(&server)
        .await;

    let gateway = InferenceGateway::new(Arc::new(backend_for(&server, Some("k"))));
    let text = gateway.analyze(&png_payload(3, 7), None).await;

    assert!(text.contains("Server error (500): internal failure"));
    assert!(text.ends_with("PNG image with dimensions 3x7."));
}

#[tokio::test]
async fn test_unexpected_response_shape_is_a_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"content": "wrong schema"}}]
        })))
        .mount(&server)
        .await;

    let backend = backend_for(&server, Some("k"));
    let err = backend
        .describe_image("sys", "prompt", "data:image/jpeg;base64,/9j/")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Failed to parse Llama response"));
}

#[tokio::test]
async fn test_empty_completion_text_is_returned_as_is() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("")))
        .mount(&server)
        .await;

    let backend = backend_for(&server, Some("k"));
    let text = backend
        .describe_image("sys", "prompt", "data:image/jpeg;base64,/9j/")
        .await
        .unwrap();
    assert_eq!(text, "");

    let gateway = InferenceGateway::new(Arc::new(backend));
    assert_eq!(gateway.analyze(&png_payload(2, 2), None).await, "");
}

#[tokio::test]
async fn test_unreachable_upstream_becomes_fallback_text() {
    let backend = LlamaBackend::new(LlamaConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        timeout_seconds: 2,
        ..Default::default()
    })
    .unwrap();

    let gateway = InferenceGateway::new(Arc::new(backend));
    let text = gateway.analyze(&png_payload(5, 5), None).await;
    assert!(text.starts_with("Error calling LLM API: Request error: "));
    assert!(text.ends_with("PNG image with dimensions 5x5."));
}

#[tokio::test]
async fn test_health_check_uses_models_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/models"))
        .and(header("Authorization", "Bearer k"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend_for(&server, Some("k"));
    assert!(backend.health_check().await.unwrap());
}
