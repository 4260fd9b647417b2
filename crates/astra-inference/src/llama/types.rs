//! Llama API request and response types.

use astra_core::defaults;
use serde::{Deserialize, Serialize};

// =============================================================================
// CHAT COMPLETION REQUEST
// =============================================================================

/// Request body for the chat completions endpoint.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
    pub temperature: f32,
    pub max_completion_tokens: u32,
    pub top_p: f32,
    pub repetition_penalty: u32,
    pub tools: Vec<serde_json::Value>,
}

impl ChatCompletionRequest {
    /// System instruction + one user turn carrying a prompt and an image,
    /// with the fixed sampling parameters used for every analysis.
    pub fn vision(model: &str, system: &str, prompt: &str, image_url: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: MessageContent::Text(system.to_string()),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: MessageContent::Parts(vec![
                        ContentPart::Text {
                            text: prompt.to_string(),
                        },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl {
                                url: image_url.to_string(),
                            },
                        },
                    ]),
                },
            ],
            stream: false,
            temperature: defaults::LLAMA_TEMPERATURE,
            max_completion_tokens: defaults::LLAMA_MAX_COMPLETION_TOKENS,
            top_p: defaults::LLAMA_TOP_P,
            repetition_penalty: defaults::LLAMA_REPETITION_PENALTY,
            tools: Vec::new(),
        }
    }
}

/// A single role-tagged chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: MessageContent,
}

/// Message content: a bare string or a list of typed parts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

/// One typed part of a multimodal user message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

// =============================================================================
// CHAT COMPLETION RESPONSE
// =============================================================================

/// Response from the chat completions endpoint.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: Option<String>,
    pub completion_message: CompletionMessage,
    #[serde(default)]
    pub metrics: Vec<CompletionMetric>,
}

/// The assistant message produced by the model.
#[derive(Debug, Deserialize)]
pub struct CompletionMessage {
    #[serde(default)]
    pub role: Option<String>,
    pub content: CompletionContent,
    #[serde(default)]
    pub stop_reason: Option<String>,
}

/// Completion content: normally `{"type": "text", "text": ...}`, tolerated as
/// a bare string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CompletionContent {
    Typed {
        #[serde(rename = "type", default)]
        content_type: Option<String>,
        text: String,
    },
    Plain(String),
}

impl CompletionContent {
    pub fn text(&self) -> &str {
        match self {
            CompletionContent::Typed { text, .. } => text,
            CompletionContent::Plain(text) => text,
        }
    }
}

/// Usage metric reported alongside a completion.
#[derive(Debug, Deserialize)]
pub struct CompletionMetric {
    pub metric: String,
    pub value: f64,
    #[serde(default)]
    pub unit: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vision_request_serialization() {
        let request = ChatCompletionRequest::vision(
            defaults::LLAMA_MODEL,
            "You are helpful.",
            "What is this?",
            "data:image/jpeg;base64,AAAA",
        );

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "Llama-4-Scout-17B-16E-Instruct-FP8");
        assert_eq!(json["stream"], false);
        assert_eq!(json["temperature"], 0.5);
        assert_eq!(json["max_completion_tokens"], 2048);
        assert_eq!(json["top_p"].as_f64().unwrap() as f32, 0.9);
        assert_eq!(json["repetition_penalty"], 1);
        assert_eq!(json["tools"], serde_json::json!([]));

        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], "You are helpful.");

        let user = &json["messages"][1];
        assert_eq!(user["role"], "user");
        assert_eq!(user["content"][0]["type"], "text");
        assert_eq!(user["content"][0]["text"], "What is this?");
        assert_eq!(user["content"][1]["type"], "image_url");
        assert_eq!(
            user["content"][1]["image_url"]["url"],
            "data:image/jpeg;base64,AAAA"
        );
    }

    #[test]
    fn test_completion_response_deserialization() {
        let json = r#"{
            "id": "AhFwk8ScYjc",
            "completion_message": {
                "role": "assistant",
                "stop_reason": "stop",
                "content": {"type": "text", "text": "Path is clear for 12 feet."}
            },
            "metrics": [
                {"metric": "num_completion_tokens", "value": 8, "unit": "tokens"}
            ]
        }"#;

        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.id.as_deref(), Some("AhFwk8ScYjc"));
        assert_eq!(
            response.completion_message.content.text(),
            "Path is clear for 12 feet."
        );
        assert_eq!(
            response.completion_message.stop_reason.as_deref(),
            Some("stop")
        );
        assert_eq!(response.metrics[0].metric, "num_completion_tokens");
    }

    #[test]
    fn test_completion_content_plain_string() {
        let json = r#"{"completion_message": {"content": "hello"}}"#;
        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.completion_message.content.text(), "hello");
        assert!(response.metrics.is_empty());
    }

    #[test]
    fn test_response_without_completion_message_fails() {
        let json = r#"{"choices": []}"#;
        assert!(serde_json::from_str::<ChatCompletionResponse>(json).is_err());
    }
}
