//! Llama API vision backend implementation.

use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace};

use astra_core::{defaults, logging, Error, Result};

use super::error::{extract_error_message, to_astra_error, LlamaErrorCode};
use super::types::*;
use crate::vision::VisionBackend;

/// Configuration for the Llama API backend.
#[derive(Debug, Clone)]
pub struct LlamaConfig {
    /// Base URL for the API endpoint.
    pub base_url: String,
    /// API key for bearer authentication. Without one, requests go out
    /// unauthenticated and the upstream rejection surfaces as a failure.
    pub api_key: Option<String>,
    /// Multimodal model identifier.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for LlamaConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::LLAMA_BASE_URL.to_string(),
            api_key: None,
            model: defaults::LLAMA_MODEL.to_string(),
            timeout_seconds: defaults::LLAMA_TIMEOUT_SECS,
        }
    }
}

impl LlamaConfig {
    /// Read configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var(defaults::ENV_LLAMA_BASE_URL)
                .unwrap_or_else(|_| defaults::LLAMA_BASE_URL.to_string()),
            api_key: std::env::var(defaults::ENV_LLAMA_API_KEY)
                .ok()
                .filter(|k| !k.trim().is_empty()),
            model: std::env::var(defaults::ENV_LLAMA_MODEL)
                .ok()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| defaults::LLAMA_MODEL.to_string()),
            timeout_seconds: std::env::var(defaults::ENV_LLAMA_TIMEOUT_SECS)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults::LLAMA_TIMEOUT_SECS),
        }
    }
}

/// Hosted Llama API backend.
pub struct LlamaBackend {
    client: Client,
    config: LlamaConfig,
}

impl LlamaBackend {
    /// Create a new Llama backend with the given configuration.
    pub fn new(config: LlamaConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Inference(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            { logging::SUBSYSTEM } = "inference",
            "Initializing Llama backend: url={}, model={}, timeout={}s, authenticated={}",
            config.base_url,
            config.model,
            config.timeout_seconds,
            config.api_key.is_some()
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(LlamaConfig::from_env())
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), endpoint)
    }

    /// Build a POST request with authentication if configured.
    fn build_request(&self, endpoint: &str) -> reqwest::RequestBuilder {
        let mut req = self.client.post(self.url(endpoint));

        if let Some(ref api_key) = self.config.api_key {
            req = req.header("Authorization", format!("Bearer {}", api_key));
        }

        req.header("Content-Type", "application/json")
    }

    /// Build a GET request with authentication if configured.
    fn build_get_request(&self, endpoint: &str) -> reqwest::RequestBuilder {
        let mut req = self.client.get(self.url(endpoint));

        if let Some(ref api_key) = self.config.api_key {
            req = req.header("Authorization", format!("Bearer {}", api_key));
        }

        req
    }
}

#[async_trait]
impl VisionBackend for LlamaBackend {
    async fn describe_image(&self, system: &str, prompt: &str, image_url: &str) -> Result<String> {
        let start = Instant::now();
        let request = ChatCompletionRequest::vision(&self.config.model, system, prompt, image_url);

        debug!(
            { logging::SUBSYSTEM } = "inference",
            { logging::OPERATION } = "describe_image",
            model = %self.config.model,
            { logging::PROMPT_LEN } = prompt.len(),
            "Sending chat completion"
        );
        trace!({ logging::SUBSYSTEM } = "inference", image_url_len = image_url.len(), "Inline image size");

        let response = self
            .build_request("/chat/completions")
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Request(format!("Llama API request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = extract_error_message(&body);
            let code = LlamaErrorCode::from_response(status.as_u16());
            debug!(
                { logging::SUBSYSTEM } = "inference",
                status = status.as_u16(),
                retryable = code.is_retryable(),
                "Llama API returned an error"
            );
            return Err(to_astra_error(code, status.as_u16(), &message));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Request(format!("Failed to read Llama response: {}", e)))?;
        let parsed: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| Error::Inference(format!("Failed to parse Llama response: {}", e)))?;

        let text = parsed.completion_message.content.text();

        debug!(
            { logging::SUBSYSTEM } = "inference",
            { logging::OPERATION } = "describe_image",
            { logging::RESPONSE_LEN } = text.len(),
            { logging::DURATION_MS } = start.elapsed().as_millis() as u64,
            stop_reason = parsed.completion_message.stop_reason.as_deref().unwrap_or("unknown"),
            "Chat completion received"
        );

        Ok(text.to_string())
    }

    async fn health_check(&self) -> Result<bool> {
        match self.build_get_request("/models").send().await {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(e) => {
                debug!({ logging::SUBSYSTEM } = "inference", error = %e, "Llama health check failed");
                Ok(false)
            }
        }
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
