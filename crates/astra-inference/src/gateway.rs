//! Inference gateway: turns an admitted image into model text.
//!
//! The gateway never fails. Any error on the way to the model (JPEG
//! re-encoding, transport, upstream status, response shape) is folded into a
//! diagnostic string that still carries the image's format and dimensions.

use std::fmt::Display;
use std::sync::Arc;
use std::time::Instant;

use base64::Engine;
use tracing::{info, warn};

use astra_core::{defaults, logging, ImageFormat, ImagePayload, Result};

use crate::prompt::SYSTEM_PROMPT;
use crate::vision::VisionBackend;

/// Runs image analysis against a [`VisionBackend`].
#[derive(Clone)]
pub struct InferenceGateway {
    backend: Arc<dyn VisionBackend>,
}

impl InferenceGateway {
    pub fn new(backend: Arc<dyn VisionBackend>) -> Self {
        Self { backend }
    }

    /// Analyze an image with an optional caller prompt.
    ///
    /// Returns the model's text on success and the fallback message otherwise.
    pub async fn analyze(&self, image: &ImagePayload, user_message: Option<&str>) -> String {
        let start = Instant::now();
        let prompt = effective_prompt(user_message);

        match self.call_model(image, prompt).await {
            Ok(text) => {
                info!(
                    { logging::SUBSYSTEM } = "inference",
                    { logging::OPERATION } = "analyze",
                    model = self.backend.model_name(),
                    { logging::IMAGE_FORMAT } = image.format().as_str(),
                    { logging::IMAGE_WIDTH } = image.width(),
                    { logging::IMAGE_HEIGHT } = image.height(),
                    { logging::PROMPT_LEN } = prompt.len(),
                    { logging::RESPONSE_LEN } = text.len(),
                    { logging::DURATION_MS } = start.elapsed().as_millis() as u64,
                    "Image analysis complete"
                );
                text
            }
            Err(e) => {
                warn!(
                    { logging::SUBSYSTEM } = "inference",
                    { logging::OPERATION } = "analyze",
                    model = self.backend.model_name(),
                    error = %e,
                    { logging::DURATION_MS } = start.elapsed().as_millis() as u64,
                    "Model call failed, returning fallback text"
                );
                fallback_message(&e, image)
            }
        }
    }

    async fn call_model(&self, image: &ImagePayload, prompt: &str) -> Result<String> {
        let jpeg = image.encode_jpeg()?;
        let image_url = jpeg_data_uri(&jpeg);
        self.backend
            .describe_image(SYSTEM_PROMPT, prompt, &image_url)
            .await
    }
}

/// The caller's prompt, or the default navigation prompt when absent or empty.
pub fn effective_prompt(user_message: Option<&str>) -> &str {
    match user_message {
        Some(msg) if !msg.is_empty() => msg,
        _ => defaults::DEFAULT_USER_PROMPT,
    }
}

/// Wrap JPEG bytes as a `data:image/jpeg;base64,...` URI.
pub fn jpeg_data_uri(jpeg: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        ImageFormat::Jpeg.mime_type(),
        base64::engine::general_purpose::STANDARD.encode(jpeg)
    )
}

/// Diagnostic text returned in place of a model answer.
pub fn fallback_message(err: &impl Display, image: &ImagePayload) -> String {
    format!(
        "Error calling LLM API: {}. Basic info: {} image with dimensions {}x{}.",
        err,
        image.format(),
        image.width(),
        image.height()
    )
}
