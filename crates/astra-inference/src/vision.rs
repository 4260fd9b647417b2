//! Vision backend trait for image analysis.

use async_trait::async_trait;
use astra_core::Result;

/// Backend for analyzing images with a multimodal LLM.
#[async_trait]
pub trait VisionBackend: Send + Sync {
    /// Send one system instruction, one user prompt and one image to the model
    /// and return its plain-text reply.
    ///
    /// `image_url` is a complete data URI (`data:image/jpeg;base64,...`).
    async fn describe_image(&self, system: &str, prompt: &str, image_url: &str)
        -> Result<String>;

    /// Check if the vision backend is reachable.
    async fn health_check(&self) -> Result<bool>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}
