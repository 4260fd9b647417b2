//! # astra-inference
//!
//! Multimodal inference for the Astra vision API.
//!
//! This crate provides:
//! - The [`VisionBackend`] trait for image + prompt → text models
//! - A Llama API implementation ([`LlamaBackend`])
//! - The [`InferenceGateway`], which normalizes images to JPEG, builds the
//!   request, and folds upstream failures into a diagnostic string
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use astra_inference::{InferenceGateway, LlamaBackend};
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = LlamaBackend::from_env().unwrap();
//!     let gateway = InferenceGateway::new(Arc::new(backend));
//!     let image = astra_inference::admit("iVBORw0KGgo...").unwrap();
//!     let text = gateway.analyze(&image, None).await;
//!     println!("{}", text);
//! }
//! ```

pub mod gateway;
pub mod llama;
pub mod prompt;
pub mod vision;

// Re-export core types
pub use astra_core::*;

pub use gateway::{effective_prompt, fallback_message, jpeg_data_uri, InferenceGateway};
pub use llama::{LlamaBackend, LlamaConfig};
pub use prompt::SYSTEM_PROMPT;
pub use vision::VisionBackend;
