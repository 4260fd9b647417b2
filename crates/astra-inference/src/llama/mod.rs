//! Llama API inference backend.
//!
//! Talks to the hosted Llama API chat completions endpoint
//! (`POST {base_url}/chat/completions`) with inline base64 images.
//!
//! # Example
//!
//! ```rust,no_run
//! use astra_inference::llama::{LlamaBackend, LlamaConfig};
//!
//! // From environment variables (LLAMA_API_KEY, LLAMA_BASE_URL, ...)
//! let backend = LlamaBackend::from_env().unwrap();
//!
//! // Or with custom config
//! let config = LlamaConfig {
//!     api_key: Some("LLM|...".to_string()),
//!     timeout_seconds: 30,
//!     ..Default::default()
//! };
//! let backend = LlamaBackend::new(config).unwrap();
//! ```

mod backend;
mod error;
mod types;

pub use backend::{LlamaBackend, LlamaConfig};
pub use error::{extract_error_message, to_astra_error, LlamaErrorCode};
pub use types::*;
