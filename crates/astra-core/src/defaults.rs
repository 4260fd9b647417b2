//! Centralized default constants for the Astra vision API.
//!
//! **This module is the single source of truth** for shared default values.
//! The inference client, the API server, and tests reference these constants
//! instead of defining their own magic numbers.

// =============================================================================
// LLAMA API
// =============================================================================

/// Default Llama API endpoint.
pub const LLAMA_BASE_URL: &str = "https://api.llama.com/v1";

/// Multimodal model used for image analysis.
pub const LLAMA_MODEL: &str = "Llama-4-Scout-17B-16E-Instruct-FP8";

/// Sampling temperature sent with every analysis request.
pub const LLAMA_TEMPERATURE: f32 = 0.5;

/// Completion token ceiling sent with every analysis request.
pub const LLAMA_MAX_COMPLETION_TOKENS: u32 = 2048;

/// Nucleus sampling cutoff sent with every analysis request.
pub const LLAMA_TOP_P: f32 = 0.9;

/// Repetition penalty sent with every analysis request.
pub const LLAMA_REPETITION_PENALTY: u32 = 1;

/// Upstream request timeout in seconds.
pub const LLAMA_TIMEOUT_SECS: u64 = 120;

/// Environment variable holding the Llama API key.
pub const ENV_LLAMA_API_KEY: &str = "LLAMA_API_KEY";

/// Environment variable overriding the Llama API base URL.
pub const ENV_LLAMA_BASE_URL: &str = "LLAMA_BASE_URL";

/// Environment variable overriding the model identifier.
pub const ENV_LLAMA_MODEL: &str = "LLAMA_MODEL";

/// Environment variable overriding the upstream timeout.
pub const ENV_LLAMA_TIMEOUT_SECS: &str = "LLAMA_TIMEOUT_SECS";

// =============================================================================
// PROMPTS
// =============================================================================

/// Prompt used when the caller sends no `user_message` (or an empty one).
pub const DEFAULT_USER_PROMPT: &str =
    "Please describe this image and provide navigation guidance for a vision-impaired person.";

/// Content recorded for the image half of an exchange.
pub const IMAGE_ENTRY_CONTENT: &str = "User uploaded image";

// =============================================================================
// SERVER
// =============================================================================

/// Service name reported by the health endpoints.
pub const SERVICE_NAME: &str = "AI Vision API";

/// Default bind host.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 8000;

/// Maximum accepted request body (base64 images are ~4/3 of the raw size).
pub const MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

// =============================================================================
// HISTORY
// =============================================================================

/// Per-user history cap. Oldest entries are evicted beyond this; 0 disables the cap.
pub const HISTORY_MAX_ENTRIES: usize = 1000;
