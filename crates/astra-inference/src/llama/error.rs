//! Llama API error handling.

use astra_core::Error;

/// Llama API error classes, derived from the HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlamaErrorCode {
    /// Malformed request or unsupported image.
    BadRequest,
    /// Missing or invalid API key.
    AuthenticationError,
    /// Key lacks access to the model.
    PermissionDenied,
    /// Model or endpoint not found.
    NotFound,
    /// Rate limit exceeded.
    RateLimitExceeded,
    /// Server error.
    ServerError,
    /// Unknown error.
    Unknown,
}

impl LlamaErrorCode {
    /// Determine error code from HTTP status.
    pub fn from_response(status: u16) -> Self {
        match status {
            400 | 413 | 422 => Self::BadRequest,
            401 => Self::AuthenticationError,
            403 => Self::PermissionDenied,
            404 => Self::NotFound,
            429 => Self::RateLimitExceeded,
            500..=599 => Self::ServerError,
            _ => Self::Unknown,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimitExceeded | Self::ServerError)
    }
}

/// Convert a Llama API error to an Astra error.
pub fn to_astra_error(code: LlamaErrorCode, status: u16, message: &str) -> Error {
    match code {
        LlamaErrorCode::BadRequest => {
            Error::Inference(format!("Bad request ({}): {}", status, message))
        }
        LlamaErrorCode::AuthenticationError => {
            Error::Config(format!("Authentication failed ({}): {}", status, message))
        }
        LlamaErrorCode::PermissionDenied => {
            Error::Config(format!("Permission denied ({}): {}", status, message))
        }
        LlamaErrorCode::NotFound => Error::Config(format!("Not found ({}): {}", status, message)),
        LlamaErrorCode::RateLimitExceeded => {
            Error::Inference(format!("Rate limit exceeded ({}): {}", status, message))
        }
        LlamaErrorCode::ServerError => {
            Error::Inference(format!("Server error ({}): {}", status, message))
        }
        LlamaErrorCode::Unknown => {
            Error::Inference(format!("Llama API returned {}: {}", status, message))
        }
    }
}

/// Pull a human-readable message out of an error body.
///
/// Tries `error.message`, `error` (string), `detail`, `title` and `message`
/// in that order; falls back to the raw body text.
pub fn extract_error_message(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };

    let candidates = [
        json.pointer("/error/message"),
        json.get("error"),
        json.get("detail"),
        json.get("title"),
        json.get("message"),
    ];

    let message = candidates
        .into_iter()
        .flatten()
        .find_map(|v| v.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| body.trim().to_string());
    message
}
