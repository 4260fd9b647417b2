//! Error types for the Astra vision API.

use thiserror::Error;

/// Result type alias using Astra's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for Astra operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A required request field was absent or empty
    #[error("Missing '{0}' field")]
    MissingField(String),

    /// Image payload could not be decoded or is not a supported format.
    ///
    /// Decoder detail is logged, never returned.
    #[error("Invalid image data")]
    InvalidImage,

    /// Inference/generation failed
    #[error("Inference error: {0}")]
    Inference(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
