//! Image analysis handler.
//!
//! Admits a base64 image, asks the inference gateway for navigation guidance,
//! and records the exchange in the caller's history.

use std::time::Instant;

use axum::{body::Bytes, extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};
use utoipa::ToSchema;
use uuid::Uuid;

use astra_core::{admit, logging, Error};

use super::ErrorBody;
use crate::{ApiError, AppState};

/// Request body for image analysis.
///
/// Fields are read as loose JSON values: clients send whatever their
/// runtime produces, and type mismatches map onto the documented 400s
/// instead of a parse failure.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    /// Base64 image, optionally prefixed with a `data:<mime>;base64,` header.
    #[schema(value_type = Option<String>)]
    pub image: Option<Value>,
    /// Question for the model. Empty or absent uses the default navigation prompt.
    #[schema(value_type = Option<String>)]
    pub user_message: Option<Value>,
    /// History bucket key. A random UUID is used when absent.
    #[schema(value_type = Option<String>)]
    pub user_id: Option<Value>,
}

/// Validated analysis input.
#[derive(Debug)]
struct AnalyzeInput {
    image: String,
    user_message: Option<String>,
    user_id: String,
}

impl AnalyzeRequest {
    /// Apply field rules:
    /// - `image` absent or empty-ish (`null`, `""`, `0`, `false`, `[]`, `{}`) is missing;
    ///   any other non-string is invalid image data.
    /// - `user_message` empty-ish falls back to the default prompt; other
    ///   non-strings are sent as their JSON text.
    /// - `user_id` absent or `null` gets a fresh UUID; other non-strings are
    ///   keyed by their JSON text.
    fn validate(self) -> Result<AnalyzeInput, Error> {
        let image = match self.image {
            Some(v) if !is_blank(&v) => match v {
                Value::String(s) => s,
                _ => return Err(Error::InvalidImage),
            },
            _ => return Err(Error::MissingField("image".to_string())),
        };

        let user_message = self
            .user_message
            .filter(|v| !is_blank(v))
            .map(value_text);

        let user_id = match self.user_id {
            None | Some(Value::Null) => Uuid::new_v4().to_string(),
            Some(v) => value_text(v),
        };

        Ok(AnalyzeInput {
            image,
            user_message,
            user_id,
        })
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn value_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Response from image analysis.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeResponse {
    /// Model answer, or a diagnostic string when the model call failed.
    pub response: String,
}

/// Analyze an image and return navigation guidance.
///
/// The body is parsed by hand so that malformed JSON is reported as an
/// internal error rather than an extractor rejection.
///
/// # Returns
/// - 200 OK with the model text (also when the upstream call failed)
/// - 400 Bad Request if `image` is missing or not a decodable image
/// - 500 Internal Server Error if the body is not a JSON object
#[utoipa::path(post, path = "/analyze", tag = "Vision",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Analysis text", body = AnalyzeResponse),
        (status = 400, description = "Missing or invalid image", body = ErrorBody),
        (status = 500, description = "Malformed request body", body = ErrorBody),
    ))]
pub async fn analyze_image(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let start = Instant::now();
    let input = parse_request(&body)?.validate()?;

    let image = admit(&input.image)?;
    debug!(
        { logging::SUBSYSTEM } = "api",
        { logging::OPERATION } = "analyze",
        { logging::USER_ID } = input.user_id.as_str(),
        { logging::IMAGE_FORMAT } = image.format().as_str(),
        { logging::IMAGE_WIDTH } = image.width(),
        { logging::IMAGE_HEIGHT } = image.height(),
        custom_prompt = input.user_message.is_some(),
        "Image admitted"
    );

    let response = state
        .gateway
        .analyze(&image, input.user_message.as_deref())
        .await;

    state
        .history
        .record_exchange(&input.user_id, image.metadata(), &response)
        .await;

    info!(
        { logging::SUBSYSTEM } = "api",
        { logging::OPERATION } = "analyze",
        { logging::USER_ID } = input.user_id.as_str(),
        { logging::RESPONSE_LEN } = response.len(),
        { logging::DURATION_MS } = start.elapsed().as_millis() as u64,
        "Analyze request complete"
    );

    Ok(Json(AnalyzeResponse { response }))
}

fn parse_request(body: &[u8]) -> Result<AnalyzeRequest, ApiError> {
    let value: Value = serde_json::from_slice(body).map_err(Error::from)?;
    if !value.is_object() {
        return Err(ApiError::Internal(
            "request body must be a JSON object".to_string(),
        ));
    }
    Ok(serde_json::from_value(value).map_err(Error::from)?)
}
