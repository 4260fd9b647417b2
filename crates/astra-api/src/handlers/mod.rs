//! HTTP handlers for astra-api.

pub mod analyze;
pub mod health;

use serde::Serialize;
use utoipa::ToSchema;

/// Error body returned for 4xx and 5xx responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub detail: String,
}
