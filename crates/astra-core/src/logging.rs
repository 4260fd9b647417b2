//! Structured logging field name constants.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation can query the same field across subsystems.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events (startup, shutdown), operation completions |
//! | DEBUG | Decision points, intermediate values, config choices |
//! | TRACE | High-volume data (request bodies, encoded sizes) |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID propagated from the `x-request-id` header.
/// Format: UUIDv7 (time-ordered).
pub const REQUEST_ID: &str = "request_id";

/// Caller-supplied (or generated) user identifier.
pub const USER_ID: &str = "user_id";

/// Subsystem originating the log event.
/// Values: "api", "admission", "inference", "history"
pub const SUBSYSTEM: &str = "subsystem";

/// Logical operation name.
/// Examples: "admit", "analyze", "describe_image", "record"
pub const OPERATION: &str = "op";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Byte length of a prompt.
pub const PROMPT_LEN: &str = "prompt_len";

/// Byte length of a model response.
pub const RESPONSE_LEN: &str = "response_len";

// ─── Image fields ──────────────────────────────────────────────────────────

/// Detected image format (JPEG, PNG, ...).
pub const IMAGE_FORMAT: &str = "image_format";

/// Image width in pixels.
pub const IMAGE_WIDTH: &str = "image_width";

/// Image height in pixels.
pub const IMAGE_HEIGHT: &str = "image_height";
