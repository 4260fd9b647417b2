//! Shared data models: image metadata and history entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

// =============================================================================
// IMAGE TYPES
// =============================================================================

/// Bitmap encodings accepted by image admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Bmp,
    WebP,
}

impl ImageFormat {
    /// Every supported format, in detection priority order.
    pub const ALL: [ImageFormat; 5] = [
        ImageFormat::Jpeg,
        ImageFormat::Png,
        ImageFormat::Gif,
        ImageFormat::Bmp,
        ImageFormat::WebP,
    ];

    /// Upper-case format name, as reported in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::Png => "PNG",
            ImageFormat::Gif => "GIF",
            ImageFormat::Bmp => "BMP",
            ImageFormat::WebP => "WEBP",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Bmp => "image/bmp",
            ImageFormat::WebP => "image/webp",
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dimensions and format of an admitted image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
}

// =============================================================================
// HISTORY TYPES
// =============================================================================

/// What a history entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Metadata of an uploaded image.
    Image,
    /// Text returned by the model (or the fallback diagnostic).
    Response,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Image => "image",
            EntryKind::Response => "response",
        }
    }
}

/// One immutable record in a user's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub user_id: String,
    pub kind: EntryKind,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_metadata: Option<ImageMetadata>,
    pub timestamp: DateTime<Utc>,
    /// Free-form analysis attached to the entry. Image entries carry their
    /// `{width, height, format}` here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_analysis: Option<JsonValue>,
}

impl HistoryEntry {
    /// Build a new entry with a fresh id and the current timestamp.
    pub fn new(
        user_id: impl Into<String>,
        kind: EntryKind,
        content: impl Into<String>,
        image_metadata: Option<ImageMetadata>,
    ) -> Self {
        let related_analysis = image_metadata.and_then(|m| serde_json::to_value(m).ok());
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            kind,
            content: content.into(),
            image_metadata,
            timestamp: Utc::now(),
            related_analysis,
        }
    }
}
