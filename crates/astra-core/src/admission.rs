//! Image admission: turn a caller-supplied base64 string into a validated bitmap.
//!
//! Admission runs in two passes over the decoded bytes:
//! 1. Verify: sniff the format from magic bytes and read the header dimensions
//! 2. Load: open a fresh reader and decode the full bitmap
//!
//! Any failure collapses into [`Error::InvalidImage`]. The decoder's own
//! message is logged at DEBUG and not returned.

use std::io::Cursor;

use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageReader};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{ImageFormat, ImageMetadata};

/// JPEG quality used when normalizing images for the upstream model.
pub const JPEG_QUALITY: u8 = 75;

/// A decoded, validated bitmap plus its dimensions and source format.
///
/// Only [`admit`] constructs one; it is never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePayload {
    bitmap: DynamicImage,
    width: u32,
    height: u32,
    format: ImageFormat,
}

impl ImagePayload {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn bitmap(&self) -> &DynamicImage {
        &self.bitmap
    }

    pub fn metadata(&self) -> ImageMetadata {
        ImageMetadata {
            width: self.width,
            height: self.height,
            format: self.format,
        }
    }

    /// Re-encode the bitmap as baseline JPEG.
    ///
    /// JPEG has no alpha channel, so the bitmap is flattened to RGB8 first.
    pub fn encode_jpeg(&self) -> Result<Vec<u8>> {
        let rgb = self.bitmap.to_rgb8();
        let mut buf = Vec::new();
        JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY)
            .encode_image(&rgb)
            .map_err(|e| Error::Internal(format!("JPEG encoding failed: {}", e)))?;
        Ok(buf)
    }
}

/// Strip an optional `data:<mime>;base64,` prefix.
///
/// Returns `None` for a `data:` string with no comma.
pub fn strip_data_uri(encoded: &str) -> Option<&str> {
    if encoded.starts_with("data:") {
        encoded.split_once(',').map(|(_, payload)| payload)
    } else {
        Some(encoded)
    }
}

/// Decode and validate a base64 (optionally data-URI prefixed) image.
pub fn admit(encoded: &str) -> Result<ImagePayload> {
    let payload = strip_data_uri(encoded).ok_or_else(|| {
        debug!(subsystem = "admission", "data URI without a comma separator");
        Error::InvalidImage
    })?;

    let compact: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| reject("base64", e))?;

    let (format, width, height) = verify(&bytes)?;

    // Verification consumes its reader; loading starts over from the raw bytes.
    let bitmap = ImageReader::with_format(Cursor::new(&bytes), to_codec_format(format))
        .decode()
        .map_err(|e| reject("decode", e))?;

    debug!(
        subsystem = "admission",
        image_format = %format,
        image_width = width,
        image_height = height,
        "Image admitted"
    );

    Ok(ImagePayload {
        bitmap,
        width,
        height,
        format,
    })
}

/// Verify pass: supported format and sane header dimensions.
fn verify(bytes: &[u8]) -> Result<(ImageFormat, u32, u32)> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| reject("sniff", e))?;

    let format = reader
        .format()
        .and_then(from_codec_format)
        .ok_or_else(|| reject("sniff", "unsupported or unrecognized format"))?;

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| reject("verify", e))?;

    if width == 0 || height == 0 {
        return Err(reject("verify", "zero image dimension"));
    }

    Ok((format, width, height))
}

fn reject(stage: &str, cause: impl std::fmt::Display) -> Error {
    debug!(subsystem = "admission", stage, %cause, "Rejected image payload");
    Error::InvalidImage
}

fn from_codec_format(format: image::ImageFormat) -> Option<ImageFormat> {
    match format {
        image::ImageFormat::Jpeg => Some(ImageFormat::Jpeg),
        image::ImageFormat::Png => Some(ImageFormat::Png),
        image::ImageFormat::Gif => Some(ImageFormat::Gif),
        image::ImageFormat::Bmp => Some(ImageFormat::Bmp),
        image::ImageFormat::WebP => Some(ImageFormat::WebP),
        _ => None,
    }
}

fn to_codec_format(format: ImageFormat) -> image::ImageFormat {
    match format {
        ImageFormat::Jpeg => image::ImageFormat::Jpeg,
        ImageFormat::Png => image::ImageFormat::Png,
        ImageFormat::Gif => image::ImageFormat::Gif,
        ImageFormat::Bmp => image::ImageFormat::Bmp,
        ImageFormat::WebP => image::ImageFormat::WebP,
    }
}
