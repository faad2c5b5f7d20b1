//! Core types for image loading.

use image::{ImageFormat, RgbaImage};
use thiserror::Error;

/// MIME types the file picker is allowed to offer.
pub const ACCEPTED_CONTENT_TYPES: [&str; 3] = ["image/png", "image/jpg", "image/jpeg"];

/// Error types for image loading operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes are not a PNG or JPEG image.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The declared content type is not one the cropper accepts.
    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),
}

/// Raster formats accepted by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Png,
    Jpeg,
}

impl ContentType {
    /// Parse a declared MIME type. Matching ignores case and surrounding
    /// whitespace; `image/jpg` is accepted as an alias of `image/jpeg`.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/png" => Some(ContentType::Png),
            "image/jpg" | "image/jpeg" => Some(ContentType::Jpeg),
            _ => None,
        }
    }

    /// Map a sniffed format onto an accepted content type.
    pub fn from_image_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Png => Some(ContentType::Png),
            ImageFormat::Jpeg => Some(ContentType::Jpeg),
            _ => None,
        }
    }

    pub fn image_format(self) -> ImageFormat {
        match self {
            ContentType::Png => ImageFormat::Png,
            ContentType::Jpeg => ImageFormat::Jpeg,
        }
    }
}

/// A decoded source image, ready to draw.
///
/// Pixels are stored as RGBA so that transparent PNGs composite over the
/// surface background the same way a browser canvas does. An asset is never
/// modified after it is created.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    pixels: RgbaImage,
    display_name: String,
}

impl ImageAsset {
    pub fn new(pixels: RgbaImage, display_name: impl Into<String>) -> Self {
        Self {
            pixels,
            display_name: display_name.into(),
        }
    }

    /// Intrinsic width in pixels.
    pub fn natural_width(&self) -> u32 {
        self.pixels.width()
    }

    /// Intrinsic height in pixels.
    pub fn natural_height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Original file name without directories or extension.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Check if this image has no drawable area.
    pub fn is_empty(&self) -> bool {
        self.natural_width() == 0 || self.natural_height() == 0
    }
}
