//! PNG encoding and the named asset handed to the delivery layer.
//!
//! The export path mirrors what a browser does with a canvas: encode to PNG,
//! serialize as a base64 `data:` URL, then decode that URL back into bytes.
//! The decoded bytes must equal the encoder output exactly before an asset
//! is produced, so a broken environment never delivers a corrupt file.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;
use tracing::{info, warn};

use crate::render::RenderSurface;

/// MIME type of every exported asset.
pub const PNG_MIME_TYPE: &str = "image/png";

const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Errors that can occur while exporting a crop.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// PNG encoding failed
    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),

    /// The data URL is malformed or its payload is not valid base64
    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    /// Decoding the data URL did not reproduce the encoded bytes
    #[error("Round trip mismatch: encoded {expected} bytes, decoded {actual}")]
    RoundTripMismatch { expected: usize, actual: usize },
}

/// A finished crop, ready for download or inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CroppedAsset {
    /// `{display_name}.png`
    pub file_name: String,
    pub mime_type: &'static str,
    /// PNG file contents.
    pub bytes: Vec<u8>,
    /// The same contents as a `data:` URL.
    pub data_url: String,
}

/// Encode a surface as an RGB PNG.
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` for an empty surface and
/// `EncodeError::EncodingFailed` if the encoder reports an error.
pub fn encode_png(surface: &RenderSurface) -> Result<Vec<u8>, EncodeError> {
    let size = surface.size();
    if size.width == 0 || size.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: size.width,
            height: size.height,
        });
    }

    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer)
        .write_image(
            surface.pixels().as_raw(),
            size.width,
            size.height,
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer)
}

/// Serialize PNG bytes as a base64 `data:` URL.
pub fn to_data_url(png: &[u8]) -> String {
    let mut url = String::with_capacity(DATA_URL_PREFIX.len() + png.len().div_ceil(3) * 4);
    url.push_str(DATA_URL_PREFIX);
    STANDARD.encode_string(png, &mut url);
    url
}

/// Recover the raw bytes carried by a base64 `data:` URL.
///
/// Everything up to the first comma is treated as the header, which must
/// start with `data:` and declare `;base64`.
pub fn bytes_from_data_url(url: &str) -> Result<Vec<u8>, EncodeError> {
    let (header, payload) = url
        .split_once(',')
        .ok_or_else(|| EncodeError::InvalidDataUrl("missing ',' separator".to_string()))?;

    if !header.starts_with("data:") || !header.ends_with(";base64") {
        return Err(EncodeError::InvalidDataUrl(format!(
            "unsupported header {header:?}"
        )));
    }

    STANDARD
        .decode(payload)
        .map_err(|e| EncodeError::InvalidDataUrl(e.to_string()))
}

/// Encode the output surface and package it as `{display_name}.png`.
///
/// # Errors
///
/// Any encoding failure, or a data URL round trip that does not reproduce
/// the PNG byte for byte. No asset is produced in either case.
pub fn export_asset(
    surface: &RenderSurface,
    display_name: &str,
) -> Result<CroppedAsset, EncodeError> {
    let png = encode_png(surface)?;
    let data_url = to_data_url(&png);
    let bytes = bytes_from_data_url(&data_url)?;

    if bytes != png {
        warn!(expected = png.len(), actual = bytes.len(), "data URL round trip mismatch");
        return Err(EncodeError::RoundTripMismatch {
            expected: png.len(),
            actual: bytes.len(),
        });
    }

    let file_name = format!("{display_name}.png");
    info!(file_name = %file_name, len = bytes.len(), "crop exported");
    Ok(CroppedAsset {
        file_name,
        mime_type: PNG_MIME_TYPE,
        bytes,
        data_url,
    })
}
