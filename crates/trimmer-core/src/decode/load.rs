//! Turning user-supplied file bytes into an [`ImageAsset`].

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageFormat, ImageReader};
use tracing::{debug, warn};

use super::{ContentType, DecodeError, ImageAsset};

/// Derive the display name of a file: the part after the last path
/// separator, without its final extension.
///
/// ```text
/// "a/b/c.photo.JPG" -> "c.photo"
/// "noext"           -> "noext"
/// "/only.ext"       -> "only"
/// ```
pub fn base_name(name: &str) -> &str {
    let base = match name.rfind(['/', '\\']) {
        Some(idx) => &name[idx + 1..],
        None => name,
    };
    match base.rfind('.') {
        Some(idx) => &base[..idx],
        None => base,
    }
}

/// Decode a PNG or JPEG file.
///
/// The format is sniffed from the bytes; anything other than PNG or JPEG is
/// rejected with `DecodeError::InvalidFormat`. JPEG EXIF orientation is
/// applied so the asset matches what a browser would display.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` for unrecognized or unaccepted data
/// and `DecodeError::CorruptedFile` when decoding fails part way.
pub fn load(bytes: &[u8], original_name: &str) -> Result<ImageAsset, DecodeError> {
    let content_type = image::guess_format(bytes)
        .ok()
        .and_then(ContentType::from_image_format)
        .ok_or_else(|| {
            warn!(name = original_name, len = bytes.len(), "rejected unrecognized image data");
            DecodeError::InvalidFormat
        })?;

    let decoded = decode_pixels(bytes, content_type.image_format())?;
    let decoded = match content_type {
        ContentType::Jpeg => apply_orientation(decoded, extract_orientation(bytes)),
        ContentType::Png => decoded,
    };

    let asset = ImageAsset::new(decoded.into_rgba8(), base_name(original_name));
    debug!(
        name = asset.display_name(),
        width = asset.natural_width(),
        height = asset.natural_height(),
        ?content_type,
        "image loaded"
    );
    Ok(asset)
}

/// Decode a file whose MIME type was declared by the file picker.
///
/// Types outside [`ACCEPTED_CONTENT_TYPES`](super::ACCEPTED_CONTENT_TYPES)
/// are rejected before any decoding happens.
pub fn load_with_content_type(
    bytes: &[u8],
    original_name: &str,
    content_type: &str,
) -> Result<ImageAsset, DecodeError> {
    if ContentType::from_mime(content_type).is_none() {
        warn!(name = original_name, content_type, "rejected content type");
        return Err(DecodeError::UnsupportedContentType(content_type.to_string()));
    }
    load(bytes, original_name)
}

/// The reader owns the only per-load handle onto the caller's bytes; it is
/// consumed by `decode` and dropped on both the success and error paths.
fn decode_pixels(bytes: &[u8], format: ImageFormat) -> Result<DynamicImage, DecodeError> {
    ImageReader::with_format(Cursor::new(bytes), format)
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

/// Read the EXIF orientation tag (1-8). Missing or unreadable EXIF data
/// means no transformation.
fn extract_orientation(bytes: &[u8]) -> u32 {
    let mut cursor = Cursor::new(bytes);
    Reader::new()
        .read_from_container(&mut cursor)
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .unwrap_or(1)
}

fn apply_orientation(img: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.rotate90().fliph(),
        6 => img.rotate90(),
        7 => img.rotate270().fliph(),
        8 => img.rotate270(),
        _ => img,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::jpeg::JpegEncoder;
    use image::codecs::png::PngEncoder;
    use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};

    fn png_bytes(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba(color));
        let mut out = Vec::new();
        PngEncoder::new(&mut out)
            .write_image(img.as_raw(), width, height, ExtendedColorType::Rgba8)
            .unwrap();
        out
    }

    fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
        let pixels = vec![90u8; (width * height * 3) as usize];
        let mut out = Vec::new();
        JpegEncoder::new_with_quality(&mut out, 90)
            .write_image(&pixels, width, height, ExtendedColorType::Rgb8)
            .unwrap();
        out
    }

    #[test]
    fn test_base_name_examples() {
        assert_eq!(base_name("a/b/c.photo.JPG"), "c.photo");
        assert_eq!(base_name("noext"), "noext");
        assert_eq!(base_name("/only.ext"), "only");
    }

    #[test]
    fn test_base_name_plain_file() {
        assert_eq!(base_name("cat.png"), "cat");
        assert_eq!(base_name("dir/"), "");
        assert_eq!(base_name(".hidden"), "");
        assert_eq!(base_name("C:\\photos\\beach.jpeg"), "beach");
    }

    #[test]
    fn test_load_png() {
        let bytes = png_bytes(12, 7, [10, 20, 30, 255]);
        let asset = load(&bytes, "folder/sample.image.png").unwrap();

        assert_eq!(asset.natural_width(), 12);
        assert_eq!(asset.natural_height(), 7);
        assert_eq!(asset.display_name(), "sample.image");
        assert_eq!(asset.pixels().get_pixel(3, 3).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_load_png_keeps_alpha() {
        let bytes = png_bytes(2, 2, [255, 0, 0, 0]);
        let asset = load(&bytes, "clear.png").unwrap();
        assert_eq!(asset.pixels().get_pixel(0, 0).0[3], 0);
    }

    #[test]
    fn test_load_jpeg() {
        let bytes = jpeg_bytes(16, 8);
        let asset = load(&bytes, "shot.JPG").unwrap();

        assert_eq!(asset.natural_width(), 16);
        assert_eq!(asset.natural_height(), 8);
        assert_eq!(asset.display_name(), "shot");
        assert_eq!(asset.pixels().get_pixel(0, 0).0[3], 255);
    }

    #[test]
    fn test_load_rejects_unknown_bytes() {
        let result = load(&[0x00, 0x01, 0x02, 0x03], "junk.png");
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_load_rejects_empty_bytes() {
        assert!(matches!(load(&[], "empty.png"), Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_load_rejects_other_formats() {
        // GIF magic is recognized by the sniffer but not accepted.
        let gif = b"GIF89a\x01\x00\x01\x00\x00\x00\x00;";
        assert!(matches!(load(gif, "anim.gif"), Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_load_truncated_png() {
        let bytes = png_bytes(32, 32, [1, 2, 3, 255]);
        let result = load(&bytes[..40], "cut.png");
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_load_with_content_type_rejects_before_decode() {
        let bytes = png_bytes(4, 4, [0, 0, 0, 255]);
        let result = load_with_content_type(&bytes, "a.png", "image/webp");
        match result {
            Err(DecodeError::UnsupportedContentType(mime)) => assert_eq!(mime, "image/webp"),
            other => panic!("Expected UnsupportedContentType, got: {:?}", other),
        }
    }

    #[test]
    fn test_load_with_content_type_accepts_jpg_alias() {
        let bytes = jpeg_bytes(4, 4);
        assert!(load_with_content_type(&bytes, "a.jpg", "image/jpg").is_ok());
    }

    #[test]
    fn test_orientation_missing_exif() {
        assert_eq!(extract_orientation(&jpeg_bytes(2, 2)), 1);
        assert_eq!(extract_orientation(&[0x00, 0x01]), 1);
    }

    #[test]
    fn test_apply_orientation_rotate90_swaps_dimensions() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(4, 2));
        let rotated = apply_orientation(img, 6);
        assert_eq!((rotated.width(), rotated.height()), (2, 4));
    }

    #[test]
    fn test_apply_orientation_flip_horizontal() {
        let mut raw = RgbaImage::new(2, 1);
        raw.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        raw.put_pixel(1, 0, Rgba([0, 255, 0, 255]));
        let flipped = apply_orientation(DynamicImage::ImageRgba8(raw), 2).into_rgba8();

        assert_eq!(flipped.get_pixel(0, 0).0, [0, 255, 0, 255]);
        assert_eq!(flipped.get_pixel(1, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_apply_orientation_unknown_is_identity() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(3, 5));
        let same = apply_orientation(img, 42);
        assert_eq!((same.width(), same.height()), (3, 5));
    }
}
