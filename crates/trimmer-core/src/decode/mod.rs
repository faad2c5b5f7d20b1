//! Image loading for the cropper.
//!
//! This module provides functionality for:
//! - Sniffing and decoding PNG and JPEG files
//! - Rejecting files whose declared content type is not accepted
//! - Applying JPEG EXIF orientation
//! - Deriving the display name used for the exported crop
//!
//! # Examples
//!
//! ```ignore
//! use trimmer_core::decode::load;
//!
//! let bytes = std::fs::read("photos/beach.jpg").unwrap();
//! let asset = load(&bytes, "photos/beach.jpg").unwrap();
//! assert_eq!(asset.display_name(), "beach");
//! ```

mod load;
mod types;

pub use load::{base_name, load, load_with_content_type};
pub use types::{ContentType, DecodeError, ImageAsset, ACCEPTED_CONTENT_TYPES};
