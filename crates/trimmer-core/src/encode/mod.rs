//! Image encoding for exported crops.
//!
//! This module provides functionality for:
//! - Encoding the output surface to PNG
//! - Converting PNG bytes to and from a base64 `data:` URL
//! - Packaging the result as a named [`CroppedAsset`]
//!
//! # Examples
//!
//! ```ignore
//! use trimmer_core::encode::export_asset;
//!
//! let asset = export_asset(&output_surface, "beach").unwrap();
//! assert_eq!(asset.file_name, "beach.png");
//! ```

mod png;

pub use png::{
    bytes_from_data_url, encode_png, export_asset, to_data_url, CroppedAsset, EncodeError,
    PNG_MIME_TYPE,
};
