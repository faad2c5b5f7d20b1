//! Trimmer WASM - WebAssembly bindings for Trimmer
//!
//! This crate provides WASM bindings to expose the trimmer-core crop engine
//! to JavaScript/TypeScript pages.
//!
//! # Module Structure
//!
//! - `session` - The interactive [`JsCropSession`]
//! - `types` - WASM-compatible wrapper types for exported crops and settings
//! - `decode` - File picker helpers (accepted types, display names)
//! - `encode` - Data URL conversion
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropSession } from '@trimmer/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const session = new JsCropSession();
//! session.load(new Uint8Array(await file.arrayBuffer()), file.name, file.type);
//! session.crop();
//! const asset = session.save();
//! const blob = new Blob([asset.bytes()], { type: asset.mime_type });
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod session;
mod types;

// Re-export public types
pub use decode::{accepted_content_types, base_name};
pub use encode::{bytes_to_data_url, data_url_to_bytes};
pub use session::JsCropSession;
pub use types::JsCroppedAsset;

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Lowest zoom the range control should offer, in percent
#[wasm_bindgen]
pub fn min_scale_percent() -> f64 {
    trimmer_core::transform::MIN_SCALE_PERCENT
}

/// Highest zoom the range control should offer, in percent
#[wasm_bindgen]
pub fn max_scale_percent() -> f64 {
    trimmer_core::transform::MAX_SCALE_PERCENT
}
