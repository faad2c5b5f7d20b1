//! Image loading helpers for the file picker.
//!
//! # Functions
//!
//! - [`accepted_content_types`] - MIME types for the file input's `accept`
//! - [`base_name`] - Display name derived from a file name
//!
//! Decoding itself happens in [`JsCropSession::load`](crate::JsCropSession::load).

use trimmer_core::decode::{self, ACCEPTED_CONTENT_TYPES};
use wasm_bindgen::prelude::*;

/// MIME types the cropper accepts, as an array of strings.
///
/// # Example
///
/// ```typescript
/// input.accept = accepted_content_types().join(',');
/// ```
#[wasm_bindgen]
pub fn accepted_content_types() -> js_sys::Array {
    ACCEPTED_CONTENT_TYPES
        .iter()
        .map(|mime| JsValue::from_str(mime))
        .collect()
}

/// File name without directories or its final extension.
///
/// ```typescript
/// base_name("a/b/c.photo.JPG"); // "c.photo"
/// ```
#[wasm_bindgen]
pub fn base_name(name: &str) -> String {
    decode::base_name(name).to_string()
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_accepted_content_types() {
        let types = accepted_content_types();
        assert_eq!(types.length(), 3);
        assert_eq!(types.get(0).as_string().as_deref(), Some("image/png"));
    }
}
