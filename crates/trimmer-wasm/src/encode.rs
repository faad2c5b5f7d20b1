//! Data URL WASM bindings.
//!
//! This module exposes the core data URL conversion used by the export
//! round trip, so the page can turn a saved crop back into bytes (or the
//! reverse) without reimplementing base64 handling.
//!
//! # Functions
//!
//! - [`bytes_to_data_url`] - Wrap PNG bytes in a `data:image/png;base64,` URL
//! - [`data_url_to_bytes`] - Decode a base64 `data:` URL into bytes

use trimmer_core::encode;
use wasm_bindgen::prelude::*;

use crate::types::to_js_error;

/// Wrap PNG bytes in a base64 `data:` URL.
#[wasm_bindgen]
pub fn bytes_to_data_url(png: &[u8]) -> String {
    encode::to_data_url(png)
}

/// Decode a base64 `data:` URL back into bytes.
///
/// # Errors
///
/// Returns an error if the URL has no `;base64,` header or the payload is
/// not valid base64.
#[wasm_bindgen]
pub fn data_url_to_bytes(url: &str) -> Result<Vec<u8>, JsValue> {
    encode::bytes_from_data_url(url).map_err(to_js_error)
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_data_url_to_bytes() {
        assert_eq!(data_url_to_bytes("data:image/png;base64,AQID").unwrap(), vec![1, 2, 3]);
    }

    #[wasm_bindgen_test]
    fn test_data_url_to_bytes_invalid() {
        assert!(data_url_to_bytes("no comma here").is_err());
    }
}
