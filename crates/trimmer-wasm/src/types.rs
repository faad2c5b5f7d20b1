//! WASM-compatible wrapper types for cropper data.
//!
//! This module provides JavaScript-friendly types that wrap the core Trimmer
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use trimmer_core::{CropperSettings, CroppedAsset};
use wasm_bindgen::prelude::*;

/// An exported crop for JavaScript.
///
/// Carries everything needed to build a `File` on the page:
///
/// ```typescript
/// const asset = session.save();
/// const file = new File([asset.bytes()], asset.file_name, { type: asset.mime_type });
/// ```
#[wasm_bindgen]
pub struct JsCroppedAsset {
    file_name: String,
    mime_type: String,
    bytes: Vec<u8>,
    data_url: String,
}

#[wasm_bindgen]
impl JsCroppedAsset {
    /// File name, `{display_name}.png`
    #[wasm_bindgen(getter)]
    pub fn file_name(&self) -> String {
        self.file_name.clone()
    }

    /// Always `image/png`
    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.mime_type.clone()
    }

    /// Size of the PNG file in bytes
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }

    /// Returns the PNG file contents as Uint8Array.
    ///
    /// Note: This creates a copy of the data in JavaScript memory.
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// The PNG as a base64 `data:` URL, usable as an `<img>` source.
    #[wasm_bindgen(getter)]
    pub fn data_url(&self) -> String {
        self.data_url.clone()
    }
}

impl From<CroppedAsset> for JsCroppedAsset {
    fn from(asset: CroppedAsset) -> Self {
        Self {
            file_name: asset.file_name,
            mime_type: asset.mime_type.to_string(),
            bytes: asset.bytes,
            data_url: asset.data_url,
        }
    }
}

/// Parse settings passed from JavaScript.
///
/// `undefined` and `null` select the defaults; any omitted field falls back
/// to its default as well.
pub(crate) fn settings_from_js(value: JsValue) -> Result<CropperSettings, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(CropperSettings::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid cropper settings: {}", e)))
}

/// Convert any core error into a JavaScript error string.
pub(crate) fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}


/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_settings_from_undefined() {
        let settings = settings_from_js(JsValue::UNDEFINED).unwrap();
        assert_eq!(settings, CropperSettings::default());
    }

    #[wasm_bindgen_test]
    fn test_settings_from_partial_object() {
        #[derive(serde::Serialize)]
        struct Partial {
            wheel_sensitivity: f64,
        }
        let value = serde_wasm_bindgen::to_value(&Partial {
            wheel_sensitivity: 0.1,
        })
        .unwrap();
        let settings = settings_from_js(value).unwrap();
        assert!((settings.wheel_sensitivity - 0.1).abs() < f64::EPSILON);
        assert_eq!(settings.geometry, CropperSettings::default().geometry);
    }

    #[wasm_bindgen_test]
    fn test_settings_invalid() {
        let value = serde_wasm_bindgen::to_value(&"not settings").unwrap();
        assert!(settings_from_js(value).is_err());
    }
}
