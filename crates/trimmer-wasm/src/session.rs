//! WASM bindings for the interactive crop session.
//!
//! The page forwards its DOM events to a [`JsCropSession`] and blits the
//! returned RGBA buffers into its canvases with `putImageData`. Every event
//! method returns `true` when the preview changed and needs repainting.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const session = new JsCropSession();
//! input.accept = accepted_content_types().join(',');
//!
//! input.onchange = async () => {
//!   const file = input.files[0];
//!   session.load(new Uint8Array(await file.arrayBuffer()), file.name, file.type);
//!   slider.value = String(session.scale_percent);
//!   paint(previewCtx, session.preview_rgba(), 400, 400);
//! };
//! canvas.onmousemove = (e) => {
//!   if (session.pointer_move(e.pageX, e.pageY)) paint(previewCtx, session.preview_rgba(), 400, 400);
//! };
//! ```

use crate::types::{settings_from_js, to_js_error, JsCroppedAsset};
use trimmer_core::{CropSession, Point, WheelDelta};
use wasm_bindgen::prelude::*;

/// A pan/zoom/crop session for one page.
#[wasm_bindgen]
pub struct JsCropSession {
    inner: CropSession,
}

impl Default for JsCropSession {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl JsCropSession {
    /// Create a session with the default 400x400 preview and 300x300 output.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: CropSession::default(),
        }
    }

    /// Create a session from a (partial) settings object.
    ///
    /// # Errors
    /// Returns error if the settings cannot be deserialized, or describe a
    /// surface that is empty or too large to allocate
    pub fn with_settings(settings: JsValue) -> Result<JsCropSession, JsValue> {
        let inner = CropSession::new(settings_from_js(settings)?).map_err(to_js_error)?;
        Ok(Self { inner })
    }

    /// Decode a picked file and make it the current image.
    ///
    /// `content_type` is the `File.type` reported by the browser; pass an
    /// empty string to rely on content sniffing alone.
    pub fn load(&mut self, bytes: &[u8], file_name: &str, content_type: &str) -> Result<(), JsValue> {
        let result = if content_type.is_empty() {
            self.inner.load(bytes, file_name)
        } else {
            self.inner.load_with_content_type(bytes, file_name, content_type)
        };
        result.map_err(to_js_error)
    }

    /// Whether an image has been loaded
    #[wasm_bindgen(getter)]
    pub fn is_loaded(&self) -> bool {
        self.inner.is_loaded()
    }

    /// Display name of the current image, without extension
    #[wasm_bindgen(getter)]
    pub fn display_name(&self) -> Option<String> {
        self.inner.image().map(|img| img.display_name().to_string())
    }

    /// Current zoom in percent, for the range control
    #[wasm_bindgen(getter)]
    pub fn scale_percent(&self) -> Option<f64> {
        self.inner.scale_percent()
    }

    /// Preview surface width in pixels
    #[wasm_bindgen(getter)]
    pub fn preview_width(&self) -> u32 {
        self.inner.preview().size().width
    }

    /// Preview surface height in pixels
    #[wasm_bindgen(getter)]
    pub fn preview_height(&self) -> u32 {
        self.inner.preview().size().height
    }

    /// Output surface width in pixels
    #[wasm_bindgen(getter)]
    pub fn output_width(&self) -> u32 {
        self.inner.output().size().width
    }

    /// Output surface height in pixels
    #[wasm_bindgen(getter)]
    pub fn output_height(&self) -> u32 {
        self.inner.output().size().height
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        self.inner.pointer_down(Point::new(x, y))
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.inner.pointer_move(Point::new(x, y))
    }

    pub fn pointer_up(&mut self, x: f64, y: f64) -> bool {
        self.inner.pointer_up(Point::new(x, y))
    }

    /// Forward a `WheelEvent`'s `deltaX`, `deltaY` and `deltaZ`.
    pub fn wheel(&mut self, delta_x: f64, delta_y: f64, delta_z: f64) -> bool {
        self.inner.wheel(WheelDelta::new(delta_x, delta_y, delta_z))
    }

    /// Forward the range control's value (percent).
    pub fn set_slider(&mut self, value: f64) -> bool {
        self.inner.set_slider(value)
    }

    /// Returns the preview surface as RGBA bytes for `ImageData`.
    pub fn preview_rgba(&self) -> Vec<u8> {
        self.inner.preview().to_rgba_bytes()
    }

    /// Returns the output surface as RGBA bytes for `ImageData`.
    pub fn output_rgba(&self) -> Vec<u8> {
        self.inner.output().to_rgba_bytes()
    }

    /// Composite the current view onto the output surface.
    pub fn crop(&mut self) -> Result<(), JsValue> {
        self.inner.crop().map(|_| ()).map_err(to_js_error)
    }

    /// Encode the output surface and log the result to the console.
    pub fn save(&self) -> Result<JsCroppedAsset, JsValue> {
        let asset = self.inner.save().map_err(to_js_error)?;
        web_sys::console::log_1(
            &format!("Cropped image converted: {} ({} bytes)", asset.file_name, asset.bytes.len()).into(),
        );
        web_sys::console::log_2(&"to data url:".into(), &asset.data_url.as_str().into());
        Ok(asset.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trimmer_core::{ImageAsset, RenderSurface};

    fn session_with_image(width: u32, height: u32) -> JsCropSession {
        let mut session = JsCropSession::new();
        let pixels = image::RgbaImage::from_pixel(width, height, image::Rgba([0, 0, 255, 255]));
        session
            .inner
            .replace_image(ImageAsset::new(pixels, "snap"))
            .unwrap();
        session
    }

    fn rgba_len(surface: &RenderSurface) -> usize {
        let size = surface.size();
        (size.width * size.height * 4) as usize
    }

    #[test]
    fn test_new_session_dimensions() {
        let session = JsCropSession::new();
        assert_eq!(session.preview_width(), 400);
        assert_eq!(session.preview_height(), 400);
        assert_eq!(session.output_width(), 300);
        assert_eq!(session.output_height(), 300);
        assert!(!session.is_loaded());
        assert_eq!(session.scale_percent(), None);
        assert_eq!(session.display_name(), None);
    }

    #[test]
    fn test_events_before_load() {
        let mut session = JsCropSession::new();
        assert!(!session.pointer_down(0.0, 0.0));
        assert!(!session.pointer_move(1.0, 1.0));
        assert!(!session.wheel(0.0, 10.0, 0.0));
        assert!(!session.set_slider(100.0));
    }

    #[test]
    fn test_interaction_flow() {
        let mut session = session_with_image(200, 200);
        assert_eq!(session.display_name().as_deref(), Some("snap"));
        assert!((session.scale_percent().unwrap() - 200.0).abs() < 1e-9);

        assert!(!session.pointer_down(10.0, 10.0));
        assert!(session.pointer_move(20.0, 10.0));
        assert!(session.pointer_up(30.0, 10.0));
        assert!(session.wheel(0.0, -400.0, 0.0));
        assert!((session.scale_percent().unwrap() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_rgba_buffers() {
        let session = session_with_image(400, 400);
        let preview = session.preview_rgba();
        assert_eq!(preview.len(), rgba_len(session.inner.preview()));
        // Center pixel is image blue with full alpha.
        let idx = (200 * 400 + 200) * 4;
        assert_eq!(&preview[idx..idx + 4], &[0, 0, 255, 255]);
        assert_eq!(session.output_rgba().len(), rgba_len(session.inner.output()));
    }

    #[test]
    fn test_crop_and_save_through_core() {
        let mut session = session_with_image(400, 400);
        session.inner.crop().unwrap();
        let asset = JsCroppedAsset::from(session.inner.save().unwrap());
        assert_eq!(asset.file_name(), "snap.png");
        assert_eq!(asset.mime_type(), "image/png");
        assert!(asset.byte_length() > 0);
    }
}
