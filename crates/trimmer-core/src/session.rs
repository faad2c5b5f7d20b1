//! The interactive cropping session.
//!
//! [`CropSession`] owns everything that lives between two file loads: the
//! decoded image, its current transform, an optional drag, and the two
//! render surfaces. Each event method runs to completion and reports whether
//! the preview was redrawn.
//!
//! # Event Rules
//!
//! - Until an image has loaded, every interaction event is a no-op.
//! - Pointer press only opens a drag; move and release redraw.
//! - Move and release without an open drag are ignored.
//! - A successful load replaces image, transform and drag wholesale; a
//!   failed load leaves the previous image in place.

use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::decode::{self, DecodeError, ImageAsset};
use crate::encode::{self, CroppedAsset, EncodeError};
use crate::render::{self, RenderSurface};
use crate::settings::{CropperSettings, SettingsError};
use crate::transform::{
    apply_slider, apply_wheel, DragSession, Point, TransformError, TransformState, WheelDelta,
};

/// Errors surfaced to the page by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error("Save failed: {0}")]
    Encode(#[from] EncodeError),

    #[error("Invalid cropper settings: {0}")]
    InvalidSettings(#[from] SettingsError),

    /// An operation that needs an image was called before any load.
    #[error("No image is loaded")]
    NoImage,

    /// Save was requested before the output surface held a crop.
    #[error("Nothing has been cropped yet")]
    NothingCropped,
}

#[derive(Debug)]
struct ActiveImage {
    asset: ImageAsset,
    transform: TransformState,
    drag: Option<DragSession>,
    cropped: bool,
}

/// A single-image pan/zoom/crop session.
#[derive(Debug)]
pub struct CropSession {
    settings: CropperSettings,
    preview: RenderSurface,
    output: RenderSurface,
    active: Option<ActiveImage>,
}

impl Default for CropSession {
    fn default() -> Self {
        Self::with_valid_settings(CropperSettings::default())
    }
}

impl CropSession {
    /// Create a session and allocate both surfaces.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidSettings` if a surface edge is zero or
    /// above [`MAX_SURFACE_EDGE`](crate::settings::MAX_SURFACE_EDGE), or the
    /// wheel sensitivity is not finite.
    pub fn new(settings: CropperSettings) -> Result<Self, SessionError> {
        settings.validate().map_err(|e| {
            warn!(error = %e, "settings rejected");
            e
        })?;
        Ok(Self::with_valid_settings(settings))
    }

    fn with_valid_settings(settings: CropperSettings) -> Self {
        let mut preview = RenderSurface::new(settings.geometry.input);
        let mut output = RenderSurface::new(settings.geometry.output);
        preview.clear(settings.background);
        output.clear(settings.background);
        Self {
            settings,
            preview,
            output,
            active: None,
        }
    }

    pub fn settings(&self) -> &CropperSettings {
        &self.settings
    }

    /// Decode `bytes` and make the result the current image.
    ///
    /// On success the transform is fitted to the new image and the preview
    /// is rendered once.
    pub fn load(&mut self, bytes: &[u8], original_name: &str) -> Result<(), SessionError> {
        let asset = decode::load(bytes, original_name)?;
        self.replace_image(asset)
    }

    /// [`load`](Self::load) with the content type declared by the file picker.
    pub fn load_with_content_type(
        &mut self,
        bytes: &[u8],
        original_name: &str,
        content_type: &str,
    ) -> Result<(), SessionError> {
        let asset = decode::load_with_content_type(bytes, original_name, content_type)?;
        self.replace_image(asset)
    }

    /// Make an already decoded asset the current image.
    ///
    /// An asset with no drawable area is rejected and the previous image is
    /// kept.
    pub fn replace_image(&mut self, asset: ImageAsset) -> Result<(), SessionError> {
        if asset.is_empty() {
            warn!(
                name = asset.display_name(),
                width = asset.natural_width(),
                height = asset.natural_height(),
                "image rejected: no drawable area"
            );
            return Err(TransformError::DegenerateImage {
                width: asset.natural_width(),
                height: asset.natural_height(),
            }
            .into());
        }
        let transform = TransformState::init(&asset, &self.settings.geometry)?;
        debug!(
            name = asset.display_name(),
            scale_percent = transform.scale_percent(),
            "transform initialized"
        );

        self.output.clear(self.settings.background);
        self.active = Some(ActiveImage {
            asset,
            transform,
            drag: None,
            cropped: false,
        });
        self.redraw();
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.active.is_some()
    }

    pub fn image(&self) -> Option<&ImageAsset> {
        self.active.as_ref().map(|a| &a.asset)
    }

    /// Snapshot of the current transform.
    pub fn transform(&self) -> Option<TransformState> {
        self.active.as_ref().map(|a| a.transform)
    }

    /// Zoom percent for the slider, if an image is loaded.
    pub fn scale_percent(&self) -> Option<f64> {
        self.transform().map(|t| t.scale_percent())
    }

    pub fn is_dragging(&self) -> bool {
        self.active.as_ref().is_some_and(|a| a.drag.is_some())
    }

    /// The interactive input surface.
    pub fn preview(&self) -> &RenderSurface {
        &self.preview
    }

    /// The crop output surface.
    pub fn output(&self) -> &RenderSurface {
        &self.output
    }

    /// Pointer button pressed at `pointer`. Opens a drag but never redraws,
    /// so this always returns `false`.
    pub fn pointer_down(&mut self, pointer: Point) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        active.drag = Some(DragSession::begin(pointer, &active.transform));
        false
    }

    /// Pointer moved to `pointer`. Returns `true` if the preview was redrawn.
    pub fn pointer_move(&mut self, pointer: Point) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        let Some(drag) = active.drag else {
            return false;
        };
        active.transform = drag.drag_to(active.transform, pointer);
        self.redraw();
        true
    }

    /// Pointer released at `pointer`: commits and closes the drag.
    pub fn pointer_up(&mut self, pointer: Point) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        let Some(drag) = active.drag.take() else {
            return false;
        };
        active.transform = drag.end(active.transform, pointer);
        self.redraw();
        true
    }

    /// Wheel event over the preview.
    pub fn wheel(&mut self, delta: WheelDelta) -> bool {
        let sensitivity = self.settings.wheel_sensitivity;
        self.update(|t| apply_wheel(t, delta, sensitivity))
    }

    /// Zoom slider moved to `value` percent.
    pub fn set_slider(&mut self, value: f64) -> bool {
        self.update(|t| apply_slider(t, value))
    }

    /// Composite the current transform onto the output surface.
    pub fn crop(&mut self) -> Result<&RenderSurface, SessionError> {
        let active = self.active.as_mut().ok_or(SessionError::NoImage)?;
        render::crop_into(&mut self.output, &active.asset, active.transform, &self.settings);
        active.cropped = true;
        Ok(&self.output)
    }

    /// Encode the output surface as `{display_name}.png`.
    pub fn save(&self) -> Result<CroppedAsset, SessionError> {
        let active = self.active.as_ref().ok_or(SessionError::NoImage)?;
        if !active.cropped {
            return Err(SessionError::NothingCropped);
        }
        encode::export_asset(&self.output, active.asset.display_name()).map_err(|e| {
            warn!(error = %e, "save failed");
            SessionError::from(e)
        })
    }

    fn update(&mut self, f: impl FnOnce(TransformState) -> TransformState) -> bool {
        let Some(active) = self.active.as_mut() else {
            trace!("input ignored before load");
            return false;
        };
        active.transform = f(active.transform);
        self.redraw();
        true
    }

    fn redraw(&mut self) {
        if let Some(active) = self.active.as_ref() {
            render::render_preview(&mut self.preview, &active.asset, active.transform, &self.settings);
        }
    }
}
