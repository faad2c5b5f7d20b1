//! Viewport geometry and cropper settings.
//!
//! Settings are supplied once when a [`CropSession`](crate::CropSession) is
//! created and never change afterwards. The defaults match the browser
//! cropper: a 400x400 input viewport, a 300x300 output surface, a light gray
//! background and a translucent blue crop guide.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::render::InterpolationFilter;

/// Default input (preview) viewport edge in pixels.
pub const DEFAULT_INPUT_EDGE: u32 = 400;
/// Default output (crop) surface edge in pixels.
pub const DEFAULT_OUTPUT_EDGE: u32 = 300;
/// Scale percent added per unit of summed wheel delta.
pub const DEFAULT_WHEEL_SENSITIVITY: f64 = 0.05;
/// Largest surface edge a session will allocate.
pub const MAX_SURFACE_EDGE: u32 = 8192;
/// Surface fill behind the image, `rgb(200, 200, 200)`.
pub const DEFAULT_BACKGROUND: [u8; 3] = [200, 200, 200];
/// Crop guide stroke, `rgba(0, 123, 255, 0.8)`.
pub const DEFAULT_GUIDE_COLOR: [u8; 4] = [0, 123, 255, 204];

/// Settings rejected when a session is created.
#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error(
        "Invalid {surface} surface size {width}x{height}: edges must be between 1 and {max}",
        max = MAX_SURFACE_EDGE
    )]
    SurfaceSize {
        surface: &'static str,
        width: u32,
        height: u32,
    },

    #[error("Invalid wheel sensitivity: {0}")]
    WheelSensitivity(f64),
}

/// Width and height of a surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn is_allocatable(self) -> bool {
        (1..=MAX_SURFACE_EDGE).contains(&self.width) && (1..=MAX_SURFACE_EDGE).contains(&self.height)
    }

    /// Center of a surface of this size, in surface pixels.
    pub fn center(self) -> (f64, f64) {
        (self.width as f64 / 2.0, self.height as f64 / 2.0)
    }
}

/// The two fixed surfaces the cropper draws onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportGeometry {
    /// Interactive preview surface.
    pub input: Size,
    /// Crop output surface; also the size of the crop guide.
    pub output: Size,
}

impl Default for ViewportGeometry {
    fn default() -> Self {
        Self {
            input: Size::new(DEFAULT_INPUT_EDGE, DEFAULT_INPUT_EDGE),
            output: Size::new(DEFAULT_OUTPUT_EDGE, DEFAULT_OUTPUT_EDGE),
        }
    }
}

/// Everything a session needs besides the image itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropperSettings {
    pub geometry: ViewportGeometry,
    /// RGB fill used on both surfaces before the image is drawn.
    pub background: [u8; 3],
    /// RGBA stroke color of the crop guide.
    pub guide_color: [u8; 4],
    /// Multiplier applied to the summed wheel delta.
    pub wheel_sensitivity: f64,
    /// Sampling used when drawing the scaled image.
    pub filter: InterpolationFilter,
}

impl Default for CropperSettings {
    fn default() -> Self {
        Self {
            geometry: ViewportGeometry::default(),
            background: DEFAULT_BACKGROUND,
            guide_color: DEFAULT_GUIDE_COLOR,
            wheel_sensitivity: DEFAULT_WHEEL_SENSITIVITY,
            filter: InterpolationFilter::default(),
        }
    }
}

impl CropperSettings {
    /// Check that both surfaces can be allocated and the wheel sensitivity
    /// is a finite number.
    ///
    /// # Errors
    ///
    /// Returns the first offending field as a [`SettingsError`].
    pub fn validate(&self) -> Result<(), SettingsError> {
        let surfaces = [
            ("input", self.geometry.input),
            ("output", self.geometry.output),
        ];
        for (surface, size) in surfaces {
            if !size.is_allocatable() {
                return Err(SettingsError::SurfaceSize {
                    surface,
                    width: size.width,
                    height: size.height,
                });
            }
        }
        if !self.wheel_sensitivity.is_finite() {
            return Err(SettingsError::WheelSensitivity(self.wheel_sensitivity));
        }
        Ok(())
    }
}
