//! The authoritative pan/zoom state of a loaded image.
//!
//! The scale is held as a fractional multiplier (image pixels to surface
//! pixels). The percent form used by the zoom slider is derived from it on
//! demand and is only accepted or reported at the UI boundary.

use thiserror::Error;

use crate::decode::ImageAsset;
use crate::settings::ViewportGeometry;

/// Lowest zoom the mutators allow, in percent.
pub const MIN_SCALE_PERCENT: f64 = 10.0;
/// Highest zoom the mutators allow, in percent.
pub const MAX_SCALE_PERCENT: f64 = 400.0;

/// Errors raised while creating a transform.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    /// The image has no area, so no fit-to-width scale exists.
    #[error("Degenerate image: {width}x{height} has no drawable area")]
    DegenerateImage { width: u32, height: u32 },
}

/// A point in either image space or surface space, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Clamp a requested zoom percentage to the supported range.
///
/// Returns `None` for NaN; infinities clamp to the nearest bound.
pub fn clamp_scale_percent(percent: f64) -> Option<f64> {
    if percent.is_nan() {
        return None;
    }
    Some(percent.clamp(MIN_SCALE_PERCENT, MAX_SCALE_PERCENT))
}

/// Scale and focal point of the current image.
///
/// The focal point is the image-space coordinate drawn at the center of a
/// surface. It is deliberately unbounded: panning past the image edges is
/// allowed and shows the background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    scale: f64,
    focal: Point,
}

impl TransformState {
    /// Fit the image width to the input surface and center it.
    ///
    /// The fitted scale is used as-is, even when it falls outside the slider
    /// range; the first zoom input brings it back inside.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::DegenerateImage` when either natural
    /// dimension is zero.
    pub fn init(image: &ImageAsset, geometry: &ViewportGeometry) -> Result<Self, TransformError> {
        Self::fit_width(image.natural_width(), image.natural_height(), geometry)
    }

    /// [`init`](Self::init) from bare natural dimensions.
    pub fn fit_width(
        natural_width: u32,
        natural_height: u32,
        geometry: &ViewportGeometry,
    ) -> Result<Self, TransformError> {
        if natural_width == 0 || natural_height == 0 {
            return Err(TransformError::DegenerateImage {
                width: natural_width,
                height: natural_height,
            });
        }

        Ok(Self {
            scale: geometry.input.width as f64 / natural_width as f64,
            focal: Point::new(natural_width as f64 / 2.0, natural_height as f64 / 2.0),
        })
    }

    /// Multiplier from image pixels to surface pixels.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// The scale as the slider shows it.
    pub fn scale_percent(&self) -> f64 {
        self.scale * 100.0
    }

    pub fn focal(&self) -> Point {
        self.focal
    }

    /// Zoom to `percent`, clamped to [10, 400]. The focal point is kept.
    /// A NaN request leaves the state unchanged.
    #[must_use]
    pub fn set_scale(self, percent: f64) -> Self {
        match clamp_scale_percent(percent) {
            Some(percent) => Self {
                scale: percent / 100.0,
                ..self
            },
            None => self,
        }
    }

    /// Move the focal point by a delta already expressed in image pixels.
    #[must_use]
    pub fn pan_by(self, dx: f64, dy: f64) -> Self {
        Self {
            focal: Point::new(self.focal.x + dx, self.focal.y + dy),
            ..self
        }
    }

    #[must_use]
    pub fn with_focal(self, focal: Point) -> Self {
        Self { focal, ..self }
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=10_000, 1u32..=10_000)
    }

    proptest! {
        /// Property: set_scale always lands in [10, 400] and is exact in range.
        #[test]
        fn prop_set_scale_clamped(
            (width, height) in dimensions_strategy(),
            requested in -1.0e6f64..1.0e6,
        ) {
            let geometry = ViewportGeometry::default();
            let s = TransformState::fit_width(width, height, &geometry).unwrap().set_scale(requested);
            let percent = s.scale_percent();

            prop_assert!(percent >= MIN_SCALE_PERCENT - 1e-9);
            prop_assert!(percent <= MAX_SCALE_PERCENT + 1e-9);
            if (MIN_SCALE_PERCENT..=MAX_SCALE_PERCENT).contains(&requested) {
                prop_assert!((percent - requested).abs() < 1e-9);
            }
        }

        /// Property: init depends only on the natural size.
        #[test]
        fn prop_init_deterministic((width, height) in dimensions_strategy()) {
            let geometry = ViewportGeometry::default();
            let a = TransformState::fit_width(width, height, &geometry).unwrap();
            let b = TransformState::fit_width(width, height, &geometry).unwrap();

            prop_assert_eq!(a, b);
            let expected = geometry.input.width as f64 / width as f64 * 100.0;
            prop_assert!((a.scale_percent() - expected).abs() < 1e-9 * expected.max(1.0));
            prop_assert_eq!(a.focal(), Point::new(width as f64 / 2.0, height as f64 / 2.0));
        }

        /// Property: panning there and back restores the focal point.
        #[test]
        fn prop_pan_reversible(
            (width, height) in dimensions_strategy(),
            dx in -1.0e5f64..1.0e5,
            dy in -1.0e5f64..1.0e5,
        ) {
            let s = TransformState::fit_width(width, height, &ViewportGeometry::default()).unwrap();
            let back = s.pan_by(dx, dy).pan_by(-dx, -dy);

            prop_assert!((back.focal().x - s.focal().x).abs() < 1e-6);
            prop_assert!((back.focal().y - s.focal().y).abs() < 1e-6);
            prop_assert_eq!(back.scale(), s.scale());
        }
    }
}
