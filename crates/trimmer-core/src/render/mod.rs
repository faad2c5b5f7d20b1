//! Drawing the transformed image onto render surfaces.
//!
//! Both the interactive preview and the final crop place the image the same
//! way: scaled by the transform and positioned so the focal point lands at
//! the center of the target surface. Only the surface (and therefore its
//! center) differs, which is what makes the crop reproduce the preview's
//! guide rectangle pixel for pixel.

mod compositor;
mod preview;
mod surface;

use serde::{Deserialize, Serialize};

pub use compositor::{crop, crop_into};
pub use preview::{guide_rect, render_preview};
pub use surface::{Rect, RenderSurface};

use crate::settings::Size;
use crate::transform::TransformState;

/// Sampling used when the image is drawn scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationFilter {
    /// Hard pixel edges, matching a canvas with smoothing disabled.
    Nearest,
    /// Smooth scaling, matching a canvas with smoothing enabled.
    #[default]
    Bilinear,
}

/// Where the whole image lands on a surface of `surface` size.
///
/// ```text
/// x = surface_center.x - focal.x * scale
/// y = surface_center.y - focal.y * scale
/// ```
pub fn image_placement(
    natural_width: u32,
    natural_height: u32,
    transform: &TransformState,
    surface: Size,
) -> Rect {
    let scale = transform.scale();
    let focal = transform.focal();
    let (cx, cy) = surface.center();
    Rect::new(
        cx - focal.x * scale,
        cy - focal.y * scale,
        natural_width as f64 * scale,
        natural_height as f64 * scale,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ViewportGeometry;

    #[test]
    fn test_placement_centers_focal() {
        let geometry = ViewportGeometry::default();
        let t = TransformState::fit_width(800, 600, &geometry).unwrap();
        let rect = image_placement(800, 600, &t, geometry.input);

        // Fit to width at 50%: 400x300 centered vertically.
        assert_eq!(rect, Rect::new(0.0, 50.0, 400.0, 300.0));
    }

    #[test]
    fn test_placement_depends_on_surface_center() {
        let geometry = ViewportGeometry::default();
        let t = TransformState::fit_width(800, 600, &geometry).unwrap();
        let on_input = image_placement(800, 600, &t, geometry.input);
        let on_output = image_placement(800, 600, &t, geometry.output);

        assert_eq!(on_input.x - on_output.x, 50.0);
        assert_eq!(on_input.y - on_output.y, 50.0);
        assert_eq!(on_input.width, on_output.width);
    }
}
