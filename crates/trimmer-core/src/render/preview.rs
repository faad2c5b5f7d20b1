//! The interactive preview with its crop guide overlay.

use tracing::trace;

use super::{image_placement, Rect, RenderSurface};
use crate::decode::ImageAsset;
use crate::settings::{CropperSettings, ViewportGeometry};
use crate::transform::TransformState;

/// The crop guide: an output-sized rectangle centered in the input surface.
pub fn guide_rect(geometry: &ViewportGeometry) -> Rect {
    let input = geometry.input;
    let output = geometry.output;
    Rect::new(
        (input.width as f64 - output.width as f64) / 2.0,
        (input.height as f64 - output.height as f64) / 2.0,
        output.width as f64,
        output.height as f64,
    )
}

/// Redraw the preview surface for `transform`.
///
/// Fills the background, draws the scaled image with the focal point at the
/// surface center, then strokes the crop guide on top. The guide is purely
/// visual and never influences the transform.
pub fn render_preview(
    surface: &mut RenderSurface,
    image: &ImageAsset,
    transform: TransformState,
    settings: &CropperSettings,
) {
    let dst = image_placement(
        image.natural_width(),
        image.natural_height(),
        &transform,
        surface.size(),
    );
    trace!(
        scale = transform.scale(),
        focal_x = transform.focal().x,
        focal_y = transform.focal().y,
        "render preview"
    );

    surface.clear(settings.background);
    surface.draw_image_region(image.pixels(), Rect::of_image(image.pixels()), dst, settings.filter);
    surface.stroke_rect(guide_rect(&settings.geometry), settings.guide_color);
}
