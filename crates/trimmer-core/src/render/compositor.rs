//! Producing the crop on the output surface.

use tracing::debug;

use super::{image_placement, Rect, RenderSurface};
use crate::decode::ImageAsset;
use crate::settings::CropperSettings;
use crate::transform::TransformState;

/// Re-project `transform` onto `surface` (the output surface).
///
/// The image is drawn at the preview's scale with the focal point at the
/// output surface's own center. Areas of the crop that fall outside the
/// image keep the background color; nothing is clipped or shifted.
pub fn crop_into(
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
    debug!(
        name = image.display_name(),
        scale_percent = transform.scale_percent(),
        focal_x = transform.focal().x,
        focal_y = transform.focal().y,
        "compositing crop"
    );

    surface.clear(settings.background);
    surface.draw_image_region(image.pixels(), Rect::of_image(image.pixels()), dst, settings.filter);
}

/// [`crop_into`] a fresh surface of the configured output size.
pub fn crop(
    image: &ImageAsset,
    transform: TransformState,
    settings: &CropperSettings,
) -> RenderSurface {
    let mut surface = RenderSurface::new(settings.geometry.output);
    crop_into(&mut surface, image, transform, settings);
    surface
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::transform::Point;
    use image::{Rgba, RgbaImage};
    use proptest::prelude::*;

    const BLOCK: u32 = 32;

    fn block_image() -> ImageAsset {
        let mut img = RgbaImage::new(BLOCK * 8, BLOCK * 8);
        for (x, y, px) in img.enumerate_pixels_mut() {
            let (bx, by) = (x / BLOCK, y / BLOCK);
            *px = Rgba([(bx * 31) as u8, (by * 31) as u8, 128, 255]);
        }
        ImageAsset::new(img, "grid")
    }

    proptest! {
        /// Property: the output center shows the source color at the focal
        /// point, for any scale and any focal far enough inside a block that
        /// the bilinear footprint (up to 5px at 10%) stays in it.
        #[test]
        fn prop_crop_center_is_focal_color(
            percent in 10.0f64..=400.0,
            bx in 0u32..8,
            by in 0u32..8,
            ox in 4.0f64..12.0,
            oy in 4.0f64..12.0,
        ) {
            let image = block_image();
            let settings = CropperSettings::default();
            let focal = Point::new((bx * BLOCK) as f64 + ox, (by * BLOCK) as f64 + oy);
            let t = TransformState::init(&image, &settings.geometry)
                .unwrap()
                .set_scale(percent)
                .with_focal(focal);
            let out = crop(&image, t, &settings);

            let expected = image.pixels().get_pixel(focal.x as u32, focal.y as u32).0;
            let center = out.size();
            let actual = out.pixels().get_pixel(center.width / 2, center.height / 2).0;
            prop_assert_eq!(actual, [expected[0], expected[1], expected[2]]);
        }
    }
}
