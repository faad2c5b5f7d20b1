//! An owned, opaque RGB drawing target.
//!
//! `RenderSurface` stands in for a canvas. It only supports the three
//! operations the cropper needs: filling, drawing a scaled image region and
//! stroking an outline.
//!
//! # Pixel Model
//!
//! Pixel `(px, py)` covers the square `[px, px + 1) x [py, py + 1)` and is
//! sampled at its center `(px + 0.5, py + 0.5)`. A destination rectangle
//! covers every pixel whose center lies inside it.

use image::{Rgb, RgbImage, RgbaImage};

use super::InterpolationFilter;
use crate::settings::Size;

/// An axis-aligned rectangle with fractional coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The whole of an image, in its own pixel space.
    pub fn of_image(image: &RgbaImage) -> Self {
        Self::new(0.0, 0.0, image.width() as f64, image.height() as f64)
    }

    fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
            || !self.x.is_finite()
            || !self.y.is_finite()
            || !self.width.is_finite()
            || !self.height.is_finite()
    }
}

/// Pixel indices `[start, end)` whose centers fall inside `[from, from + len)`,
/// limited to `[0, limit)`.
fn covered_span(from: f64, len: f64, limit: u32) -> (u32, u32) {
    let start = (from - 0.5).ceil().max(0.0);
    let end = (from + len - 0.5).ceil().min(limit as f64);
    if end <= start {
        return (0, 0);
    }
    (start as u32, end as u32)
}

/// A fixed-size opaque RGB drawing surface.
#[derive(Debug, Clone)]
pub struct RenderSurface {
    pixels: RgbImage,
}

impl RenderSurface {
    /// Create a black surface of the given size.
    pub fn new(size: Size) -> Self {
        Self {
            pixels: RgbImage::new(size.width, size.height),
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.pixels.width(), self.pixels.height())
    }

    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    /// Pixel data expanded to RGBA with full opacity, in row-major order,
    /// ready for a canvas `ImageData`.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.as_raw().len() / 3 * 4);
        for px in self.pixels.pixels() {
            out.extend_from_slice(&[px[0], px[1], px[2], 255]);
        }
        out
    }

    /// Fill the entire surface with `color`.
    pub fn clear(&mut self, color: [u8; 3]) {
        for px in self.pixels.pixels_mut() {
            *px = Rgb(color);
        }
    }

    /// Draw the `src` region of `source` stretched onto the `dst` rectangle.
    ///
    /// Source alpha is composited over the current surface content. Sampling
    /// never reads outside `src` (clamped to the image bounds); destination
    /// pixels outside the surface are skipped.
    pub fn draw_image_region(
        &mut self,
        source: &RgbaImage,
        src: Rect,
        dst: Rect,
        filter: InterpolationFilter,
    ) {
        if src.is_degenerate() || dst.is_degenerate() {
            return;
        }

        // Inclusive source pixel bounds available for sampling.
        let lo_x = src.x.floor().max(0.0);
        let lo_y = src.y.floor().max(0.0);
        let hi_x = (src.x + src.width).ceil().min(source.width() as f64) - 1.0;
        let hi_y = (src.y + src.height).ceil().min(source.height() as f64) - 1.0;
        if hi_x < lo_x || hi_y < lo_y {
            return;
        }
        let sampler = Sampler {
            source,
            lo_x,
            lo_y,
            hi_x,
            hi_y,
        };

        let step_x = src.width / dst.width;
        let step_y = src.height / dst.height;
        let (x_start, x_end) = covered_span(dst.x, dst.width, self.pixels.width());
        let (y_start, y_end) = covered_span(dst.y, dst.height, self.pixels.height());

        for py in y_start..y_end {
            let v = src.y + (py as f64 + 0.5 - dst.y) * step_y;
            for px in x_start..x_end {
                let u = src.x + (px as f64 + 0.5 - dst.x) * step_x;
                let sample = match filter {
                    InterpolationFilter::Nearest => sampler.nearest(u, v),
                    InterpolationFilter::Bilinear => sampler.bilinear(u - 0.5, v - 0.5),
                };
                let dst_px = self.pixels.get_pixel_mut(px, py);
                composite_premultiplied(dst_px, sample);
            }
        }
    }

    /// Stroke a one pixel wide outline along the inside edge of `rect`,
    /// snapped outward to whole pixels, blending `color` by its alpha.
    ///
    /// Only the part of the outline that lands on the surface is visited.
    pub fn stroke_rect(&mut self, rect: Rect, color: [u8; 4]) {
        if rect.is_degenerate() || self.pixels.width() == 0 || self.pixels.height() == 0 {
            return;
        }

        let left = rect.x.floor() as i64;
        let top = rect.y.floor() as i64;
        let right = ((rect.x + rect.width).ceil() as i64).saturating_sub(1);
        let bottom = ((rect.y + rect.height).ceil() as i64).saturating_sub(1);

        let max_x = self.pixels.width() as i64 - 1;
        let max_y = self.pixels.height() as i64 - 1;
        let on_x = |x: i64| (0..=max_x).contains(&x);
        let on_y = |y: i64| (0..=max_y).contains(&y);

        // Rows, corners included.
        let xs = left.max(0)..=right.min(max_x);
        if on_y(top) {
            for x in xs.clone() {
                self.blend_at(x, top, color);
            }
        }
        if bottom != top && on_y(bottom) {
            for x in xs {
                self.blend_at(x, bottom, color);
            }
        }

        // Columns between the rows.
        let ys = top.saturating_add(1).max(0)..=bottom.saturating_sub(1).min(max_y);
        if on_x(left) {
            for y in ys.clone() {
                self.blend_at(left, y, color);
            }
        }
        if right != left && on_x(right) {
            for y in ys {
                self.blend_at(right, y, color);
            }
        }
    }

    fn blend_at(&mut self, x: i64, y: i64, color: [u8; 4]) {
        let alpha = color[3] as f64 / 255.0;
        let premultiplied = [
            color[0] as f64 * alpha,
            color[1] as f64 * alpha,
            color[2] as f64 * alpha,
            alpha,
        ];
        composite_premultiplied(self.pixels.get_pixel_mut(x as u32, y as u32), premultiplied);
    }
}

/// `source`-over compositing of a premultiplied RGBA sample onto an opaque
/// pixel. `sample[3]` is the coverage in `[0, 1]`.
fn composite_premultiplied(dst: &mut Rgb<u8>, sample: [f64; 4]) {
    let keep = 1.0 - sample[3];
    for i in 0..3 {
        let v = sample[i] + dst[i] as f64 * keep;
        dst[i] = v.clamp(0.0, 255.0).round() as u8;
    }
}

/// Clamp-to-edge sampling over an inclusive pixel window of the source.
struct Sampler<'a> {
    source: &'a RgbaImage,
    lo_x: f64,
    lo_y: f64,
    hi_x: f64,
    hi_y: f64,
}

impl Sampler<'_> {
    /// Premultiplied RGBA of one source pixel.
    #[inline]
    fn texel(&self, x: f64, y: f64) -> [f64; 4] {
        let p = self.source.get_pixel(x as u32, y as u32).0;
        let a = p[3] as f64 / 255.0;
        [p[0] as f64 * a, p[1] as f64 * a, p[2] as f64 * a, a]
    }

    fn nearest(&self, u: f64, v: f64) -> [f64; 4] {
        let x = u.floor().clamp(self.lo_x, self.hi_x);
        let y = v.floor().clamp(self.lo_y, self.hi_y);
        self.texel(x, y)
    }

    /// Bilinear interpolation of the 4 source pixels around `(x, y)`, where
    /// integer coordinates are pixel centers.
    fn bilinear(&self, x: f64, y: f64) -> [f64; 4] {
        let x = x.clamp(self.lo_x, self.hi_x);
        let y = y.clamp(self.lo_y, self.hi_y);

        let x0 = x.floor();
        let y0 = y.floor();
        let x1 = (x0 + 1.0).min(self.hi_x);
        let y1 = (y0 + 1.0).min(self.hi_y);

        // Fractional distances
        let fx = x - x0;
        let fy = y - y0;

        let p00 = self.texel(x0, y0);
        let p10 = self.texel(x1, y0);
        let p01 = self.texel(x0, y1);
        let p11 = self.texel(x1, y1);

        let mut out = [0.0; 4];
        for i in 0..4 {
            out[i] = p00[i] * (1.0 - fx) * (1.0 - fy)
                + p10[i] * fx * (1.0 - fy)
                + p01[i] * (1.0 - fx) * fy
                + p11[i] * fx * fy;
        }
        out
    }
}
