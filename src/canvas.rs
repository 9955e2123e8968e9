//! # Software RGBA Canvas
//!
//! A straight-alpha RGBA8 pixel surface with the primitive set the gauge
//! needs: anti-aliased fills and strokes for circles, rectangles, rounded
//! rectangles, and convex polygons, plus glyph-mask blitting for text.
//!
//! ## Paints
//!
//! Every primitive takes a [`Paint`] deciding what each covered pixel
//! receives:
//!
//! ```text
//! Paint::Solid(color)                 -> constant color
//! Paint::Pattern { pattern, t }       -> pattern.sample(t.invert() * pixel)
//! ```
//!
//! Pattern paints map the pixel center through the INVERSE of the supplied
//! transform into pattern space, then tile horizontally and clamp
//! vertically. A non-invertible transform (vertical scale 0) makes the
//! paint contribute nothing, the same way a degenerate shader matrix
//! renders empty.
//!
//! Coverage-based anti-aliasing: each primitive computes a fractional
//! coverage per pixel from the signed distance to its boundary and
//! composites the paint source-over with that coverage.

use crate::color::Color;
use crate::error::MareaError;
use crate::pattern::WavePattern;
use crate::transform::Transform;

/// Fill source for canvas primitives.
#[derive(Debug, Clone, Copy)]
pub enum Paint<'a> {
    /// Constant color.
    Solid(Color),
    /// Tiled wave pattern sampled through the inverse of `transform`.
    Pattern {
        pattern: &'a WavePattern,
        transform: Transform,
    },
}

/// A paint with its sampling transform resolved, ready for per-pixel use.
enum Sampler<'a> {
    Solid(Color),
    Pattern {
        pattern: &'a WavePattern,
        inverse: Transform,
    },
    Empty,
}

impl<'a> Sampler<'a> {
    fn resolve(paint: Paint<'a>) -> Sampler<'a> {
        match paint {
            Paint::Solid(color) if color.a == 0 => Sampler::Empty,
            Paint::Solid(color) => Sampler::Solid(color),
            Paint::Pattern { pattern, transform } => match transform.invert() {
                Some(inverse) => Sampler::Pattern { pattern, inverse },
                None => Sampler::Empty,
            },
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self, Sampler::Empty)
    }

    #[inline]
    fn color_at(&self, x: f32, y: f32) -> Color {
        match self {
            Sampler::Solid(color) => *color,
            Sampler::Pattern { pattern, inverse } => {
                let (px, py) = inverse.apply(x, y);
                pattern.sample(px, py)
            }
            Sampler::Empty => Color::TRANSPARENT,
        }
    }
}

/// An owned RGBA8 surface.
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Canvas {
    /// Create a transparent canvas.
    pub fn new(width: u32, height: u32) -> Canvas {
        let width = width as usize;
        let height = height as usize;
        Canvas {
            width,
            height,
            pixels: vec![Color::TRANSPARENT; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Replace every pixel with `color`.
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Read a pixel. Panics outside the surface.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        self.pixels[y * self.width + x]
    }

    /// Overwrite a pixel, ignoring blending. Out-of-bounds is a no-op.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }

    /// Composite `color` over the pixel with the given coverage.
    #[inline]
    fn blend_pixel(&mut self, x: usize, y: usize, color: Color, coverage: f32) {
        if coverage <= 0.0 {
            return;
        }
        let idx = y * self.width + x;
        self.pixels[idx] = color.over_with_coverage(self.pixels[idx], coverage);
    }

    /// Clamp a continuous x span to valid pixel columns.
    fn columns(&self, lo: f32, hi: f32) -> std::ops::Range<usize> {
        let x0 = lo.floor().max(0.0) as usize;
        let x1 = (hi.ceil().max(0.0) as usize).min(self.width);
        x0.min(self.width)..x1
    }

    /// Clamp a continuous y span to valid pixel rows.
    fn rows(&self, lo: f32, hi: f32) -> std::ops::Range<usize> {
        let y0 = lo.floor().max(0.0) as usize;
        let y1 = (hi.ceil().max(0.0) as usize).min(self.height);
        y0.min(self.height)..y1
    }

    /// Fill an axis-aligned rectangle spanning `[x0, x1) x [y0, y1)`.
    pub fn fill_rect(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, paint: Paint<'_>) {
        let sampler = Sampler::resolve(paint);
        if sampler.is_empty() || x1 <= x0 || y1 <= y0 {
            return;
        }

        for y in self.rows(y0, y1) {
            let cov_y = ((y as f32 + 1.0).min(y1) - (y as f32).max(y0)).clamp(0.0, 1.0);
            if cov_y <= 0.0 {
                continue;
            }
            for x in self.columns(x0, x1) {
                let cov_x = ((x as f32 + 1.0).min(x1) - (x as f32).max(x0)).clamp(0.0, 1.0);
                let color = sampler.color_at(x as f32 + 0.5, y as f32 + 0.5);
                self.blend_pixel(x, y, color, cov_x * cov_y);
            }
        }
    }

    /// Stroke a rectangle outline with a stroke centered on the edges.
    pub fn stroke_rect(
        &mut self,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        stroke_width: f32,
        paint: Paint<'_>,
    ) {
        let sampler = Sampler::resolve(paint);
        if sampler.is_empty() || stroke_width <= 0.0 || x1 <= x0 || y1 <= y0 {
            return;
        }
        let half = stroke_width * 0.5;

        for y in self.rows(y0 - half - 1.0, y1 + half + 1.0) {
            for x in self.columns(x0 - half - 1.0, x1 + half + 1.0) {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;
                // Signed distance to the rectangle boundary
                let dx = (x0 - px).max(px - x1);
                let dy = (y0 - py).max(py - y1);
                let d = if dx > 0.0 || dy > 0.0 {
                    (dx.max(0.0).powi(2) + dy.max(0.0).powi(2)).sqrt()
                } else {
                    dx.max(dy)
                };
                let coverage = (half - d.abs() + 0.5).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    let color = sampler.color_at(px, py);
                    self.blend_pixel(x, y, color, coverage);
                }
            }
        }
    }

    /// Fill a circle.
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: Paint<'_>) {
        let sampler = Sampler::resolve(paint);
        if sampler.is_empty() || radius <= 0.0 {
            return;
        }

        for y in self.rows(cy - radius - 1.0, cy + radius + 1.0) {
            for x in self.columns(cx - radius - 1.0, cx + radius + 1.0) {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;
                let dist = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
                let coverage = (radius - dist + 0.5).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    let color = sampler.color_at(px, py);
                    self.blend_pixel(x, y, color, coverage);
                }
            }
        }
    }

    /// Stroke a circle outline with a stroke centered on the radius.
    pub fn stroke_circle(
        &mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        stroke_width: f32,
        paint: Paint<'_>,
    ) {
        let sampler = Sampler::resolve(paint);
        if sampler.is_empty() || radius <= 0.0 || stroke_width <= 0.0 {
            return;
        }
        let half = stroke_width * 0.5;
        let outer = radius + half + 1.0;

        for y in self.rows(cy - outer, cy + outer) {
            for x in self.columns(cx - outer, cx + outer) {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;
                let dist = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
                let coverage = (half - (dist - radius).abs() + 0.5).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    let color = sampler.color_at(px, py);
                    self.blend_pixel(x, y, color, coverage);
                }
            }
        }
    }

    /// Fill a rounded rectangle. The corner radius is clamped to half the
    /// shorter side.
    pub fn fill_round_rect(
        &mut self,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        corner_radius: f32,
        paint: Paint<'_>,
    ) {
        let sampler = Sampler::resolve(paint);
        if sampler.is_empty() || x1 <= x0 || y1 <= y0 {
            return;
        }
        let r = corner_radius.clamp(0.0, 0.5 * (x1 - x0).min(y1 - y0));

        for y in self.rows(y0, y1) {
            for x in self.columns(x0, x1) {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;
                let d = round_rect_distance(px, py, x0, y0, x1, y1, r);
                let coverage = (0.5 - d).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    let color = sampler.color_at(px, py);
                    self.blend_pixel(x, y, color, coverage);
                }
            }
        }
    }

    /// Stroke a rounded rectangle outline.
    pub fn stroke_round_rect(
        &mut self,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        corner_radius: f32,
        stroke_width: f32,
        paint: Paint<'_>,
    ) {
        let sampler = Sampler::resolve(paint);
        if sampler.is_empty() || stroke_width <= 0.0 || x1 <= x0 || y1 <= y0 {
            return;
        }
        let r = corner_radius.clamp(0.0, 0.5 * (x1 - x0).min(y1 - y0));
        let half = stroke_width * 0.5;

        for y in self.rows(y0 - half - 1.0, y1 + half + 1.0) {
            for x in self.columns(x0 - half - 1.0, x1 + half + 1.0) {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;
                let d = round_rect_distance(px, py, x0, y0, x1, y1, r);
                let coverage = (half - d.abs() + 0.5).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    let color = sampler.color_at(px, py);
                    self.blend_pixel(x, y, color, coverage);
                }
            }
        }
    }

    /// Fill a convex polygon. Vertices may wind either way; fewer than
    /// three vertices (or a degenerate outline) draws nothing.
    pub fn fill_convex_polygon(&mut self, vertices: &[(f32, f32)], paint: Paint<'_>) {
        let sampler = Sampler::resolve(paint);
        if sampler.is_empty() || vertices.len() < 3 {
            return;
        }

        // Twice the signed area fixes the winding direction
        let mut area2 = 0.0f32;
        for i in 0..vertices.len() {
            let (ax, ay) = vertices[i];
            let (bx, by) = vertices[(i + 1) % vertices.len()];
            area2 += ax * by - bx * ay;
        }
        if area2.abs() < 1e-6 {
            return;
        }
        let sign = area2.signum();

        // Outward unit normal and anchor per edge
        let edges: Vec<(f32, f32, f32, f32)> = (0..vertices.len())
            .filter_map(|i| {
                let (ax, ay) = vertices[i];
                let (bx, by) = vertices[(i + 1) % vertices.len()];
                let len = ((bx - ax).powi(2) + (by - ay).powi(2)).sqrt();
                if len < 1e-6 {
                    return None;
                }
                let nx = sign * (by - ay) / len;
                let ny = -sign * (bx - ax) / len;
                Some((ax, ay, nx, ny))
            })
            .collect();

        let min_x = vertices.iter().map(|v| v.0).fold(f32::INFINITY, f32::min);
        let max_x = vertices.iter().map(|v| v.0).fold(f32::NEG_INFINITY, f32::max);
        let min_y = vertices.iter().map(|v| v.1).fold(f32::INFINITY, f32::min);
        let max_y = vertices.iter().map(|v| v.1).fold(f32::NEG_INFINITY, f32::max);

        for y in self.rows(min_y, max_y) {
            for x in self.columns(min_x, max_x) {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;
                // Farthest outside any edge line; negative means inside all
                let mut d = f32::NEG_INFINITY;
                for &(ax, ay, nx, ny) in &edges {
                    d = d.max(nx * (px - ax) + ny * (py - ay));
                }
                let coverage = (0.5 - d).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    let color = sampler.color_at(px, py);
                    self.blend_pixel(x, y, color, coverage);
                }
            }
        }
    }

    /// Composite a coverage mask (row-major, values in [0, 1]) in `color`
    /// with its top-left corner at `(origin_x, origin_y)`. Rows and columns
    /// falling outside the surface are skipped.
    pub fn draw_mask(
        &mut self,
        origin_x: i32,
        origin_y: i32,
        mask_width: usize,
        mask_height: usize,
        mask: &[f32],
        color: Color,
    ) {
        if color.a == 0 {
            return;
        }
        for my in 0..mask_height {
            let y = origin_y + my as i32;
            if y < 0 || y >= self.height as i32 {
                continue;
            }
            for mx in 0..mask_width {
                let x = origin_x + mx as i32;
                if x < 0 || x >= self.width as i32 {
                    continue;
                }
                let coverage = mask[my * mask_width + mx];
                self.blend_pixel(x as usize, y as usize, color, coverage);
            }
        }
    }

    /// Encode the surface as RGBA PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>, MareaError> {
        use image::ImageEncoder;

        let mut raw = Vec::with_capacity(self.pixels.len() * 4);
        for px in &self.pixels {
            raw.extend_from_slice(&[px.r, px.g, px.b, px.a]);
        }

        let mut png_bytes = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
        encoder
            .write_image(
                &raw,
                self.width as u32,
                self.height as u32,
                image::ExtendedColorType::Rgba8,
            )
            .map_err(|e: image::ImageError| MareaError::ImageEncode(e.to_string()))?;

        Ok(png_bytes)
    }
}

/// Signed distance from a point to a rounded rectangle boundary.
/// Negative inside, positive outside.
#[inline]
fn round_rect_distance(px: f32, py: f32, x0: f32, y0: f32, x1: f32, y1: f32, r: f32) -> f32 {
    let cx = (x0 + x1) * 0.5;
    let cy = (y0 + y1) * 0.5;
    let qx = (px - cx).abs() - ((x1 - x0) * 0.5 - r);
    let qy = (py - cy).abs() - ((y1 - y0) * 0.5 - r);
    let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
    qx.max(qy).min(0.0) + outside - r
}
