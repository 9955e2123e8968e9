//! Tileable sine-wave pattern generation.
//!
//! The pattern bitmap is the expensive half of the wave effect, so it is
//! built once per surface size and reused across frames. Two phase-shifted
//! copies of the same sine curve are stacked to fake depth:
//!
//! ```text
//! y = A*sin(w*x) + h/2        A = height * 0.1 (reference amplitude)
//!                             w = 2*pi / width (one wavelength per tile)
//!
//!   .~~~.       .~~~.    <- back layer, alpha * 0.3
//!  /  .~~~.    /  .~~~.  <- front layer, opaque, shifted width/4
//! ~~~/     \~~~~~/     \
//! :::::::::::::::::::::  <- both layers fill down to the bottom edge
//! ```
//!
//! Each column is filled from the curve down to the bottom edge, with
//! fractional coverage on the pixel containing the crest. Amplitude and
//! water level are NOT baked in here; frames rescale and shift the tile
//! through [`crate::transform::wave_transform`].
//!
//! The buffer is one pixel wider and taller than the surface it tiles, so
//! the repeat seam at `x = width` carries the same curve value as `x = 0`.

use crate::color::Color;
use std::f32::consts::TAU;

/// Amplitude baked into the pattern, as a fraction of surface height.
/// Draw-time amplitude is applied as a vertical scale against this.
pub const REFERENCE_AMPLITUDE_RATIO: f32 = 0.1;

/// Wavelength baked into the pattern, as a fraction of surface width.
pub const REFERENCE_WAVELENGTH_RATIO: f32 = 1.0;

/// Alpha multiplier for the back wave layer.
const BACK_LAYER_ALPHA: f32 = 0.3;

/// A pre-rendered wave tile plus the inputs it was generated from.
///
/// Tiling is REPEAT horizontally and CLAMP vertically; [`WavePattern::sample`]
/// applies both. The stored inputs let callers detect when a regeneration
/// is due without hashing pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct WavePattern {
    width: usize,
    height: usize,
    wave_color: Color,
    pixels: Vec<Color>,
}

impl WavePattern {
    /// Generate the tile for a surface of `width` x `height` pixels.
    ///
    /// The resulting buffer is `(width + 1) x (height + 1)`. Zero
    /// dimensions are clamped to 1; callers normally skip generation for
    /// empty surfaces instead.
    pub fn generate(width: u32, height: u32, wave_color: Color) -> WavePattern {
        let w = width.max(1) as usize;
        let h = height.max(1) as usize;
        let buf_w = w + 1;
        let buf_h = h + 1;

        let angular_frequency = TAU / (REFERENCE_WAVELENGTH_RATIO * w as f32);
        let amplitude = h as f32 * REFERENCE_AMPLITUDE_RATIO;
        let water_level = h as f32 * 0.5;

        let mut pixels = vec![Color::TRANSPARENT; buf_w * buf_h];

        // Crest height per column, shared by both layers
        let crest: Vec<f32> = (0..buf_w)
            .map(|x| water_level + amplitude * (angular_frequency * x as f32).sin())
            .collect();

        let back_color = wave_color.with_alpha_factor(BACK_LAYER_ALPHA);
        for x in 0..buf_w {
            fill_column(&mut pixels, buf_w, buf_h, x, crest[x], back_color);
        }

        // Front layer runs a quarter wavelength ahead of the back layer
        let shift = (w as f32 / 4.0).round() as usize;
        for x in 0..buf_w {
            fill_column(&mut pixels, buf_w, buf_h, x, crest[(x + shift) % buf_w], wave_color);
        }

        WavePattern {
            width: buf_w,
            height: buf_h,
            wave_color,
            pixels,
        }
    }

    /// Buffer width in pixels (surface width + 1).
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Buffer height in pixels (surface height + 1).
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The wave color this tile was generated with.
    #[inline]
    pub fn wave_color(&self) -> Color {
        self.wave_color
    }

    /// Direct pixel access. Panics outside the buffer.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        self.pixels[y * self.width + x]
    }

    /// The whole buffer, row-major.
    #[inline]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Sample the tile at a pattern-space point: nearest neighbor, with
    /// the x axis repeating every buffer width and the y axis clamped to
    /// the edge rows.
    pub fn sample(&self, x: f32, y: f32) -> Color {
        let ix = (x.floor().rem_euclid(self.width as f32) as usize).min(self.width - 1);
        let iy = y.floor().clamp(0.0, (self.height - 1) as f32) as usize;
        self.pixels[iy * self.width + ix]
    }
}

/// Composite a vertical span from `top` down to the bottom edge onto one
/// column, with fractional coverage on the pixel containing `top`.
fn fill_column(pixels: &mut [Color], stride: usize, buf_h: usize, x: usize, top: f32, color: Color) {
    let top = top.clamp(0.0, buf_h as f32);
    let mut y = top.floor() as usize;
    while y < buf_h {
        let coverage = ((y as f32 + 1.0) - top).clamp(0.0, 1.0);
        let idx = y * stride + x;
        pixels[idx] = color.over_with_coverage(pixels[idx], coverage);
        y += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WAVE: Color = Color::rgb(0x21, 0x21, 0x21);

    #[test]
    fn test_buffer_dimensions() {
        let p = WavePattern::generate(300, 200, WAVE);
        assert_eq!(p.width(), 301);
        assert_eq!(p.height(), 201);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = WavePattern::generate(120, 80, WAVE);
        let b = WavePattern::generate(120, 80, WAVE);
        assert_eq!(a, b);
    }

    #[test]
    fn test_top_edge_transparent_bottom_edge_opaque() {
        let p = WavePattern::generate(300, 200, WAVE);
        // Highest crest is at 0.4 * height, so row 0 stays empty
        for x in [0, 75, 150, 225, 300] {
            assert_eq!(p.pixel(x, 0), Color::TRANSPARENT, "x = {}", x);
        }
        // Bottom row sits below both layers everywhere
        for x in [0, 75, 150, 225, 300] {
            assert_eq!(p.pixel(x, 200), WAVE, "x = {}", x);
        }
    }

    #[test]
    fn test_back_layer_shows_where_front_trough_opens() {
        // At x = 225 (three quarters in), the back curve peaks upward to
        // y = 80 while the front curve sits at its midline y = 100. Rows
        // between hold the translucent back layer only.
        let p = WavePattern::generate(300, 200, WAVE);
        let back = WAVE.with_alpha_factor(0.3);
        assert_eq!(p.pixel(225, 90), back);
        // Below the front crest the opaque layer wins
        assert_eq!(p.pixel(225, 150), WAVE);
    }

    #[test]
    fn test_layers_offset_by_quarter_wavelength() {
        // The front layer at x must match the back layer a quarter tile
        // later: compare a fully-covered front pixel against the back
        // crest position it was lifted from.
        let p = WavePattern::generate(300, 200, WAVE);
        // Back crest lowest point (y = 120) is at x = 75; front reaches
        // its lowest point a quarter wavelength earlier, at x = 0.
        assert_eq!(p.pixel(0, 121), WAVE);
        assert_ne!(p.pixel(0, 119), WAVE, "front crest should sit at y = 120 at x = 0");
    }

    #[test]
    fn test_sample_repeats_horizontally() {
        let p = WavePattern::generate(40, 30, WAVE);
        for y in [0.0, 10.0, 29.0] {
            assert_eq!(p.sample(3.0, y), p.sample(3.0 + 41.0, y));
            assert_eq!(p.sample(-1.0, y), p.sample(40.0, y));
        }
    }

    #[test]
    fn test_sample_clamps_vertically() {
        let p = WavePattern::generate(40, 30, WAVE);
        assert_eq!(p.sample(5.0, -100.0), p.pixel(5, 0));
        assert_eq!(p.sample(5.0, 1000.0), p.pixel(5, 30));
    }

    #[test]
    fn test_zero_size_clamped() {
        let p = WavePattern::generate(0, 0, WAVE);
        assert_eq!(p.width(), 2);
        assert_eq!(p.height(), 2);
    }
}
