//! # Label Overlay
//!
//! Centered single-line text drawn over the gauge: up to three labels
//! (top, center, bottom), each with independent fill and stroke paint.
//!
//! Glyphs come from one of two sources:
//! - Spleen PSF2 bitmap cells scaled nearest-neighbor to the requested
//!   pixel size (the default, no font files needed).
//! - A TTF/OTF supplied by the host as bytes, rendered through ab_glyph
//!   with kerned advances and anti-aliased outline coverage.
//!
//! Placement rules: always horizontally centered by measured width. The
//! top label's baseline sits at 0.2 of the surface height; center and
//! bottom baselines sit at 0.5 and 0.8, each nudged by half the label's
//! own (ascent + descent) so the glyph body straddles the line. Labels
//! are never clipped to the shape boundary.

use crate::canvas::Canvas;
use crate::color::Color;
use crate::error::MareaError;
use crate::style::DEFAULT_WAVE_COLOR;
use ab_glyph::{Font, FontArc, GlyphId, ScaleFont, point};
use serde::{Deserialize, Serialize};
use spleen_font::{PSF2Font, FONT_12X24, FONT_6X12, FONT_8X16};

/// Default pixel size of the top label.
pub const DEFAULT_TOP_LABEL_SIZE: f32 = 18.0;

/// Default pixel size of the center label.
pub const DEFAULT_CENTER_LABEL_SIZE: f32 = 22.0;

/// Default pixel size of the bottom label.
pub const DEFAULT_BOTTOM_LABEL_SIZE: f32 = 18.0;

/// Which of the three gauge slots a label occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelPosition {
    Top,
    Center,
    Bottom,
}

/// One line of text with its fill and stroke paint.
///
/// Empty text means the label is not drawn at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Label {
    pub text: String,
    pub color: Color,
    pub size: f32,
    pub stroke_width: f32,
    pub stroke_color: Color,
}

impl Default for Label {
    fn default() -> Self {
        Label {
            text: String::new(),
            color: DEFAULT_WAVE_COLOR,
            size: DEFAULT_TOP_LABEL_SIZE,
            stroke_width: 0.0,
            stroke_color: Color::TRANSPARENT,
        }
    }
}

impl Label {
    pub fn new(text: impl Into<String>, size: f32) -> Label {
        Label {
            text: text.into(),
            size,
            ..Label::default()
        }
    }
}

/// Vertical metrics relative to the baseline, with y growing downward:
/// `ascent` is negative (glyph tops sit above the baseline), `descent`
/// is positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub ascent: f32,
    pub descent: f32,
}

/// Glyph source for label text.
#[derive(Debug, Clone, Default)]
pub enum LabelFont {
    /// Spleen PSF2 bitmap cells scaled to the requested size.
    #[default]
    Bitmap,
    /// Host-supplied TTF/OTF rendered through ab_glyph.
    Ttf(FontArc),
}

impl LabelFont {
    /// Load a TTF/OTF font from raw bytes.
    pub fn from_ttf_bytes(bytes: Vec<u8>) -> Result<LabelFont, MareaError> {
        let font = FontArc::try_from_vec(bytes).map_err(|e| MareaError::Font(e.to_string()))?;
        Ok(LabelFont::Ttf(font))
    }

    /// Pick the Spleen cell closest to the target size.
    fn bitmap_cell(size: f32) -> (&'static [u8], usize, usize) {
        if size <= 12.0 {
            (FONT_6X12, 6, 12)
        } else if size <= 20.0 {
            (FONT_8X16, 8, 16)
        } else {
            (FONT_12X24, 12, 24)
        }
    }

    /// Metrics for text of the given pixel size.
    ///
    /// Bitmap cells reserve the bottom fifth of the scaled cell for
    /// descenders; TTF fonts report their real metrics.
    pub fn metrics(&self, size: f32) -> FontMetrics {
        match self {
            LabelFont::Bitmap => {
                let h = size.round().max(1.0);
                let descent = (h / 5.0).floor();
                FontMetrics {
                    ascent: -(h - descent),
                    descent,
                }
            }
            LabelFont::Ttf(font) => {
                let scaled = font.as_scaled(size);
                FontMetrics {
                    ascent: -scaled.ascent(),
                    descent: -scaled.descent(),
                }
            }
        }
    }

    /// Width in pixels the text will occupy at the given size.
    pub fn measure(&self, text: &str, size: f32) -> f32 {
        match self {
            LabelFont::Bitmap => {
                let (_, cell_w, cell_h) = Self::bitmap_cell(size);
                let scale = size / cell_h as f32;
                let glyph_w = (cell_w as f32 * scale).round().max(1.0);
                glyph_w * text.chars().count() as f32
            }
            LabelFont::Ttf(font) => ttf_line_width(font, text, size),
        }
    }

    /// Render a line of text as a coverage mask.
    pub fn rasterize(&self, text: &str, size: f32) -> TextRaster {
        match self {
            LabelFont::Bitmap => rasterize_bitmap(text, size),
            LabelFont::Ttf(font) => rasterize_ttf(font, text, size),
        }
    }
}

/// Rasterized line of text.
pub struct TextRaster {
    pub width: usize,
    pub height: usize,
    /// Coverage values in [0, 1], row-major.
    pub data: Vec<f32>,
    /// Baseline row measured from the top of the mask.
    pub baseline: f32,
}

fn rasterize_bitmap(text: &str, size: f32) -> TextRaster {
    let (cell_data, cell_w, cell_h) = LabelFont::bitmap_cell(size);
    let scale = size / cell_h as f32;
    let glyph_w = ((cell_w as f32 * scale).round() as usize).max(1);
    let glyph_h = ((cell_h as f32 * scale).round() as usize).max(1);
    let count = text.chars().count();
    let width = (glyph_w * count).max(1);
    let height = glyph_h;
    let mut data = vec![0.0f32; width * height];

    let mut font = PSF2Font::new(cell_data).unwrap();
    for (i, ch) in text.chars().enumerate() {
        let mut cell = vec![0u8; cell_w * cell_h];
        let utf8 = ch.to_string();
        if let Some(glyph) = font.glyph_for_utf8(utf8.as_bytes()) {
            for (row_y, row) in glyph.enumerate() {
                for (col_x, on) in row.enumerate() {
                    if row_y < cell_h && col_x < cell_w && on {
                        cell[row_y * cell_w + col_x] = 1;
                    }
                }
            }
        } else {
            // Box outline for characters the font does not cover
            draw_box(&mut cell, cell_w, cell_h);
        }

        // Nearest-neighbor scale of the cell into its slot.
        let x0 = i * glyph_w;
        for dy in 0..glyph_h {
            let sy = dy * cell_h / glyph_h;
            for dx in 0..glyph_w {
                let sx = dx * cell_w / glyph_w;
                if cell[sy * cell_w + sx] != 0 {
                    data[dy * width + x0 + dx] = 1.0;
                }
            }
        }
    }

    let descent = (glyph_h / 5) as f32;
    TextRaster {
        width,
        height,
        data,
        baseline: glyph_h as f32 - descent,
    }
}

/// Advance width of a line with kerning applied between neighbors.
///
/// Shared by `measure` and `rasterize_ttf` so the centering math and
/// the drawn pixels agree on where the line ends.
fn ttf_line_width(font: &FontArc, text: &str, size: f32) -> f32 {
    let scaled = font.as_scaled(size);
    let mut width = 0.0f32;
    let mut previous: Option<GlyphId> = None;
    for ch in text.chars() {
        let id = font.glyph_id(ch);
        if let Some(prev) = previous {
            width += scaled.kern(prev, id);
        }
        width += scaled.h_advance(id);
        previous = Some(id);
    }
    width
}

fn rasterize_ttf(font: &FontArc, text: &str, size: f32) -> TextRaster {
    let scaled = font.as_scaled(size);
    let baseline = scaled.ascent();
    let width = (ttf_line_width(font, text, size).ceil() as usize).max(1);
    let height = ((baseline - scaled.descent()).ceil() as usize).max(1);
    let mut data = vec![0.0f32; width * height];

    let mut caret = 0.0f32;
    let mut previous: Option<GlyphId> = None;
    for ch in text.chars() {
        let id = font.glyph_id(ch);
        if let Some(prev) = previous {
            caret += scaled.kern(prev, id);
        }
        let positioned = id.with_scale_and_position(size, point(caret, baseline));
        if let Some(curve) = font.outline_glyph(positioned) {
            let origin = curve.px_bounds().min;
            curve.draw(|gx, gy, cov| {
                let x = gx as i32 + origin.x as i32;
                let y = gy as i32 + origin.y as i32;
                if (0..width as i32).contains(&x) && (0..height as i32).contains(&y) {
                    // Where outlines overlap, keep the strongest coverage.
                    let cell = &mut data[y as usize * width + x as usize];
                    *cell = cell.max(cov);
                }
            });
        }
        caret += scaled.h_advance(id);
        previous = Some(id);
    }

    TextRaster {
        width,
        height,
        data,
        baseline,
    }
}

/// Draw a box outline in a glyph cell.
fn draw_box(cell: &mut [u8], width: usize, height: usize) {
    for x in 0..width {
        cell[x] = 1;
        cell[(height - 1) * width + x] = 1;
    }
    for y in 0..height {
        cell[y * width] = 1;
        cell[y * width + width - 1] = 1;
    }
}

/// Union of a mask over a ring of offsets of the given radius, grown by
/// the radius on every side. This fattens glyph coverage for the stroke
/// pass so the stroke peeks out from under the fill drawn on top.
fn dilate(raster: &TextRaster, radius: f32) -> TextRaster {
    let margin = radius.ceil().max(0.0) as usize;
    let width = raster.width + 2 * margin;
    let height = raster.height + 2 * margin;
    let mut data = vec![0.0f32; width * height];

    let mut offsets = vec![(0i32, 0i32)];
    if radius > 0.0 {
        let r = radius.round() as i32;
        let d = (radius * std::f32::consts::FRAC_1_SQRT_2).round() as i32;
        offsets.extend([
            (r, 0),
            (-r, 0),
            (0, r),
            (0, -r),
            (d, d),
            (d, -d),
            (-d, d),
            (-d, -d),
        ]);
    }

    for (dx, dy) in offsets {
        for sy in 0..raster.height {
            let ty = sy as i32 + margin as i32 + dy;
            if ty < 0 || ty >= height as i32 {
                continue;
            }
            for sx in 0..raster.width {
                let tx = sx as i32 + margin as i32 + dx;
                if tx < 0 || tx >= width as i32 {
                    continue;
                }
                let src = raster.data[sy * raster.width + sx];
                let idx = ty as usize * width + tx as usize;
                if src > data[idx] {
                    data[idx] = src;
                }
            }
        }
    }

    TextRaster {
        width,
        height,
        data,
        baseline: raster.baseline + margin as f32,
    }
}

/// Draw one label onto the canvas: stroke pass first, then fill on top.
pub fn draw_label(canvas: &mut Canvas, label: &Label, position: LabelPosition, font: &LabelFont) {
    if label.text.is_empty() {
        return;
    }
    let surface_w = canvas.width() as f32;
    let surface_h = canvas.height() as f32;
    let metrics = font.metrics(label.size);
    let raster = font.rasterize(&label.text, label.size);

    let x = (surface_w - raster.width as f32) / 2.0;
    let baseline_y = match position {
        LabelPosition::Top => surface_h * 0.2,
        LabelPosition::Center => surface_h * 0.5 - (metrics.descent + metrics.ascent) / 2.0,
        LabelPosition::Bottom => surface_h * 0.8 - (metrics.descent + metrics.ascent) / 2.0,
    };
    let top = baseline_y - raster.baseline;

    let stroked = dilate(&raster, label.stroke_width / 2.0);
    let margin = (stroked.width - raster.width) as f32 / 2.0;
    canvas.draw_mask(
        (x - margin).round() as i32,
        (top - margin).round() as i32,
        stroked.width,
        stroked.height,
        &stroked.data,
        label.stroke_color,
    );
    canvas.draw_mask(
        x.round() as i32,
        top.round() as i32,
        raster.width,
        raster.height,
        &raster.data,
        label.color,
    );
}
