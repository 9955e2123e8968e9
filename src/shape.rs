//! Shape masks for the gauge outline.
//!
//! Each frame paints border, then background, then the wave pattern into
//! one of four masks. The inset arithmetic keeps the fills strictly inside
//! a stroked border:
//!
//! ```text
//! circle     fill radius (W - bw) / 2, border ring at fill radius - 1
//! square     border on the bw/2 inset (right/bottom pulled in 0.5 more),
//! rectangle  fills on the full bw inset
//! rounded    same insets, corners cut at the configured radius
//! triangle   no border support, fills only
//! ```
//!
//! Triangle vertices come from integer equilateral formulas, lopsided
//! east/west variants included; the unit tests pin the exact corner
//! coordinates so nobody "fixes" the geometry by accident.

use crate::canvas::{Canvas, Paint};
use crate::pattern::WavePattern;
use crate::style::WaveStyle;
use crate::transform::Transform;

/// Which way a triangular gauge points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriangleDirection {
    #[default]
    North,
    South,
    East,
    West,
}

/// The gauge outline variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Triangle(TriangleDirection),
    Circle,
    Square,
    Rectangle { rounded: bool, corner_radius: f32 },
}

impl Default for Shape {
    fn default() -> Self {
        Shape::Circle
    }
}

/// Corner positions of the triangular mask, in path order.
///
/// Integer math throughout: `width / 2` floors and the sqrt(3)/2 terms
/// truncate toward zero. The anchor starts at the bottom-left corner
/// (0, height) and two of the variants relocate it.
pub fn triangle_vertices(
    direction: TriangleDirection,
    width: u32,
    height: u32,
) -> [(f32, f32); 3] {
    let w = width as i64;
    let h = height as i64;
    let sqrt3_half = 3.0f64.sqrt() / 2.0;

    let (p1, p2, p3) = match direction {
        TriangleDirection::North => (
            (0, h),
            (w, h),
            (w / 2, (h as f64 - sqrt3_half * h as f64) as i64),
        ),
        TriangleDirection::South => (
            (w / 2, (sqrt3_half * h as f64) as i64),
            (0, 0),
            (w, 0),
        ),
        TriangleDirection::East => (
            (0, h),
            (0, 0),
            ((sqrt3_half * w as f64) as i64, h / 2),
        ),
        TriangleDirection::West => (
            ((w as f64 - sqrt3_half * w as f64) as i64, h / 2),
            (w, 0),
            (w, h),
        ),
    };

    [
        (p1.0 as f32, p1.1 as f32),
        (p2.0 as f32, p2.1 as f32),
        (p3.0 as f32, p3.1 as f32),
    ]
}

/// Paint one frame of the gauge body: border, background, then wave.
pub fn draw_shape(
    canvas: &mut Canvas,
    shape: Shape,
    style: &WaveStyle,
    pattern: &WavePattern,
    transform: Transform,
) {
    let width = canvas.width() as f32;
    let height = canvas.height() as f32;
    let bw = style.border_width.max(0.0);
    let border = Paint::Solid(style.border_color);
    let background = Paint::Solid(style.wave_background_color);
    let wave = Paint::Pattern { pattern, transform };

    match shape {
        Shape::Triangle(direction) => {
            // Borders are not supported on triangles
            let vertices =
                triangle_vertices(direction, canvas.width() as u32, canvas.height() as u32);
            canvas.fill_convex_polygon(&vertices, background);
            canvas.fill_convex_polygon(&vertices, wave);
        }

        Shape::Circle => {
            let cx = width / 2.0;
            let cy = height / 2.0;
            let radius = (width - bw) / 2.0;
            if bw > 0.0 {
                canvas.stroke_circle(cx, cy, radius - 1.0, bw, border);
            }
            canvas.fill_circle(cx, cy, radius, background);
            canvas.fill_circle(cx, cy, radius, wave);
        }

        Shape::Square | Shape::Rectangle { rounded: false, .. } => {
            if bw > 0.0 {
                canvas.stroke_rect(
                    bw / 2.0,
                    bw / 2.0,
                    width - bw / 2.0 - 0.5,
                    height - bw / 2.0 - 0.5,
                    bw,
                    border,
                );
            }
            canvas.fill_rect(bw, bw, width - bw, height - bw, background);
            canvas.fill_rect(bw, bw, width - bw, height - bw, wave);
        }

        Shape::Rectangle {
            rounded: true,
            corner_radius,
        } => {
            if bw > 0.0 {
                canvas.stroke_round_rect(
                    bw / 2.0,
                    bw / 2.0,
                    width - bw / 2.0 - 0.5,
                    height - bw / 2.0 - 0.5,
                    corner_radius,
                    bw,
                    border,
                );
            }
            canvas.fill_round_rect(bw, bw, width - bw, height - bw, corner_radius, background);
            canvas.fill_round_rect(bw, bw, width - bw, height - bw, corner_radius, wave);
        }
    }
}
