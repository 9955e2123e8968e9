//! Affine transforms for pattern sampling.
//!
//! The wave pattern is generated once at a reference amplitude and then
//! stretched, shifted, and raised or lowered per frame by an affine
//! transform instead of being regenerated:
//!
//! ```text
//! x' = x + phase_shift * width
//! y' = (y - height/2) * (amplitude / 0.1) + height/2 + (0.5 - fill) * height
//! ```
//!
//! Scaling happens about the vertical midline (the resting water level of
//! the reference pattern), so changing the amplitude leaves the water level
//! in place. Rasterization maps device pixels through the inverse transform
//! into pattern space.

use crate::pattern::REFERENCE_AMPLITUDE_RATIO;

/// A 2x3 affine transform, row-major:
///
/// ```text
/// | sx kx tx |   x' = sx*x + kx*y + tx
/// | ky sy ty |   y' = ky*x + sy*y + ty
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub sx: f32,
    pub kx: f32,
    pub tx: f32,
    pub ky: f32,
    pub sy: f32,
    pub ty: f32,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        sx: 1.0,
        kx: 0.0,
        tx: 0.0,
        ky: 0.0,
        sy: 1.0,
        ty: 0.0,
    };

    #[inline]
    pub fn identity() -> Transform {
        Self::IDENTITY
    }

    /// Scale about a pivot point. The pivot maps to itself.
    pub fn scale_about(sx: f32, sy: f32, px: f32, py: f32) -> Transform {
        Transform {
            sx,
            kx: 0.0,
            tx: px * (1.0 - sx),
            ky: 0.0,
            sy,
            ty: py * (1.0 - sy),
        }
    }

    /// Translate after the existing mapping.
    pub fn post_translate(self, dx: f32, dy: f32) -> Transform {
        Transform {
            tx: self.tx + dx,
            ty: self.ty + dy,
            ..self
        }
    }

    /// Map a point through the transform.
    #[inline]
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.sx * x + self.kx * y + self.tx,
            self.ky * x + self.sy * y + self.ty,
        )
    }

    /// Inverse transform, or `None` if the matrix is degenerate.
    pub fn invert(&self) -> Option<Transform> {
        let det = self.sx * self.sy - self.kx * self.ky;
        if det.abs() < 1e-12 {
            return None;
        }
        let inv_det = 1.0 / det;
        let sx = self.sy * inv_det;
        let kx = -self.kx * inv_det;
        let ky = -self.ky * inv_det;
        let sy = self.sx * inv_det;
        Some(Transform {
            sx,
            kx,
            tx: -(sx * self.tx + kx * self.ty),
            ky,
            sy,
            ty: -(ky * self.tx + sy * self.ty),
        })
    }
}

/// Build the per-frame transform applied to the tiled wave pattern.
///
/// # Parameters
/// - `amplitude_ratio`: Wave height as a fraction of surface height, in
///   [0, 0.1]. The pattern was generated at 0.1, so the vertical scale
///   factor is `amplitude_ratio / 0.1`.
/// - `fill_level_ratio`: Water level in [0, 1], 1 = full. The pattern's
///   resting level sits at half height, so the vertical shift is
///   `(0.5 - fill_level_ratio) * height`.
/// - `phase_shift_ratio`: Horizontal scroll position in [0, 1), as a
///   fraction of the surface width.
///
/// At amplitude 0.1, fill 0.5, phase 0 the result is the identity.
pub fn wave_transform(
    amplitude_ratio: f32,
    fill_level_ratio: f32,
    phase_shift_ratio: f32,
    width: f32,
    height: f32,
) -> Transform {
    Transform::scale_about(
        1.0,
        amplitude_ratio / REFERENCE_AMPLITUDE_RATIO,
        0.0,
        height * 0.5,
    )
    .post_translate(
        phase_shift_ratio * width,
        (0.5 - fill_level_ratio) * height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_maps_points() {
        let t = Transform::identity();
        assert_eq!(t.apply(3.5, -2.0), (3.5, -2.0));
    }

    #[test]
    fn test_scale_about_fixes_pivot() {
        let t = Transform::scale_about(1.0, 0.25, 0.0, 50.0);
        let (_, py) = t.apply(10.0, 50.0);
        assert!((py - 50.0).abs() < 1e-5, "pivot moved to {}", py);

        // A point 40 above the pivot lands 10 above it
        let (_, y) = t.apply(0.0, 10.0);
        assert!((y - 40.0).abs() < 1e-5, "got {}", y);
    }

    #[test]
    fn test_post_translate_adds_offset() {
        let t = Transform::identity().post_translate(5.0, -3.0);
        assert_eq!(t.apply(1.0, 1.0), (6.0, -2.0));
    }

    #[test]
    fn test_invert_roundtrip() {
        let t = Transform::scale_about(1.0, 0.5, 0.0, 100.0).post_translate(33.0, -7.5);
        let inv = t.invert().unwrap();
        let (x, y) = t.apply(12.0, 34.0);
        let (bx, by) = inv.apply(x, y);
        assert!((bx - 12.0).abs() < 1e-4, "got {}", bx);
        assert!((by - 34.0).abs() < 1e-4, "got {}", by);
    }

    #[test]
    fn test_invert_degenerate() {
        let t = Transform::scale_about(1.0, 0.0, 0.0, 0.0);
        assert!(t.invert().is_none());
    }

    #[test]
    fn test_wave_transform_reference_is_identity() {
        let t = wave_transform(0.1, 0.5, 0.0, 300.0, 200.0);
        assert!((t.sx - 1.0).abs() < 1e-6);
        assert!((t.sy - 1.0).abs() < 1e-6);
        assert!(t.tx.abs() < 1e-4);
        assert!(t.ty.abs() < 1e-4);
    }

    #[test]
    fn test_wave_transform_amplitude_scale() {
        let t = wave_transform(0.05, 0.5, 0.0, 300.0, 200.0);
        assert!((t.sy - 0.5).abs() < 1e-6, "sy = {}", t.sy);
        assert!((t.sx - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_wave_transform_fill_lowers_translate() {
        // Raising the fill level must strictly lower the vertical offset
        let mut last_ty = f32::INFINITY;
        for fill in [0.3, 0.5, 0.7] {
            let t = wave_transform(0.05, fill, 0.0, 300.0, 200.0);
            assert!(t.ty < last_ty, "ty {} not below {}", t.ty, last_ty);
            last_ty = t.ty;
        }
        // And the offsets bracket zero symmetrically around fill 0.5
        let lo = wave_transform(0.05, 0.3, 0.0, 300.0, 200.0).ty;
        let hi = wave_transform(0.05, 0.7, 0.0, 300.0, 200.0).ty;
        assert!((lo - 40.0).abs() < 1e-4, "got {}", lo);
        assert!((hi + 40.0).abs() < 1e-4, "got {}", hi);
    }

    #[test]
    fn test_wave_transform_phase_shifts_x() {
        let t = wave_transform(0.1, 0.5, 0.25, 400.0, 200.0);
        assert!((t.tx - 100.0).abs() < 1e-4, "got {}", t.tx);
    }
}
