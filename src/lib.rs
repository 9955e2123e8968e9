//! # Marea - Liquid Fill Gauge Renderer
//!
//! Marea renders an animated "liquid fill" indicator: a shape whose
//! interior fills up to a level with a horizontally scrolling sine wave.
//! It provides:
//!
//! - **Wave pattern generation**: a tileable two-layer sine bitmap,
//!   generated once per size or wave-color change
//! - **Transform-driven animation**: amplitude, fill level, and phase
//!   are applied as a cheap affine transform, never by regenerating
//!   pixels
//! - **Shape masks**: circle, square, rectangle (optionally rounded),
//!   and triangles in four orientations, with an optional border
//! - **Label overlay**: up to three centered text labels, each with
//!   independent fill and stroke paint
//!
//! ## Quick Start
//!
//! ```no_run
//! use marea::{Canvas, LiquidGauge};
//! use std::time::Duration;
//!
//! let mut gauge = LiquidGauge::new();
//! gauge.resize(400, 400);
//! gauge.set_progress(65);
//! gauge.attach();
//!
//! // One frame: advance time, draw, encode.
//! let mut canvas = Canvas::new(400, 400);
//! gauge.tick(Duration::from_millis(16));
//! gauge.render(&mut canvas);
//! std::fs::write("gauge.png", canvas.to_png()?)?;
//! # Ok::<(), marea::MareaError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`pattern`] | Tileable sine-wave bitmap generation |
//! | [`transform`] | Per-frame affine sampling transform |
//! | [`shape`] | Shape masks and the frame compositor |
//! | [`label`] | Centered text overlay with two font backends |
//! | [`canvas`] | Software RGBA surface and PNG export |
//! | [`gauge`] | The render-state object tying it together |
//! | [`animation`] | Frame-synchronous animators |
//! | [`style`] | Wave colors, amplitude, border |
//! | [`config`] | JSON scene description |
//! | [`color`] | RGBA color and hex parsing |
//! | [`error`] | Error types |

pub mod animation;
pub mod canvas;
pub mod color;
pub mod config;
pub mod error;
pub mod gauge;
pub mod label;
pub mod pattern;
pub mod shape;
pub mod style;
pub mod transform;

// Re-exports for convenience
pub use canvas::{Canvas, Paint};
pub use color::Color;
pub use config::GaugeConfig;
pub use error::MareaError;
pub use gauge::{LiquidGauge, WaveState};
pub use label::{Label, LabelFont, LabelPosition};
pub use pattern::WavePattern;
pub use shape::{Shape, TriangleDirection};
pub use style::WaveStyle;
pub use transform::Transform;
