//! # Liquid Gauge
//!
//! The render-state object tying everything together: style, shape,
//! labels, animators, and the cached wave pattern.
//!
//! ```text
//!   tick(dt) ----> animators ----> WaveState (phase, fill level)
//!                                      |
//!   resize(w,h) -> WavePattern --------+
//!                  (cached)            v
//!   render(canvas): border, background, wave sampled through the
//!                   per-frame transform, then labels on top
//! ```
//!
//! The gauge is frame-synchronous and single-threaded. It never draws on
//! its own; the host calls [`LiquidGauge::tick`] and then
//! [`LiquidGauge::render`] for every frame it wants to see.
//!
//! The pattern cache is keyed by surface size and wave color: `resize`
//! and `set_wave_color` regenerate it, nothing else does. Until the
//! first successful generation the gauge draws nothing at all.

use crate::animation::{Animator, DEFAULT_CYCLE_DURATION};
use crate::canvas::Canvas;
use crate::color::Color;
use crate::label::{
    draw_label, Label, LabelFont, LabelPosition, DEFAULT_BOTTOM_LABEL_SIZE,
    DEFAULT_CENTER_LABEL_SIZE, DEFAULT_TOP_LABEL_SIZE,
};
use crate::pattern::{WavePattern, REFERENCE_AMPLITUDE_RATIO};
use crate::shape::{draw_shape, Shape, TriangleDirection};
use crate::style::WaveStyle;
use crate::transform::wave_transform;
use std::time::Duration;

/// Progress shown before the host sets one.
pub const DEFAULT_PROGRESS: u32 = 50;

/// Values the animation driver writes every tick and the render path
/// reads every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveState {
    /// Water level as a fraction of surface height, 1 = full.
    pub fill_level_ratio: f32,
    /// Horizontal scroll position of the wave, wraps in [0, 1).
    pub phase_shift_ratio: f32,
}

impl Default for WaveState {
    fn default() -> Self {
        WaveState {
            fill_level_ratio: 1.0,
            phase_shift_ratio: 0.0,
        }
    }
}

/// An animated liquid-fill indicator.
#[derive(Debug, Clone)]
pub struct LiquidGauge {
    width: u32,
    height: u32,
    style: WaveStyle,
    shape: Shape,
    top_label: Label,
    center_label: Label,
    bottom_label: Label,
    font: LabelFont,
    state: WaveState,
    progress: u32,
    pattern: Option<WavePattern>,
    phase_animator: Animator,
    level_animator: Animator,
}

impl Default for LiquidGauge {
    fn default() -> Self {
        LiquidGauge::new()
    }
}

impl LiquidGauge {
    /// A gauge with library defaults: dark gray circle, amplitude 0.05,
    /// progress 50. The water starts full and settles toward the default
    /// progress once ticks arrive.
    pub fn new() -> LiquidGauge {
        let state = WaveState::default();
        let mut level_animator =
            Animator::level_settle(state.fill_level_ratio, DEFAULT_PROGRESS as f32 / 100.0);
        level_animator.start();
        LiquidGauge {
            width: 0,
            height: 0,
            style: WaveStyle::default(),
            shape: Shape::default(),
            top_label: Label {
                size: DEFAULT_TOP_LABEL_SIZE,
                ..Label::default()
            },
            center_label: Label {
                size: DEFAULT_CENTER_LABEL_SIZE,
                ..Label::default()
            },
            bottom_label: Label {
                size: DEFAULT_BOTTOM_LABEL_SIZE,
                ..Label::default()
            },
            font: LabelFont::default(),
            state,
            progress: DEFAULT_PROGRESS,
            pattern: None,
            phase_animator: Animator::phase_sweep(DEFAULT_CYCLE_DURATION),
            level_animator,
        }
    }

    // ------------------------------------------------------------------
    // Surface and rendering
    // ------------------------------------------------------------------

    /// Record a new surface size and regenerate the wave pattern.
    ///
    /// Zero dimensions are recorded but generation is skipped, keeping
    /// whatever pattern existed before. Calling with the current size is
    /// a no-op.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.regenerate_pattern();
    }

    fn regenerate_pattern(&mut self) {
        if self.width > 0 && self.height > 0 {
            self.pattern = Some(WavePattern::generate(
                self.width,
                self.height,
                self.style.wave_color,
            ));
        }
    }

    /// Advance both animators and fold their values into the wave state.
    pub fn tick(&mut self, dt: Duration) {
        if let Some(phase) = self.phase_animator.advance(dt) {
            self.set_phase_shift_ratio(phase);
        }
        if let Some(level) = self.level_animator.advance(dt) {
            self.set_fill_level_ratio(level);
        }
    }

    /// Paint one frame onto the canvas.
    ///
    /// Draws nothing at all, labels included, until the surface has been
    /// sized and the first pattern generated.
    pub fn render(&self, canvas: &mut Canvas) {
        let Some(pattern) = &self.pattern else {
            return;
        };
        let transform = wave_transform(
            self.style.amplitude_ratio,
            self.state.fill_level_ratio,
            self.state.phase_shift_ratio,
            canvas.width() as f32,
            canvas.height() as f32,
        );
        draw_shape(canvas, self.shape, &self.style, pattern, transform);
        draw_label(canvas, &self.top_label, LabelPosition::Top, &self.font);
        draw_label(canvas, &self.center_label, LabelPosition::Center, &self.font);
        draw_label(canvas, &self.bottom_label, LabelPosition::Bottom, &self.font);
    }

    // ------------------------------------------------------------------
    // Progress and animation
    // ------------------------------------------------------------------

    /// Set the target progress in percent. Values above 100 are clamped.
    ///
    /// The water does not jump: a decelerating one-second animation
    /// carries the fill level from wherever it is to the new target.
    pub fn set_progress(&mut self, value: u32) {
        let value = value.min(100);
        self.progress = value;
        self.level_animator =
            Animator::level_settle(self.state.fill_level_ratio, value as f32 / 100.0);
        self.level_animator.start();
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    /// Direct entry point for the phase value; wraps into [0, 1).
    pub fn set_phase_shift_ratio(&mut self, ratio: f32) {
        self.state.phase_shift_ratio = ratio.rem_euclid(1.0);
    }

    pub fn phase_shift_ratio(&self) -> f32 {
        self.state.phase_shift_ratio
    }

    /// Direct entry point for the water level; clamps into [0, 1].
    pub fn set_fill_level_ratio(&mut self, ratio: f32) {
        self.state.fill_level_ratio = ratio.clamp(0.0, 1.0);
    }

    pub fn fill_level_ratio(&self) -> f32 {
        self.state.fill_level_ratio
    }

    /// Change how long one full wave cycle takes.
    pub fn set_cycle_duration(&mut self, duration: Duration) {
        self.phase_animator.set_duration(duration);
    }

    /// Begin the endless phase sweep. Call when the gauge becomes
    /// visible.
    pub fn attach(&mut self) {
        self.phase_animator.start();
    }

    /// Stop all animation. Call when the gauge leaves the screen;
    /// nothing keeps running afterwards.
    pub fn detach(&mut self) {
        self.phase_animator.cancel();
        self.level_animator.cancel();
    }

    pub fn start_animation(&mut self) {
        self.phase_animator.start();
    }

    pub fn cancel_animation(&mut self) {
        self.phase_animator.cancel();
    }

    /// Jump the phase sweep to its final value and stop it.
    pub fn end_animation(&mut self) {
        self.phase_animator.end();
        let v = self.phase_animator.value();
        self.set_phase_shift_ratio(v);
    }

    pub fn pause_animation(&mut self) {
        self.phase_animator.pause();
    }

    pub fn resume_animation(&mut self) {
        self.phase_animator.resume();
    }

    pub fn is_animating(&self) -> bool {
        self.phase_animator.is_running()
    }

    // ------------------------------------------------------------------
    // Style
    // ------------------------------------------------------------------

    /// Change the wave color. This is part of the pattern cache key, so
    /// the pattern is regenerated immediately.
    pub fn set_wave_color(&mut self, color: Color) {
        self.style.wave_color = color;
        self.regenerate_pattern();
    }

    pub fn wave_color(&self) -> Color {
        self.style.wave_color
    }

    pub fn set_wave_background_color(&mut self, color: Color) {
        self.style.wave_background_color = color;
    }

    pub fn wave_background_color(&self) -> Color {
        self.style.wave_background_color
    }

    pub fn set_border_width(&mut self, width: f32) {
        self.style.border_width = width.max(0.0);
    }

    pub fn border_width(&self) -> f32 {
        self.style.border_width
    }

    pub fn set_border_color(&mut self, color: Color) {
        self.style.border_color = color;
    }

    pub fn border_color(&self) -> Color {
        self.style.border_color
    }

    /// Set the wave amplitude as a fraction of surface height, clamped
    /// into [0, 0.1] so the crest cannot leave the surface.
    pub fn set_amplitude_ratio(&mut self, ratio: f32) {
        self.style.amplitude_ratio = ratio.clamp(0.0, REFERENCE_AMPLITUDE_RATIO);
    }

    pub fn amplitude_ratio(&self) -> f32 {
        self.style.amplitude_ratio
    }

    pub fn style(&self) -> &WaveStyle {
        &self.style
    }

    // ------------------------------------------------------------------
    // Shape
    // ------------------------------------------------------------------

    pub fn set_shape(&mut self, shape: Shape) {
        self.shape = shape;
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Point the triangle another way. No effect unless the active shape
    /// is a triangle.
    pub fn set_triangle_direction(&mut self, direction: TriangleDirection) {
        if let Shape::Triangle(d) = &mut self.shape {
            *d = direction;
        }
    }

    /// Toggle rounded corners. No effect unless the active shape is a
    /// rectangle.
    pub fn set_rounded_rectangle(&mut self, rounded: bool) {
        if let Shape::Rectangle { rounded: r, .. } = &mut self.shape {
            *r = rounded;
        }
    }

    /// Change the corner radius. No effect unless the active shape is a
    /// rectangle.
    pub fn set_corner_radius(&mut self, radius: f32) {
        if let Shape::Rectangle { corner_radius, .. } = &mut self.shape {
            *corner_radius = radius.max(0.0);
        }
    }

    // ------------------------------------------------------------------
    // Labels
    // ------------------------------------------------------------------

    pub fn set_label(&mut self, position: LabelPosition, label: Label) {
        *self.label_mut(position) = label;
    }

    pub fn label(&self, position: LabelPosition) -> &Label {
        match position {
            LabelPosition::Top => &self.top_label,
            LabelPosition::Center => &self.center_label,
            LabelPosition::Bottom => &self.bottom_label,
        }
    }

    pub fn label_mut(&mut self, position: LabelPosition) -> &mut Label {
        match position {
            LabelPosition::Top => &mut self.top_label,
            LabelPosition::Center => &mut self.center_label,
            LabelPosition::Bottom => &mut self.bottom_label,
        }
    }

    /// Swap the glyph source used for all three labels.
    pub fn set_font(&mut self, font: LabelFont) {
        self.font = font;
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    pub fn state(&self) -> WaveState {
        self.state
    }

    pub fn pattern(&self) -> Option<&WavePattern> {
        self.pattern.as_ref()
    }

    pub fn surface_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let gauge = LiquidGauge::new();
        assert_eq!(gauge.progress(), 50);
        assert_eq!(gauge.fill_level_ratio(), 1.0);
        assert_eq!(gauge.phase_shift_ratio(), 0.0);
        assert_eq!(gauge.shape(), Shape::Circle);
        assert_eq!(gauge.amplitude_ratio(), 0.05);
        assert!(gauge.pattern().is_none());
        assert!(!gauge.is_animating());
    }

    #[test]
    fn test_water_settles_to_default_progress() {
        let mut gauge = LiquidGauge::new();
        gauge.resize(100, 100);
        // The initial settle runs without attach().
        gauge.tick(Duration::from_millis(1100));
        assert_eq!(gauge.fill_level_ratio(), 0.5);
    }

    #[test]
    fn test_resize_generates_pattern() {
        let mut gauge = LiquidGauge::new();
        gauge.resize(200, 150);
        let pattern = gauge.pattern().unwrap();
        assert_eq!(pattern.width(), 201);
        assert_eq!(pattern.height(), 151);
    }

    #[test]
    fn test_resize_same_size_keeps_pattern() {
        let mut gauge = LiquidGauge::new();
        gauge.resize(100, 100);
        let before = gauge.pattern().unwrap().pixels().as_ptr();
        gauge.resize(100, 100);
        assert_eq!(gauge.pattern().unwrap().pixels().as_ptr(), before);
    }

    #[test]
    fn test_zero_size_keeps_previous_pattern() {
        let mut gauge = LiquidGauge::new();
        gauge.resize(100, 100);
        gauge.resize(0, 0);
        assert!(gauge.pattern().is_some());
        assert_eq!(gauge.surface_size(), (0, 0));
    }

    #[test]
    fn test_wave_color_regenerates_pattern() {
        let mut gauge = LiquidGauge::new();
        gauge.resize(100, 100);
        let before = gauge.pattern().unwrap().pixels().as_ptr();
        gauge.set_wave_color(Color::rgb(255, 0, 0));
        let pattern = gauge.pattern().unwrap();
        assert_eq!(gauge.wave_color(), Color::rgb(255, 0, 0));
        assert_eq!(pattern.wave_color(), Color::rgb(255, 0, 0));
        assert_ne!(pattern.pixels().as_ptr(), before);
    }

    #[test]
    fn test_border_color_does_not_regenerate_pattern() {
        let mut gauge = LiquidGauge::new();
        gauge.resize(100, 100);
        let before = gauge.pattern().unwrap().pixels().as_ptr();
        gauge.set_border_color(Color::rgb(0, 0, 255));
        gauge.set_wave_background_color(Color::rgb(0, 255, 0));
        assert_eq!(gauge.pattern().unwrap().pixels().as_ptr(), before);
    }

    #[test]
    fn test_amplitude_clamped() {
        let mut gauge = LiquidGauge::new();
        gauge.set_amplitude_ratio(0.5);
        assert_eq!(gauge.amplitude_ratio(), 0.1);
        gauge.set_amplitude_ratio(-1.0);
        assert_eq!(gauge.amplitude_ratio(), 0.0);
    }

    #[test]
    fn test_progress_clamped() {
        let mut gauge = LiquidGauge::new();
        gauge.set_progress(150);
        assert_eq!(gauge.progress(), 100);
        gauge.tick(Duration::from_millis(1100));
        assert_eq!(gauge.fill_level_ratio(), 1.0);
    }

    #[test]
    fn test_phase_wraps() {
        let mut gauge = LiquidGauge::new();
        gauge.set_phase_shift_ratio(1.25);
        assert!((gauge.phase_shift_ratio() - 0.25).abs() < 1e-6);
        gauge.set_phase_shift_ratio(-0.25);
        assert!((gauge.phase_shift_ratio() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_attach_starts_detach_stops() {
        let mut gauge = LiquidGauge::new();
        gauge.attach();
        assert!(gauge.is_animating());
        gauge.tick(Duration::from_millis(250));
        assert!((gauge.phase_shift_ratio() - 0.25).abs() < 1e-6);

        gauge.detach();
        assert!(!gauge.is_animating());
        let phase = gauge.phase_shift_ratio();
        let fill = gauge.fill_level_ratio();
        gauge.tick(Duration::from_millis(500));
        assert_eq!(gauge.phase_shift_ratio(), phase);
        assert_eq!(gauge.fill_level_ratio(), fill);
    }

    #[test]
    fn test_pause_resume() {
        let mut gauge = LiquidGauge::new();
        gauge.attach();
        gauge.tick(Duration::from_millis(100));
        gauge.pause_animation();
        let phase = gauge.phase_shift_ratio();
        gauge.tick(Duration::from_millis(400));
        assert_eq!(gauge.phase_shift_ratio(), phase);
        gauge.resume_animation();
        gauge.tick(Duration::from_millis(150));
        assert!((gauge.phase_shift_ratio() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_end_animation_wraps_phase_to_zero() {
        let mut gauge = LiquidGauge::new();
        gauge.attach();
        gauge.tick(Duration::from_millis(300));
        gauge.end_animation();
        assert_eq!(gauge.phase_shift_ratio(), 0.0);
        assert!(!gauge.is_animating());
    }

    #[test]
    fn test_render_before_resize_draws_nothing() {
        let mut gauge = LiquidGauge::new();
        gauge.label_mut(LabelPosition::Center).text = "50%".to_string();
        let mut canvas = Canvas::new(80, 80);
        gauge.render(&mut canvas);
        for y in 0..80 {
            for x in 0..80 {
                assert_eq!(canvas.pixel(x, y), Color::TRANSPARENT);
            }
        }
    }

    #[test]
    fn test_render_after_resize_draws() {
        let mut gauge = LiquidGauge::new();
        gauge.resize(80, 80);
        let mut canvas = Canvas::new(80, 80);
        gauge.render(&mut canvas);
        let inked = (0..80)
            .flat_map(|y| (0..80).map(move |x| (x, y)))
            .any(|(x, y)| canvas.pixel(x, y).a > 0);
        assert!(inked, "a sized gauge must draw its wave");
    }

    #[test]
    fn test_shape_convenience_setters_only_touch_matching_variant() {
        let mut gauge = LiquidGauge::new();
        gauge.set_triangle_direction(TriangleDirection::South);
        assert_eq!(gauge.shape(), Shape::Circle);

        gauge.set_shape(Shape::Triangle(TriangleDirection::North));
        gauge.set_triangle_direction(TriangleDirection::East);
        assert_eq!(gauge.shape(), Shape::Triangle(TriangleDirection::East));

        gauge.set_shape(Shape::Rectangle {
            rounded: false,
            corner_radius: 30.0,
        });
        gauge.set_rounded_rectangle(true);
        gauge.set_corner_radius(12.0);
        assert_eq!(
            gauge.shape(),
            Shape::Rectangle {
                rounded: true,
                corner_radius: 12.0
            }
        );
    }
}
