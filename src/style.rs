//! Wave styling: colors, amplitude, border.
//!
//! A [`WaveStyle`] is a plain value snapshot read by the render path.
//! Setters on the gauge replace fields wholesale; nothing here is mutated
//! mid-frame.

use crate::color::Color;
use serde::{Deserialize, Serialize};

/// Wave and title ink used when nothing else is configured.
pub const DEFAULT_WAVE_COLOR: Color = Color::rgb(0x21, 0x21, 0x21);

/// Default wave amplitude as a fraction of surface height.
pub const DEFAULT_AMPLITUDE_RATIO: f32 = 0.05;

/// Default corner radius for rounded rectangle gauges.
pub const DEFAULT_CORNER_RADIUS: f32 = 30.0;

/// Visual configuration of the wave body and border.
///
/// `amplitude_ratio` is meaningful in [0, 0.1]; the gauge setter clamps
/// larger values so the crest cannot leave the surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveStyle {
    pub wave_color: Color,
    pub wave_background_color: Color,
    pub amplitude_ratio: f32,
    pub border_width: f32,
    pub border_color: Color,
}

impl Default for WaveStyle {
    fn default() -> Self {
        WaveStyle {
            wave_color: DEFAULT_WAVE_COLOR,
            wave_background_color: Color::TRANSPARENT,
            amplitude_ratio: DEFAULT_AMPLITUDE_RATIO,
            border_width: 0.0,
            border_color: DEFAULT_WAVE_COLOR,
        }
    }
}
