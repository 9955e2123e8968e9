//! # Gauge Configuration
//!
//! Serde-deserializable scene description for the CLI and for hosts that
//! prefer JSON over setter calls. Every field is optional; missing ones
//! fall back to the library defaults.
//!
//! ```json
//! {
//!   "width": 400,
//!   "height": 400,
//!   "shape": "circle",
//!   "progress": 65,
//!   "wave_color": "#FF9000",
//!   "center_label": { "text": "65%", "size": 32 }
//! }
//! ```

use crate::color::Color;
use crate::error::MareaError;
use crate::gauge::{LiquidGauge, DEFAULT_PROGRESS};
use crate::label::{Label, LabelFont, LabelPosition};
use crate::shape::{Shape, TriangleDirection};
use crate::style::{DEFAULT_AMPLITUDE_RATIO, DEFAULT_CORNER_RADIUS, DEFAULT_WAVE_COLOR};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_size() -> u32 {
    500
}

fn default_shape() -> String {
    "circle".to_string()
}

fn default_direction() -> String {
    "north".to_string()
}

fn default_corner_radius() -> f32 {
    DEFAULT_CORNER_RADIUS
}

fn default_progress() -> u32 {
    DEFAULT_PROGRESS
}

fn default_amplitude() -> f32 {
    DEFAULT_AMPLITUDE_RATIO
}

fn default_wave_color() -> Color {
    DEFAULT_WAVE_COLOR
}

fn default_transparent() -> Color {
    Color::TRANSPARENT
}

/// Complete scene description for one gauge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeConfig {
    #[serde(default = "default_size")]
    pub width: u32,
    #[serde(default = "default_size")]
    pub height: u32,
    /// Shape name: "circle", "square", "rectangle", "triangle".
    #[serde(default = "default_shape")]
    pub shape: String,
    /// Apex direction for triangles: "north", "south", "east", "west".
    #[serde(default = "default_direction")]
    pub direction: String,
    /// Round the rectangle's corners.
    #[serde(default)]
    pub rounded: bool,
    #[serde(default = "default_corner_radius")]
    pub corner_radius: f32,
    #[serde(default = "default_progress")]
    pub progress: u32,
    #[serde(default = "default_amplitude")]
    pub amplitude: f32,
    #[serde(default = "default_wave_color")]
    pub wave_color: Color,
    #[serde(default = "default_transparent")]
    pub wave_background_color: Color,
    #[serde(default)]
    pub border_width: f32,
    #[serde(default = "default_wave_color")]
    pub border_color: Color,
    #[serde(default)]
    pub top_label: Option<LabelConfig>,
    #[serde(default)]
    pub center_label: Option<LabelConfig>,
    #[serde(default)]
    pub bottom_label: Option<LabelConfig>,
    /// Path to a TTF/OTF file used for all label text. Unset keeps the
    /// built-in bitmap font.
    #[serde(default)]
    pub font: Option<PathBuf>,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        GaugeConfig {
            width: default_size(),
            height: default_size(),
            shape: default_shape(),
            direction: default_direction(),
            rounded: false,
            corner_radius: DEFAULT_CORNER_RADIUS,
            progress: DEFAULT_PROGRESS,
            amplitude: DEFAULT_AMPLITUDE_RATIO,
            wave_color: DEFAULT_WAVE_COLOR,
            wave_background_color: Color::TRANSPARENT,
            border_width: 0.0,
            border_color: DEFAULT_WAVE_COLOR,
            top_label: None,
            center_label: None,
            bottom_label: None,
            font: None,
        }
    }
}

/// Label override for one position. Omitted fields keep that position's
/// defaults (18 px top/bottom, 22 px center, dark gray fill, no stroke).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelConfig {
    pub text: String,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub size: Option<f32>,
    #[serde(default)]
    pub stroke_width: Option<f32>,
    #[serde(default)]
    pub stroke_color: Option<Color>,
}

impl LabelConfig {
    /// A label with just text, keeping the position's default styling.
    pub fn text(text: impl Into<String>) -> LabelConfig {
        LabelConfig {
            text: text.into(),
            color: None,
            size: None,
            stroke_width: None,
            stroke_color: None,
        }
    }

    fn apply(&self, label: &mut Label) {
        label.text = self.text.clone();
        if let Some(color) = self.color {
            label.color = color;
        }
        if let Some(size) = self.size {
            label.size = size;
        }
        if let Some(width) = self.stroke_width {
            label.stroke_width = width;
        }
        if let Some(color) = self.stroke_color {
            label.stroke_color = color;
        }
    }
}

impl GaugeConfig {
    /// Parse a JSON config.
    pub fn from_json(json: &str) -> Result<GaugeConfig, MareaError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a configured gauge. The wave pattern is generated once, by
    /// the final resize, after every style field is in place.
    pub fn into_gauge(self) -> Result<LiquidGauge, MareaError> {
        let mut gauge = LiquidGauge::new();
        gauge.set_shape(parse_shape(
            &self.shape,
            &self.direction,
            self.rounded,
            self.corner_radius,
        )?);
        gauge.set_amplitude_ratio(self.amplitude);
        gauge.set_wave_color(self.wave_color);
        gauge.set_wave_background_color(self.wave_background_color);
        gauge.set_border_width(self.border_width);
        gauge.set_border_color(self.border_color);
        if let Some(label) = &self.top_label {
            label.apply(gauge.label_mut(LabelPosition::Top));
        }
        if let Some(label) = &self.center_label {
            label.apply(gauge.label_mut(LabelPosition::Center));
        }
        if let Some(label) = &self.bottom_label {
            label.apply(gauge.label_mut(LabelPosition::Bottom));
        }
        if let Some(path) = &self.font {
            let bytes = std::fs::read(path)?;
            gauge.set_font(LabelFont::from_ttf_bytes(bytes)?);
        }
        gauge.resize(self.width, self.height);
        gauge.set_progress(self.progress);
        Ok(gauge)
    }
}

/// Parse a shape name plus its modifiers.
pub fn parse_shape(
    name: &str,
    direction: &str,
    rounded: bool,
    corner_radius: f32,
) -> Result<Shape, MareaError> {
    match name.to_lowercase().as_str() {
        "circle" => Ok(Shape::Circle),
        "square" => Ok(Shape::Square),
        "rectangle" | "rect" => Ok(Shape::Rectangle {
            rounded,
            corner_radius,
        }),
        "triangle" => Ok(Shape::Triangle(parse_direction(direction)?)),
        other => Err(MareaError::InvalidConfig(format!(
            "unknown shape {:?} (expected circle, square, rectangle, or triangle)",
            other
        ))),
    }
}

/// Parse a triangle direction name.
pub fn parse_direction(name: &str) -> Result<TriangleDirection, MareaError> {
    match name.to_lowercase().as_str() {
        "north" | "n" => Ok(TriangleDirection::North),
        "south" | "s" => Ok(TriangleDirection::South),
        "east" | "e" => Ok(TriangleDirection::East),
        "west" | "w" => Ok(TriangleDirection::West),
        other => Err(MareaError::InvalidConfig(format!(
            "unknown direction {:?} (expected north, south, east, or west)",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = GaugeConfig::from_json("{}").unwrap();
        assert_eq!(config, GaugeConfig::default());
        assert_eq!(config.width, 500);
        assert_eq!(config.shape, "circle");
        assert_eq!(config.progress, 50);
        assert_eq!(config.wave_color, Color::rgb(0x21, 0x21, 0x21));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = GaugeConfig {
            shape: "triangle".to_string(),
            direction: "south".to_string(),
            progress: 80,
            center_label: Some(LabelConfig {
                text: "80%".to_string(),
                color: None,
                size: Some(32.0),
                stroke_width: None,
                stroke_color: None,
            }),
            font: Some(PathBuf::from("fonts/custom.ttf")),
            ..GaugeConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back = GaugeConfig::from_json(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_into_gauge_applies_fields() {
        let config = GaugeConfig::from_json(
            r##"{
                "width": 400,
                "height": 300,
                "shape": "triangle",
                "direction": "south",
                "progress": 80,
                "amplitude": 0.08,
                "wave_color": "#FF9000",
                "center_label": { "text": "80%" }
            }"##,
        )
        .unwrap();
        let gauge = config.into_gauge().unwrap();
        assert_eq!(gauge.shape(), Shape::Triangle(TriangleDirection::South));
        assert_eq!(gauge.progress(), 80);
        assert_eq!(gauge.amplitude_ratio(), 0.08);
        assert_eq!(gauge.wave_color(), Color::rgb(0xFF, 0x90, 0x00));
        assert_eq!(gauge.surface_size(), (400, 300));
        let pattern = gauge.pattern().unwrap();
        assert_eq!(pattern.width(), 401);
        assert_eq!(pattern.height(), 301);

        let center = gauge.label(LabelPosition::Center);
        assert_eq!(center.text, "80%");
        // Omitted size keeps the center slot default.
        assert_eq!(center.size, 22.0);
    }

    #[test]
    fn test_rounded_rectangle_config() {
        let config = GaugeConfig::from_json(
            r##"{ "shape": "rectangle", "rounded": true, "corner_radius": 12.5 }"##,
        )
        .unwrap();
        let gauge = config.into_gauge().unwrap();
        assert_eq!(
            gauge.shape(),
            Shape::Rectangle {
                rounded: true,
                corner_radius: 12.5
            }
        );
    }

    #[test]
    fn test_unknown_shape_is_rejected() {
        let config = GaugeConfig {
            shape: "hexagon".to_string(),
            ..GaugeConfig::default()
        };
        let err = config.into_gauge().unwrap_err();
        assert!(matches!(err, MareaError::InvalidConfig(_)));
    }

    #[test]
    fn test_unknown_direction_is_rejected() {
        assert!(parse_direction("up").is_err());
        assert_eq!(parse_direction("W").unwrap(), TriangleDirection::West);
    }

    #[test]
    fn test_progress_above_100_clamped() {
        let config = GaugeConfig {
            progress: 150,
            ..GaugeConfig::default()
        };
        let gauge = config.into_gauge().unwrap();
        assert_eq!(gauge.progress(), 100);
    }

    #[test]
    fn test_missing_font_file_errors() {
        let config = GaugeConfig {
            font: Some(PathBuf::from("no-such-font.ttf")),
            ..GaugeConfig::default()
        };
        let err = config.into_gauge().unwrap_err();
        assert!(matches!(err, MareaError::Io(_)));
    }

    #[test]
    fn test_malformed_json_errors() {
        assert!(GaugeConfig::from_json("{ not json").is_err());
        assert!(matches!(
            GaugeConfig::from_json("{ \"width\": \"wide\" }").unwrap_err(),
            MareaError::ConfigParse(_)
        ));
    }
}
