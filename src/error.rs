//! # Error Types
//!
//! This module defines error types used throughout the marea library.

use thiserror::Error;

/// Main error type for marea operations
#[derive(Debug, Error)]
pub enum MareaError {
    /// Color string could not be parsed
    #[error("Color error: {0}")]
    Color(#[from] crate::color::ColorParseError),

    /// Invalid configuration value
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be decoded
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Font loading or glyph rasterization error
    #[error("Font error: {0}")]
    Font(String),

    /// PNG encoding error
    #[error("Image encode error: {0}")]
    ImageEncode(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
