//! Error types for the render crate.

use thiserror::Error;

/// Errors that can occur while decoding, transforming or encoding bitmaps.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The input bytes could not be decoded as an image.
    #[error("failed to decode image: {0}")]
    ImageLoad(String),

    /// The SVG document could not be parsed.
    #[error("failed to parse SVG: {0}")]
    SvgParse(String),

    /// The bitmap could not be encoded.
    #[error("failed to encode image: {0}")]
    ImageSave(String),

    /// Invalid bitmap dimensions (zero width or height).
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
