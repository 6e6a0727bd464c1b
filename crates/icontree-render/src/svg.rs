//! SVG rasterization for vector icons.
//!
//! This module provides [`SvgImage`], which parses an SVG document once and
//! renders it to a [`Bitmap`] at any scale. Icons stored as SVG are rendered
//! directly at the target scale factor instead of being resampled afterwards.
//!
//! # Usage
//!
//! ```ignore
//! use icontree_render::SvgImage;
//!
//! let svg = SvgImage::from_bytes(&bytes)?;
//!
//! // A 16x16 icon rendered for a 150% display is 24x24 pixels.
//! let bitmap = svg.render_scaled(1.5)?;
//! ```
//!
//! # Performance Considerations
//!
//! SVG rendering is much more expensive than decoding a PNG. Callers are
//! expected to cache the rendered result.

use std::sync::Arc;

use resvg::tiny_skia;
use resvg::usvg;

use crate::bitmap::Bitmap;
use crate::error::{RenderError, RenderResult};

/// A parsed SVG document that can be rendered at any resolution.
#[derive(Clone)]
pub struct SvgImage {
    /// The parsed SVG tree.
    tree: Arc<usvg::Tree>,
    /// Natural width from the document.
    width: f32,
    /// Natural height from the document.
    height: f32,
}

impl SvgImage {
    /// Parse an SVG from bytes in memory.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::SvgParse`] if the SVG is invalid or malformed.
    pub fn from_bytes(data: &[u8]) -> RenderResult<Self> {
        let options = usvg::Options::default();

        let tree = usvg::Tree::from_data(data, &options)
            .map_err(|e| RenderError::SvgParse(e.to_string()))?;

        // Natural size from the viewBox or width/height attributes
        let size = tree.size();

        Ok(Self {
            tree: Arc::new(tree),
            width: size.width(),
            height: size.height(),
        })
    }

    /// Get the natural size of the SVG as (width, height).
    pub fn natural_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Render the SVG to straight (non-premultiplied) RGBA at a pixel size.
    pub fn render_to_bitmap(&self, width: u32, height: u32) -> RenderResult<Bitmap> {
        let mut pixmap = tiny_skia::Pixmap::new(width, height)
            .ok_or(RenderError::InvalidDimensions { width, height })?;

        let sx = width as f32 / self.width;
        let sy = height as f32 / self.height;
        let transform = tiny_skia::Transform::from_scale(sx, sy);

        resvg::render(&self.tree, transform, &mut pixmap.as_mut());

        // tiny-skia stores premultiplied RGBA
        let data = pixmap.data();
        let mut result = Vec::with_capacity(data.len());

        for chunk in data.chunks(4) {
            let a = chunk[3] as f32 / 255.0;
            if a > 0.0 {
                result.push((chunk[0] as f32 / a).min(255.0) as u8);
                result.push((chunk[1] as f32 / a).min(255.0) as u8);
                result.push((chunk[2] as f32 / a).min(255.0) as u8);
                result.push(chunk[3]);
            } else {
                result.extend_from_slice(&[0, 0, 0, 0]);
            }
        }

        Bitmap::from_rgba(result, width, height)
    }

    /// Render the SVG at its natural size multiplied by `scale_factor`.
    ///
    /// The result is at least 1x1 pixels.
    pub fn render_scaled(&self, scale_factor: f64) -> RenderResult<Bitmap> {
        let width = ((self.width as f64) * scale_factor).round().max(1.0) as u32;
        let height = ((self.height as f64) * scale_factor).round().max(1.0) as u32;
        tracing::trace!(width, height, scale_factor, "rasterizing SVG");
        self.render_to_bitmap(width, height)
    }
}

impl std::fmt::Debug for SvgImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SvgImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="8">
        <rect width="16" height="8" fill="#000000"/>
    </svg>"##;

    #[test]
    fn test_natural_size() {
        let svg = SvgImage::from_bytes(SQUARE.as_bytes()).unwrap();
        assert_eq!(svg.natural_size(), (16.0, 8.0));
    }

    #[test]
    fn test_render_scaled() {
        let svg = SvgImage::from_bytes(SQUARE.as_bytes()).unwrap();
        let bitmap = svg.render_scaled(1.5).unwrap();
        assert_eq!(bitmap.dimensions(), (24, 12));
        assert_eq!(bitmap.pixel(5, 5), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_render_unscaled() {
        let svg = SvgImage::from_bytes(SQUARE.as_bytes()).unwrap();
        let bitmap = svg.render_scaled(1.0).unwrap();
        assert_eq!(bitmap.dimensions(), (16, 8));
    }

    #[test]
    fn test_invalid_svg() {
        let result = SvgImage::from_bytes(b"<svg>oops");
        assert!(matches!(result, Err(RenderError::SvgParse(_))));
    }
}
