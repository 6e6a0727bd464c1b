//! CPU-side bitmap used for decoded icons.
//!
//! This module provides [`Bitmap`], a wrapper around `image::DynamicImage`
//! with the handful of operations icon resolution needs: decoding from PNG or
//! any other raster container, the dark-theme lighten filter, 24-bit colour
//! conversion, fast resampling, and PNG encoding for the disk cache.
//!
//! # Example
//!
//! ```ignore
//! use icontree_render::{Bitmap, ResizeFilter};
//!
//! let icon = Bitmap::from_png(&bytes)?
//!     .lighten()
//!     .to_true_color()
//!     .scale(1.5, ResizeFilter::Nearest);
//!
//! let png = icon.to_png()?;
//! ```

use std::io::Cursor;

use image::codecs::png::PngDecoder;
use image::{DynamicImage, GenericImageView, ImageFormat, Rgba, RgbaImage};

use crate::error::{RenderError, RenderResult};

/// Resampling filter for scale operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeFilter {
    /// Nearest neighbor interpolation. Fast but pixelated.
    #[default]
    Nearest,
    /// Bilinear interpolation. Balanced speed and quality.
    Triangle,
    /// Lanczos interpolation with window size 3. High quality.
    Lanczos3,
}

impl ResizeFilter {
    fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            ResizeFilter::Nearest => image::imageops::FilterType::Nearest,
            ResizeFilter::Triangle => image::imageops::FilterType::Triangle,
            ResizeFilter::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// A decoded icon bitmap.
///
/// All transforms return a new `Bitmap`, so they can be chained. Two bitmaps
/// compare equal when they have the same dimensions and the same RGBA8
/// pixels, regardless of the in-memory colour type.
#[derive(Clone)]
pub struct Bitmap {
    inner: DynamicImage,
}

impl Bitmap {
    // ========================================================================
    // CONSTRUCTION
    // ========================================================================

    /// Create a new transparent bitmap with the specified dimensions.
    #[inline]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            inner: DynamicImage::ImageRgba8(RgbaImage::new(width, height)),
        }
    }

    /// Create a bitmap filled with a single RGBA colour.
    pub fn from_pixel(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self {
            inner: DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(rgba))),
        }
    }

    /// Decode PNG data.
    ///
    /// The gamma chunk is not applied, so the same file produces the same
    /// pixels on every platform.
    pub fn from_png(bytes: &[u8]) -> RenderResult<Self> {
        let decoder = PngDecoder::new(Cursor::new(bytes))
            .map_err(|e| RenderError::ImageLoad(format!("invalid PNG: {}", e)))?;
        let img = DynamicImage::from_decoder(decoder)
            .map_err(|e| RenderError::ImageLoad(format!("invalid PNG: {}", e)))?;
        Ok(Self { inner: img })
    }

    /// Decode any raster container the codec recognizes (BMP/DIB, PNG, ...).
    pub fn from_bytes(bytes: &[u8]) -> RenderResult<Self> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| RenderError::ImageLoad(e.to_string()))?;
        Ok(Self { inner: img })
    }

    /// Create a bitmap from raw RGBA pixel data.
    ///
    /// The data must be exactly `width * height * 4` bytes, with pixels in
    /// row-major order, 4 bytes per pixel (R, G, B, A).
    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> RenderResult<Self> {
        let expected = (width as usize) * (height as usize) * 4;
        if data.len() != expected {
            return Err(RenderError::ImageLoad(format!(
                "Invalid data size: expected {} bytes, got {}",
                expected,
                data.len()
            )));
        }
        let rgba = RgbaImage::from_raw(width, height, data)
            .ok_or(RenderError::InvalidDimensions { width, height })?;
        Ok(Self {
            inner: DynamicImage::ImageRgba8(rgba),
        })
    }

    /// Create from an existing `DynamicImage`.
    #[inline]
    pub fn from_dynamic_image(img: DynamicImage) -> Self {
        Self { inner: img }
    }

    // ========================================================================
    // PROPERTIES
    // ========================================================================

    /// Get the width of the bitmap in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Get the height of the bitmap in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Get the dimensions as a (width, height) tuple.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        self.inner.dimensions()
    }

    /// Get the color type of the underlying image.
    #[inline]
    pub fn color_type(&self) -> image::ColorType {
        self.inner.color()
    }

    /// Check if the bitmap has an alpha channel.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.inner.color().has_alpha()
    }

    /// Returns true for a zero-sized bitmap.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    // ========================================================================
    // TRANSFORMS
    // ========================================================================

    /// Scale the bitmap by a factor.
    ///
    /// A factor of 2.0 doubles the size, 0.5 halves it. Both dimensions are
    /// at least one pixel.
    #[must_use]
    pub fn scale(&self, factor: f64, filter: ResizeFilter) -> Self {
        let new_width = ((self.width() as f64) * factor).round().max(1.0) as u32;
        let new_height = ((self.height() as f64) * factor).round().max(1.0) as u32;
        Self {
            inner: self
                .inner
                .resize_exact(new_width, new_height, filter.to_image_filter()),
        }
    }

    /// Convert to 24-bit colour depth.
    ///
    /// Palette, grey and 16-bit images are widened or narrowed to 8 bits per
    /// colour channel. Transparency is kept as a separate 8-bit alpha channel.
    #[must_use]
    pub fn to_true_color(&self) -> Self {
        let inner = if self.has_alpha() {
            DynamicImage::ImageRgba8(self.inner.to_rgba8())
        } else {
            DynamicImage::ImageRgb8(self.inner.to_rgb8())
        };
        Self { inner }
    }

    /// Lighten the bitmap for use on a dark background.
    ///
    /// Each pixel keeps its hue, saturation and alpha while its lightness is
    /// mirrored (`l' = 1 - l`): dark glyphs become light and vice versa.
    #[must_use]
    pub fn lighten(&self) -> Self {
        let mut rgba = self.inner.to_rgba8();
        for pixel in rgba.pixels_mut() {
            let [r, g, b, a] = pixel.0;
            let (h, s, l) = rgb_to_hsl(r, g, b);
            let (r, g, b) = hsl_to_rgb(h, s, 1.0 - l);
            *pixel = Rgba([r, g, b, a]);
        }
        Self {
            inner: DynamicImage::ImageRgba8(rgba),
        }
    }

    // ========================================================================
    // EXPORT
    // ========================================================================

    /// Get the raw RGBA8 pixel data as bytes.
    ///
    /// The data is in row-major order, 4 bytes per pixel (R, G, B, A).
    pub fn as_rgba8_bytes(&self) -> Vec<u8> {
        self.inner.to_rgba8().into_raw()
    }

    /// Get a single pixel as RGBA, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.inner.get_pixel(x, y).0)
    }

    /// Encode the bitmap as PNG.
    pub fn to_png(&self) -> RenderResult<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        self.inner
            .write_to(&mut buffer, ImageFormat::Png)
            .map_err(|e| RenderError::ImageSave(format!("Failed to encode PNG: {}", e)))?;
        Ok(buffer.into_inner())
    }

    /// Get a reference to the underlying `DynamicImage`.
    #[inline]
    pub fn as_inner(&self) -> &DynamicImage {
        &self.inner
    }

    /// Consume this bitmap and return the underlying `DynamicImage`.
    #[inline]
    pub fn into_inner(self) -> DynamicImage {
        self.inner
    }
}

impl PartialEq for Bitmap {
    fn eq(&self, other: &Self) -> bool {
        self.dimensions() == other.dimensions() && self.as_rgba8_bytes() == other.as_rgba8_bytes()
    }
}

impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("color_type", &self.color_type())
            .finish()
    }
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Convert RGB (0-255) to HSL (h: 0-360, s: 0-1, l: 0-1).
fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let rf = r as f32 / 255.0;
    let gf = g as f32 / 255.0;
    let bf = b as f32 / 255.0;

    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;
    let l = (max + min) / 2.0;

    if delta == 0.0 {
        return (0.0, 0.0, l);
    }

    let s = delta / (1.0 - (2.0 * l - 1.0).abs());
    let h = if max == rf {
        60.0 * (((gf - bf) / delta) % 6.0)
    } else if max == gf {
        60.0 * (((bf - rf) / delta) + 2.0)
    } else {
        60.0 * (((rf - gf) / delta) + 4.0)
    };
    let h = if h < 0.0 { h + 360.0 } else { h };

    (h, s.clamp(0.0, 1.0), l)
}

/// Convert HSL (h: 0-360, s: 0-1, l: 0-1) to RGB (0-255).
fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (u8, u8, u8) {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (
        ((r + m) * 255.0).round().clamp(0.0, 255.0) as u8,
        ((g + m) * 255.0).round().clamp(0.0, 255.0) as u8,
        ((b + m) * 255.0).round().clamp(0.0, 255.0) as u8,
    )
}
