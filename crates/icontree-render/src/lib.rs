//! Bitmap decode and transform primitives for icontree.
//!
//! This crate holds the pure image operations the icon engine builds on:
//!
//! - **Decoding**: PNG (gamma chunk ignored), SVG rasterized at a scale
//!   factor, and any other raster container the codec recognizes
//! - **Transforms**: the dark-theme lighten filter, 24-bit colour conversion
//!   and fast resampling
//! - **Encoding**: PNG output for persistent caches
//!
//! # Example
//!
//! ```no_run
//! use icontree_render::{Bitmap, ResizeFilter, SvgImage};
//!
//! # fn example(png: &[u8], svg: &[u8]) -> icontree_render::RenderResult<()> {
//! let raster = Bitmap::from_png(png)?.scale(2.0, ResizeFilter::Nearest);
//! let vector = SvgImage::from_bytes(svg)?.render_scaled(2.0)?;
//! assert_eq!(raster.width() > 0, vector.width() > 0);
//! # Ok(())
//! # }
//! ```

mod bitmap;
mod error;
mod svg;

pub use bitmap::{Bitmap, ResizeFilter};
pub use error::{RenderError, RenderResult};
pub use svg::SvgImage;
