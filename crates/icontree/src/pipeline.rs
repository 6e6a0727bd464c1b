//! Turns archive entry bytes into the bitmap a request asked for.
//!
//! The format is chosen by the entry name:
//!
//! | entry    | decode                          | dark theme        | scale > 100%               |
//! |----------|---------------------------------|-------------------|----------------------------|
//! | `*.png`  | PNG, gamma chunk ignored        | lighten, persist  | 24-bit, nearest, persist   |
//! | `*.svg`  | rasterized at the target scale  | lighten           | (already scaled)           |
//! | other    | any raster the codec recognizes | lighten, persist  | 24-bit, nearest, persist   |
//!
//! Rasterized SVGs are always persisted to the disk cache.

use icontree_render::{Bitmap, ResizeFilter, SvgImage};

use crate::error::{Error, Result};
use crate::request::DecodeParams;

/// Output of [`decode_icon`].
#[derive(Debug, Clone)]
pub struct DecodedIcon {
    /// The transformed bitmap.
    pub bitmap: Bitmap,
    /// Whether producing it was costly enough to keep a copy on disk.
    pub write_to_cache: bool,
}

/// Decode `bytes` read from the entry `resource_name` and apply the
/// dark-theme and scale transforms of `params`.
///
/// # Errors
///
/// Returns [`Error::Decode`] when the bytes are not a valid image of the
/// format the name implies.
pub fn decode_icon(bytes: &[u8], resource_name: &str, params: DecodeParams) -> Result<DecodedIcon> {
    let decode_err = |e| Error::decode(resource_name, e);

    if resource_name.ends_with(".svg") {
        let svg = SvgImage::from_bytes(bytes).map_err(decode_err)?;
        let mut bitmap = svg.render_scaled(params.scale_factor()).map_err(decode_err)?;
        if params.dark_theme {
            bitmap = bitmap.lighten();
        }
        return Ok(DecodedIcon {
            bitmap,
            write_to_cache: true,
        });
    }

    let mut bitmap = if resource_name.ends_with(".png") {
        Bitmap::from_png(bytes)
    } else {
        Bitmap::from_bytes(bytes)
    }
    .map_err(decode_err)?;
    let mut write_to_cache = false;

    if params.dark_theme {
        bitmap = bitmap.lighten();
        write_to_cache = true;
    }

    if params.scale_percentage > 100 {
        bitmap = bitmap
            .to_true_color()
            .scale(params.scale_factor(), ResizeFilter::Nearest);
        write_to_cache = true;
    }

    tracing::trace!(
        target: "icontree::pipeline",
        resource_name,
        width = bitmap.width(),
        height = bitmap.height(),
        write_to_cache,
        "decoded icon"
    );

    Ok(DecodedIcon {
        bitmap,
        write_to_cache,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    const SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16">
        <rect width="16" height="16" fill="#000000"/>
    </svg>"##;

    fn params(scale_percentage: u32, dark_theme: bool) -> DecodeParams {
        DecodeParams {
            scale_percentage,
            dark_theme,
        }
    }

    fn black_png() -> Vec<u8> {
        Bitmap::from_pixel(16, 16, [0, 0, 0, 255]).to_png().unwrap()
    }

    fn black_bmp() -> Vec<u8> {
        let image = image::RgbImage::from_pixel(4, 4, image::Rgb([0, 0, 0]));
        let mut buffer = Cursor::new(Vec::new());
        image
            .write_to(&mut buffer, image::ImageFormat::Bmp)
            .unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_png_unscaled_is_not_persisted() {
        let icon = decode_icon(&black_png(), "cmd/open.png", params(100, false)).unwrap();
        assert!(!icon.write_to_cache);
        assert_eq!(icon.bitmap.dimensions(), (16, 16));
        assert_eq!(icon.bitmap.pixel(0, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_dark_theme_always_persists() {
        let png = decode_icon(&black_png(), "cmd/open.png", params(100, true)).unwrap();
        assert!(png.write_to_cache);
        assert_eq!(png.bitmap.pixel(0, 0), Some([255, 255, 255, 255]));

        let svg = decode_icon(SVG.as_bytes(), "cmd/open.svg", params(100, true)).unwrap();
        assert!(svg.write_to_cache);
        assert_eq!(svg.bitmap.pixel(8, 8), Some([255, 255, 255, 255]));

        let bmp = decode_icon(&black_bmp(), "cmd/open.bmp", params(100, true)).unwrap();
        assert!(bmp.write_to_cache);
    }

    #[test]
    fn test_raster_upscale() {
        let icon = decode_icon(&black_png(), "cmd/open.png", params(150, false)).unwrap();
        assert!(icon.write_to_cache);
        assert_eq!(icon.bitmap.dimensions(), (24, 24));
    }

    #[test]
    fn test_downscale_percentage_is_ignored_for_raster() {
        let icon = decode_icon(&black_png(), "cmd/open.png", params(50, false)).unwrap();
        assert!(!icon.write_to_cache);
        assert_eq!(icon.bitmap.dimensions(), (16, 16));
    }

    #[test]
    fn test_svg_rendered_at_scale() {
        let icon = decode_icon(SVG.as_bytes(), "cmd/open.svg", params(200, false)).unwrap();
        assert!(icon.write_to_cache);
        assert_eq!(icon.bitmap.dimensions(), (32, 32));
        assert_eq!(icon.bitmap.pixel(0, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_other_formats_use_generic_decoder() {
        let icon = decode_icon(&black_bmp(), "res/logo.bmp", params(100, false)).unwrap();
        assert!(!icon.write_to_cache);
        assert_eq!(icon.bitmap.dimensions(), (4, 4));
    }

    #[test]
    fn test_garbage_is_a_decode_error() {
        let result = decode_icon(b"garbage", "cmd/open.png", params(100, false));
        assert!(matches!(result, Err(Error::Decode { ref entry, .. }) if entry == "cmd/open.png"));

        let result = decode_icon(b"<svg", "cmd/open.svg", params(100, false));
        assert!(matches!(result, Err(Error::Decode { .. })));
    }
}
