//! Asset loading: fonts and rasterized images

use crate::config::{FontSources, RasterOptions};
use crate::fetch::{FetchError, Fetcher};
use crate::{CatalogError, Result};
use image::imageops::FilterType;
use pdf_core::{FontData, FontStyle, TextMeasure, TextStyle};
use std::collections::HashMap;
use std::io::Cursor;
use thiserror::Error;

/// Family name for body text (regular + bold cuts)
pub const BODY_FAMILY: &str = "body";
/// Family name for the light description cut
pub const LIGHT_FAMILY: &str = "light";
/// Family name for the cover display face
pub const DISPLAY_FAMILY: &str = "display";

/// Errors loading a single image; never fatal to a build
#[derive(Debug, Error)]
pub enum ImageAssetError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("decode failed: {0}")]
    Decode(String),

    #[error("encode failed: {0}")]
    Encode(String),
}

/// The four parsed font programs of one build
///
/// Loaded once per build and shared read-only until rendering consumes
/// them for embedding. Implements [`TextMeasure`] so the layout pass
/// measures with exactly the metrics the renderer will embed.
pub struct FontSet {
    pub regular: FontData,
    pub bold: FontData,
    pub light: FontData,
    pub display: FontData,
}

impl FontSet {
    fn variant(&self, style: &TextStyle) -> &FontData {
        match (style.family.as_str(), style.style) {
            (BODY_FAMILY, FontStyle::Bold) => &self.bold,
            (LIGHT_FAMILY, _) => &self.light,
            (DISPLAY_FAMILY, _) => &self.display,
            _ => &self.regular,
        }
    }
}

impl TextMeasure for FontSet {
    fn text_width(&self, style: &TextStyle, text: &str) -> f64 {
        self.variant(style).text_width_points(text, style.size) as f64
    }
}

/// Fetch and parse the configured font files
///
/// Any failure is fatal to the whole build: a catalog rendered with a
/// fallback face is worse than no catalog.
pub fn load_font_set(fetcher: &dyn Fetcher, sources: &FontSources) -> Result<FontSet> {
    let load = |name: &str, url: &str| -> Result<FontData> {
        let data = fetcher
            .fetch(url)
            .map_err(|err| CatalogError::FontAsset(format!("{name}: {err}")))?;
        FontData::from_bytes(name, data).map_err(|err| CatalogError::FontAsset(err.to_string()))
    };

    Ok(FontSet {
        regular: load("body-regular", &sources.regular)?,
        bold: load("body-bold", &sources.bold)?,
        light: load("light", &sources.light)?,
        display: load("display", &sources.display)?,
    })
}

/// A print-ready raster with its final dimensions in points
#[derive(Debug, Clone)]
pub struct RenderedImage {
    /// JPEG-encoded pixels
    pub data: Vec<u8>,
    pub width_pt: f64,
    pub height_pt: f64,
}

/// Raster assets gathered before composition
///
/// Product images are keyed by product id; a product missing from the
/// map renders with blank space where its photo would go.
#[derive(Default)]
pub struct CatalogAssets {
    pub logo: Option<RenderedImage>,
    pub product_images: HashMap<String, RenderedImage>,
}

/// Fetch an image and rasterize it for a target box
pub fn load_image(
    fetcher: &dyn Fetcher,
    url: &str,
    box_width: f64,
    box_height: f64,
    opts: &RasterOptions,
) -> std::result::Result<RenderedImage, ImageAssetError> {
    let data = fetcher.fetch(url)?;
    rasterize_image(&data, box_width, box_height, opts)
}

/// Rasterize image data to fit a box given in points
///
/// The target pixel size preserves the source aspect ratio, fits inside
/// the box at the configured DPI and never exceeds the source
/// resolution. Alpha is flattened onto white and, when a corner radius
/// is set, the corners are masked to white before JPEG encoding (JPEG
/// carries no transparency, and white matches the page background).
pub fn rasterize_image(
    data: &[u8],
    box_width: f64,
    box_height: f64,
    opts: &RasterOptions,
) -> std::result::Result<RenderedImage, ImageAssetError> {
    let source =
        image::load_from_memory(data).map_err(|err| ImageAssetError::Decode(err.to_string()))?;
    let (src_width, src_height) = (source.width(), source.height());
    if src_width == 0 || src_height == 0 {
        return Err(ImageAssetError::Decode("empty image".to_string()));
    }

    let px_per_pt = opts.dpi / 72.0;
    let target_width = box_width * px_per_pt;
    let target_height = box_height * px_per_pt;

    let scale = (target_width / src_width as f64)
        .min(target_height / src_height as f64)
        .min(1.0);
    let out_width = ((src_width as f64 * scale).round() as u32).max(1);
    let out_height = ((src_height as f64 * scale).round() as u32).max(1);

    let resized = source.resize_exact(out_width, out_height, FilterType::Lanczos3);

    let rgba = resized.to_rgba8();
    let mut rgb = image::RgbImage::new(out_width, out_height);
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let alpha = pixel[3] as f32 / 255.0;
        let blend = |channel: u8| (channel as f32 * alpha + 255.0 * (1.0 - alpha)) as u8;
        rgb.put_pixel(
            x,
            y,
            image::Rgb([blend(pixel[0]), blend(pixel[1]), blend(pixel[2])]),
        );
    }

    if opts.corner_radius > 0.0 {
        mask_corners(&mut rgb, opts.corner_radius * px_per_pt);
    }

    let mut encoded = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(
        &mut Cursor::new(&mut encoded),
        opts.jpeg_quality,
    )
    .encode_image(&rgb)
    .map_err(|err| ImageAssetError::Encode(err.to_string()))?;

    Ok(RenderedImage {
        data: encoded,
        width_pt: out_width as f64 / px_per_pt,
        height_pt: out_height as f64 / px_per_pt,
    })
}

/// Paint pixels outside the rounded-rectangle path white
fn mask_corners(img: &mut image::RgbImage, radius_px: f64) {
    let (width, height) = img.dimensions();
    let radius = radius_px
        .min(width as f64 / 2.0)
        .min(height as f64 / 2.0);
    if radius <= 0.0 {
        return;
    }

    for y in 0..height {
        for x in 0..width {
            let px = x as f64 + 0.5;
            let py = y as f64 + 0.5;
            // Distance to the nearest point of the radius-inset rectangle
            let cx = px.clamp(radius, width as f64 - radius);
            let cy = py.clamp(radius, height as f64 - radius);
            let dx = px - cx;
            let dy = py - cy;
            if dx * dx + dy * dy > radius * radius {
                img.put_pixel(x, y, image::Rgb([255, 255, 255]));
            }
        }
    }
}
