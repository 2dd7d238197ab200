//! Build configuration
//!
//! Everything a build needs beyond the request itself travels here as an
//! explicit value: font locations, the logo, the cover narrative, layout
//! constants and raster settings. Nothing is process-global, so parallel
//! builds stay isolated and tests can substitute their own values.

use crate::layout::LayoutMetrics;
use albanian_text::Localized;

/// URLs of the four font programs a catalog build embeds
///
/// All four are required; a missing font aborts the build rather than
/// falling back to a substitute face.
#[derive(Debug, Clone)]
pub struct FontSources {
    /// Body text, regular cut
    pub regular: String,
    /// Body text, bold cut (titles, footers)
    pub bold: String,
    /// Light cut used for descriptions
    pub light: String,
    /// Display face used for the cover title
    pub display: String,
}

/// The three narrative sections on the cover page
#[derive(Debug, Clone, Default)]
pub struct Narrative {
    pub about: Localized,
    pub products: Localized,
    pub mission: Localized,
}

/// Raster settings for photos placed in the catalog
#[derive(Debug, Clone)]
pub struct RasterOptions {
    /// Print resolution the pixel budget is derived from
    pub dpi: f64,
    /// JPEG encoder quality (1-100)
    pub jpeg_quality: u8,
    /// Corner rounding of product photos, in points; 0 disables
    pub corner_radius: f64,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            dpi: 150.0,
            jpeg_quality: 82,
            corner_radius: 6.0,
        }
    }
}

/// Full configuration of one catalog build
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub font_sources: FontSources,
    /// Cover logo; skipped without aborting when it fails to load
    pub logo_url: Option<String>,
    pub narrative: Narrative,
    pub metrics: LayoutMetrics,
    pub raster: RasterOptions,
}

impl BuildConfig {
    /// Configuration with default layout and raster settings
    pub fn new(font_sources: FontSources) -> Self {
        Self {
            font_sources,
            logo_url: None,
            narrative: Narrative::default(),
            metrics: LayoutMetrics::default(),
            raster: RasterOptions::default(),
        }
    }

    pub fn with_logo(mut self, url: &str) -> Self {
        self.logo_url = Some(url.to_string());
        self
    }

    pub fn with_narrative(mut self, narrative: Narrative) -> Self {
        self.narrative = narrative;
        self
    }
}
