//! Layout constants and the product block estimator
//!
//! One metrics table feeds both the estimator and the composer. The
//! estimator does not predict what the renderer will do; it produces the
//! [`ProductBlock`] the renderer draws from, so the two cannot disagree.

use crate::assets::{BODY_FAMILY, DISPLAY_FAMILY, LIGHT_FAMILY};
use crate::schema::Product;
use albanian_text::Locale;
use pdf_core::{wrap_to_width, FontStyle, TextMeasure, TextStyle, A4_HEIGHT, A4_WIDTH};

/// Every fixed dimension of a catalog page, in points
#[derive(Debug, Clone)]
pub struct LayoutMetrics {
    pub page_width: f64,
    pub page_height: f64,
    /// Top and side margin
    pub margin: f64,
    /// Reserved space at the bottom of content pages (keeps clear of the footer)
    pub bottom_margin: f64,

    pub title_size: f32,
    pub title_line_height: f64,
    pub gap_after_title: f64,

    /// Fixed budget the photo area occupies, whatever the photo's actual size
    pub image_box_width: f64,
    pub image_box_height: f64,
    pub gap_after_image: f64,

    pub variation_size: f32,
    pub variation_line_height: f64,
    pub gap_after_variations: f64,

    pub description_size: f32,
    pub description_line_height: f64,

    pub gap_before_swatches: f64,
    pub swatch_radius: f64,
    pub swatch_row_height: f64,
    /// Horizontal distance between swatch centers
    pub swatch_spacing: f64,
    pub swatch_label_size: f32,
    /// Label baseline distance below the disc
    pub swatch_label_offset: f64,
    pub swatches_per_row: usize,

    /// Footer baseline distance from the bottom edge
    pub footer_offset: f64,
    pub footer_size: f32,

    pub cover_title_size: f32,
    pub cover_title_y: f64,
    /// Where the narrative sections start below the cover title
    pub cover_sections_top: f64,
    pub heading_size: f32,
    pub heading_line_height: f64,
    pub narrative_size: f32,
    pub narrative_line_height: f64,
    pub section_gap: f64,

    pub logo_width: f64,
    pub logo_height: f64,
    pub logo_y: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            page_width: A4_WIDTH,
            page_height: A4_HEIGHT,
            margin: 56.0,
            bottom_margin: 64.0,

            title_size: 20.0,
            title_line_height: 26.0,
            gap_after_title: 14.0,

            image_box_width: 330.0,
            image_box_height: 248.0,
            gap_after_image: 18.0,

            variation_size: 12.0,
            variation_line_height: 16.0,
            gap_after_variations: 10.0,

            description_size: 11.0,
            description_line_height: 15.0,

            gap_before_swatches: 16.0,
            swatch_radius: 9.0,
            swatch_row_height: 46.0,
            swatch_spacing: 68.0,
            swatch_label_size: 8.0,
            swatch_label_offset: 12.0,
            swatches_per_row: 6,

            footer_offset: 28.0,
            footer_size: 9.0,

            cover_title_size: 30.0,
            cover_title_y: 210.0,
            cover_sections_top: 280.0,
            heading_size: 14.0,
            heading_line_height: 20.0,
            narrative_size: 11.0,
            narrative_line_height: 15.0,
            section_gap: 26.0,

            logo_width: 150.0,
            logo_height: 70.0,
            logo_y: 70.0,
        }
    }
}

impl LayoutMetrics {
    /// Horizontal space available for wrapped text
    pub fn column_width(&self) -> f64 {
        self.page_width - 2.0 * self.margin
    }

    /// Lowest baseline allowed for body content
    pub fn content_bottom(&self) -> f64 {
        self.page_height - self.bottom_margin
    }

    /// Footer baseline, measured from the top like all other y values
    pub fn footer_baseline(&self) -> f64 {
        self.page_height - self.footer_offset
    }
}

/// The per-role text styles of a build
#[derive(Debug, Clone)]
pub struct TextStyles {
    pub title: TextStyle,
    pub variation: TextStyle,
    pub description: TextStyle,
    pub swatch_label: TextStyle,
    pub footer: TextStyle,
    pub cover_title: TextStyle,
    pub heading: TextStyle,
    pub narrative: TextStyle,
}

impl TextStyles {
    pub fn from_metrics(metrics: &LayoutMetrics) -> Self {
        Self {
            title: TextStyle::new(BODY_FAMILY, FontStyle::Bold, metrics.title_size),
            variation: TextStyle::new(BODY_FAMILY, FontStyle::Normal, metrics.variation_size),
            description: TextStyle::new(LIGHT_FAMILY, FontStyle::Normal, metrics.description_size),
            swatch_label: TextStyle::new(BODY_FAMILY, FontStyle::Normal, metrics.swatch_label_size),
            footer: TextStyle::new(BODY_FAMILY, FontStyle::Bold, metrics.footer_size),
            cover_title: TextStyle::new(DISPLAY_FAMILY, FontStyle::Normal, metrics.cover_title_size),
            heading: TextStyle::new(BODY_FAMILY, FontStyle::Bold, metrics.heading_size),
            narrative: TextStyle::new(LIGHT_FAMILY, FontStyle::Normal, metrics.narrative_size),
        }
    }
}

/// The measured content block of one product
///
/// Produced once per product and used both for the centering estimate and
/// as the renderer's drawing source.
#[derive(Debug, Clone)]
pub struct ProductBlock {
    pub title_lines: Vec<String>,
    pub has_image: bool,
    pub variation_lines: Vec<String>,
    pub description_lines: Vec<String>,
    pub swatch_rows: usize,
    /// Vertical extent of the whole block in points
    pub total_height: f64,
}

/// Wrap and measure a product's block at the metrics' column width
pub fn layout_product_block(
    measure: &dyn TextMeasure,
    styles: &TextStyles,
    metrics: &LayoutMetrics,
    product: &Product,
    locale: Locale,
    has_image: bool,
) -> ProductBlock {
    let column = metrics.column_width();

    let title_lines = wrap_to_width(measure, &styles.title, product.name.get(locale), column);

    let variation_line = product.variation_line(locale);
    let variation_lines = if variation_line.is_empty() {
        Vec::new()
    } else {
        wrap_to_width(measure, &styles.variation, &variation_line, column)
    };

    let description = product.description.get(locale);
    let description_lines = if description.trim().is_empty() {
        Vec::new()
    } else {
        wrap_to_width(measure, &styles.description, description, column)
    };

    let swatch_rows = if product.colors.is_empty() {
        0
    } else {
        product.colors.len().div_ceil(metrics.swatches_per_row)
    };

    let mut total = title_lines.len() as f64 * metrics.title_line_height + metrics.gap_after_title;
    if has_image {
        total += metrics.image_box_height + metrics.gap_after_image;
    } else {
        total += metrics.gap_after_image;
    }
    if !variation_lines.is_empty() {
        total += variation_lines.len() as f64 * metrics.variation_line_height
            + metrics.gap_after_variations;
    }
    total += description_lines.len() as f64 * metrics.description_line_height;
    if swatch_rows > 0 {
        total += metrics.gap_before_swatches + swatch_rows as f64 * metrics.swatch_row_height;
    }

    ProductBlock {
        title_lines,
        has_image,
        variation_lines,
        description_lines,
        swatch_rows,
        total_height: total,
    }
}
