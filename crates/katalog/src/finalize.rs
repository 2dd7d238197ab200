//! Footers, rendering and file naming

use crate::assets::{FontSet, BODY_FAMILY, DISPLAY_FAMILY, LIGHT_FAMILY};
use crate::compose::{DocumentPlan, DrawOp};
use crate::layout::{LayoutMetrics, TextStyles};
use crate::Result;
use albanian_text::{strings, Locale};
use pdf_core::{Align, FontFamily, PdfDocument};

/// Stamp a page-number footer on every planned page
///
/// Runs exactly once, after composition, when the total page count is
/// final; the total never needs backpatching because no page exists
/// without it.
pub fn append_page_footers(
    plan: &mut DocumentPlan,
    locale: Locale,
    styles: &TextStyles,
    metrics: &LayoutMetrics,
) {
    let total = plan.pages.len();
    for (index, page) in plan.pages.iter_mut().enumerate() {
        page.ops.push(DrawOp::Text {
            text: strings::page_footer(locale, index + 1, total),
            style: styles.footer.clone(),
            x: metrics.margin,
            y: metrics.footer_baseline(),
            align: Align::Left,
        });
    }
}

/// Render a plan into a PDF and serialize it
///
/// Consumes the font set: the parsed programs move into the document for
/// embedding.
pub fn render(plan: &DocumentPlan, fonts: FontSet, metrics: &LayoutMetrics) -> Result<Vec<u8>> {
    let mut doc = PdfDocument::new();

    doc.register_font_family(
        BODY_FAMILY,
        FontFamily::new(fonts.regular).with_bold(fonts.bold),
    )?;
    doc.register_font_family(LIGHT_FAMILY, FontFamily::new(fonts.light))?;
    doc.register_font_family(DISPLAY_FAMILY, FontFamily::new(fonts.display))?;

    for page_plan in &plan.pages {
        let page = doc.add_page(metrics.page_width, metrics.page_height)?;
        for op in &page_plan.ops {
            match op {
                DrawOp::Text {
                    text,
                    style,
                    x,
                    y,
                    align,
                } => {
                    doc.set_font(&style.family, style.size)?;
                    doc.set_font_style(style.style)?;
                    doc.insert_text(text, page, *x, *y, *align)?;
                }
                DrawOp::Image {
                    data,
                    x,
                    y,
                    width,
                    height,
                } => {
                    doc.insert_image(data, page, *x, *y, *width, *height)?;
                }
                DrawOp::Disc {
                    cx,
                    cy,
                    radius,
                    color,
                } => {
                    doc.fill_disc(page, *cx, *cy, *radius, *color)?;
                }
            }
        }
    }

    Ok(doc.to_bytes()?)
}

/// Download file name for a catalog scope
pub fn file_name(scope_label: &str, locale: Locale) -> String {
    format!("{}.pdf", strings::file_stem(scope_label, locale))
}
