//! Page composition
//!
//! Walks the request's product list into a typed page plan: cover page,
//! then one vertically-centered block per product, with long descriptions
//! continuing on overflow pages. The plan is pure data; rendering it into
//! a PDF happens in `finalize`.

use crate::assets::CatalogAssets;
use crate::config::Narrative;
use crate::layout::{layout_product_block, LayoutMetrics, TextStyles};
use crate::schema::{CatalogRequest, Product};
use albanian_text::{strings, Locale};
use log::warn;
use pdf_core::{wrap_to_width, Align, Color, TextMeasure, TextStyle};

/// A single drawing operation in top-origin page coordinates
#[derive(Debug, Clone)]
pub enum DrawOp {
    Text {
        text: String,
        style: TextStyle,
        x: f64,
        y: f64,
        align: Align,
    },
    Image {
        data: Vec<u8>,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Disc {
        cx: f64,
        cy: f64,
        radius: f64,
        color: Color,
    },
}

/// Why a page exists
///
/// Product and overflow pages carry the product id, which keeps the
/// page order checkable against the input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageKind {
    Cover,
    Product { id: String },
    Overflow { id: String },
    NoProducts,
}

/// One planned page
#[derive(Debug, Clone)]
pub struct PagePlan {
    pub kind: PageKind,
    pub ops: Vec<DrawOp>,
}

/// The full planned document, in final page order
#[derive(Debug, Clone)]
pub struct DocumentPlan {
    pub pages: Vec<PagePlan>,
}

/// Composes a catalog request into a page plan
pub struct Composer<'a> {
    measure: &'a dyn TextMeasure,
    styles: &'a TextStyles,
    metrics: &'a LayoutMetrics,
}

impl<'a> Composer<'a> {
    pub fn new(
        measure: &'a dyn TextMeasure,
        styles: &'a TextStyles,
        metrics: &'a LayoutMetrics,
    ) -> Self {
        Self {
            measure,
            styles,
            metrics,
        }
    }

    /// Produce the page sequence: cover, then products in input order
    ///
    /// An empty product list yields a single placeholder page instead of
    /// product pages.
    pub fn compose(
        &self,
        request: &CatalogRequest,
        narrative: &Narrative,
        assets: &CatalogAssets,
    ) -> DocumentPlan {
        let mut pages = Vec::new();

        pages.push(self.cover_page(request.locale, narrative, assets));

        if request.products.is_empty() {
            pages.push(self.no_products_page(request.locale));
        } else {
            for product in &request.products {
                self.push_product_pages(&mut pages, product, request.locale, assets);
            }
        }

        DocumentPlan { pages }
    }

    /// Cover: logo (when available), title, three narrative sections
    fn cover_page(
        &self,
        locale: Locale,
        narrative: &Narrative,
        assets: &CatalogAssets,
    ) -> PagePlan {
        let m = self.metrics;
        let center_x = m.page_width / 2.0;
        let mut ops = Vec::new();

        if let Some(logo) = &assets.logo {
            ops.push(DrawOp::Image {
                data: logo.data.clone(),
                x: (m.page_width - logo.width_pt) / 2.0,
                y: m.logo_y,
                width: logo.width_pt,
                height: logo.height_pt,
            });
        }

        ops.push(DrawOp::Text {
            text: strings::cover_title(locale).to_string(),
            style: self.styles.cover_title.clone(),
            x: center_x,
            y: m.cover_title_y,
            align: Align::Center,
        });

        let sections = [
            (strings::about_heading(locale), narrative.about.get(locale)),
            (
                strings::products_heading(locale),
                narrative.products.get(locale),
            ),
            (
                strings::mission_heading(locale),
                narrative.mission.get(locale),
            ),
        ];

        let mut y = m.cover_sections_top;
        for (heading, body) in sections {
            if body.trim().is_empty() {
                continue;
            }

            y += m.heading_line_height;
            ops.push(DrawOp::Text {
                text: heading.to_string(),
                style: self.styles.heading.clone(),
                x: center_x,
                y,
                align: Align::Center,
            });

            let lines =
                wrap_to_width(self.measure, &self.styles.narrative, body, m.column_width());
            for line in lines {
                y += m.narrative_line_height;
                ops.push(DrawOp::Text {
                    text: line,
                    style: self.styles.narrative.clone(),
                    x: center_x,
                    y,
                    align: Align::Center,
                });
            }

            y += m.section_gap;
        }

        PagePlan {
            kind: PageKind::Cover,
            ops,
        }
    }

    /// Placeholder page for a scope with no products
    fn no_products_page(&self, locale: Locale) -> PagePlan {
        let m = self.metrics;
        PagePlan {
            kind: PageKind::NoProducts,
            ops: vec![DrawOp::Text {
                text: strings::no_products(locale).to_string(),
                style: self.styles.heading.clone(),
                x: m.page_width / 2.0,
                y: m.page_height / 2.0,
                align: Align::Center,
            }],
        }
    }

    /// One product's pages: the centered block, plus overflow continuations
    fn push_product_pages(
        &self,
        pages: &mut Vec<PagePlan>,
        product: &Product,
        locale: Locale,
        assets: &CatalogAssets,
    ) {
        let m = self.metrics;
        let image = assets.product_images.get(&product.id);
        let block = layout_product_block(
            self.measure,
            self.styles,
            m,
            product,
            locale,
            image.is_some(),
        );

        let center_x = m.page_width / 2.0;
        let mut ops = Vec::new();
        let mut kind = PageKind::Product {
            id: product.id.clone(),
        };

        // Center the block on its page; blocks taller than the page start
        // at the top margin and spill into overflow pages below
        let mut y = ((m.page_height - block.total_height) / 2.0).max(m.margin);

        for line in &block.title_lines {
            y += m.title_line_height;
            ops.push(DrawOp::Text {
                text: line.clone(),
                style: self.styles.title.clone(),
                x: center_x,
                y,
                align: Align::Center,
            });
        }
        y += m.gap_after_title;

        if let Some(img) = image {
            // Centered inside the fixed box budget; the cursor advances by
            // the budget, not the photo's actual height, so the centering
            // estimate stays exact
            ops.push(DrawOp::Image {
                data: img.data.clone(),
                x: (m.page_width - img.width_pt) / 2.0,
                y: y + (m.image_box_height - img.height_pt) / 2.0,
                width: img.width_pt,
                height: img.height_pt,
            });
            y += m.image_box_height + m.gap_after_image;
        } else {
            y += m.gap_after_image;
        }

        for line in &block.variation_lines {
            y += m.variation_line_height;
            ops.push(DrawOp::Text {
                text: line.clone(),
                style: self.styles.variation.clone(),
                x: center_x,
                y,
                align: Align::Center,
            });
        }
        if !block.variation_lines.is_empty() {
            y += m.gap_after_variations;
        }

        for line in &block.description_lines {
            if y + m.description_line_height > m.content_bottom() {
                // Continuation pages start flush at the top margin and
                // carry only the remaining description text
                pages.push(PagePlan {
                    kind: kind.clone(),
                    ops: std::mem::take(&mut ops),
                });
                kind = PageKind::Overflow {
                    id: product.id.clone(),
                };
                y = m.margin;
            }

            y += m.description_line_height;
            ops.push(DrawOp::Text {
                text: line.clone(),
                style: self.styles.description.clone(),
                x: m.margin,
                y,
                align: Align::Left,
            });
        }

        if block.swatch_rows > 0 {
            y += m.gap_before_swatches;
            for (row_index, row) in product.colors.chunks(m.swatches_per_row).enumerate() {
                let row_top = y + row_index as f64 * m.swatch_row_height;
                let row_width = (row.len() - 1) as f64 * m.swatch_spacing;
                let start_x = center_x - row_width / 2.0;

                for (i, swatch) in row.iter().enumerate() {
                    let cx = start_x + i as f64 * m.swatch_spacing;
                    let color = Color::from_hex(&swatch.hex).unwrap_or_else(|_| {
                        warn!(
                            "invalid swatch color '{}' on product '{}'",
                            swatch.hex, product.id
                        );
                        Color::from_rgb(128, 128, 128)
                    });

                    ops.push(DrawOp::Disc {
                        cx,
                        cy: row_top + m.swatch_radius,
                        radius: m.swatch_radius,
                        color,
                    });
                    ops.push(DrawOp::Text {
                        text: swatch.name.get(locale).to_string(),
                        style: self.styles.swatch_label.clone(),
                        x: cx,
                        y: row_top + 2.0 * m.swatch_radius + m.swatch_label_offset,
                        align: Align::Center,
                    });
                }
            }
        }

        pages.push(PagePlan { kind, ops });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use albanian_text::Localized;
    use crate::schema::{Scope, Swatch};
    use pdf_core::FontStyle;

    struct FixedMeasure;

    impl TextMeasure for FixedMeasure {
        fn text_width(&self, style: &TextStyle, text: &str) -> f64 {
            text.chars().count() as f64 * style.size as f64 * 0.5
        }
    }

    fn request(products: Vec<Product>) -> CatalogRequest {
        CatalogRequest {
            locale: Locale::Sq,
            scope: Scope::All,
            scope_label: "Të gjitha produktet".to_string(),
            products,
        }
    }

    fn compose(products: Vec<Product>) -> DocumentPlan {
        let metrics = LayoutMetrics::default();
        let styles = TextStyles::from_metrics(&metrics);
        let composer = Composer::new(&FixedMeasure, &styles, &metrics);
        composer.compose(
            &request(products),
            &Narrative::default(),
            &CatalogAssets::default(),
        )
    }

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: id.to_string(),
            name: Localized::new(name),
            ..Product::default()
        }
    }

    #[test]
    fn test_cover_comes_first() {
        let plan = compose(vec![product("1", "Divan")]);
        assert_eq!(plan.pages[0].kind, PageKind::Cover);
    }

    #[test]
    fn test_empty_list_yields_placeholder_page() {
        let plan = compose(vec![]);
        assert_eq!(plan.pages.len(), 2);
        assert_eq!(plan.pages[1].kind, PageKind::NoProducts);

        match &plan.pages[1].ops[0] {
            DrawOp::Text { text, .. } => {
                assert_eq!(text, "Nuk ka Produkte Të Disponueshme");
            }
            other => panic!("expected text op, got {other:?}"),
        }
    }

    #[test]
    fn test_one_page_per_product_in_order() {
        let plan = compose(vec![
            product("a", "Divan"),
            product("b", "Krevat"),
            product("c", "Tavolinë"),
        ]);

        let kinds: Vec<&PageKind> = plan.pages.iter().map(|p| &p.kind).collect();
        assert_eq!(kinds.len(), 4);
        assert_eq!(*kinds[1], PageKind::Product { id: "a".to_string() });
        assert_eq!(*kinds[2], PageKind::Product { id: "b".to_string() });
        assert_eq!(*kinds[3], PageKind::Product { id: "c".to_string() });
    }

    #[test]
    fn test_invalid_swatch_color_degrades_to_gray() {
        let mut p = product("1", "Divan");
        p.colors = vec![Swatch {
            name: Localized::new("E çuditshme"),
            hex: "not-a-color".to_string(),
        }];

        let plan = compose(vec![p]);
        let disc = plan.pages[1]
            .ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Disc { color, .. } => Some(*color),
                _ => None,
            })
            .expect("swatch disc should still be drawn");
        assert_eq!(disc, Color::from_rgb(128, 128, 128));
    }

    #[test]
    fn test_cover_skips_blank_sections() {
        let metrics = LayoutMetrics::default();
        let styles = TextStyles::from_metrics(&metrics);
        let composer = Composer::new(&FixedMeasure, &styles, &metrics);

        let narrative = Narrative {
            about: Localized::new("Mobileri artizanale që nga viti 1995."),
            ..Narrative::default()
        };
        let plan = composer.compose(&request(vec![]), &narrative, &CatalogAssets::default());

        let headings: Vec<&str> = plan.pages[0]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, style, .. }
                    if style.style == FontStyle::Bold && style.family == "body" =>
                {
                    Some(text.as_str())
                }
                _ => None,
            })
            .collect();
        assert_eq!(headings, vec!["Rreth Nesh"]);
    }
}
