//! Integration tests for the catalog build pipeline
//!
//! These tests drive the composer and finalizer over the typed page plan
//! with a fixed-advance text measure, so no font files are needed and
//! every geometric expectation can be computed by hand.

use albanian_text::{Locale, Localized, LocalizedSeq};
use katalog::assets::{CatalogAssets, RenderedImage, LIGHT_FAMILY};
use katalog::compose::{Composer, DocumentPlan, DrawOp, PageKind};
use katalog::config::Narrative;
use katalog::finalize::append_page_footers;
use katalog::layout::{layout_product_block, LayoutMetrics, TextStyles};
use katalog::schema::{CatalogRequest, Product, Scope, Swatch};
use pdf_core::{TextMeasure, TextStyle};

/// Fixed-advance measure: every character is half the font size wide
struct FixedMeasure;

impl TextMeasure for FixedMeasure {
    fn text_width(&self, style: &TextStyle, text: &str) -> f64 {
        text.chars().count() as f64 * style.size as f64 * 0.5
    }
}

/// Small page with round numbers so page arithmetic is checkable by hand
///
/// Overflow pages hold exactly (350 - 50) / 20 = 15 description lines.
fn test_metrics() -> LayoutMetrics {
    LayoutMetrics {
        page_width: 400.0,
        page_height: 400.0,
        margin: 50.0,
        bottom_margin: 50.0,

        title_size: 10.0,
        title_line_height: 20.0,
        gap_after_title: 10.0,

        image_box_width: 100.0,
        image_box_height: 100.0,
        gap_after_image: 10.0,

        variation_size: 10.0,
        variation_line_height: 15.0,
        gap_after_variations: 10.0,

        description_size: 10.0,
        description_line_height: 20.0,

        gap_before_swatches: 10.0,
        swatch_radius: 5.0,
        swatch_row_height: 30.0,
        swatch_spacing: 40.0,
        swatch_label_size: 8.0,
        swatch_label_offset: 10.0,
        swatches_per_row: 3,

        footer_offset: 20.0,
        footer_size: 8.0,

        cover_title_size: 16.0,
        cover_title_y: 80.0,
        cover_sections_top: 120.0,
        heading_size: 12.0,
        heading_line_height: 18.0,
        narrative_size: 10.0,
        narrative_line_height: 14.0,
        section_gap: 16.0,

        logo_width: 80.0,
        logo_height: 40.0,
        logo_y: 20.0,
    }
}

fn product(id: &str, name: &str) -> Product {
    Product {
        id: id.to_string(),
        name: Localized::new(name),
        ..Product::default()
    }
}

fn fake_image(width_pt: f64, height_pt: f64) -> RenderedImage {
    RenderedImage {
        data: vec![0xFF, 0xD8, 0xFF],
        width_pt,
        height_pt,
    }
}

fn request(locale: Locale, products: Vec<Product>) -> CatalogRequest {
    CatalogRequest {
        locale,
        scope: Scope::All,
        scope_label: match locale {
            Locale::Sq => "Të gjitha produktet".to_string(),
            Locale::En => "All products".to_string(),
        },
        products,
    }
}

fn compose_with(
    metrics: &LayoutMetrics,
    req: &CatalogRequest,
    assets: &CatalogAssets,
) -> DocumentPlan {
    let styles = TextStyles::from_metrics(metrics);
    Composer::new(&FixedMeasure, &styles, metrics).compose(req, &Narrative::default(), assets)
}

/// Bottom-most visual extent of an op, for the estimate parity check
fn op_extent(op: &DrawOp) -> f64 {
    match op {
        DrawOp::Text { y, .. } => *y,
        DrawOp::Image { y, height, .. } => *y + *height,
        DrawOp::Disc { cy, radius, .. } => *cy + *radius,
    }
}

#[test]
fn estimated_height_matches_rendered_extent() {
    // Tall page: the whole block fits, so every op position derives from
    // the centering estimate
    let mut metrics = test_metrics();
    metrics.page_height = 10_000.0;
    let styles = TextStyles::from_metrics(&metrics);

    let mut p = product("1", "Divan qoshe");
    p.variations = LocalizedSeq::new(vec!["3-vendësh".to_string()]);
    p.description = Localized::new("Strukturë druri ahu me sfungjer të dendur.");
    p.colors = (0..4)
        .map(|i| Swatch {
            name: Localized::new("Gri"),
            hex: format!("#44444{i}"),
        })
        .collect();

    let block = layout_product_block(&FixedMeasure, &styles, &metrics, &p, Locale::Sq, false);
    let plan = compose_with(&metrics, &request(Locale::Sq, vec![p]), &CatalogAssets::default());

    let page = &plan.pages[1];
    let expected_start = (metrics.page_height - block.total_height) / 2.0;

    // First drawn baseline is the title's
    match &page.ops[0] {
        DrawOp::Text { y, .. } => {
            assert!((y - (expected_start + metrics.title_line_height)).abs() < 1e-9)
        }
        other => panic!("expected title text op, got {other:?}"),
    }

    // Everything drawn stays inside the estimated extent, and the block
    // actually reaches it (within one line-height)
    let max_extent = page.ops.iter().map(op_extent).fold(0.0, f64::max);
    let estimated_bottom = expected_start + block.total_height;
    assert!(max_extent <= estimated_bottom + 1e-9);
    assert!(max_extent >= estimated_bottom - metrics.title_line_height);
}

#[test]
fn page_order_follows_input_order() {
    let metrics = test_metrics();
    let products = vec![
        product("zh-1", "Zhur"),
        product("aa-2", "Abazhur"),
        product("mm-3", "Mobilje"),
    ];
    // Deliberately unsorted input: the composer must not reorder
    let plan = compose_with(
        &metrics,
        &request(Locale::Sq, products),
        &CatalogAssets::default(),
    );

    let ids: Vec<&str> = plan
        .pages
        .iter()
        .filter_map(|page| match &page.kind {
            PageKind::Product { id } | PageKind::Overflow { id } => Some(id.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(ids, vec!["zh-1", "aa-2", "mm-3"]);
}

#[test]
fn failed_image_leaves_blank_space_and_build_continues() {
    let metrics = test_metrics();
    let products = vec![product("broken", "Komodinë"), product("ok", "Raft")];

    // The first product's photo never made it into the assets (fetch 404)
    let mut assets = CatalogAssets::default();
    assets
        .product_images
        .insert("ok".to_string(), fake_image(80.0, 60.0));

    let plan = compose_with(&metrics, &request(Locale::Sq, products), &assets);
    assert_eq!(plan.pages.len(), 3);

    let broken_page = &plan.pages[1];
    assert_eq!(broken_page.kind, PageKind::Product { id: "broken".to_string() });
    assert!(!broken_page
        .ops
        .iter()
        .any(|op| matches!(op, DrawOp::Image { .. })));

    let ok_page = &plan.pages[2];
    assert!(ok_page
        .ops
        .iter()
        .any(|op| matches!(op, DrawOp::Image { .. })));
}

#[test]
fn image_advances_by_box_budget_not_photo_height() {
    let metrics = test_metrics();
    let styles = TextStyles::from_metrics(&metrics);

    let mut p = product("1", "Tavolinë");
    p.description = Localized::new("Dru lisi.");
    p.images = vec!["https://cdn.test/t.jpg".to_string()];

    let mut assets = CatalogAssets::default();
    // Photo much shorter than the 100pt box
    assets
        .product_images
        .insert("1".to_string(), fake_image(100.0, 40.0));

    let block = layout_product_block(&FixedMeasure, &styles, &metrics, &p, Locale::Sq, true);
    let plan = compose_with(&metrics, &request(Locale::Sq, vec![p]), &assets);

    let page = &plan.pages[1];
    let start = (metrics.page_height - block.total_height) / 2.0;

    // Photo is centered inside its budget
    let image_y = page
        .ops
        .iter()
        .find_map(|op| match op {
            DrawOp::Image { y, .. } => Some(*y),
            _ => None,
        })
        .expect("image op");
    let box_top = start + metrics.title_line_height + metrics.gap_after_title;
    assert!((image_y - (box_top + 30.0)).abs() < 1e-9);

    // The description baseline sits below the full budget regardless
    let description_y = page
        .ops
        .iter()
        .find_map(|op| match op {
            DrawOp::Text { text, y, .. } if text == "Dru lisi." => Some(*y),
            _ => None,
        })
        .expect("description op");
    let expected = box_top
        + metrics.image_box_height
        + metrics.gap_after_image
        + metrics.description_line_height;
    assert!((description_y - expected).abs() < 1e-9);
}

#[test]
fn scenario_three_products_one_bare() {
    // S1: locale en, three products, #2 has no photo and no colors
    let metrics = test_metrics();

    let mut first = product("1", "Bed");
    first.colors = vec![Swatch {
        name: Localized::new("Arrë").with_en("Walnut"),
        hex: "#5C4033".to_string(),
    }];
    let second = product("2", "Shelf");
    let third = product("3", "Sofa");

    let mut assets = CatalogAssets::default();
    assets
        .product_images
        .insert("1".to_string(), fake_image(80.0, 60.0));
    assets
        .product_images
        .insert("3".to_string(), fake_image(80.0, 60.0));

    let mut plan = compose_with(
        &metrics,
        &request(Locale::En, vec![first, second, third]),
        &assets,
    );
    let styles = TextStyles::from_metrics(&metrics);
    append_page_footers(&mut plan, Locale::En, &styles, &metrics);

    assert_eq!(plan.pages.len(), 4);
    assert_eq!(plan.pages[0].kind, PageKind::Cover);

    // The bare product's page has no photo and no swatch section
    let bare = &plan.pages[2];
    assert_eq!(bare.kind, PageKind::Product { id: "2".to_string() });
    assert!(!bare.ops.iter().any(|op| matches!(op, DrawOp::Image { .. })));
    assert!(!bare.ops.iter().any(|op| matches!(op, DrawOp::Disc { .. })));

    // Running footers through "Page 4 of 4"
    for (index, page) in plan.pages.iter().enumerate() {
        match page.ops.last() {
            Some(DrawOp::Text { text, .. }) => {
                assert_eq!(text, &format!("Page {} of 4", index + 1));
            }
            other => panic!("expected footer op, got {other:?}"),
        }
    }
}

#[test]
fn scenario_empty_scope_albanian() {
    // S2: an empty category still produces a cover and a placeholder page
    let metrics = test_metrics();
    let styles = TextStyles::from_metrics(&metrics);

    let mut plan = compose_with(
        &metrics,
        &request(Locale::Sq, vec![]),
        &CatalogAssets::default(),
    );
    append_page_footers(&mut plan, Locale::Sq, &styles, &metrics);

    assert_eq!(plan.pages.len(), 2);
    assert_eq!(plan.pages[1].kind, PageKind::NoProducts);

    let placeholder = plan.pages[1]
        .ops
        .iter()
        .find_map(|op| match op {
            DrawOp::Text { text, .. } if text.contains("Nuk ka") => Some(text.clone()),
            _ => None,
        })
        .expect("placeholder text");
    assert_eq!(placeholder, "Nuk ka Produkte Të Disponueshme");

    match plan.pages[0].ops.last() {
        Some(DrawOp::Text { text, .. }) => assert_eq!(text, "Faqe 1 nga 2"),
        other => panic!("expected footer op, got {other:?}"),
    }
    match plan.pages[1].ops.last() {
        Some(DrawOp::Text { text, .. }) => assert_eq!(text, "Faqe 2 nga 2"),
        other => panic!("expected footer op, got {other:?}"),
    }
}

#[test]
fn scenario_five_page_description_overflow() {
    // S3: a description of 60 over-wide words wraps to 60 lines; the first
    // page holds 13 lines after the title, each overflow page holds 15
    let metrics = test_metrics();
    let styles = TextStyles::from_metrics(&metrics);

    let word = "a".repeat(61); // 305pt at size 10, wider than the 300pt column
    let mut p = product("long", "Divan");
    p.description = Localized::new(&vec![word; 60].join(" "));

    let block = layout_product_block(&FixedMeasure, &styles, &metrics, &p, Locale::Sq, false);
    assert_eq!(block.description_lines.len(), 60);

    let mut plan = compose_with(
        &metrics,
        &request(Locale::Sq, vec![p]),
        &CatalogAssets::default(),
    );
    append_page_footers(&mut plan, Locale::Sq, &styles, &metrics);

    // Cover + exactly five content pages
    assert_eq!(plan.pages.len(), 6);
    assert_eq!(plan.pages[1].kind, PageKind::Product { id: "long".to_string() });
    for page in &plan.pages[2..] {
        assert_eq!(page.kind, PageKind::Overflow { id: "long".to_string() });
    }

    // Only the first content page shows the title
    let title_pages = plan.pages[1..]
        .iter()
        .filter(|page| {
            page.ops.iter().any(|op| {
                matches!(op, DrawOp::Text { text, style, .. }
                    if text == "Divan" && style.size == metrics.title_size)
            })
        })
        .count();
    assert_eq!(title_pages, 1);

    // 13 + 15 + 15 + 15 + 2 lines of description across the five pages
    let description_lines_per_page: Vec<usize> = plan.pages[1..]
        .iter()
        .map(|page| {
            page.ops
                .iter()
                .filter(|op| {
                    matches!(op, DrawOp::Text { style, .. }
                        if style.family == LIGHT_FAMILY)
                })
                .count()
        })
        .collect();
    assert_eq!(description_lines_per_page, vec![13, 15, 15, 15, 2]);

    // Footers number every page of the longest product correctly
    match plan.pages[5].ops.last() {
        Some(DrawOp::Text { text, .. }) => assert_eq!(text, "Faqe 6 nga 6"),
        other => panic!("expected footer op, got {other:?}"),
    }
}

#[test]
fn overflow_lines_start_at_top_margin() {
    let metrics = test_metrics();

    let word = "a".repeat(61);
    let mut p = product("long", "Divan");
    p.description = Localized::new(&vec![word; 20].join(" "));

    let plan = compose_with(
        &metrics,
        &request(Locale::Sq, vec![p]),
        &CatalogAssets::default(),
    );
    assert!(plan.pages.len() >= 3);

    let first_line_y = plan.pages[2]
        .ops
        .iter()
        .find_map(|op| match op {
            DrawOp::Text { y, .. } => Some(*y),
            _ => None,
        })
        .expect("overflow page should carry description lines");
    assert!((first_line_y - (metrics.margin + metrics.description_line_height)).abs() < 1e-9);
}

#[test]
fn cover_shows_logo_when_available() {
    let metrics = test_metrics();

    let mut assets = CatalogAssets::default();
    assets.logo = Some(fake_image(80.0, 40.0));

    let with_logo = compose_with(&metrics, &request(Locale::Sq, vec![]), &assets);
    assert!(with_logo.pages[0]
        .ops
        .iter()
        .any(|op| matches!(op, DrawOp::Image { .. })));

    let without_logo = compose_with(
        &metrics,
        &request(Locale::Sq, vec![]),
        &CatalogAssets::default(),
    );
    assert!(!without_logo.pages[0]
        .ops
        .iter()
        .any(|op| matches!(op, DrawOp::Image { .. })));
}
