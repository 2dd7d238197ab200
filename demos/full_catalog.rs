//! Full catalog build against live endpoints
//!
//! Fetches the product collection, sorts it into display order and writes
//! the finished PDF next to the binary.
//!
//! Usage: cargo run --example full_catalog -- [sq|en]

use albanian_text::{Locale, Localized};
use anyhow::Result;
use katalog::fetch::{fetch_products, HttpFetcher};
use katalog::{
    build_catalog, filter_by_scope, sort_products, BuildConfig, CatalogRequest, FontSources,
    Narrative, Scope,
};

const API_BASE: &str = "https://api.dekorshpk.com";
const ASSET_BASE: &str = "https://dekorshpk.com/assets";

fn main() -> Result<()> {
    env_logger::init();

    let locale: Locale = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sq".to_string())
        .parse()?;

    let fetcher = HttpFetcher::new();

    let mut products = fetch_products(&fetcher, &format!("{API_BASE}/products"))?;
    sort_products(&mut products, locale);

    let config = BuildConfig::new(FontSources {
        regular: format!("{ASSET_BASE}/fonts/Raleway-Regular.ttf"),
        bold: format!("{ASSET_BASE}/fonts/Raleway-Bold.ttf"),
        light: format!("{ASSET_BASE}/fonts/Raleway-Light.ttf"),
        display: format!("{ASSET_BASE}/fonts/PlayfairDisplay-Regular.ttf"),
    })
    .with_logo(&format!("{ASSET_BASE}/logo.png"))
    .with_narrative(Narrative {
        about: Localized::new(
            "Që nga viti 1998 prodhojmë mobilje me porosi për shtëpi dhe zyra, \
             me dru të përzgjedhur dhe punim artizanal.",
        )
        .with_en(
            "Since 1998 we have crafted custom furniture for homes and offices, \
             using selected wood and artisanal workmanship.",
        ),
        products: Localized::new(
            "Kolltukë, krevatë, tavolina dhe dhoma të plota, të konfigurueshme \
             në përmasa dhe ngjyra.",
        )
        .with_en(
            "Sofas, beds, tables and complete rooms, configurable in size and color.",
        ),
        mission: Localized::new(
            "Synojmë që çdo shtëpi shqiptare të ketë mobilje cilësore me çmim të drejtë.",
        )
        .with_en("We want every home to enjoy quality furniture at a fair price."),
    });

    let scope = Scope::All;
    let request = CatalogRequest {
        locale,
        scope: scope.clone(),
        scope_label: match locale {
            Locale::Sq => "Të gjitha produktet".to_string(),
            Locale::En => "All products".to_string(),
        },
        products: filter_by_scope(products, &scope),
    };

    let build = build_catalog(&fetcher, &config, &request)?;
    std::fs::write(&build.file_name, &build.bytes)?;
    println!("wrote {} ({} pages)", build.file_name, build.page_count);

    Ok(())
}
