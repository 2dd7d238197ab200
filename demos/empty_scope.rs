//! Catalog build for a single category
//!
//! Builds the catalog for one category slug; an unknown or empty category
//! still produces a valid two-page document with the placeholder page.
//!
//! Usage: cargo run --example empty_scope -- <category-slug> [sq|en]

use albanian_text::Locale;
use anyhow::Result;
use katalog::fetch::{fetch_products, HttpFetcher};
use katalog::{
    build_catalog, filter_by_scope, sort_products, BuildConfig, CatalogRequest, FontSources, Scope,
};

const API_BASE: &str = "https://api.dekorshpk.com";
const ASSET_BASE: &str = "https://dekorshpk.com/assets";

fn main() -> Result<()> {
    env_logger::init();

    let slug = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "dhoma-gjumi".to_string());
    let locale: Locale = std::env::args()
        .nth(2)
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
    });

    let scope = Scope::Category(slug.clone());
    let request = CatalogRequest {
        locale,
        scope: scope.clone(),
        scope_label: slug.replace('-', " "),
        products: filter_by_scope(products, &scope),
    };

    let build = build_catalog(&fetcher, &config, &request)?;
    std::fs::write(&build.file_name, &build.bytes)?;
    println!("wrote {} ({} pages)", build.file_name, build.page_count);

    Ok(())
}
