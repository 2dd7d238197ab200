//! The build pipeline entry point

use crate::assets::{load_font_set, load_image, CatalogAssets};
use crate::compose::Composer;
use crate::config::BuildConfig;
use crate::fetch::Fetcher;
use crate::finalize::{append_page_footers, file_name, render};
use crate::layout::TextStyles;
use crate::schema::CatalogRequest;
use crate::Result;
use log::{debug, info, warn};

/// A finished catalog build
pub struct CatalogBuild {
    /// Suggested download file name, e.g. `Dhoma_gjumi_Katalogu.pdf`
    pub file_name: String,
    /// The serialized PDF
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Run a full catalog build
///
/// Steps run sequentially, each awaited before the next starts:
///
/// 1. Fonts — any failure aborts the build
/// 2. Logo — optional, skipped on failure
/// 3. One photo per product, in input order — a failed photo leaves
///    blank space on that product's page and the build continues
/// 4. Compose, stamp footers, render
///
/// Each call is an isolated execution: nothing is shared or cached
/// between builds.
pub fn build_catalog(
    fetcher: &dyn Fetcher,
    config: &BuildConfig,
    request: &CatalogRequest,
) -> Result<CatalogBuild> {
    info!(
        "building catalog: scope '{}', locale {}, {} products",
        request.scope_label,
        request.locale,
        request.products.len()
    );

    let fonts = load_font_set(fetcher, &config.font_sources)?;

    let mut assets = CatalogAssets::default();

    if let Some(url) = &config.logo_url {
        match load_image(
            fetcher,
            url,
            config.metrics.logo_width,
            config.metrics.logo_height,
            &config.raster,
        ) {
            Ok(logo) => assets.logo = Some(logo),
            Err(err) => warn!("logo unavailable, cover continues without it: {err}"),
        }
    }

    for product in &request.products {
        let Some(url) = product.primary_image() else {
            continue;
        };
        match load_image(
            fetcher,
            url,
            config.metrics.image_box_width,
            config.metrics.image_box_height,
            &config.raster,
        ) {
            Ok(image) => {
                assets.product_images.insert(product.id.clone(), image);
            }
            Err(err) => warn!(
                "photo for product '{}' failed, leaving blank space: {err}",
                product.id
            ),
        }
    }

    let styles = TextStyles::from_metrics(&config.metrics);
    let composer = Composer::new(&fonts, &styles, &config.metrics);
    let mut plan = composer.compose(request, &config.narrative, &assets);
    append_page_footers(&mut plan, request.locale, &styles, &config.metrics);

    let page_count = plan.pages.len();
    debug!("rendering {page_count} pages");
    let bytes = render(&plan, fonts, &config.metrics)?;

    Ok(CatalogBuild {
        file_name: file_name(&request.scope_label, request.locale),
        bytes,
        page_count,
    })
}
