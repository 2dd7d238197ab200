//! Katalog - bilingual furniture catalog PDF builder
//!
//! A catalog build is a pure transformation from a product list, a locale
//! and a scope to a paginated, downloadable PDF. The pipeline runs in
//! fixed sequential steps:
//!
//! 1. Fonts are fetched and parsed (any failure aborts the build)
//! 2. The logo and one photo per product are fetched and rasterized
//!    (failures degrade to blank space)
//! 3. The composer lays out a cover page and one block per product,
//!    vertically centered, spilling long descriptions onto overflow pages
//! 4. Footers are stamped once the total page count is known, and the
//!    document is serialized
//!
//! # Example
//!
//! ```ignore
//! use katalog::fetch::{fetch_products, HttpFetcher};
//! use katalog::{build_catalog, BuildConfig, CatalogRequest, Scope};
//!
//! let fetcher = HttpFetcher::new();
//! let mut products = fetch_products(&fetcher, products_url)?;
//! katalog::sort_products(&mut products, locale);
//!
//! let request = CatalogRequest {
//!     locale,
//!     scope: Scope::All,
//!     scope_label: "Të gjitha produktet".to_string(),
//!     products,
//! };
//! let build = build_catalog(&fetcher, &config, &request)?;
//! std::fs::write(&build.file_name, &build.bytes)?;
//! ```

pub mod assets;
pub mod builder;
pub mod compose;
pub mod config;
pub mod fetch;
pub mod finalize;
pub mod layout;
pub mod schema;

pub use builder::{build_catalog, CatalogBuild};
pub use config::{BuildConfig, FontSources, Narrative, RasterOptions};
pub use fetch::{FetchError, Fetcher, HttpFetcher};
pub use schema::{filter_by_scope, sort_products, CatalogRequest, Product, Scope, Swatch};

use thiserror::Error;

/// Errors that abort a catalog build
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A required font could not be fetched or parsed
    ///
    /// Fonts are all-or-nothing: rendering with a substitute face would
    /// silently change the catalog's typography, so the build stops here.
    #[error("Font asset failed: {0}")]
    FontAsset(String),

    /// The products endpoint failed or returned a malformed body
    #[error("Product fetch failed: {0}")]
    ProductFetch(String),

    #[error("PDF error: {0}")]
    Pdf(#[from] pdf_core::PdfError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
