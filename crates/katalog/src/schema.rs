//! Product schema and catalog request types

use albanian_text::{collate, Locale, Localized, LocalizedSeq};
use serde::{Deserialize, Serialize};

/// A named color option with its display hex value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Swatch {
    pub name: Localized,
    pub hex: String,
}

/// A product record as served by the products endpoint
///
/// Read-only snapshot: the builder never writes products back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: Localized,
    #[serde(default)]
    pub description: Localized,
    #[serde(default)]
    pub variations: LocalizedSeq,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub colors: Vec<Swatch>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub subcategory: Option<String>,
}

impl Product {
    /// URL of the photo shown in the catalog, if the product has one
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// The variation strings joined into the single display line
    pub fn variation_line(&self, locale: Locale) -> String {
        self.variations.get(locale).join(", ")
    }
}

/// Which products a catalog build targets
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Scope {
    #[default]
    All,
    Category(String),
    Subcategory(String),
}

impl Scope {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Scope::All => true,
            Scope::Category(slug) => product.category == *slug,
            Scope::Subcategory(slug) => product.subcategory.as_deref() == Some(slug.as_str()),
        }
    }
}

/// One catalog download request, immutable for the duration of the build
#[derive(Debug, Clone)]
pub struct CatalogRequest {
    pub locale: Locale,
    pub scope: Scope,
    /// Display label for the scope; the caller resolves the slug
    pub scope_label: String,
    /// Products in final display order (see [`sort_products`])
    pub products: Vec<Product>,
}

/// Keep only the products the scope targets, preserving order
pub fn filter_by_scope(products: Vec<Product>, scope: &Scope) -> Vec<Product> {
    products
        .into_iter()
        .filter(|product| scope.matches(product))
        .collect()
}

/// Sort products into display order
///
/// Alphabetical by localized name, tie-broken by the first localized
/// variation string, using the locale's collation. The composer renders
/// its input as-is, so this runs before building the request.
pub fn sort_products(products: &mut [Product], locale: Locale) {
    products.sort_by(|a, b| {
        collate::compare(locale, a.name.get(locale), b.name.get(locale)).then_with(|| {
            let a_variation = a
                .variations
                .get(locale)
                .first()
                .map(String::as_str)
                .unwrap_or("");
            let b_variation = b
                .variations
                .get(locale)
                .first()
                .map(String::as_str)
                .unwrap_or("");
            collate::compare(locale, a_variation, b_variation)
        })
    });
}
