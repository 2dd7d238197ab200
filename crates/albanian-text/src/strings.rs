//! Fixed catalog UI strings per locale

use crate::Locale;

/// Catalog cover title
pub fn cover_title(locale: Locale) -> &'static str {
    match locale {
        Locale::Sq => "Katalogu i Produkteve",
        Locale::En => "Product Catalog",
    }
}

/// Cover section heading: company introduction
pub fn about_heading(locale: Locale) -> &'static str {
    match locale {
        Locale::Sq => "Rreth Nesh",
        Locale::En => "About Us",
    }
}

/// Cover section heading: product range
pub fn products_heading(locale: Locale) -> &'static str {
    match locale {
        Locale::Sq => "Produktet Tona",
        Locale::En => "Our Products",
    }
}

/// Cover section heading: mission and vision
pub fn mission_heading(locale: Locale) -> &'static str {
    match locale {
        Locale::Sq => "Misioni dhe Vizioni",
        Locale::En => "Mission and Vision",
    }
}

/// Placeholder page text when the requested scope has no products
pub fn no_products(locale: Locale) -> &'static str {
    match locale {
        Locale::Sq => "Nuk ka Produkte Të Disponueshme",
        Locale::En => "No Products Available",
    }
}

/// Footer line with the 1-based page number and the total page count
pub fn page_footer(locale: Locale, page: usize, total: usize) -> String {
    match locale {
        Locale::Sq => format!("Faqe {page} nga {total}"),
        Locale::En => format!("Page {page} of {total}"),
    }
}

/// Localized file-name suffix for a catalog download
pub fn catalog_suffix(locale: Locale) -> &'static str {
    match locale {
        Locale::Sq => "Katalogu",
        Locale::En => "Catalog",
    }
}

/// File stem for a catalog named after its scope
///
/// The scope label gets its first letter capitalized, the localized
/// suffix is appended, and spaces become underscores.
pub fn file_stem(scope_label: &str, locale: Locale) -> String {
    let label = scope_label.trim();
    let mut chars = label.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    };

    let suffix = catalog_suffix(locale);
    let joined = if capitalized.is_empty() {
        suffix.to_string()
    } else {
        format!("{capitalized} {suffix}")
    };
    joined.replace(' ', "_")
}
