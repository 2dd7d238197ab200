//! Albanian Text - bilingual text handling
//!
//! This crate provides:
//! - The `Locale` type (Albanian `sq` is the base language, English `en`
//!   is an optional per-field override)
//! - Localized string fields with per-field fallback to Albanian
//! - Albanian alphabet collation (36 letters including the digraphs)
//! - Fixed catalog UI strings (cover title, headings, page footers)
//!
//! # Example
//!
//! ```
//! use albanian_text::{Locale, Localized};
//!
//! let name = Localized::new("Tavolinë buke").with_en("Dining table");
//! assert_eq!(name.get(Locale::Sq), "Tavolinë buke");
//! assert_eq!(name.get(Locale::En), "Dining table");
//!
//! let untranslated = Localized::new("Komodinë");
//! assert_eq!(untranslated.get(Locale::En), "Komodinë");
//! ```

pub mod collate;
mod localized;
pub mod strings;

pub use localized::{Localized, LocalizedSeq};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur handling locale tags
#[derive(Debug, Error)]
pub enum LocaleError {
    #[error("Unknown locale: {0}")]
    Unknown(String),
}

/// Supported content locales
///
/// Albanian is the base language; every localized field carries an
/// Albanian value and English falls back to it when no override exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Sq,
    En,
}

impl Locale {
    /// The locale's BCP 47 tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Sq => "sq",
            Locale::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sq" => Ok(Locale::Sq),
            "en" => Ok(Locale::En),
            other => Err(LocaleError::Unknown(other.to_string())),
        }
    }
}
