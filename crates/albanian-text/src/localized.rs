//! Localized string fields with per-field fallback

use crate::Locale;
use serde::{Deserialize, Serialize};

/// A text field with an Albanian base value and an optional English override
///
/// The fallback rule is applied per field: English text is used only when
/// the override is present and non-blank, otherwise the Albanian value
/// stands in. Fields of the same record fall back independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized {
    #[serde(default)]
    pub sq: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
}

impl Localized {
    /// Create a field with only the Albanian value
    pub fn new(sq: &str) -> Self {
        Self {
            sq: sq.to_string(),
            en: None,
        }
    }

    /// Attach an English override
    pub fn with_en(mut self, en: &str) -> Self {
        self.en = Some(en.to_string());
        self
    }

    /// The value for a locale, falling back to Albanian
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => match &self.en {
                Some(en) if !en.trim().is_empty() => en,
                _ => &self.sq,
            },
            Locale::Sq => &self.sq,
        }
    }

    /// Whether the resolved value for a locale is blank
    pub fn is_blank(&self, locale: Locale) -> bool {
        self.get(locale).trim().is_empty()
    }
}

/// An ordered list of strings with an Albanian base and an optional
/// English override list
///
/// The override applies as a whole: an empty English list falls back to
/// the Albanian list rather than mixing entries from both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedSeq {
    #[serde(default)]
    pub sq: Vec<String>,
    #[serde(default)]
    pub en: Vec<String>,
}

impl LocalizedSeq {
    pub fn new(sq: Vec<String>) -> Self {
        Self {
            sq,
            en: Vec::new(),
        }
    }

    pub fn with_en(mut self, en: Vec<String>) -> Self {
        self.en = en;
        self
    }

    /// The list for a locale, falling back to Albanian
    pub fn get(&self, locale: Locale) -> &[String] {
        match locale {
            Locale::En if !self.en.is_empty() => &self.en,
            _ => &self.sq,
        }
    }

    /// Whether the resolved list for a locale is empty
    pub fn is_empty(&self, locale: Locale) -> bool {
        self.get(locale).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_get_albanian() {
        let field = Localized::new("Dhomë gjumi").with_en("Bedroom");
        assert_eq!(field.get(Locale::Sq), "Dhomë gjumi");
    }

    #[test]
    fn test_get_english_override() {
        let field = Localized::new("Dhomë gjumi").with_en("Bedroom");
        assert_eq!(field.get(Locale::En), "Bedroom");
    }

    #[test]
    fn test_missing_english_falls_back() {
        let field = Localized::new("Komodinë");
        assert_eq!(field.get(Locale::En), "Komodinë");
    }

    #[test]
    fn test_blank_english_falls_back() {
        let field = Localized::new("Komodinë").with_en("   ");
        assert_eq!(field.get(Locale::En), "Komodinë");
    }

    #[test]
    fn test_is_blank() {
        let field = Localized::new("");
        assert!(field.is_blank(Locale::Sq));
        assert!(field.is_blank(Locale::En));

        let field = Localized::new("").with_en("Sofa");
        assert!(field.is_blank(Locale::Sq));
        assert!(!field.is_blank(Locale::En));
    }

    #[test]
    fn test_seq_fallback_is_whole_list() {
        let variations = LocalizedSeq::new(vec!["160x200 cm".to_string(), "180x200 cm".to_string()]);
        assert_eq!(variations.get(Locale::En), variations.get(Locale::Sq));

        let translated = variations
            .clone()
            .with_en(vec!["160 by 200 cm".to_string()]);
        assert_eq!(translated.get(Locale::En), ["160 by 200 cm".to_string()]);
        assert_eq!(translated.get(Locale::Sq).len(), 2);
    }

    #[test]
    fn test_deserialize_defaults() {
        let field: Localized = serde_json::from_str(r#"{"sq": "Krevat"}"#).unwrap();
        assert_eq!(field.sq, "Krevat");
        assert_eq!(field.en, None);

        let seq: LocalizedSeq = serde_json::from_str(r#"{}"#).unwrap();
        assert!(seq.sq.is_empty());
        assert!(seq.en.is_empty());
    }
}
