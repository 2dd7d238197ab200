//! Albanian alphabet collation
//!
//! The Albanian alphabet has 36 letters, nine of which are digraphs
//! (dh, gj, ll, nj, rr, sh, th, xh, zh). Sorting by Unicode codepoint
//! misplaces both the digraphs and the letters ç (between c and d) and
//! ë (between e and f), so product names are compared through a
//! longest-match scan over this table instead.

use crate::Locale;
use std::cmp::Ordering;

/// The 36 letters in alphabet order
const ALPHABET: [&str; 36] = [
    "a", "b", "c", "ç", "d", "dh", "e", "ë", "f", "g", "gj", "h", "i", "j", "k", "l", "ll", "m",
    "n", "nj", "o", "p", "q", "r", "rr", "s", "sh", "t", "th", "u", "v", "x", "xh", "y", "z", "zh",
];

/// Compare two strings in the given locale's order
///
/// Albanian uses the alphabet table above; English falls back to
/// case-insensitive codepoint order. Both are case-insensitive.
pub fn compare(locale: Locale, a: &str, b: &str) -> Ordering {
    match locale {
        Locale::Sq => sort_key(a).cmp(&sort_key(b)),
        Locale::En => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

/// Map a string to a sequence of alphabet ranks
///
/// Digraphs are matched greedily (longest match first), so "dhomë"
/// starts with the letter dh, not d + h. Characters outside the
/// alphabet sort after every letter, by codepoint.
fn sort_key(text: &str) -> Vec<u32> {
    let chars: Vec<char> = text.to_lowercase().chars().collect();
    let mut key = Vec::with_capacity(chars.len());
    let mut pos = 0;

    while pos < chars.len() {
        if pos + 1 < chars.len() {
            let pair: String = chars[pos..pos + 2].iter().collect();
            if let Some(rank) = ALPHABET.iter().position(|letter| *letter == pair) {
                key.push(rank as u32);
                pos += 2;
                continue;
            }
        }

        let single = chars[pos].to_string();
        match ALPHABET.iter().position(|letter| *letter == single) {
            Some(rank) => key.push(rank as u32),
            None => key.push(ALPHABET.len() as u32 + chars[pos] as u32),
        }
        pos += 1;
    }

    key
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(a: &str, b: &str) -> Ordering {
        compare(Locale::Sq, a, b)
    }

    #[test]
    fn test_c_cedilla_between_c_and_d() {
        assert_eq!(sq("cilësi", "çati"), Ordering::Less);
        assert_eq!(sq("çati", "divan"), Ordering::Less);
    }

    #[test]
    fn test_e_diaeresis_between_e_and_f() {
        assert_eq!(sq("enë", "ëmbëlsirë"), Ordering::Less);
        assert_eq!(sq("ëmbëlsirë", "fikus"), Ordering::Less);
    }

    #[test]
    fn test_digraph_dh_after_d() {
        // Codepoint order would interleave dh- words among the d- words
        assert_eq!(sq("divan", "dhomë"), Ordering::Less);
        assert_eq!(sq("dhomë", "ekspozitë"), Ordering::Less);
    }

    #[test]
    fn test_digraph_sh_after_s() {
        assert_eq!(sq("stol", "shtrat"), Ordering::Less);
        assert_eq!(sq("shtrat", "tavolinë"), Ordering::Less);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(sq("Divan", "divan"), Ordering::Equal);
        assert_eq!(sq("SHTRAT", "shtrat"), Ordering::Equal);
    }

    #[test]
    fn test_equal_strings() {
        assert_eq!(sq("krevat", "krevat"), Ordering::Equal);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(sq("krevat", "krevat dopio"), Ordering::Less);
    }

    #[test]
    fn test_non_letters_sort_after_letters() {
        assert_eq!(sq("divan", "divan 2"), Ordering::Less);
        assert_eq!(sq("divan 1", "divan 2"), Ordering::Less);
    }

    #[test]
    fn test_english_codepoint_order() {
        assert_eq!(compare(Locale::En, "Bed", "chair"), Ordering::Less);
        assert_eq!(compare(Locale::En, "Sofa", "sofa"), Ordering::Equal);
    }

    #[test]
    fn test_sorting_a_product_list() {
        let mut names = vec!["tavolinë", "çelës", "dhomë", "divan", "shtrat", "stol"];
        names.sort_by(|a, b| sq(a, b));
        assert_eq!(
            names,
            vec!["çelës", "divan", "dhomë", "stol", "shtrat", "tavolinë"]
        );
    }
}
