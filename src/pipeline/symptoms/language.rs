//! Script-range language detection for symptom descriptions.
//!
//! Bengali and English use disjoint scripts, so presence checks are enough:
//! no keyword scoring is needed. Total function, never fails.

use crate::models::Language;

/// Bengali Unicode block (U+0980..=U+09FF).
const BENGALI_BLOCK: std::ops::RangeInclusive<char> = '\u{0980}'..='\u{09FF}';

/// Classify text as English, Bengali or mixed.
/// Empty text and text with neither script default to English.
pub fn detect_language(text: &str) -> Language {
    let has_bengali = text.chars().any(is_bengali);
    let has_latin = text.chars().any(|c| c.is_ascii_alphabetic());

    match (has_bengali, has_latin) {
        (true, true) => Language::Mixed,
        (true, false) => Language::Bn,
        _ => Language::En,
    }
}

fn is_bengali(c: char) -> bool {
    BENGALI_BLOCK.contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_english() {
        assert_eq!(detect_language("I have a headache"), Language::En);
    }

    #[test]
    fn detects_bengali() {
        assert_eq!(detect_language("আমার মাথাব্যথা হচ্ছে"), Language::Bn);
    }

    #[test]
    fn detects_mixed() {
        assert_eq!(detect_language("আমার headache হচ্ছে"), Language::Mixed);
    }

    #[test]
    fn empty_defaults_to_english() {
        assert_eq!(detect_language(""), Language::En);
        assert_eq!(detect_language("   "), Language::En);
    }

    #[test]
    fn digits_and_punctuation_alone_are_english() {
        assert_eq!(detect_language("120/80 !!"), Language::En);
    }

    #[test]
    fn bengali_digits_count_as_bengali() {
        assert_eq!(detect_language("১২০"), Language::Bn);
    }
}
