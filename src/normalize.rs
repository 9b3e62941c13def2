//! # Normalization Module
//!
//! ## Purpose
//! Lookup key normalization and romaji transliteration. Index keys and
//! queries must pass through the same `normalize` function or lookups will
//! miss valid entries.
//!
//! ## Key Features
//! - Whitespace trimming and Unicode NFC canonicalization
//! - Romanized-input detection and conversion to hiragana

use unicode_normalization::UnicodeNormalization;
use wana_kana::{ConvertJapanese, IsJapaneseStr};

/// Normalize a spelling or query term into its index key form: leading and
/// trailing whitespace stripped, Unicode canonical composition applied.
pub fn normalize(term: &str) -> String {
    term.trim().nfc().collect()
}

/// Whether the input looks like a Latin-alphabet romanization of Japanese.
pub fn is_romanized(term: &str) -> bool {
    let trimmed = term.trim();
    !trimmed.is_empty() && trimmed.is_romaji()
}

/// Convert romanized input to hiragana for probing the kana index.
pub fn romanized_to_kana(term: &str) -> String {
    term.trim().to_hiragana()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(normalize("  猫  "), "猫");
        assert_eq!(normalize("\tねこ\n"), "ねこ");
    }

    #[test]
    fn test_normalize_composes_decomposed_kana() {
        // か + combining dakuten composes to が
        assert_eq!(normalize("か\u{3099}"), "が");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in ["  猫 ", "か\u{3099}き", "neko", "ｶﾀｶﾅ", ""] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_detects_romanized_input() {
        assert!(is_romanized("neko"));
        assert!(is_romanized("shinkansen"));
        assert!(!is_romanized("ねこ"));
        assert!(!is_romanized("猫"));
        assert!(!is_romanized(""));
        assert!(!is_romanized("   "));
    }

    #[test]
    fn test_converts_romanized_input_to_hiragana() {
        assert_eq!(romanized_to_kana("neko"), "ねこ");
        assert_eq!(romanized_to_kana("kinou"), "きのう");
    }
}
