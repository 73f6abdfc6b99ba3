//! Script normalization for the multi-script strings Comiket attendees
//! put in their display names: full-width digits and Latin letters folded
//! to half-width, hiragana folded to katakana for block-map lookups.
//!
//! All transforms are plain code-point arithmetic; no locale tables.

/// Fold full-width digits (０–９, U+FF10–FF19) to ASCII digits.
/// Already-half-width input passes through unchanged.
pub fn fold_fullwidth_digits(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '０'..='９' => char::from_u32(c as u32 - 0xFEE0).unwrap_or(c),
            _ => c,
        })
        .collect()
}

/// Fold full-width Latin letters (Ａ–Ｚ, ａ–ｚ) to ASCII, preserving case.
pub fn fold_fullwidth_latin(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'Ａ'..='Ｚ' | 'ａ'..='ｚ' => char::from_u32(c as u32 - 0xFEE0).unwrap_or(c),
            _ => c,
        })
        .collect()
}

pub fn is_fullwidth_latin(c: char) -> bool {
    matches!(c, 'Ａ'..='Ｚ' | 'ａ'..='ｚ')
}

/// Convert hiragana (U+3041–U+3096) to the corresponding katakana.
///
/// The extractor itself never calls this: block letters stay as typed in
/// records (and therefore in storage keys). Only the block-map lookup
/// folds, so existing persisted keys keep their original script.
pub fn hiragana_to_katakana(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\u{3041}'..='\u{3096}' => char::from_u32(c as u32 + 0x60).unwrap_or(c),
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_fullwidth_digits() {
        assert_eq!(fold_fullwidth_digits("１２３"), "123");
        assert_eq!(fold_fullwidth_digits("東５ニ２４"), "東5ニ24");
    }

    #[test]
    fn folds_fullwidth_latin() {
        assert_eq!(fold_fullwidth_latin("ｐ"), "p");
        assert_eq!(fold_fullwidth_latin("Ｒａｂ"), "Rab");
    }

    #[test]
    fn folding_is_idempotent() {
        assert_eq!(fold_fullwidth_digits("123"), "123");
        assert_eq!(fold_fullwidth_latin("p"), "p");
        assert_eq!(
            fold_fullwidth_latin(&fold_fullwidth_latin("ｐ")),
            fold_fullwidth_latin("ｐ")
        );
    }

    #[test]
    fn hiragana_becomes_katakana() {
        assert_eq!(hiragana_to_katakana("め"), "メ");
        assert_eq!(hiragana_to_katakana("にゅむ"), "ニュム");
        // katakana and non-kana untouched
        assert_eq!(hiragana_to_katakana("ニ24"), "ニ24");
    }
}
