//! Static layout data for the venue map: which katakana blocks exist and
//! how many booths each one holds. Read-only process-wide constants.

use crate::normalize::hiragana_to_katakana;

/// A named block (row) on the venue map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockInfo {
    pub block: &'static str,
    pub booth_count: u32,
}

/// Block name → booth count. Grouped by row length.
const BLOCK_TABLE: &[(&str, u32)] = &[
    // 66 booths
    ("ウ", 66),
    ("エ", 66),
    ("キ", 66),
    ("ク", 66),
    ("ケ", 66),
    ("コ", 66),
    ("サ", 66),
    ("タ", 66),
    ("チ", 66),
    ("ツ", 66),
    ("テ", 66),
    ("ト", 66),
    ("ヌ", 66),
    ("ネ", 66),
    ("ヘ", 66),
    ("ホ", 66),
    ("マ", 66),
    ("ミ", 66),
    ("ム", 66),
    ("ヤ", 66),
    ("ユ", 66),
    // 62 booths
    ("オ", 62),
    ("カ", 62),
    ("シ", 62),
    ("ソ", 62),
    ("ナ", 62),
    ("ニ", 62),
    ("ノ", 62),
    ("フ", 62),
    ("メ", 62),
    ("モ", 62),
    // 54 booths
    ("イ", 54),
    ("ヨ", 54),
    // 48 booths
    ("ス", 48),
    ("セ", 48),
    ("ハ", 48),
    ("ヒ", 48),
];

/// Every block in map display order, ヨ through イ.
pub const ALL_BLOCKS_ORDER: &[&str] = &[
    "ヨ", "ユ", "ヤ", "モ", "メ", "ム", "ミ", "マ", "ホ", "ヘ", "フ", "ヒ", "ハ", "ノ", "ネ",
    "ヌ", "ニ", "ナ", "ト", "テ", "ツ", "チ", "タ", "ソ", "セ", "ス", "シ", "サ", "コ", "ケ",
    "ク", "キ", "カ", "オ", "エ", "ウ", "イ",
];

/// Look up a block by name. Hiragana input is folded to katakana here —
/// this is the one place the extractor's as-typed block letters get
/// canonicalized, so persisted records are unaffected.
pub fn get_block_info(block_name: &str) -> Option<BlockInfo> {
    let katakana = hiragana_to_katakana(block_name);
    BLOCK_TABLE
        .iter()
        .find(|(name, _)| *name == katakana)
        .map(|&(block, booth_count)| BlockInfo { block, booth_count })
}

/// Canonical block name: hiragana → katakana, ASCII upper-cased.
pub fn normalize_block_name(block_name: &str) -> String {
    hiragana_to_katakana(block_name).to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn katakana_lookup() {
        let info = get_block_info("ニ").unwrap();
        assert_eq!(info.booth_count, 62);
        assert_eq!(get_block_info("ハ").unwrap().booth_count, 48);
    }

    #[test]
    fn hiragana_folds_before_lookup() {
        assert_eq!(get_block_info("に"), get_block_info("ニ"));
        assert_eq!(get_block_info("め").unwrap().block, "メ");
    }

    #[test]
    fn unknown_block_is_none() {
        assert_eq!(get_block_info("r"), None);
        assert_eq!(get_block_info(""), None);
    }

    #[test]
    fn order_covers_the_table() {
        assert_eq!(ALL_BLOCKS_ORDER.len(), BLOCK_TABLE.len());
        for (name, _) in BLOCK_TABLE {
            assert!(ALL_BLOCKS_ORDER.contains(name), "{name}");
        }
    }

    #[test]
    fn normalizes_case_and_script() {
        assert_eq!(normalize_block_name("め"), "メ");
        assert_eq!(normalize_block_name("p"), "P");
    }
}
