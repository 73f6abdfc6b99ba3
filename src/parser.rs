use std::sync::LazyLock;

use regex::Regex;

use comiket_types::LocationRecord;
use crate::normalize::{fold_fullwidth_digits, fold_fullwidth_latin, is_fullwidth_latin};

// ── Regex patterns ─────────────────────────────────────────────────
//
// Real data examples (social-media display names):
//   白山たえ*日曜東5「ニ24ab」C106
//   荻pote@1日目南a-42a
//   にゅむ＠C106 1日目南a-03b & 2日目南j-10a
//   Riko@C106(土)南ｐ-29ab
//   jonsun@C106日曜日南 r-01a
//   藤原浩一@夏コミ「免罪符屋」2日目 東タ66b
//
// Each field is extracted independently by an ordered list of candidate
// patterns; the first pattern that matches wins and the rest are skipped.
// Digit and letter classes are spelled [0-9]/[a-z] rather than \d/\w, and
// word boundaries as (?-u:\b): kana and full-width characters must not
// count as digits or word characters here, and the Unicode-aware defaults
// would match differently around them.

/// Kana or Latin letter (half- or full-width), the block/row alphabet.
const BLOCK_LETTER: &str = "[あ-んア-ンa-zA-Zａ-ｚＡ-Ｚ]";

/// How a date pattern turns its match into the normalized date string.
#[derive(Clone, Copy)]
enum DateRule {
    /// Pattern carries its value directly (曜日 forms)
    Fixed(&'static str),
    /// ([1-3１-３])日目 → "N日目" with the digit folded to half-width
    EventDay,
    /// M/D or M月D日 → "M/D"
    MonthDay,
}

/// Ordered date patterns. Definition order IS priority order: scanning
/// stops at the first pattern that matches anywhere in the segment.
static DATE_PATTERNS: LazyLock<Vec<(Regex, DateRule)>> = LazyLock::new(|| {
    use DateRule::*;

    let table: &[(&str, DateRule)] = &[
        // Circled weekday glyphs, highest priority
        ("㈰", Fixed("日曜")),
        ("㈯", Fixed("土曜")),
        ("㈮", Fixed("金曜")),
        ("㈪", Fixed("月曜")),
        ("㈫", Fixed("火曜")),
        ("㈬", Fixed("水曜")),
        ("㈭", Fixed("木曜")),
        // "N日目"
        (r"([1-3１-３])日目", EventDay),
        // Weekday inside parentheses: (土), （土曜日）, (sat) …
        (r"(?i)[（(](?:土曜日?|土|saturday|sat)[）)]", Fixed("土曜")),
        (r"(?i)[（(](?:日曜日?|日|sunday|sun)[）)]", Fixed("日曜")),
        (r"(?i)[（(](?:金曜日?|金|friday|fri)[）)]", Fixed("金曜")),
        // Bare weekday
        (r"(?i)(?:土曜日?|saturday|sat)", Fixed("土曜")),
        (r"(?i)(?:日曜日?|sunday|sun)", Fixed("日曜")),
        (r"(?i)(?:金曜日?|friday|fri)", Fixed("金曜")),
        // Numeric date: 8/15, 8月15日
        (r"([0-9]{1,2})[/月]([0-9]{1,2})日?", MonthDay),
    ];

    table
        .iter()
        .map(|&(pat, rule)| (Regex::new(pat).unwrap(), rule))
        .collect()
});

/// First hall kanji anywhere in the segment.
static RE_HALL: LazyLock<Regex> = LazyLock::new(|| Regex::new("[東西南]").unwrap());

/// Hall kanji directly followed by an entrance digit: 東1, 西 2, 南３.
static RE_ENTRANCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[東西南]\s*([1-9１-９])").unwrap());

/// Block-letter candidates, most specific first.
static BLOCK_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Inside Japanese brackets: 「ニ24ab」
        format!("「({BLOCK_LETTER})[0-9]{{2}}"),
        // Hall + entrance fused with the block: 東5ニ24
        format!("[東西南][0-9]({BLOCK_LETTER})[0-9]{{2}}"),
        // Hall + entrance, then spaced block: 西1 め-21
        format!(r"[東西南][0-9]\s+({BLOCK_LETTER})[-－ー\s]*[0-9]{{2}}"),
        // Hall then block: 南ｐ-29ab, 南a-42a
        format!(r"[東西南]\s*({BLOCK_LETTER})[-－ー\s]*[0-9]{{2}}"),
        // No hall anchor, letter-hyphen-digits: r-01a
        format!(r"(?-u:\b)({BLOCK_LETTER})[-－ー][0-9]{{2}}"),
    ]
    .iter()
    .map(|pat| Regex::new(pat).unwrap())
    .collect()
});

/// Space-number candidates, most specific first. The last, standalone
/// two-digit fallback is permissive on purpose and can grab an unrelated
/// number when everything else fails; the extraction is heuristic.
static SPACE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Inside the brackets, before an optional side suffix: 「ニ24ab」
        r"「[^」]*?([0-9]{2})[ab]*」",
        // First two-digit run after the hall
        r"[東西南][^0-9]*?([0-9]{2})(?:[ab\s]|$)",
        // Two-digit run after a hyphen
        r"[-－ー]\s*([0-9]{2})(?:[ab\s]|$)",
        // Standalone two-digit run
        r"(?-u:\b)([0-9]{2})(?:[ab\s]|$)",
    ]
    .iter()
    .map(|pat| Regex::new(pat).unwrap())
    .collect()
});

/// Standalone side token, used only when no space number was found.
/// The alternation keeps side in the closed set {a, b, ab}: a character
/// class with a {1,2} quantifier would also admit ba/aa/bb.
static RE_SIDE_BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u:\b)(ab|a|b)(?-u:\b)").unwrap());

// ── Extraction ─────────────────────────────────────────────────────

/// Extract every booth location from free text.
///
/// The text may declare several locations separated by `&`, `、` or `,`
/// (e.g. one booth per event day). Segments with neither a hall nor a
/// space number are dropped as noise; an empty result is a valid answer,
/// not an error.
pub fn extract_location_list(text: &str) -> Vec<LocationRecord> {
    text.split(['&', '、', ','])
        .map(extract_single_location)
        .filter(|info| info.hall.is_some() || info.space.is_some())
        .collect()
}

/// Extract one location record from one segment. Total: any input yields
/// a record, with whatever fields could be recognized.
pub fn extract_single_location(text: &str) -> LocationRecord {
    let mut info = LocationRecord::new(text);

    info.date = extract_date(text);

    if let Some(m) = RE_HALL.find(text) {
        info.hall = Some(m.as_str().to_string());
    }

    // Entrance is anchored on a hall character; a digit elsewhere in the
    // segment never becomes an entrance.
    if let Some(caps) = RE_ENTRANCE.captures(text) {
        info.entrance = Some(fold_fullwidth_digits(&caps[1]));
    }

    for pattern in BLOCK_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            let letter = &caps[1];
            // Full-width Latin folds to half-width; kana stays as typed.
            // The block-map consumer folds hiragana separately, so records
            // and storage keys keep the script the author used.
            info.block = Some(if letter.chars().all(is_fullwidth_latin) {
                fold_fullwidth_latin(letter)
            } else {
                letter.to_string()
            });
            break;
        }
    }

    for pattern in SPACE_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            info.space = Some(caps[1].to_string());
            break;
        }
    }

    info.side = extract_side(text, info.space.as_deref());

    info
}

fn extract_date(text: &str) -> Option<String> {
    for (pattern, rule) in DATE_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            let date = match rule {
                DateRule::Fixed(value) => (*value).to_string(),
                DateRule::EventDay => format!("{}日目", fold_fullwidth_digits(&caps[1])),
                DateRule::MonthDay => format!("{}/{}", &caps[1], &caps[2]),
            };
            return Some(date);
        }
    }
    None
}

fn extract_side(text: &str, space: Option<&str>) -> Option<String> {
    match space {
        // Prefer the letters directly after the space number: 24ab, 42 a
        Some(space) => {
            let pattern = Regex::new(&format!(r"(?i){space}\s*(ab|a|b)(?-u:\b)")).ok()?;
            pattern
                .captures(text)
                .map(|caps| caps[1].to_lowercase())
        }
        None => RE_SIDE_BARE
            .captures(text)
            .map(|caps| caps[1].to_lowercase()),
    }
}

// ── Formatting ─────────────────────────────────────────────────────

/// Render a record back to display text: date, hall+entrance, block,
/// space+side, space-separated, absent fields contributing nothing.
pub fn format_location(info: &LocationRecord) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(date) = &info.date {
        parts.push(date.clone());
    }

    if let Some(hall) = &info.hall {
        let mut hall_str = hall.clone();
        if let Some(entrance) = &info.entrance {
            hall_str.push_str(entrance);
        }
        parts.push(hall_str);
    }

    if let Some(block) = &info.block {
        parts.push(block.clone());
    }

    if let Some(space) = &info.space {
        let mut space_str = space.clone();
        if let Some(side) = &info.side {
            space_str.push_str(side);
        }
        parts.push(space_str);
    }

    parts.join(" ")
}
