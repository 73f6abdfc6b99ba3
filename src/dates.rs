//! Event-day classification: which of the two event days a record's date
//! string refers to, and the CLI-facing day filter.

use clap::ValueEnum;
use regex::Regex;

/// The two days of the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDay {
    Day1,
    Day2,
}

/// Day filter as selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DayFilter {
    All,
    Day1,
    Day2,
}

/// Date tokens that mean day 1.
pub const DAY1_PATTERNS: &[&str] = &["1日目", "土曜", "土曜日", "㈯", "8/16"];

/// Date tokens that mean day 2.
pub const DAY2_PATTERNS: &[&str] = &["2日目", "日曜", "日曜日", "㈰", "8/17"];

/// Every date token the extractor can emit, including legacy three-day
/// forms that no longer map to a day.
pub const ALL_DATE_PATTERNS: &[&str] = &[
    "1日目", "土曜", "土曜日", "㈯", "8/16", "2日目", "日曜", "日曜日", "㈰", "8/17", "3日目",
    "金曜", "金曜日", "㈮",
];

/// Which event day a date string refers to, by substring containment
/// against the known tokens. Day 1 is checked first.
pub fn day_of_date(date: &str) -> Option<EventDay> {
    if DAY1_PATTERNS.iter().any(|p| date.contains(p)) {
        return Some(EventDay::Day1);
    }
    if DAY2_PATTERNS.iter().any(|p| date.contains(p)) {
        return Some(EventDay::Day2);
    }
    None
}

/// Whether a record with this date passes the selected filter.
/// Records without a date only pass `All`.
pub fn matches_filter(date: Option<&str>, filter: DayFilter) -> bool {
    match filter {
        DayFilter::All => true,
        DayFilter::Day1 => date.and_then(day_of_date) == Some(EventDay::Day1),
        DayFilter::Day2 => date.and_then(day_of_date) == Some(EventDay::Day2),
    }
}

/// The date tokens a filter accepts, for user-facing messages.
pub fn day_patterns_for_filter(filter: DayFilter) -> Vec<&'static str> {
    match filter {
        DayFilter::Day1 => DAY1_PATTERNS.to_vec(),
        DayFilter::Day2 => DAY2_PATTERNS.to_vec(),
        DayFilter::All => {
            let mut all = DAY1_PATTERNS.to_vec();
            all.extend_from_slice(DAY2_PATTERNS);
            all
        }
    }
}

/// A regex accepting exactly one known date token (plus 8/10–8/19 numeric
/// dates), for validating manually entered dates. Anchored: a token
/// embedded in other text does not validate.
pub fn date_pattern_regex() -> Regex {
    let mut patterns: Vec<String> = ALL_DATE_PATTERNS.iter().map(|p| regex::escape(p)).collect();
    patterns.push(r"8/1[0-9]".to_string());
    Regex::new(&format!("^(?:{})$", patterns.join("|"))).unwrap()
}
