use serde::{Deserialize, Serialize};

// ── Extracted booth location ─────────────────────────────────────────────

/// One Comiket booth location extracted from free text.
///
/// Every field except `raw` is optional: the extractor never fails, it just
/// leaves unset what it could not find. Real data examples:
///   "日曜東5「ニ24ab」"  → date 日曜, hall 東, entrance 5, block ニ, space 24, side ab
///   "1日目南a-42a"       → date 1日目, hall 南, block a, space 42, side a
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRecord {
    /// 土曜 / 日曜 / 1日目 / 8/16 …
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Hall kanji: 東, 西 or 南
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hall: Option<String>,
    /// Entrance digit 1–9, only when it directly follows the hall
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entrance: Option<String>,
    /// Block/row letter: kana or ASCII letter (full-width already folded)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<String>,
    /// Two-digit space number, zero-padded as it appeared in the source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<String>,
    /// "a", "b" or "ab"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,
    /// The segment the record was extracted from, verbatim
    pub raw: String,
}

impl LocationRecord {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            date: None,
            hall: None,
            entrance: None,
            block: None,
            space: None,
            side: None,
            raw: raw.into(),
        }
    }

    /// A record can be placed on the venue map only when hall, block and
    /// space are all known. Partial records fall back to manual entry.
    pub fn is_mappable(&self) -> bool {
        self.hall.is_some() && self.block.is_some() && self.space.is_some()
    }

    /// Persistence key, `"{hall}-{block}-{space}"`. The exact format is
    /// shared with previously persisted state; do not change it.
    pub fn storage_key(&self) -> Option<String> {
        match (&self.hall, &self.block, &self.space) {
            (Some(hall), Some(block), Some(space)) => Some(format!("{hall}-{block}-{space}")),
            _ => None,
        }
    }
}

// ── Post author ──────────────────────────────────────────────────────────

/// The author of a fetched social-media post, as reported by oEmbed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwitterUser {
    pub username: String,
    pub display_name: String,
    pub tweet_content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tweet_images: Option<Vec<String>>,
}

// ── Persisted booth entry ────────────────────────────────────────────────

/// A booth the user saved, keyed by `LocationRecord::storage_key`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoothEntry {
    pub key: String,
    pub location: LocationRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<TwitterUser>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tweet_url: Option<String>,
    #[serde(default)]
    pub visited: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> LocationRecord {
        LocationRecord {
            date: Some("日曜".into()),
            hall: Some("東".into()),
            entrance: Some("5".into()),
            block: Some("ニ".into()),
            space: Some("24".into()),
            side: Some("ab".into()),
            raw: "日曜東5「ニ24ab」".into(),
        }
    }

    #[test]
    fn mappable_needs_hall_block_space() {
        let mut rec = complete();
        assert!(rec.is_mappable());
        rec.block = None;
        assert!(!rec.is_mappable());
    }

    #[test]
    fn storage_key_format() {
        assert_eq!(complete().storage_key().as_deref(), Some("東-ニ-24"));
        assert_eq!(LocationRecord::new("x").storage_key(), None);
    }
}
