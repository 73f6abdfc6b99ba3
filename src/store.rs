//! Local booth store: the booths a user saved, as an ordered JSON file.
//! Entries are keyed by `LocationRecord::storage_key`; insertion order is
//! the display order.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use comiket_types::{BoothEntry, LocationRecord, TwitterUser};
use crate::dates::{DayFilter, day_patterns_for_filter, matches_filter};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BoothStore {
    pub entries: Vec<BoothEntry>,
}

impl BoothStore {
    /// Load the store from disk; a missing file is an empty store.
    pub fn load(path: &Path) -> io::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let json = fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, json)
    }

    /// Insert an entry, replacing an existing one with the same key in
    /// place so the display order is preserved.
    pub fn upsert(&mut self, entry: BoothEntry) {
        match self.entries.iter_mut().find(|e| e.key == entry.key) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Add every mappable record; partial records are skipped (they go
    /// through manual entry instead). Returns how many were stored.
    pub fn add_records(
        &mut self,
        records: &[LocationRecord],
        user: Option<&TwitterUser>,
        tweet_url: Option<&str>,
    ) -> usize {
        let mut added = 0;
        for record in records {
            let Some(key) = record.storage_key() else {
                continue;
            };
            self.upsert(BoothEntry {
                key,
                location: record.clone(),
                user: user.cloned(),
                tweet_url: tweet_url.map(str::to_string),
                visited: false,
            });
            added += 1;
        }
        added
    }

    /// Remove an entry; its visited state goes with it.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.key != key);
        self.entries.len() != before
    }

    /// Toggle the visited flag; `None` if the key is unknown.
    pub fn toggle_visited(&mut self, key: &str) -> Option<bool> {
        let entry = self.entries.iter_mut().find(|e| e.key == key)?;
        entry.visited = !entry.visited;
        Some(entry.visited)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn clear_visited(&mut self) {
        for entry in &mut self.entries {
            entry.visited = false;
        }
    }

    /// Entries passing the day filter, in display order.
    pub fn entries_for_day(&self, filter: DayFilter) -> Vec<&BoothEntry> {
        self.entries
            .iter()
            .filter(|e| matches_filter(e.location.date.as_deref(), filter))
            .collect()
    }

    /// The entry to center the map on for a day filter: the first entry
    /// whose date names the selected day, else the first entry.
    pub fn best_entry_for(&self, filter: DayFilter) -> Option<&BoothEntry> {
        if self.entries.is_empty() {
            return None;
        }
        if filter == DayFilter::All {
            return self.entries.first();
        }

        let target_dates = day_patterns_for_filter(filter);
        self.entries
            .iter()
            .find(|e| {
                e.location
                    .date
                    .as_deref()
                    .is_some_and(|d| target_dates.iter().any(|t| d.contains(t)))
            })
            .or_else(|| self.entries.first())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::extract_location_list;

    fn store_with(text: &str) -> BoothStore {
        let mut store = BoothStore::default();
        store.add_records(&extract_location_list(text), None, None);
        store
    }

    #[test]
    fn add_keeps_only_mappable_records() {
        let store = store_with("1日目南a-42a & 日曜 東3-34");
        // the second record has no block, so only one entry lands
        assert_eq!(store.entries.len(), 1);
        assert_eq!(store.entries[0].key, "南-a-42");
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut store = store_with("1日目南a-42a & 2日目南j-10a");
        assert_eq!(store.entries.len(), 2);

        let records = extract_location_list("土曜南a-42a");
        store.add_records(&records, None, None);
        assert_eq!(store.entries.len(), 2);
        assert_eq!(store.entries[0].key, "南-a-42");
        assert_eq!(store.entries[0].location.date.as_deref(), Some("土曜"));
    }

    #[test]
    fn remove_and_visited() {
        let mut store = store_with("1日目南a-42a");
        assert_eq!(store.toggle_visited("南-a-42"), Some(true));
        assert_eq!(store.toggle_visited("南-a-42"), Some(false));
        assert_eq!(store.toggle_visited("東-ニ-24"), None);

        assert!(store.remove("南-a-42"));
        assert!(!store.remove("南-a-42"));
    }

    #[test]
    fn day_filtering() {
        let store = store_with("1日目南a-03b & 2日目南j-10a");
        assert_eq!(store.entries_for_day(DayFilter::All).len(), 2);
        let day2 = store.entries_for_day(DayFilter::Day2);
        assert_eq!(day2.len(), 1);
        assert_eq!(day2[0].key, "南-j-10");
    }

    #[test]
    fn best_entry_prefers_the_selected_day() {
        let store = store_with("1日目南a-03b & 2日目南j-10a");
        assert_eq!(store.best_entry_for(DayFilter::All).unwrap().key, "南-a-03");
        assert_eq!(store.best_entry_for(DayFilter::Day2).unwrap().key, "南-j-10");
        // no day-1 match would fall back to the first entry
        let day1_only = store_with("2日目南j-10a");
        assert_eq!(
            day1_only.best_entry_for(DayFilter::Day1).unwrap().key,
            "南-j-10"
        );
    }

    #[test]
    fn save_load_round_trip() {
        let mut store = store_with("1日目南a-42a");
        store.toggle_visited("南-a-42");

        let path = std::env::temp_dir().join(format!("booths-test-{}.json", std::process::id()));
        store.save(&path).unwrap();
        let loaded = BoothStore::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.entries.len(), 1);
        assert!(loaded.entries[0].visited);
        assert_eq!(loaded.entries[0].location.space.as_deref(), Some("42"));
    }

    #[test]
    fn missing_file_is_an_empty_store() {
        let path = std::env::temp_dir().join("booths-test-does-not-exist.json");
        assert!(BoothStore::load(&path).unwrap().entries.is_empty());
    }
}
