//! The normalised entry type and the id-keyed map the merge works on.
//!
//! `Entry` is what ends up in the output artifact.  Sources produce
//! [`RawEntry`](crate::source::RawEntry) values; the merge engine resolves
//! their ids and turns them into `Entry`s.
//!
//! ## Sorting
//!
//! Entries sort **newest first**.  How "newest" is decided depends on
//! [`DateOrdering`]: by default `pub_date` strings are compared as plain
//! strings, with a missing date treated as the empty string so undated
//! entries sink to the bottom.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A single merged feed entry.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Entry {
    /// Stable identifier, unique within the merged set.
    pub id: String,

    /// Headline.  May be empty.
    pub title: String,

    /// URL of the full content.
    pub link: Option<String>,

    /// Publication date exactly as the source supplied it.
    pub pub_date: Option<String>,

    /// Summary text, possibly containing markup.
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// How `pub_date` values are compared when sorting the merged entries.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateOrdering {
    /// Plain string comparison; missing dates compare as `""`.
    #[default]
    Lexical,
    /// Parse RFC 2822 / RFC 3339 dates and compare instants.  Dates that do
    /// not parse sort after every parsed date, by string; missing dates last.
    Chronological,
}

impl DateOrdering {
    /// Compare two entries so that the newer one sorts first.
    pub fn newest_first(self, a: &Entry, b: &Entry) -> Ordering {
        match self {
            DateOrdering::Lexical => lexical_key(b).cmp(lexical_key(a)),
            DateOrdering::Chronological => chrono_key(b).cmp(&chrono_key(a)),
        }
    }
}

fn lexical_key(entry: &Entry) -> &str {
    entry.pub_date.as_deref().unwrap_or("")
}

/// Variant order matters: derived `Ord` ranks `Missing < Unparsed < Dated`.
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd)]
enum ChronoKey<'a> {
    Missing,
    Unparsed(&'a str),
    Dated(DateTime<Utc>),
}

fn chrono_key(entry: &Entry) -> ChronoKey<'_> {
    match entry.pub_date.as_deref() {
        None => ChronoKey::Missing,
        Some(raw) => match parse_date(raw) {
            Some(dt) => ChronoKey::Dated(dt),
            None => ChronoKey::Unparsed(raw),
        },
    }
}

/// Parse an RFC 2822 (RSS) or RFC 3339 (Atom) date.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

// ---------------------------------------------------------------------------
// EntryMap
// ---------------------------------------------------------------------------

/// Entries keyed by id, remembering the order ids were first inserted.
///
/// Overwriting an existing id replaces the entry in place, so its position
/// does not change.  Sorting is stable, which makes that position the
/// tie-breaker between entries with equal dates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryMap {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl EntryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite by `entry.id`.  Returns the replaced entry.
    pub fn insert(&mut self, entry: Entry) -> Option<Entry> {
        match self.index.get(&entry.id) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos], entry)),
            None => {
                self.index.insert(entry.id.clone(), self.entries.len());
                self.entries.push(entry);
                None
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.index.get(id).map(|&pos| &self.entries[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the map, yielding entries in insertion order.
    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }
}

impl FromIterator<Entry> for EntryMap {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        let mut map = EntryMap::new();
        for entry in iter {
            map.insert(entry);
        }
        map
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Shorthand constructor for tests.
    pub fn make_entry(id: &str, title: &str, pub_date: Option<&str>) -> Entry {
        Entry {
            id: id.to_string(),
            title: title.to_string(),
            link: None,
            pub_date: pub_date.map(String::from),
            description: None,
        }
    }

    fn sorted(mut entries: Vec<Entry>, ordering: DateOrdering) -> Vec<String> {
        entries.sort_by(|a, b| ordering.newest_first(a, b));
        entries.into_iter().map(|e| e.id).collect()
    }

    #[test]
    fn lexical_sorts_descending_by_string() {
        let entries = vec![
            make_entry("1", "Old", Some("2024-01-01")),
            make_entry("3", "New", Some("2026-01-01")),
            make_entry("2", "Mid", Some("2025-06-15")),
        ];
        assert_eq!(sorted(entries, DateOrdering::Lexical), ["3", "2", "1"]);
    }

    #[test]
    fn lexical_puts_undated_last() {
        let entries = vec![
            make_entry("undated", "U", None),
            make_entry("dated", "D", Some("2025-01-01")),
        ];
        assert_eq!(sorted(entries, DateOrdering::Lexical), ["dated", "undated"]);
    }

    #[test]
    fn lexical_compares_rfc2822_as_strings() {
        // "Wed" > "Tue" as strings even though the Tuesday is later.
        let entries = vec![
            make_entry("tue", "T", Some("Tue, 02 Jan 2024 00:00:00 +0000")),
            make_entry("wed", "W", Some("Wed, 01 Jan 2025 00:00:00 +0000")),
            make_entry("mon", "M", Some("Mon, 01 Jan 2024 00:00:00 +0000")),
        ];
        assert_eq!(sorted(entries, DateOrdering::Lexical), ["wed", "tue", "mon"]);
    }

    #[test]
    fn chronological_parses_dates() {
        let entries = vec![
            make_entry("old", "O", Some("Wed, 01 Jan 2020 00:00:00 +0000")),
            make_entry("new", "N", Some("Mon, 01 Jan 2024 00:00:00 +0000")),
            make_entry("atom", "A", Some("2022-06-01T12:00:00Z")),
        ];
        assert_eq!(
            sorted(entries, DateOrdering::Chronological),
            ["new", "atom", "old"]
        );
    }

    #[test]
    fn chronological_ranks_unparsed_after_parsed_and_missing_last() {
        let entries = vec![
            make_entry("missing", "M", None),
            make_entry("garbage", "G", Some("not-a-date")),
            make_entry("dated", "D", Some("Mon, 01 Jan 2024 00:00:00 +0000")),
        ];
        assert_eq!(
            sorted(entries, DateOrdering::Chronological),
            ["dated", "garbage", "missing"]
        );
    }

    #[test]
    fn equal_dates_keep_input_order() {
        let entries = vec![
            make_entry("a", "A", Some("2025-01-01")),
            make_entry("b", "B", Some("2025-01-01")),
            make_entry("c", "C", Some("2025-01-01")),
        ];
        assert_eq!(sorted(entries, DateOrdering::Lexical), ["a", "b", "c"]);
    }

    #[test]
    fn entry_map_overwrite_keeps_position() {
        let mut map = EntryMap::new();
        map.insert(make_entry("a", "First", None));
        map.insert(make_entry("b", "B", None));
        let replaced = map.insert(make_entry("a", "Second", None));

        assert_eq!(replaced.map(|e| e.title), Some("First".to_string()));
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a").map(|e| e.title.as_str()), Some("Second"));

        let ids: Vec<_> = map.into_entries().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn entry_map_collects_last_write_wins() {
        let map: EntryMap = vec![
            make_entry("x", "One", None),
            make_entry("x", "Two", None),
        ]
        .into_iter()
        .collect();
        assert_eq!(map.len(), 1);
        assert!(map.contains("x"));
        assert_eq!(map.get("x").map(|e| e.title.as_str()), Some("Two"));
    }
}
