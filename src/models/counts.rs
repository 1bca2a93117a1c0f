//! Frequency table keyed by string
//!
//! Keeps keys in first-occurrence order so that ranking by count is
//! deterministic: equal counts keep the order in which keys first appeared.

use indexmap::IndexMap;
use serde::ser::{Serialize, Serializer};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountTable {
    counts: IndexMap<String, u64>,
}

#[derive(serde::Serialize)]
struct CountEntry<'a> {
    key: &'a str,
    count: u64,
}

impl CountTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one occurrence of `key`
    pub fn increment(&mut self, key: &str) {
        match self.counts.get_mut(key) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(key.to_string(), 1);
            }
        }
    }

    /// Count for `key`; absent keys count zero
    pub fn get(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.counts.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Entries in first-occurrence order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(key, count)| (key.as_str(), *count))
    }

    /// Entries by count descending; ties stay in first-occurrence order
    pub fn ranked(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }

    /// The `n` highest ranked entries
    pub fn top(&self, n: usize) -> Vec<(&str, u64)> {
        let mut entries = self.ranked();
        entries.truncate(n);
        entries
    }
}

impl<S: AsRef<str>> FromIterator<S> for CountTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut table = CountTable::new();
        for key in iter {
            table.increment(key.as_ref());
        }
        table
    }
}

impl Serialize for CountTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(
            self.ranked()
                .into_iter()
                .map(|(key, count)| CountEntry { key, count }),
        )
    }
}
