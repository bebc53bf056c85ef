use std::collections::HashMap;

/// Weighted counts that remember the order keys were first seen.
///
/// Ranking is a stable sort on descending weight, so equal weights keep
/// first-seen order. That order is what makes keyword lists deterministic.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `weight` to `key`, registering it on first sight.
    pub fn add(&mut self, key: &str, weight: usize) {
        match self.index.get(key) {
            Some(&position) => self.entries[position].1 += weight,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), weight));
            }
        }
    }

    /// Adds `weight` once per key occurrence.
    pub fn add_all<I, S>(&mut self, keys: I, weight: usize)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for key in keys {
            self.add(key.as_ref(), weight);
        }
    }

    pub fn get(&self, key: &str) -> usize {
        self.index
            .get(key)
            .map_or(0, |&position| self.entries[position].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, heaviest first.
    pub fn ranked(&self) -> Vec<(String, usize)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// The `limit` heaviest entries.
    pub fn top(&self, limit: usize) -> Vec<(String, usize)> {
        let mut ranked = self.ranked();
        ranked.truncate(limit);
        ranked
    }
}
