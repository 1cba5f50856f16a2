use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::core::record::{location_key, Location, MatchRecord};

/// Global count of records per pattern name
#[derive(Debug, Clone, Default)]
pub struct PatternFrequencies {
    counts: HashMap<String, usize>,
}

impl PatternFrequencies {
    /// Count how often each pattern name occurs across all records
    #[must_use]
    pub fn from_records(records: &[MatchRecord]) -> Self {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for record in records {
            *counts.entry(record.pattern_name.clone()).or_default() += 1;
        }
        Self { counts }
    }

    /// Number of records carrying `pattern_name` (0 if never seen)
    #[must_use]
    pub fn count(&self, pattern_name: &str) -> usize {
        self.counts.get(pattern_name).copied().unwrap_or(0)
    }

    /// Number of distinct pattern names
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Pattern names with their counts, most frequent first, then by name
    #[must_use]
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .counts
            .iter()
            .map(|(name, &count)| (name.as_str(), count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }

    /// Preference order inside a collision group.
    ///
    /// `Less` means `a` is kept over `b`: rarer pattern first, then pattern
    /// name ascending, then start location ascending.
    #[must_use]
    pub fn preference(&self, a: &MatchRecord, b: &MatchRecord) -> Ordering {
        self.count(&a.pattern_name)
            .cmp(&self.count(&b.pattern_name))
            .then_with(|| a.pattern_name.cmp(&b.pattern_name))
            .then_with(|| a.start_location.cmp(&b.start_location))
    }
}

/// Reduce detections to at most one record per location.
///
/// Records sharing a [`location_key`] form a collision group; the group's
/// survivor is the record whose pattern name is globally least frequent in
/// `records` (see [`PatternFrequencies::preference`] for tie-breaking).
/// Survivors are returned in order of the first appearance of their
/// location in the input.
#[must_use]
pub fn deduplicate(records: &[MatchRecord]) -> Vec<MatchRecord> {
    let frequencies = PatternFrequencies::from_records(records);

    let mut slot_by_location: HashMap<Location, usize> = HashMap::new();
    let mut survivors: Vec<&MatchRecord> = Vec::new();

    for record in records {
        match slot_by_location.entry(location_key(record)) {
            Entry::Vacant(entry) => {
                entry.insert(survivors.len());
                survivors.push(record);
            }
            Entry::Occupied(entry) => {
                let slot = *entry.get();
                if frequencies.preference(record, survivors[slot]) == Ordering::Less {
                    survivors[slot] = record;
                }
            }
        }
    }

    survivors.into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn names(records: &[MatchRecord]) -> Vec<&str> {
        records.iter().map(|r| r.pattern_name.as_str()).collect()
    }

    #[test]
    fn test_frequencies_are_global() {
        let records = vec![
            MatchRecord::new("generic", 0, 0x10),
            MatchRecord::new("generic", 0, 0x20),
            MatchRecord::new("specific", 0, 0x20),
        ];
        let freq = PatternFrequencies::from_records(&records);
        assert_eq!(freq.count("generic"), 2);
        assert_eq!(freq.count("specific"), 1);
        assert_eq!(freq.count("missing"), 0);
        assert_eq!(freq.len(), 2);
        assert_eq!(freq.ranked(), vec![("generic", 2), ("specific", 1)]);
    }

    #[test]
    fn test_empty_input() {
        assert!(deduplicate(&[]).is_empty());
        assert!(PatternFrequencies::from_records(&[]).is_empty());
    }

    #[test]
    fn test_singletons_pass_through() {
        let records = vec![
            MatchRecord::new("a", 0, 0x10),
            MatchRecord::new("b", 0x11, 0x20),
            MatchRecord::new("a", 0x21, 0x30),
        ];
        assert_eq!(deduplicate(&records), records);
    }

    #[test]
    fn test_prefers_rarer_pattern() {
        // nameA occurs five times in total, nameB only once
        let mut records: Vec<MatchRecord> = (1..=4)
            .map(|i| MatchRecord::new("nameA", 0, 0x100 * i))
            .collect();
        records.push(MatchRecord::new("nameA", 0, 0x20));
        records.push(MatchRecord::new("nameB", 4, 0x20));

        let deduped = deduplicate(&records);
        let at_0x20: Vec<&MatchRecord> = deduped.iter().filter(|r| r.key() == 0x20).collect();
        assert_eq!(at_0x20.len(), 1);
        assert_eq!(at_0x20[0], &MatchRecord::new("nameB", 4, 0x20));
        assert_eq!(deduped.len(), 5);
    }

    #[test]
    fn test_rarer_pattern_wins_regardless_of_order() {
        let forward = vec![
            MatchRecord::new("B", 1, 0x20),
            MatchRecord::new("A", 0, 0x20),
            MatchRecord::new("A", 0, 0x40),
            MatchRecord::new("A", 0, 0x60),
        ];
        let mut backward = forward.clone();
        backward.reverse();

        for input in [forward, backward] {
            let deduped = deduplicate(&input);
            let kept = deduped.iter().find(|r| r.key() == 0x20).unwrap();
            assert_eq!(kept.pattern_name, "B");
        }
    }

    #[test]
    fn test_equal_frequency_tie_breaks_on_name() {
        let records = vec![
            MatchRecord::new("zeta", 0, 0x20),
            MatchRecord::new("alpha", 8, 0x20),
        ];
        let mut reversed = records.clone();
        reversed.reverse();

        assert_eq!(names(&deduplicate(&records)), vec!["alpha"]);
        assert_eq!(names(&deduplicate(&reversed)), vec!["alpha"]);
    }

    #[test]
    fn test_same_pattern_tie_breaks_on_start() {
        let records = vec![
            MatchRecord::new("p", 0x18, 0x20),
            MatchRecord::new("p", 0x10, 0x20),
        ];
        assert_eq!(deduplicate(&records), vec![MatchRecord::new("p", 0x10, 0x20)]);
    }

    #[test]
    fn test_output_has_unique_locations_in_first_seen_order() {
        let records = vec![
            MatchRecord::new("a", 0, 0x30),
            MatchRecord::new("b", 0, 0x10),
            MatchRecord::new("c", 0, 0x30),
            MatchRecord::new("a", 0, 0x20),
            MatchRecord::new("b", 0, 0x10),
        ];
        let deduped = deduplicate(&records);
        let keys: Vec<Location> = deduped.iter().map(MatchRecord::key).collect();
        assert_eq!(keys, vec![0x30, 0x10, 0x20]);
        let unique: HashSet<Location> = keys.iter().copied().collect();
        assert_eq!(unique.len(), keys.len());
    }

    #[test]
    fn test_idempotent() {
        let records = vec![
            MatchRecord::new("a", 0, 0x30),
            MatchRecord::new("b", 0, 0x30),
            MatchRecord::new("b", 0, 0x40),
            MatchRecord::new("c", 0, 0x40),
            MatchRecord::new("c", 0, 0x50),
        ];
        let once = deduplicate(&records);
        let twice = deduplicate(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let records = vec![MatchRecord::new("a", 0, 0x30), MatchRecord::new("b", 0, 0x30)];
        let before = records.clone();
        let _ = deduplicate(&records);
        assert_eq!(records, before);
    }
}
