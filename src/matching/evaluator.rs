use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::core::record::{location_key, Location, MatchRecord};

/// Index: location -> positions of the records ending there
#[derive(Debug, Default)]
pub struct LocationIndex {
    positions: HashMap<Location, Vec<usize>>,
}

impl LocationIndex {
    #[must_use]
    pub fn build(records: &[MatchRecord]) -> Self {
        let mut positions: HashMap<Location, Vec<usize>> = HashMap::new();
        for (i, record) in records.iter().enumerate() {
            positions.entry(location_key(record)).or_default().push(i);
        }
        Self { positions }
    }

    /// Positions of all indexed records sharing `record`'s location
    #[must_use]
    pub fn lookup(&self, record: &MatchRecord) -> &[usize] {
        self.positions
            .get(&location_key(record))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Classification of detections and reference records against each other
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Evaluation {
    /// Detections whose location appears in the reference
    pub correct: Vec<MatchRecord>,

    /// Detections with no reference record at their location
    pub wrong: Vec<MatchRecord>,

    /// Reference records whose location was detected
    pub found_reference: Vec<MatchRecord>,

    /// Reference records whose location was never detected
    pub not_found_reference: Vec<MatchRecord>,

    /// Distinct pattern names among the correct detections
    pub patterns_used: BTreeSet<String>,
}

impl Evaluation {
    /// Number of distinct patterns that produced at least one correct detection
    #[must_use]
    pub fn patterns_used_count(&self) -> usize {
        self.patterns_used.len()
    }
}

/// Score `detected` against `reference` using location equality only.
///
/// Every detection lands in exactly one of `correct`/`wrong` and every
/// reference record in exactly one of `found_reference`/`not_found_reference`.
/// One detection marks all reference records at its location as found.
/// Both outputs keep the order of their input.
#[must_use]
pub fn evaluate(detected: &[MatchRecord], reference: &[MatchRecord]) -> Evaluation {
    let index = LocationIndex::build(reference);
    let mut found = vec![false; reference.len()];

    let mut evaluation = Evaluation::default();

    for detection in detected {
        let hits = index.lookup(detection);
        if hits.is_empty() {
            evaluation.wrong.push(detection.clone());
            continue;
        }
        for &i in hits {
            found[i] = true;
        }
        evaluation
            .patterns_used
            .insert(detection.pattern_name.clone());
        evaluation.correct.push(detection.clone());
    }

    for (record, was_found) in reference.iter().zip(found) {
        if was_found {
            evaluation.found_reference.push(record.clone());
        } else {
            evaluation.not_found_reference.push(record.clone());
        }
    }

    evaluation
}
