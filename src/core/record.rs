use serde::{Deserialize, Serialize};

/// An address or offset into the analysed executable
pub type Location = u64;

/// A single detected or reference pattern occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Name of the pattern that produced (or is expected to produce) the match
    #[serde(rename = "patternName")]
    pub pattern_name: String,

    /// Address of the first instruction covered by the match
    #[serde(rename = "startEA")]
    pub start_location: Location,

    /// Address where the match ends
    #[serde(rename = "endEA")]
    pub end_location: Location,
}

impl MatchRecord {
    pub fn new(
        pattern_name: impl Into<String>,
        start_location: Location,
        end_location: Location,
    ) -> Self {
        Self {
            pattern_name: pattern_name.into(),
            start_location,
            end_location,
        }
    }

    /// Identity key of this record, see [`location_key`]
    #[must_use]
    pub fn key(&self) -> Location {
        location_key(self)
    }
}

impl std::fmt::Display for MatchRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:x} - {:x} {}",
            self.start_location, self.end_location, self.pattern_name
        )
    }
}

/// Identity key used for every comparison between match records.
///
/// Two records describe the same occurrence when they end at the same
/// location, regardless of pattern name or start location. Grouping,
/// membership tests and index construction all go through this function;
/// the derived `PartialEq` is structural and is not used for classification.
#[inline]
#[must_use]
pub fn location_key(record: &MatchRecord) -> Location {
    record.end_location
}

/// Return the records ordered by start location, ascending.
///
/// Records with the same start keep their relative order.
#[must_use]
pub fn sorted_by_start(records: &[MatchRecord]) -> Vec<&MatchRecord> {
    let mut sorted: Vec<&MatchRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.start_location);
    sorted
}
