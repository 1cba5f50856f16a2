//! Centralized validation helpers for loaded match files.

use crate::core::record::MatchRecord;

/// Maximum number of matches allowed in a single file (DOS protection)
pub const MAX_MATCHES: usize = 10_000_000;

/// Check if adding another match would exceed `limit`.
///
/// Call this with the current count BEFORE adding a new match.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_match_limit(count: usize, limit: usize) -> Option<String> {
    if count >= limit {
        Some(format!(
            "Too many matches: adding another would exceed maximum of {limit}"
        ))
    } else {
        None
    }
}

/// Find the first record with an empty pattern name.
///
/// Every record needs a name so that pattern frequencies are well defined.
#[must_use]
pub fn find_unnamed_match(matches: &[MatchRecord]) -> Option<usize> {
    matches
        .iter()
        .position(|m| m.pattern_name.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_match_limit() {
        assert!(check_match_limit(0, MAX_MATCHES).is_none());
        assert!(check_match_limit(MAX_MATCHES - 1, MAX_MATCHES).is_none());
        assert!(check_match_limit(MAX_MATCHES, MAX_MATCHES).is_some());

        let message = check_match_limit(3, 3).unwrap();
        assert!(message.contains("maximum of 3"));
    }

    #[test]
    fn test_find_unnamed_match() {
        let named = vec![MatchRecord::new("a", 0, 1), MatchRecord::new("b", 0, 2)];
        assert_eq!(find_unnamed_match(&named), None);

        let unnamed = vec![MatchRecord::new("a", 0, 1), MatchRecord::new("  ", 0, 2)];
        assert_eq!(find_unnamed_match(&unnamed), Some(1));
    }
}
