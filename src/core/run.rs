use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::core::record::MatchRecord;

/// Informational metadata about the matcher run that produced a match file.
///
/// The evaluation itself never reads these fields; they are passed through to
/// the reports. Missing fields default to empty strings and zero timings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunMetadata {
    /// Name of the analysed executable
    pub executable_name: String,

    /// Name of the matcher that produced the matches
    pub matcher_name: String,

    /// Architecture identifier of the analysed executable
    pub executable_architecture: String,

    /// Wall-clock time of the matcher run, in seconds
    pub real_time: f64,

    /// CPU time of the matcher run, in seconds
    pub cpu_time: f64,
}

/// Contents of a persisted match file: run metadata plus the matches.
///
/// Match files are read with [`crate::parsing::json`], which bounds the
/// number of matches while deserializing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchFile {
    #[serde(flatten)]
    pub metadata: RunMetadata,

    pub matches: Vec<MatchRecord>,
}

/// Path of the match file a matcher writes next to an executable.
///
/// `dir/prog.exe` matched with `naive` becomes `dir/prog_matched_naive.json`.
#[must_use]
pub fn match_path_for_executable(executable: &Path, matcher_name: &str) -> PathBuf {
    let stem = executable
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    executable.with_file_name(format!("{stem}_matched_{matcher_name}.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_uses_match_file_field_names() {
        let file = MatchFile {
            metadata: RunMetadata {
                executable_name: "ls".to_string(),
                matcher_name: "naive".to_string(),
                executable_architecture: "x86_64".to_string(),
                real_time: 1.25,
                cpu_time: 0.5,
            },
            matches: vec![MatchRecord::new("p", 1, 2)],
        };
        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["executableName"], "ls");
        assert_eq!(json["executableArchitecture"], "x86_64");
        assert_eq!(json["cpuTime"], 0.5);
        assert_eq!(json["matches"][0]["endEA"], 2);
    }

    #[test]
    fn test_match_path_for_executable() {
        assert_eq!(
            match_path_for_executable(Path::new("bin/prog.exe"), "naive"),
            PathBuf::from("bin/prog_matched_naive.json")
        );
        assert_eq!(
            match_path_for_executable(Path::new("/tmp/v1.2/ls"), "cfg"),
            PathBuf::from("/tmp/v1.2/ls_matched_cfg.json")
        );
    }
}
