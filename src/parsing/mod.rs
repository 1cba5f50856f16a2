//! Loader for persisted match files.
//!
//! A match file is a JSON object with run metadata and a `matches` array:
//!
//! ```json
//! {
//!   "executableName": "ls",
//!   "matcherName": "naive",
//!   "executableArchitecture": "x86_64",
//!   "realTime": 0.52,
//!   "cpuTime": 0.49,
//!   "matches": [{ "startEA": 4096, "endEA": 4128, "patternName": "strlen" }]
//! }
//! ```
//!
//! Metadata fields are optional. Every match needs all three fields and a
//! non-empty pattern name. Files ending in `.gz` are decompressed first.

pub mod json;
