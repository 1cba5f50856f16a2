//! # match-eval
//!
//! A library for evaluating the output of a pattern matcher against a
//! trusted reference.
//!
//! A matcher scans an executable and reports every place where one of its
//! patterns (compiler idioms, library functions, switch tables, ...) ends.
//! `match-eval` compares those detections with a reference set of expected
//! matches and reports which detections are correct, which are wrong, and
//! which expected matches were missed.
//!
//! ## Features
//!
//! - **Address identity**: matches are compared by end address only
//! - **Collision resolution**: of several detections at one address, the
//!   rarest pattern is kept
//! - **Reference fan-out**: one detection satisfies every reference record
//!   at its address
//! - **Reports**: text, JSON, and single-row CSV/TSV summaries
//!
//! ## Example
//!
//! ```rust
//! use match_eval::{evaluate, deduplicate, MatchRecord};
//!
//! let detected = vec![MatchRecord::new("P1", 0x10, 0x20)];
//! let reference = vec![MatchRecord::new("Q1", 0x5, 0x20)];
//!
//! let evaluation = evaluate(&deduplicate(&detected), &reference);
//! assert_eq!(evaluation.correct.len(), 1);
//! assert_eq!(evaluation.patterns_used_count(), 1);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Match records and match file contents
//! - [`matching`]: Collision resolution, classification and summary metrics
//! - [`parsing`]: Match file loader
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::record::{location_key, Location, MatchRecord};
pub use crate::core::run::{MatchFile, RunMetadata};
pub use crate::matching::dedup::{deduplicate, PatternFrequencies};
pub use crate::matching::engine::{EngineConfig, EvaluationEngine, EvaluationResult};
pub use crate::matching::evaluator::{evaluate, Evaluation};
pub use crate::matching::scoring::EvaluationSummary;
