//! Collision resolution and scoring of detections against a reference.
//!
//! This module provides the evaluation pipeline:
//!
//! - [`deduplicate`]: Reduces detections to one per end address
//! - [`evaluate`]: Classifies detections and reference records by end address
//! - [`EvaluationSummary`]: Counts and ratios of an [`Evaluation`]
//! - [`EvaluationEngine`]: Runs both steps and logs the outcome
//!
//! ## Collision resolution
//!
//! When several detections end at the same address, the one whose pattern
//! fires least often across the whole input is kept. Ties go to the
//! lexically smallest pattern name, then to the smallest start address.
//!
//! ## Classification
//!
//! | Set | Contents |
//! |-----|----------|
//! | correct | detections whose end address is in the reference |
//! | wrong | all other detections |
//! | found reference | reference records whose end address was detected |
//! | not found reference | all other reference records |
//!
//! A single detection marks every reference record at its address as found.
//!
//! ## Example
//!
//! ```rust
//! use match_eval::{EvaluationEngine, MatchRecord};
//!
//! let detected = vec![
//!     MatchRecord::new("generic", 0x0, 0x20),
//!     MatchRecord::new("specific", 0x8, 0x20),
//!     MatchRecord::new("generic", 0x30, 0x40),
//! ];
//! let reference = vec![MatchRecord::new("strlen", 0x0, 0x20)];
//!
//! let result = EvaluationEngine::default().run(&detected, &reference);
//! assert_eq!(result.evaluation.correct[0].pattern_name, "specific");
//! assert_eq!(result.summary.wrong, 1);
//! ```

pub mod dedup;
pub mod engine;
pub mod evaluator;
pub mod scoring;

pub use dedup::{deduplicate, PatternFrequencies};
pub use engine::{EngineConfig, EvaluationEngine, EvaluationResult};
pub use evaluator::{evaluate, Evaluation};
pub use scoring::EvaluationSummary;
