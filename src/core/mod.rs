//! Core data types for match evaluation.
//!
//! - [`MatchRecord`]: a detected or expected pattern occurrence
//! - [`location_key`]: the identity key used for every comparison
//! - [`RunMetadata`], [`MatchFile`]: contents of a persisted match file
//!
//! ## Identity
//!
//! Two records describe the same occurrence when they end at the same
//! address. Pattern name and start address are carried along for reporting
//! and for collision resolution but never decide whether two records match.
//!
//! [`MatchRecord`]: record::MatchRecord
//! [`location_key`]: record::location_key
//! [`RunMetadata`]: run::RunMetadata
//! [`MatchFile`]: run::MatchFile

pub mod record;
pub mod run;
