//! Command-line interface for match-eval.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **evaluate**: Score a matcher's output against a reference match file
//! - **patterns**: Show how often each pattern fires in a match file
//!
//! ## Usage
//!
//! ```text
//! # Human-readable summary
//! match-eval evaluate ls_matched_naive.json ls_reference.json
//!
//! # Locate the match file from the executable and matcher name
//! match-eval evaluate --executable bin/ls --matcher naive ls_reference.json
//!
//! # One CSV row per run, for collecting results over many executables
//! match-eval --format csv evaluate a.json b.json >> results.csv
//! ```

use clap::{Parser, Subcommand};

pub mod evaluate;
pub mod patterns;

#[derive(Parser)]
#[command(name = "match-eval")]
#[command(version)]
#[command(about = "Evaluate pattern-matcher output against reference matches")]
#[command(
    long_about = "match-eval compares the matches a pattern matcher found in an executable with a trusted reference.\n\nMatches are identified by their end address only. Before scoring, detections that share an end address are reduced to the one whose pattern fires least often overall."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate detected matches against reference matches
    Evaluate(evaluate::EvaluateArgs),

    /// Show the pattern frequency table of a match file
    Patterns(patterns::PatternsArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    /// Comma-separated, decimal point
    Csv,
    /// Tab-separated, decimal comma
    Tsv,
}
