//! Evaluate command - score a match file against a reference match file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;

use crate::cli::OutputFormat;
use crate::core::record::{sorted_by_start, MatchRecord};
use crate::core::run::{match_path_for_executable, MatchFile, RunMetadata};
use crate::matching::engine::{EngineConfig, EvaluationEngine, EvaluationResult};
use crate::matching::scoring::EvaluationSummary;
use crate::parsing::json::parse_match_file;
use crate::utils::format::format_decimal;

/// Arguments for the evaluate command
#[derive(Args)]
pub struct EvaluateArgs {
    /// MATCHED and REFERENCE match files (JSON, optionally gzipped); only
    /// REFERENCE when --executable and --matcher locate the matched file
    #[arg(required = true, num_args = 1..=2, value_names = ["MATCHED", "REFERENCE"])]
    pub files: Vec<PathBuf>,

    /// Executable the matcher ran on; the match file is looked up next to it
    #[arg(long, requires = "matcher")]
    pub executable: Option<PathBuf>,

    /// Matcher name used to derive the match file name from --executable
    #[arg(long, requires = "executable")]
    pub matcher: Option<String>,

    /// Score every detection, even several at the same end address
    #[arg(long)]
    pub no_dedup: bool,
}

impl EvaluateArgs {
    /// Paths of the matched and reference files, in that order
    fn input_paths(&self) -> anyhow::Result<(PathBuf, PathBuf)> {
        match (self.files.as_slice(), &self.executable, &self.matcher) {
            ([matched, reference], None, None) => Ok((matched.clone(), reference.clone())),
            ([reference], Some(executable), Some(matcher)) => Ok((
                match_path_for_executable(executable, matcher),
                reference.clone(),
            )),
            ([_, _], Some(_), _) => anyhow::bail!(
                "MATCHED cannot be combined with --executable; pass only REFERENCE"
            ),
            _ => anyhow::bail!(
                "Expected MATCHED and REFERENCE, or --executable and --matcher with REFERENCE"
            ),
        }
    }
}

/// Column separator and decimal separator of a delimited row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DelimitedStyle {
    separator: &'static str,
    decimal: char,
}

impl DelimitedStyle {
    const CSV: Self = Self {
        separator: ", ",
        decimal: '.',
    };

    const TSV: Self = Self {
        separator: "\t",
        decimal: ',',
    };
}

/// Execute the evaluate command
///
/// # Errors
///
/// Returns an error if the input files are given in an unsupported
/// combination, or if either match file cannot be read or parsed.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: EvaluateArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let (matched_path, reference_path) = args.input_paths()?;

    let detected = load(&matched_path, "matched")?;
    let reference = load(&reference_path, "reference")?;

    if verbose {
        eprintln!(
            "Detected: {} matches from matcher '{}' on '{}'",
            detected.matches.len(),
            detected.metadata.matcher_name,
            detected.metadata.executable_name
        );
        eprintln!("Reference: {} matches", reference.matches.len());
    }

    let engine = EvaluationEngine::new(EngineConfig {
        deduplicate: !args.no_dedup,
    });
    let result = engine.run(&detected.matches, &reference.matches);

    match format {
        OutputFormat::Text => print_text_result(&result, verbose),
        OutputFormat::Json => print_json_result(&detected.metadata, &result)?,
        OutputFormat::Csv => {
            print_delimited_result(&detected.metadata, &result, DelimitedStyle::CSV);
        }
        OutputFormat::Tsv => {
            print_delimited_result(&detected.metadata, &result, DelimitedStyle::TSV);
        }
    }

    Ok(())
}

fn load(path: &Path, role: &str) -> anyhow::Result<MatchFile> {
    parse_match_file(path)
        .with_context(|| format!("Failed to read {role} file {}", path.display()))
}

fn print_records(records: &[MatchRecord]) {
    for record in sorted_by_start(records) {
        println!("  {record}");
    }
}

fn print_text_result(result: &EvaluationResult, verbose: bool) {
    let evaluation = &result.evaluation;

    println!("correct: {}", evaluation.correct.len());
    if verbose {
        print_records(&evaluation.correct);
    }

    println!("wrong: {}", evaluation.wrong.len());
    print_records(&evaluation.wrong);

    println!(
        "references not found: {}",
        evaluation.not_found_reference.len()
    );
    print_records(&evaluation.not_found_reference);

    println!("number of patterns used: {}", evaluation.patterns_used_count());
}

fn print_json_result(metadata: &RunMetadata, result: &EvaluationResult) -> anyhow::Result<()> {
    let evaluation = &result.evaluation;

    let output = serde_json::json!({
        "run": metadata,
        "detected": result.detected_count,
        "collisions_resolved": result.collisions_resolved(),
        "summary": result.summary,
        "patterns_used": evaluation.patterns_used,
        "correct": sorted_by_start(&evaluation.correct),
        "wrong": sorted_by_start(&evaluation.wrong),
        "found_reference": sorted_by_start(&evaluation.found_reference),
        "not_found_reference": sorted_by_start(&evaluation.not_found_reference),
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_delimited_result(
    metadata: &RunMetadata,
    result: &EvaluationResult,
    style: DelimitedStyle,
) {
    if let Some(row) = delimited_row(metadata, &result.summary, style) {
        println!("{row}");
    }
}

/// One summary row: executable, correct, not found, wrong, real time,
/// CPU time, matcher, architecture, patterns used.
///
/// Returns None when there is nothing to report.
fn delimited_row(
    metadata: &RunMetadata,
    summary: &EvaluationSummary,
    style: DelimitedStyle,
) -> Option<String> {
    if summary.is_empty() {
        return None;
    }

    let parts = [
        metadata.executable_name.clone(),
        summary.correct.to_string(),
        summary.not_found_reference.to_string(),
        summary.wrong.to_string(),
        format_decimal(metadata.real_time, style.decimal),
        format_decimal(metadata.cpu_time, style.decimal),
        metadata.matcher_name.clone(),
        metadata.executable_architecture.clone(),
        summary.patterns_used.to_string(),
    ];
    Some(parts.join(style.separator))
}
