use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use csv::WriterBuilder;

use crate::cli::OutputFormat;
use crate::matching::dedup::PatternFrequencies;
use crate::parsing::json::parse_match_file;

#[derive(Args)]
pub struct PatternsArgs {
    /// Match file to inspect (JSON, optionally gzipped)
    #[arg(required = true)]
    pub file: PathBuf,
}

/// Execute the patterns command
///
/// # Errors
///
/// Returns an error if the match file cannot be read or parsed.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: PatternsArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let match_file = parse_match_file(&args.file)
        .with_context(|| format!("Failed to read match file {}", args.file.display()))?;

    let frequencies = PatternFrequencies::from_records(&match_file.matches);

    if verbose {
        eprintln!(
            "{} matches, {} distinct patterns",
            match_file.matches.len(),
            frequencies.len()
        );
    }

    let ranked = frequencies.ranked();

    match format {
        OutputFormat::Text => {
            println!("Pattern frequencies ({} patterns)\n", ranked.len());
            let width = ranked.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
            for (name, count) in &ranked {
                println!("  {name:<width$}  {count:>8}");
            }
        }
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = ranked
                .iter()
                .map(|(name, count)| serde_json::json!({ "pattern": name, "count": count }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Csv => write_frequency_table(std::io::stdout().lock(), &ranked, b',')?,
        OutputFormat::Tsv => write_frequency_table(std::io::stdout().lock(), &ranked, b'\t')?,
    }

    Ok(())
}

/// Write `pattern,count` rows under a header, quoting names that need it
fn write_frequency_table<W: Write>(
    writer: W,
    ranked: &[(&str, usize)],
    delimiter: u8,
) -> anyhow::Result<()> {
    let mut table = WriterBuilder::new().delimiter(delimiter).from_writer(writer);
    table.write_record(["pattern", "count"])?;
    for (name, count) in ranked {
        table.write_record([*name, count.to_string().as_str()])?;
    }
    table.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(ranked: &[(&str, usize)], delimiter: u8) -> String {
        let mut out = Vec::new();
        write_frequency_table(&mut out, ranked, delimiter).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_csv_table() {
        assert_eq!(
            table(&[("strlen", 3), ("memcpy", 1)], b','),
            "pattern,count\nstrlen,3\nmemcpy,1\n"
        );
    }

    #[test]
    fn test_csv_quotes_separator_in_name() {
        assert_eq!(table(&[("a,b", 1)], b','), "pattern,count\n\"a,b\",1\n");
    }

    #[test]
    fn test_tsv_quotes_tab_in_name() {
        assert_eq!(
            table(&[("a\tb", 2), ("plain", 1)], b'\t'),
            "pattern\tcount\n\"a\tb\"\t2\nplain\t1\n"
        );
    }

    #[test]
    fn test_empty_table_has_header_only() {
        assert_eq!(table(&[], b','), "pattern,count\n");
    }
}
