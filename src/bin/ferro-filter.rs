// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-filter CLI
//!
//! Command-line interface for criteria-based VCF filtering.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::Parser;
use ferro_filter::cli::{is_stdio, write_summary, SummaryFormat};
use ferro_filter::filter::{FilterConfig, FilterProcessor, FilterStats};
use ferro_filter::vcf::VcfReader;
use ferro_filter::CriteriaSet;
use flate2::read::MultiGzDecoder;

#[derive(Parser)]
#[command(name = "ferro-filter")]
#[command(author, version, about = "Criteria-based VCF variant filter")]
#[command(
    long_about = "Filter VCF records against field-level criteria.

Records satisfying every criterion have their FILTER column rewritten to
PASS; all other records are passed through unchanged. Criteria are read from
a JSON document mapping field names to threshold expressions.

Examples:
  ferro-filter -i input.vcf -c criteria.json -o output.vcf
  ferro-filter -i input.vcf.gz -c criteria.json > output.vcf
  zcat input.vcf.gz | ferro-filter -i - -c criteria.json -o -
  ferro-filter -i input.vcf -c criteria.json --dry-run --summary-format json

Criteria file:
  {\"TLOD\": \">=10\", \"DP\": \">=20\", \"FILTER\": \"!=artifact\"}"
)]
struct Cli {
    /// Input VCF file, plain or gzipped (use - for stdin)
    #[arg(short, long)]
    input: PathBuf,

    /// Criteria JSON file mapping field names to threshold expressions
    #[arg(short, long)]
    criteria: PathBuf,

    /// Output VCF file (use - for stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Classify and report statistics without writing records
    #[arg(long)]
    dry_run: bool,

    /// Abort on the first malformed data line instead of passing it through
    #[arg(long)]
    strict: bool,

    /// Summary output format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    summary_format: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Criteria are loaded and validated before any record is read; a
    // configuration error aborts the run with no partial output.
    let criteria = CriteriaSet::from_path(&cli.criteria)?;
    if criteria.is_empty() {
        eprintln!("Warning: empty criteria set; every record will be marked PASS");
    }

    let format = SummaryFormat::from_str(&cli.summary_format).unwrap_or_default();
    let config = FilterConfig::new().strict(cli.strict);

    let stats = if cli.dry_run {
        run_dry_run(&cli.input, &criteria, config)?
    } else {
        run_filter(&cli.input, cli.output.as_deref(), &criteria, config)?
    };

    // The summary goes to stderr so stdout stays a clean VCF stream; a dry
    // run writes no records, so its summary is the stdout payload.
    if cli.dry_run {
        write_summary(&mut io::stdout().lock(), &stats, format)?;
    } else {
        write_summary(&mut io::stderr().lock(), &stats, format)?;
    }

    Ok(())
}

/// Open the input as a buffered reader, transparently decompressing .gz files
fn open_input(path: &Path) -> io::Result<Box<dyn BufRead>> {
    if is_stdio(path) {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }

    let file = File::open(path)?;
    let is_gzipped = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"));

    if is_gzipped {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

fn run_filter(
    input: &Path,
    output: Option<&Path>,
    criteria: &CriteriaSet,
    config: FilterConfig,
) -> Result<FilterStats, Box<dyn std::error::Error>> {
    let reader = open_input(input)?;

    let writer: Box<dyn Write> = match output {
        Some(path) if !is_stdio(path) => Box::new(File::create(path)?),
        _ => Box::new(io::stdout()),
    };

    let mut processor = FilterProcessor::new(criteria).with_config(config);
    let stats = processor.process_stream(reader, writer)?;
    Ok(stats)
}

fn run_dry_run(
    input: &Path,
    criteria: &CriteriaSet,
    config: FilterConfig,
) -> Result<FilterStats, Box<dyn std::error::Error>> {
    let reader = VcfReader::new(open_input(input)?)?;

    let mut processor = FilterProcessor::new(criteria).with_config(config);
    let stats = processor.process_records(reader.records())?;
    Ok(stats)
}
