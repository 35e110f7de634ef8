//! Streaming filter processing
//!
//! Reads a VCF stream line by line, classifies each data line against the
//! criteria set, and writes the stream back out with the FILTER column of
//! passing records rewritten to `PASS`. Only that one column is touched:
//! header lines, failing records, and every other column are echoed
//! byte-for-byte, so INFO ordering and sample data survive the round trip.

use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::Serialize;

use crate::cli::parse_vcf_line;
use crate::criteria::CriteriaSet;
use crate::error::FilterError;
use crate::vcf::VcfRecord;

use super::classify::{classify, RecordDecision, PASS_LABEL};

/// Maximum number of error messages to store to prevent memory issues
const MAX_STORED_ERRORS: usize = 100;

/// FILTER is the seventh VCF column
const FILTER_COLUMN: usize = 6;

/// Statistics from a filtering run
#[derive(Debug, Clone, Default, Serialize)]
pub struct FilterStats {
    /// Total data lines seen
    pub total: usize,
    /// Records that satisfied every criterion and were marked PASS
    pub passed: usize,
    /// Records that failed at least one criterion and were left unchanged
    pub failed: usize,
    /// Data lines that could not be parsed (echoed unchanged)
    pub malformed: usize,
    /// Parse error messages, capped at 100 entries
    pub errors: Vec<String>,
}

impl FilterStats {
    /// Fraction of parseable records that passed
    pub fn pass_rate(&self) -> f64 {
        let evaluated = self.passed + self.failed;
        if evaluated == 0 {
            0.0
        } else {
            self.passed as f64 / evaluated as f64
        }
    }

    /// Record a parse error, storing up to MAX_STORED_ERRORS messages
    pub fn record_error(&mut self, error: &FilterError) {
        self.malformed += 1;
        if self.errors.len() < MAX_STORED_ERRORS {
            self.errors.push(error.to_string());
        }
    }
}

/// Configuration for a filtering run
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Abort on the first unparseable data line instead of echoing it
    pub strict: bool,
}

impl FilterConfig {
    /// Create a configuration with defaults (lenient)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether unparseable data lines abort the run
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Streaming processor applying one criteria set to a VCF stream
pub struct FilterProcessor<'a> {
    criteria: &'a CriteriaSet,
    config: FilterConfig,
    stats: FilterStats,
}

impl<'a> FilterProcessor<'a> {
    /// Create a new processor for a criteria set
    pub fn new(criteria: &'a CriteriaSet) -> Self {
        Self {
            criteria,
            config: FilterConfig::new(),
            stats: FilterStats::default(),
        }
    }

    /// Set configuration
    pub fn with_config(mut self, config: FilterConfig) -> Self {
        self.config = config;
        self
    }

    /// Get current statistics
    pub fn stats(&self) -> &FilterStats {
        &self.stats
    }

    /// Classify a single record and update the tallies
    pub fn process_record(&mut self, record: &VcfRecord) -> RecordDecision {
        let decision = classify(self.criteria, record);
        self.stats.total += 1;
        if decision.passed {
            self.stats.passed += 1;
        } else {
            self.stats.failed += 1;
        }
        decision
    }

    /// Classify a stream of already-parsed records without writing output.
    ///
    /// This is the dry-run path, fed from the header-typed reader.
    pub fn process_records<I>(&mut self, records: I) -> Result<FilterStats, FilterError>
    where
        I: IntoIterator<Item = Result<VcfRecord, FilterError>>,
    {
        for record in records {
            match record {
                Ok(record) => {
                    self.process_record(&record);
                }
                Err(e) => {
                    if self.config.strict {
                        return Err(e);
                    }
                    self.stats.total += 1;
                    self.stats.record_error(&e);
                }
            }
        }
        Ok(self.stats.clone())
    }

    /// Stream filter from reader to writer
    pub fn process_stream<R: Read, W: Write>(
        &mut self,
        reader: R,
        writer: W,
    ) -> Result<FilterStats, FilterError> {
        let buf_reader = BufReader::new(reader);
        let mut buf_writer = BufWriter::new(writer);

        for line in buf_reader.lines() {
            let line = line?;

            if line.starts_with('#') {
                // Pass through header lines
                writeln!(buf_writer, "{}", line)?;
                continue;
            }

            // Empty lines are valid in VCF files and are silently skipped.
            if line.is_empty() {
                continue;
            }

            self.stats.total += 1;

            let record = match parse_vcf_line(&line) {
                Ok(r) => r,
                Err(e) => {
                    if self.config.strict {
                        return Err(e);
                    }
                    // An unevaluable record cannot be marked PASS; echo it
                    self.stats.record_error(&e);
                    writeln!(buf_writer, "{}", line)?;
                    continue;
                }
            };

            let decision = classify(self.criteria, &record);
            if decision.passed {
                self.stats.passed += 1;
                writeln!(buf_writer, "{}", mark_pass(&line))?;
            } else {
                self.stats.failed += 1;
                writeln!(buf_writer, "{}", line)?;
            }
        }

        buf_writer.flush()?;
        Ok(self.stats.clone())
    }

    /// Filter a file into another file
    pub fn process_file<P: AsRef<Path>>(
        &mut self,
        input: P,
        output: P,
    ) -> Result<FilterStats, FilterError> {
        let reader = std::fs::File::open(input.as_ref())?;
        let writer = std::fs::File::create(output.as_ref())?;
        self.process_stream(reader, writer)
    }
}

/// Rewrite the FILTER column of a data line to PASS, leaving every other
/// byte of the line as it was.
fn mark_pass(line: &str) -> String {
    let mut columns: Vec<&str> = line.split('\t').collect();
    if columns.len() > FILTER_COLUMN {
        columns[FILTER_COLUMN] = PASS_LABEL;
    }
    columns.join("\t")
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = "##fileformat=VCFv4.2\n\
        ##INFO=<ID=DP,Number=1,Type=Integer,Description=\"Total Depth\">\n\
        #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n\
        chr1\t100\t.\tA\tG\t30\tartifact\tTLOD=15;DP=25\n\
        chr1\t200\t.\tC\tT\t30\tartifact\tTLOD=5;DP=25\n\
        chr1\t300\t.\tG\tA,C\t30\t.\tTLOD=5,15;DP=30\n";

    fn criteria() -> CriteriaSet {
        CriteriaSet::from_json_str(r#"{"TLOD": ">=10", "DP": ">=20"}"#).unwrap()
    }

    fn run(input: &str) -> (FilterStats, String) {
        let set = criteria();
        let mut processor = FilterProcessor::new(&set);
        let mut output = Vec::new();
        let stats = processor
            .process_stream(input.as_bytes(), &mut output)
            .unwrap();
        (stats, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_stream_marks_passing_records() {
        let (stats, output) = run(INPUT);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.passed, 2);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.malformed, 0);

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 6);
        // Headers pass through untouched
        assert!(lines[0].starts_with("##fileformat"));
        // Passing record: FILTER column rewritten, rest identical
        assert_eq!(lines[3], "chr1\t100\t.\tA\tG\t30\tPASS\tTLOD=15;DP=25");
        // Failing record: untouched, original label kept
        assert_eq!(lines[4], "chr1\t200\t.\tC\tT\t30\tartifact\tTLOD=5;DP=25");
        // Multi-allelic: second TLOD value satisfies >=10
        assert_eq!(lines[5], "chr1\t300\t.\tG\tA,C\t30\tPASS\tTLOD=5,15;DP=30");
    }

    #[test]
    fn test_pass_rate() {
        let (stats, _) = run(INPUT);
        assert!((stats.pass_rate() - 2.0 / 3.0).abs() < 1e-9);

        let empty = FilterStats::default();
        assert_eq!(empty.pass_rate(), 0.0);
    }

    #[test]
    fn test_malformed_line_echoed_and_counted() {
        let input = "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n\
            chr1\tnotanumber\t.\tA\tG\t.\t.\tDP=25\n\
            chr1\t100\t.\tA\tG\t.\t.\tTLOD=15;DP=25\n";
        let (stats, output) = run(input);

        assert_eq!(stats.total, 2);
        assert_eq!(stats.malformed, 1);
        assert_eq!(stats.passed, 1);
        assert_eq!(stats.errors.len(), 1);

        // The malformed line is still present, unchanged
        assert!(output.contains("chr1\tnotanumber\t.\tA\tG\t.\t.\tDP=25"));
    }

    #[test]
    fn test_strict_mode_aborts_on_malformed_line() {
        let input = "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n\
            chr1\tnotanumber\t.\tA\tG\t.\t.\tDP=25\n";
        let set = criteria();
        let mut processor =
            FilterProcessor::new(&set).with_config(FilterConfig::new().strict(true));
        let result = processor.process_stream(input.as_bytes(), Vec::new());
        assert!(matches!(result, Err(FilterError::Parse { .. })));
    }

    #[test]
    fn test_empty_lines_skipped() {
        let input = "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n\n\
            chr1\t100\t.\tA\tG\t.\t.\tTLOD=15;DP=25\n\n";
        let (stats, _) = run(input);
        assert_eq!(stats.total, 1);
    }

    #[test]
    fn test_sample_columns_survive() {
        let input = "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tTUMOR\n\
            chr1\t100\t.\tA\tG\t.\tweak\tTLOD=15;DP=25\tGT:AD\t0/1:12,13\n";
        let (_, output) = run(input);
        assert!(output.contains("chr1\t100\t.\tA\tG\t.\tPASS\tTLOD=15;DP=25\tGT:AD\t0/1:12,13"));
    }

    #[test]
    fn test_process_records_dry_run() {
        use crate::vcf::parse_vcf_string;

        let vcf = "##fileformat=VCFv4.3\n\
            ##INFO=<ID=DP,Number=1,Type=Integer,Description=\"Depth\">\n\
            ##INFO=<ID=TLOD,Number=A,Type=Float,Description=\"LOD\">\n\
            #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n\
            chr1\t100\t.\tA\tG\t30\t.\tTLOD=15;DP=25\n\
            chr1\t200\t.\tC\tT\t30\t.\tTLOD=5;DP=25\n";

        let set = criteria();
        let mut processor = FilterProcessor::new(&set);
        let reader = parse_vcf_string(vcf).unwrap();
        let stats = processor.process_records(reader.records()).unwrap();

        assert_eq!(stats.total, 2);
        assert_eq!(stats.passed, 1);
        assert_eq!(stats.failed, 1);
    }

    #[test]
    fn test_mark_pass_only_touches_filter_column() {
        let line = "chr1\t100\trs1\tA\tG\t30\tq10;s50\tDP=25\tGT\t0/1";
        assert_eq!(mark_pass(line), "chr1\t100\trs1\tA\tG\t30\tPASS\tDP=25\tGT\t0/1");
    }
}
