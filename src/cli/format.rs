//! Output formatting utilities for CLI operations

use std::io::{self, Write};
use std::str::FromStr;

use crate::filter::FilterStats;

/// Output format for the run summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryFormat {
    /// Plain text format (default)
    #[default]
    Text,
    /// JSON format
    Json,
}

impl FromStr for SummaryFormat {
    type Err = std::convert::Infallible;

    /// Parse a summary format from a string
    ///
    /// # Examples
    ///
    /// ```
    /// use ferro_filter::cli::SummaryFormat;
    /// use std::str::FromStr;
    ///
    /// assert!(matches!(SummaryFormat::from_str("json").unwrap(), SummaryFormat::Json));
    /// assert!(matches!(SummaryFormat::from_str("text").unwrap(), SummaryFormat::Text));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "json" => SummaryFormat::Json,
            _ => SummaryFormat::Text,
        })
    }
}

/// Write the run summary to the output
///
/// # Arguments
///
/// * `writer` - The output writer (can be stderr, file, or buffer for testing)
/// * `stats` - Statistics collected by the filtering run
/// * `format` - The output format
pub fn write_summary<W: Write>(
    writer: &mut W,
    stats: &FilterStats,
    format: SummaryFormat,
) -> io::Result<()> {
    match format {
        SummaryFormat::Text => {
            writeln!(writer, "records processed: {}", stats.total)?;
            writeln!(writer, "marked PASS:       {}", stats.passed)?;
            writeln!(writer, "left unchanged:    {}", stats.failed)?;
            if stats.malformed > 0 {
                writeln!(writer, "malformed lines:   {}", stats.malformed)?;
            }
            for error in &stats.errors {
                writeln!(writer, "  {}", error)?;
            }
        }
        SummaryFormat::Json => {
            let json = serde_json::to_string_pretty(stats)
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
            writeln!(writer, "{}", json)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> FilterStats {
        FilterStats {
            total: 10,
            passed: 7,
            failed: 2,
            malformed: 1,
            errors: vec!["VCF parse error: Invalid position 'x'".to_string()],
        }
    }

    #[test]
    fn test_text_summary() {
        let mut buffer = Vec::new();
        write_summary(&mut buffer, &stats(), SummaryFormat::Text).unwrap();
        let out = String::from_utf8(buffer).unwrap();

        assert!(out.contains("records processed: 10"));
        assert!(out.contains("marked PASS:       7"));
        assert!(out.contains("malformed lines:   1"));
        assert!(out.contains("Invalid position"));
    }

    #[test]
    fn test_text_summary_omits_zero_malformed() {
        let clean = FilterStats {
            total: 3,
            passed: 3,
            ..Default::default()
        };
        let mut buffer = Vec::new();
        write_summary(&mut buffer, &clean, SummaryFormat::Text).unwrap();
        let out = String::from_utf8(buffer).unwrap();
        assert!(!out.contains("malformed"));
    }

    #[test]
    fn test_json_summary() {
        let mut buffer = Vec::new();
        write_summary(&mut buffer, &stats(), SummaryFormat::Json).unwrap();
        let out = String::from_utf8(buffer).unwrap();

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["total"], 10);
        assert_eq!(value["passed"], 7);
        assert_eq!(value["malformed"], 1);
    }

    #[test]
    fn test_format_from_str_defaults_to_text() {
        assert!(matches!(
            SummaryFormat::from_str("anything").unwrap(),
            SummaryFormat::Text
        ));
        assert!(matches!(
            SummaryFormat::from_str("JSON").unwrap(),
            SummaryFormat::Json
        ));
    }
}
