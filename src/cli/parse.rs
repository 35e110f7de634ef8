//! Parsing utilities for CLI operations

use crate::error::FilterError;
use crate::vcf::{InfoValue, VcfRecord};

/// Parse a VCF data line into a VcfRecord
///
/// Parses a tab-separated VCF data line (not header lines starting with #).
/// Requires the eight fixed columns CHROM, POS, ID, REF, ALT, QUAL, FILTER,
/// INFO; FORMAT and sample columns are kept verbatim when present. INFO
/// values are typed syntactically: integer literals become integers, other
/// numeric literals become floats, comma-separated values become arrays, and
/// a bare key becomes a flag.
///
/// # Examples
///
/// ```
/// use ferro_filter::cli::parse_vcf_line;
///
/// let record = parse_vcf_line("chr1\t12345\t.\tA\tG\t30\tartifact\tDP=100").unwrap();
/// assert_eq!(record.chrom, "chr1");
/// assert_eq!(record.pos, 12345);
/// assert_eq!(record.filter.as_deref(), Some("artifact"));
/// ```
pub fn parse_vcf_line(line: &str) -> Result<VcfRecord, FilterError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 8 {
        return Err(FilterError::parse(
            "Invalid VCF line: expected at least 8 columns",
        ));
    }

    let chrom = fields[0].to_string();
    let pos: u64 = fields[1]
        .parse()
        .map_err(|_| FilterError::parse(format!("Invalid position '{}'", fields[1])))?;
    let id = if fields[2] == "." {
        None
    } else {
        Some(fields[2].to_string())
    };
    let reference = fields[3].to_string();
    let alternate: Vec<String> = fields[4].split(',').map(|s| s.to_string()).collect();

    let quality = match fields[5] {
        "." => None,
        raw => Some(
            raw.parse::<f32>()
                .map_err(|_| FilterError::parse(format!("Invalid quality '{}'", raw)))?,
        ),
    };

    let filter = match fields[6] {
        "." | "" => None,
        raw => Some(raw.to_string()),
    };

    let mut info = indexmap::IndexMap::new();
    if fields[7] != "." {
        for entry in fields[7].split(';').filter(|e| !e.is_empty()) {
            match entry.split_once('=') {
                Some((key, raw)) => {
                    info.insert(key.to_string(), parse_info_value(raw));
                }
                None => {
                    info.insert(entry.to_string(), InfoValue::Flag);
                }
            }
        }
    }

    let format = fields.get(8).map(|s| s.to_string());
    let samples: Vec<String> = fields.iter().skip(9).map(|s| s.to_string()).collect();

    Ok(VcfRecord {
        chrom,
        pos,
        id,
        reference,
        alternate,
        quality,
        filter,
        info,
        format,
        samples,
    })
}

/// Type an INFO value from its textual form
///
/// Comma-separated values become arrays; an array is integer-typed only when
/// every element is, numeric when every element parses as a number, and
/// falls back to strings otherwise.
pub fn parse_info_value(raw: &str) -> InfoValue {
    if raw.contains(',') {
        let parts: Vec<&str> = raw.split(',').collect();
        if let Ok(ints) = parts.iter().map(|p| p.parse::<i64>()).collect::<Result<Vec<_>, _>>() {
            return InfoValue::IntegerArray(ints);
        }
        if let Ok(floats) = parts.iter().map(|p| p.parse::<f64>()).collect::<Result<Vec<_>, _>>() {
            return InfoValue::FloatArray(floats);
        }
        return InfoValue::StringArray(parts.iter().map(|p| p.to_string()).collect());
    }

    if let Ok(i) = raw.parse::<i64>() {
        InfoValue::Integer(i)
    } else if let Ok(f) = raw.parse::<f64>() {
        InfoValue::Float(f)
    } else {
        InfoValue::String(raw.to_string())
    }
}
