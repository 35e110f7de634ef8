//! VCF file parsing using noodles-vcf
//!
//! This module provides the header-typed reading path: INFO values arrive
//! with the types declared in the VCF header, so criteria evaluate against
//! real numbers instead of re-inferred text. Sample columns are not
//! materialized here; the line-oriented streaming path in
//! [`crate::filter::FilterProcessor`] is the one that rewrites files.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use noodles_vcf as nvcf;
use nvcf::variant::record::{AlternateBases, Filters, Ids};

use crate::error::FilterError;

use super::record::{InfoValue, VcfRecord};

/// A parsed VCF file header
#[derive(Debug, Clone)]
pub struct VcfHeader {
    /// Contigs defined in the header (##contig lines)
    pub contigs: Vec<String>,
    /// Sample names from the header line
    pub samples: Vec<String>,
    /// Raw header for reference
    inner: nvcf::Header,
}

impl VcfHeader {
    /// Get the number of samples in the VCF
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Check if a contig is defined in the header
    pub fn has_contig(&self, name: &str) -> bool {
        self.contigs.iter().any(|c| c == name)
    }
}

/// VCF file reader that yields VcfRecord instances
pub struct VcfReader<R> {
    inner: nvcf::io::Reader<R>,
    header: VcfHeader,
}

impl<R: BufRead> VcfReader<R> {
    /// Create a new VCF reader from a buffered reader
    pub fn new(reader: R) -> Result<Self, FilterError> {
        let mut inner = nvcf::io::Reader::new(reader);
        let noodles_header = inner.read_header().map_err(|e| FilterError::Io {
            msg: format!("Failed to parse VCF header: {}", e),
        })?;

        let contigs: Vec<String> = noodles_header
            .contigs()
            .keys()
            .map(|k| k.to_string())
            .collect();

        let samples: Vec<String> = noodles_header
            .sample_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let header = VcfHeader {
            contigs,
            samples,
            inner: noodles_header,
        };

        Ok(Self { inner, header })
    }

    /// Get a reference to the parsed header
    pub fn header(&self) -> &VcfHeader {
        &self.header
    }

    /// Read the next VCF record
    pub fn read_record(&mut self) -> Result<Option<VcfRecord>, FilterError> {
        let mut record = nvcf::variant::RecordBuf::default();

        match self.inner.read_record_buf(&self.header.inner, &mut record) {
            Ok(0) => Ok(None), // EOF
            Ok(_) => {
                let vcf_record = convert_record(&record, &self.header)?;
                Ok(Some(vcf_record))
            }
            Err(e) => Err(FilterError::Io {
                msg: format!("Failed to parse VCF record: {}", e),
            }),
        }
    }

    /// Iterate over all records in the VCF file
    pub fn records(self) -> VcfRecordIterator<R> {
        VcfRecordIterator {
            reader: self,
            done: false,
        }
    }
}

/// Open a VCF file from a path
pub fn open_vcf<P: AsRef<Path>>(path: P) -> Result<VcfReader<BufReader<File>>, FilterError> {
    let file = File::open(path.as_ref()).map_err(|e| FilterError::Io {
        msg: format!("Failed to open VCF file: {}", e),
    })?;
    VcfReader::new(BufReader::new(file))
}

/// Parse VCF from a string
pub fn parse_vcf_string(vcf_content: &str) -> Result<VcfReader<BufReader<&[u8]>>, FilterError> {
    let reader = BufReader::new(vcf_content.as_bytes());
    VcfReader::new(reader)
}

/// Iterator over VCF records
pub struct VcfRecordIterator<R> {
    reader: VcfReader<R>,
    done: bool,
}

impl<R: BufRead> Iterator for VcfRecordIterator<R> {
    type Item = Result<VcfRecord, FilterError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.reader.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Convert a noodles VCF record to our VcfRecord type
fn convert_record(
    record: &nvcf::variant::RecordBuf,
    header: &VcfHeader,
) -> Result<VcfRecord, FilterError> {
    let chrom = record.reference_sequence_name().to_string();

    // noodles uses 1-based positions
    let pos = record
        .variant_start()
        .map(|p| p.get() as u64)
        .ok_or_else(|| FilterError::Io {
            msg: "Missing position in VCF record".to_string(),
        })?;

    let id = {
        let ids = record.ids();
        if ids.is_empty() {
            None
        } else {
            Some(
                ids.iter()
                    .map(|id| id.to_string())
                    .collect::<Vec<_>>()
                    .join(";"),
            )
        }
    };

    let reference = record.reference_bases().to_string();

    let alternate: Vec<String> = record
        .alternate_bases()
        .iter()
        .map(|a| match a {
            Ok(allele) => allele.to_string(),
            Err(_) => ".".to_string(),
        })
        .collect();

    let quality = record.quality_score();

    // FILTER: "." stays None, PASS is explicit, anything else keeps its labels
    let filter = {
        let filters = record.filters();
        if filters.is_pass() {
            Some("PASS".to_string())
        } else {
            let filter_strs: Vec<_> = filters
                .iter(&header.inner)
                .filter_map(|f| f.ok())
                .map(|filter| filter.to_string())
                .collect();
            if filter_strs.is_empty() {
                None
            } else {
                Some(filter_strs.join(";"))
            }
        }
    };

    let mut info = indexmap::IndexMap::new();
    for (key, value) in record.info().as_ref() {
        let key_str = key.to_string();
        if let Some(v) = value {
            info.insert(key_str, convert_info_value(v));
        } else {
            info.insert(key_str, InfoValue::Flag);
        }
    }

    // Sample values are not materialized on this path; capture the FORMAT
    // keys so callers can see what the file carries.
    let format_keys: Vec<String> = record
        .samples()
        .keys()
        .as_ref()
        .iter()
        .map(|k| k.to_string())
        .collect();

    let format = if format_keys.is_empty() {
        None
    } else {
        Some(format_keys.join(":"))
    };

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
        samples: Vec::new(),
    })
}

/// Convert a noodles INFO value to our InfoValue type
fn convert_info_value(value: &nvcf::variant::record_buf::info::field::Value) -> InfoValue {
    use nvcf::variant::record_buf::info::field::Value;

    match value {
        Value::Integer(v) => InfoValue::Integer(*v as i64),
        Value::Float(v) => InfoValue::Float(*v as f64),
        Value::Flag => InfoValue::Flag,
        Value::Character(v) => InfoValue::Character(*v),
        Value::String(v) => InfoValue::String(v.clone()),
        Value::Array(arr) => {
            use nvcf::variant::record_buf::info::field::value::Array;
            match arr {
                Array::Integer(vals) => {
                    let ints: Vec<i64> = vals.iter().filter_map(|v| v.map(|i| i as i64)).collect();
                    InfoValue::IntegerArray(ints)
                }
                Array::Float(vals) => {
                    let floats: Vec<f64> =
                        vals.iter().filter_map(|v| v.map(|f| f as f64)).collect();
                    InfoValue::FloatArray(floats)
                }
                Array::Character(vals) => {
                    let chars: Vec<String> = vals
                        .iter()
                        .filter_map(|v| v.map(|c| c.to_string()))
                        .collect();
                    InfoValue::StringArray(chars)
                }
                Array::String(vals) => {
                    let strs: Vec<String> = vals.iter().filter_map(|v| v.clone()).collect();
                    InfoValue::StringArray(strs)
                }
            }
        }
    }
}
