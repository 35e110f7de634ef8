//! VCF record representation
//!
//! A record type for variants read from VCF (Variant Call Format) files,
//! carrying exactly what filtering needs: the FILTER status label, typed INFO
//! values (scalar and per-allele arrays), and the remaining columns preserved
//! for pass-through.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single VCF record representing one variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VcfRecord {
    /// Chromosome name (e.g., "chr1", "1", "X", "chrM")
    pub chrom: String,

    /// 1-based position of the first base in the reference allele
    pub pos: u64,

    /// Variant identifier (e.g., rsID), None if "."
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Reference allele
    pub reference: String,

    /// Alternate allele(s); more than one for multi-allelic records
    pub alternate: Vec<String>,

    /// Phred-scaled quality score, None if "."
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<f32>,

    /// Filter status label(s), semicolon-joined. None means "." — no filter
    /// has been applied. "PASS" is stored explicitly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    /// INFO field key-value pairs in file order
    #[serde(default)]
    pub info: IndexMap<String, InfoValue>,

    /// FORMAT column, kept verbatim for pass-through
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Per-sample columns, kept verbatim for pass-through
    #[serde(default)]
    pub samples: Vec<String>,
}

/// INFO field value types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InfoValue {
    /// Flag (presence indicates true)
    Flag,
    /// Integer value
    Integer(i64),
    /// Float value
    Float(f64),
    /// String value
    String(String),
    /// Character value
    Character(char),
    /// Multiple integer values (one per alternate allele)
    IntegerArray(Vec<i64>),
    /// Multiple float values (one per alternate allele)
    FloatArray(Vec<f64>),
    /// Multiple string values (one per alternate allele)
    StringArray(Vec<String>),
}

impl fmt::Display for InfoValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InfoValue::Flag => Ok(()),
            InfoValue::Integer(v) => write!(f, "{}", v),
            InfoValue::Float(v) => write!(f, "{}", v),
            InfoValue::String(v) => write!(f, "{}", v),
            InfoValue::Character(v) => write!(f, "{}", v),
            InfoValue::IntegerArray(v) => {
                let s: Vec<_> = v.iter().map(|x| x.to_string()).collect();
                write!(f, "{}", s.join(","))
            }
            InfoValue::FloatArray(v) => {
                let s: Vec<_> = v.iter().map(|x| x.to_string()).collect();
                write!(f, "{}", s.join(","))
            }
            InfoValue::StringArray(v) => write!(f, "{}", v.join(",")),
        }
    }
}

impl VcfRecord {
    /// Create a new VCF record with minimal required fields
    pub fn new(chrom: String, pos: u64, reference: String, alternate: Vec<String>) -> Self {
        Self {
            chrom,
            pos,
            id: None,
            reference,
            alternate,
            quality: None,
            filter: None,
            info: IndexMap::new(),
            format: None,
            samples: Vec::new(),
        }
    }

    /// Set the variant ID (e.g., rsID)
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Set the quality score
    pub fn with_quality(mut self, quality: f32) -> Self {
        self.quality = Some(quality);
        self
    }

    /// Set the filter status label
    pub fn with_filter(mut self, filter: &str) -> Self {
        self.filter = Some(filter.to_string());
        self
    }

    /// Add an INFO field
    pub fn with_info(mut self, key: &str, value: InfoValue) -> Self {
        self.info.insert(key.to_string(), value);
        self
    }

    /// Check if this is a multi-allelic variant
    pub fn is_multiallelic(&self) -> bool {
        self.alternate.len() > 1
    }

    /// Individual filter labels of the status column, if any were applied
    pub fn filter_labels(&self) -> Vec<&str> {
        match self.filter.as_deref() {
            None | Some("") | Some(".") => Vec::new(),
            Some(joined) => joined.split(';').collect(),
        }
    }

    /// Check whether the record has been marked passing
    pub fn is_pass(&self) -> bool {
        self.filter.as_deref() == Some("PASS")
    }

    /// Overwrite the status label, discarding any previous labels
    pub fn set_filter(&mut self, label: &str) {
        self.filter = Some(label.to_string());
    }
}

impl fmt::Display for VcfRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format as VCF line
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.chrom,
            self.pos,
            self.id.as_deref().unwrap_or("."),
            self.reference,
            self.alternate.join(","),
            self.quality.map_or(".".to_string(), |q| q.to_string()),
            self.filter.as_deref().unwrap_or("."),
        )?;

        // INFO field
        if self.info.is_empty() {
            write!(f, "\t.")?;
        } else {
            let info_str: Vec<String> = self
                .info
                .iter()
                .map(|(k, v)| {
                    if matches!(v, InfoValue::Flag) {
                        k.clone()
                    } else {
                        format!("{}={}", k, v)
                    }
                })
                .collect();
            write!(f, "\t{}", info_str.join(";"))?;
        }

        // FORMAT and samples if present
        if let Some(format) = &self.format {
            write!(f, "\t{}", format)?;
            for sample in &self.samples {
                write!(f, "\t{}", sample)?;
            }
        }

        Ok(())
    }
}
