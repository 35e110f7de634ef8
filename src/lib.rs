// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-filter: criteria-based VCF variant filter
//!
//! Part of the ferro bioinformatics toolkit.
//!
//! Filters VCF records (Mutect2-style output) against a user-supplied set of
//! field-level criteria: records satisfying every criterion have their FILTER
//! column rewritten to `PASS`; everything else is left untouched.
//!
//! # Example
//!
//! ```
//! use ferro_filter::criteria::CriteriaSet;
//! use ferro_filter::filter::classify;
//! use ferro_filter::vcf::{InfoValue, VcfRecord};
//!
//! // Criteria are loaded once, from JSON
//! let criteria = CriteriaSet::from_json_str(r#"{"TLOD": ">=10", "DP": ">=20"}"#).unwrap();
//!
//! // Classify a record
//! let record = VcfRecord::new("chr1".to_string(), 12345, "A".to_string(), vec!["G".to_string()])
//!     .with_info("TLOD", InfoValue::Float(15.0))
//!     .with_info("DP", InfoValue::Integer(25));
//!
//! let decision = classify(&criteria, &record);
//! assert!(decision.passed);
//! assert_eq!(decision.updated_status.as_deref(), Some("PASS"));
//! ```

pub mod cli;
pub mod criteria;
pub mod error;
pub mod filter;
pub mod vcf;

// Re-export commonly used types
pub use criteria::{CriteriaSet, Operator, Predicate, Threshold};
pub use error::FilterError;
pub use filter::{
    classify, evaluate, resolve, FieldDatum, FieldSource, FieldValue, FilterConfig,
    FilterProcessor, FilterStats, RecordDecision, PASS_LABEL,
};
pub use vcf::{open_vcf, parse_vcf_string, InfoValue, VcfRecord};

/// Result type alias for ferro-filter operations
pub type Result<T> = std::result::Result<T, FilterError>;
