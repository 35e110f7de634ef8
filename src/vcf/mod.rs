//! VCF (Variant Call Format) support
//!
//! This module provides the record type and the header-typed reading path
//! used by classification. Line-oriented streaming (which preserves files
//! byte-for-byte) lives in [`crate::filter`] and [`crate::cli`].

mod parser;
mod record;

pub use parser::{open_vcf, parse_vcf_string, VcfHeader, VcfReader};
pub use record::{InfoValue, VcfRecord};
