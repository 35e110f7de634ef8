//! Record classification
//!
//! Applies every configured criterion to a record and aggregates the
//! per-field results into one verdict. A record passes iff every field's
//! criterion is satisfied; evaluation runs in the criteria set's declared
//! order so failure diagnostics are reproducible.

use crate::criteria::CriteriaSet;

use super::evaluate::evaluate;
use super::value::{resolve, FieldSource};

/// The status label written to passing records
pub const PASS_LABEL: &str = "PASS";

/// The verdict for one record
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDecision {
    /// Whether every configured criterion was satisfied
    pub passed: bool,
    /// On pass, the label that replaces the record's status (discarding any
    /// previous labels); on fail, None — the status is left untouched
    pub updated_status: Option<String>,
}

impl RecordDecision {
    fn pass() -> Self {
        Self {
            passed: true,
            updated_status: Some(PASS_LABEL.to_string()),
        }
    }

    fn fail() -> Self {
        Self {
            passed: false,
            updated_status: None,
        }
    }
}

/// Classify one record against a criteria set.
///
/// Short-circuits on the first failing field. Never errors for a well-formed
/// criteria set: absent fields and type mismatches fail their criterion
/// instead of propagating. An empty criteria set passes every record.
pub fn classify<R: FieldSource + ?Sized>(criteria: &CriteriaSet, record: &R) -> RecordDecision {
    for (field, predicate) in criteria.iter() {
        let value = resolve(record, field);
        if !evaluate(predicate, &value) {
            return RecordDecision::fail();
        }
    }
    RecordDecision::pass()
}
