//! Error types for ferro-filter
//!
//! Criteria configuration errors (malformed criterion strings, operator and
//! threshold type mismatches, duplicate fields) are raised while the criteria
//! set is being built, before any record is processed. Per-record evaluation
//! never raises: absent fields, type mismatches, and unparseable values all
//! resolve to "fails this criterion".

use thiserror::Error;

/// Main error type for ferro-filter operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    /// A criterion string has no recognized operator or an empty threshold
    #[error("malformed criterion '{criterion}' for field '{field}': {msg}")]
    MalformedCriterion {
        field: String,
        criterion: String,
        msg: String,
    },

    /// A numeric (ordering) operator was paired with a non-numeric threshold
    #[error("operator '{operator}' in criterion '{criterion}' for field '{field}' requires a numeric threshold")]
    InvalidOperatorForType {
        field: String,
        criterion: String,
        operator: String,
    },

    /// The same field appears more than once in the criteria configuration
    #[error("duplicate criterion for field '{field}'")]
    DuplicateField { field: String },

    /// VCF line or record parse error
    #[error("VCF parse error: {msg}")]
    Parse { msg: String },

    /// JSON error while reading a criteria document
    #[error("JSON error: {msg}")]
    Json { msg: String },

    /// IO error (file operations, stream reads/writes)
    #[error("IO error: {msg}")]
    Io { msg: String },
}

impl FilterError {
    /// Create a malformed-criterion error
    pub fn malformed(
        field: impl Into<String>,
        criterion: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        FilterError::MalformedCriterion {
            field: field.into(),
            criterion: criterion.into(),
            msg: msg.into(),
        }
    }

    /// Create an operator/threshold type mismatch error
    pub fn invalid_operator(
        field: impl Into<String>,
        criterion: impl Into<String>,
        operator: impl Into<String>,
    ) -> Self {
        FilterError::InvalidOperatorForType {
            field: field.into(),
            criterion: criterion.into(),
            operator: operator.into(),
        }
    }

    /// Create a VCF parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        FilterError::Parse { msg: msg.into() }
    }

    /// True for errors raised at configuration-load time
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            FilterError::MalformedCriterion { .. }
                | FilterError::InvalidOperatorForType { .. }
                | FilterError::DuplicateField { .. }
                | FilterError::Json { .. }
        )
    }
}

impl From<std::io::Error> for FilterError {
    fn from(e: std::io::Error) -> Self {
        FilterError::Io { msg: e.to_string() }
    }
}

impl From<serde_json::Error> for FilterError {
    fn from(e: serde_json::Error) -> Self {
        FilterError::Json { msg: e.to_string() }
    }
}
