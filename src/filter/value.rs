//! Field resolution
//!
//! Resolves a named field on a record into a typed value: `Absent`, a single
//! scalar, or an ordered multi-value (the multi-allelic case, one entry per
//! alternate allele). Arity and typing are explicit in the result so nothing
//! downstream has to guess whether a field is "one or many".

use crate::vcf::{InfoValue, VcfRecord};

/// The FILTER column is addressed by this reserved field name. It is not a
/// keyed INFO attribute, so resolution special-cases it.
pub const FILTER_FIELD: &str = "FILTER";

/// A single observed value, typed as stored
#[derive(Debug, Clone, PartialEq)]
pub enum FieldDatum {
    /// Numeric value
    Number(f64),
    /// Text value
    Text(String),
}

/// The resolved value(s) of one field on one record
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// The field is not present on the record
    Absent,
    /// A single value
    Scalar(FieldDatum),
    /// An ordered sequence of values, one per alternate allele
    Multi(Vec<FieldDatum>),
}

impl FieldValue {
    /// Whether the field was missing from the record
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }
}

impl From<&InfoValue> for FieldValue {
    fn from(value: &InfoValue) -> Self {
        match value {
            // A present flag is truthy: it compares as the number 1
            InfoValue::Flag => FieldValue::Scalar(FieldDatum::Number(1.0)),
            InfoValue::Integer(v) => FieldValue::Scalar(FieldDatum::Number(*v as f64)),
            InfoValue::Float(v) => FieldValue::Scalar(FieldDatum::Number(*v)),
            InfoValue::String(v) => FieldValue::Scalar(FieldDatum::Text(v.clone())),
            InfoValue::Character(v) => FieldValue::Scalar(FieldDatum::Text(v.to_string())),
            InfoValue::IntegerArray(vs) => FieldValue::Multi(
                vs.iter()
                    .map(|v| FieldDatum::Number(*v as f64))
                    .collect(),
            ),
            InfoValue::FloatArray(vs) => {
                FieldValue::Multi(vs.iter().map(|v| FieldDatum::Number(*v)).collect())
            }
            InfoValue::StringArray(vs) => {
                FieldValue::Multi(vs.iter().map(|v| FieldDatum::Text(v.clone())).collect())
            }
        }
    }
}

/// A record the engine can evaluate: a status label plus keyed attributes.
///
/// The engine only ever reads through this trait, which keeps it independent
/// of how records are stored or streamed.
pub trait FieldSource {
    /// The record's current status label (the FILTER column), if any filter
    /// has been applied
    fn status_label(&self) -> Option<&str>;

    /// Look up a keyed attribute; `Absent` when the key is missing
    fn attribute(&self, name: &str) -> FieldValue;
}

impl FieldSource for VcfRecord {
    fn status_label(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    fn attribute(&self, name: &str) -> FieldValue {
        self.info
            .get(name)
            .map(FieldValue::from)
            .unwrap_or(FieldValue::Absent)
    }
}

/// Resolve a field's value(s) on a record.
///
/// `FILTER` resolves to the status label: unset resolves `Absent`, a single
/// label resolves `Scalar`, and a semicolon-joined label list resolves
/// `Multi` so that a criterion is satisfied by any one label. All other
/// fields go through the record's keyed-attribute lookup.
pub fn resolve<R: FieldSource + ?Sized>(record: &R, field: &str) -> FieldValue {
    if field == FILTER_FIELD {
        let labels: Vec<&str> = match record.status_label() {
            None => Vec::new(),
            Some(joined) => joined
                .split(';')
                .filter(|label| !label.is_empty() && *label != ".")
                .collect(),
        };
        match labels.len() {
            0 => FieldValue::Absent,
            1 => FieldValue::Scalar(FieldDatum::Text(labels[0].to_string())),
            _ => FieldValue::Multi(
                labels
                    .into_iter()
                    .map(|label| FieldDatum::Text(label.to_string()))
                    .collect(),
            ),
        }
    } else {
        record.attribute(field)
    }
}
