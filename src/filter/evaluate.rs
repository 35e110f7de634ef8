//! Criterion evaluation
//!
//! Decides whether one field's resolved value satisfies one predicate.
//! Missing data never satisfies a criterion, multi-valued fields pass when
//! any element passes, and type mismatches fail the criterion instead of
//! erroring — a malformed record must never abort a run.

use crate::criteria::{Operator, Predicate, Threshold};

use super::value::{FieldDatum, FieldValue};

/// Evaluate a predicate against a resolved field value.
///
/// - `Absent` fails: missing data cannot satisfy a stated criterion.
/// - `Scalar` applies the operator to the single value.
/// - `Multi` passes iff at least one element passes on its own; an empty
///   sequence behaves like `Absent`.
pub fn evaluate(predicate: &Predicate, value: &FieldValue) -> bool {
    match value {
        FieldValue::Absent => false,
        FieldValue::Scalar(datum) => evaluate_datum(predicate, datum),
        FieldValue::Multi(seq) => seq.iter().any(|datum| evaluate_datum(predicate, datum)),
    }
}

/// Evaluate a predicate against one observed value.
///
/// The threshold's type was fixed at parse time. The only per-record
/// coercion is observed text that looks numeric being parsed to a number
/// when the threshold is numeric; every other cross-type pairing compares
/// false (for `!=` as well — the comparison itself is unsatisfied).
fn evaluate_datum(predicate: &Predicate, datum: &FieldDatum) -> bool {
    match predicate.threshold() {
        Threshold::Number(threshold) => {
            let observed = match datum {
                FieldDatum::Number(v) => Some(*v),
                FieldDatum::Text(s) => s.trim().parse::<f64>().ok(),
            };
            match observed {
                Some(v) => compare_numbers(predicate.operator(), v, *threshold),
                None => false,
            }
        }
        Threshold::Text(threshold) => match (predicate.operator(), datum) {
            (Operator::Equal, FieldDatum::Text(s)) => s == threshold,
            (Operator::NotEqual, FieldDatum::Text(s)) => s != threshold,
            // Ordering operators never carry a text threshold (rejected at
            // parse time); cross-type equality compares false.
            _ => false,
        },
    }
}

fn compare_numbers(operator: Operator, observed: f64, threshold: f64) -> bool {
    match operator {
        Operator::GreaterEqual => observed >= threshold,
        Operator::LessEqual => observed <= threshold,
        Operator::Greater => observed > threshold,
        Operator::Less => observed < threshold,
        Operator::Equal => observed == threshold,
        Operator::NotEqual => observed != threshold,
    }
}
