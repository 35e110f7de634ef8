//! Filtering criteria
//!
//! This module provides parsing of human-authored threshold expressions into
//! typed predicates, and the ordered criteria set built from a JSON
//! configuration document.

mod predicate;
mod set;

pub use predicate::{Operator, Predicate, Threshold};
pub use set::CriteriaSet;
