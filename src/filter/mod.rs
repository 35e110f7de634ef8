//! The criteria evaluation engine
//!
//! Stateless per-record classification: resolve each configured field,
//! evaluate it against its predicate, AND the results. The engine holds no
//! state between records, so callers are free to fan classification out
//! across workers; the criteria set is read-only after construction.

mod classify;
mod evaluate;
mod processor;
mod value;

pub use classify::{classify, RecordDecision, PASS_LABEL};
pub use evaluate::evaluate;
pub use processor::{FilterConfig, FilterProcessor, FilterStats};
pub use value::{resolve, FieldDatum, FieldSource, FieldValue, FILTER_FIELD};
