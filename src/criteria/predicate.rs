//! Criterion predicate parsing
//!
//! A criterion string couples a comparison operator with a threshold literal,
//! e.g. `">=10"` or `"==PASS"`. Parsing fixes the threshold type once: the
//! literal is tried as a number first and kept as text otherwise. Ordering
//! operators demand a numeric threshold; equality operators accept either.

use std::fmt;

use crate::error::FilterError;

/// Comparison operator of a criterion
///
/// A closed set: adding an operator is a compile-time-checked change in the
/// evaluator's match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `>=`
    GreaterEqual,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `<`
    Less,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
}

/// Operator prefixes in match order. Two-character operators come first so
/// `">=10"` is never read as `>` with threshold `"=10"`.
const OPERATOR_PREFIXES: [(&str, Operator); 6] = [
    (">=", Operator::GreaterEqual),
    ("<=", Operator::LessEqual),
    ("==", Operator::Equal),
    ("!=", Operator::NotEqual),
    (">", Operator::Greater),
    ("<", Operator::Less),
];

impl Operator {
    /// The operator's source form (e.g. `">="`)
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::GreaterEqual => ">=",
            Operator::LessEqual => "<=",
            Operator::Greater => ">",
            Operator::Less => "<",
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
        }
    }

    /// Whether this operator orders values (and therefore requires numbers)
    pub fn is_ordering(&self) -> bool {
        matches!(
            self,
            Operator::GreaterEqual | Operator::LessEqual | Operator::Greater | Operator::Less
        )
    }

    /// Split a criterion into its operator and the remaining threshold literal
    fn strip(criterion: &str) -> Option<(Operator, &str)> {
        OPERATOR_PREFIXES
            .iter()
            .find_map(|(prefix, op)| criterion.strip_prefix(prefix).map(|rest| (*op, rest)))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Threshold of a criterion, typed once at parse time
#[derive(Debug, Clone, PartialEq)]
pub enum Threshold {
    /// Numeric threshold (integer and floating-point literals)
    Number(f64),
    /// Text threshold (e.g. a FILTER label)
    Text(String),
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Threshold::Number(n) => write!(f, "{}", n),
            Threshold::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A parsed criterion: operator plus threshold, immutable once built
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    operator: Operator,
    threshold: Threshold,
}

impl Predicate {
    /// Parse a criterion string of the form `<operator><threshold>`.
    ///
    /// The threshold literal is trimmed and tried as a number first; a
    /// non-numeric literal is kept as text unless the operator is an ordering
    /// operator, which is a configuration error. `field` is carried for error
    /// context only.
    ///
    /// # Examples
    ///
    /// ```
    /// use ferro_filter::criteria::{Operator, Predicate, Threshold};
    ///
    /// let p = Predicate::parse("TLOD", ">=10").unwrap();
    /// assert_eq!(p.operator(), Operator::GreaterEqual);
    /// assert_eq!(p.threshold(), &Threshold::Number(10.0));
    ///
    /// let p = Predicate::parse("FILTER", "==PASS").unwrap();
    /// assert_eq!(p.threshold(), &Threshold::Text("PASS".to_string()));
    /// ```
    pub fn parse(field: &str, criterion: &str) -> Result<Self, FilterError> {
        let trimmed = criterion.trim();

        let (operator, rest) = Operator::strip(trimmed).ok_or_else(|| {
            FilterError::malformed(field, criterion, "no recognized operator")
        })?;

        let literal = rest.trim();
        if literal.is_empty() {
            return Err(FilterError::malformed(field, criterion, "empty threshold"));
        }

        let threshold = match literal.parse::<f64>() {
            Ok(n) => Threshold::Number(n),
            Err(_) if operator.is_ordering() => {
                return Err(FilterError::invalid_operator(
                    field,
                    criterion,
                    operator.symbol(),
                ));
            }
            Err(_) => Threshold::Text(literal.to_string()),
        };

        Ok(Self {
            operator,
            threshold,
        })
    }

    /// The comparison operator
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// The parsed threshold
    pub fn threshold(&self) -> &Threshold {
        &self.threshold
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator, self.threshold)
    }
}
