//! Computed cell values.
//!
//! A [`Value`] is what reading a cell produces. Evaluation failures are part of
//! the value domain ([`CellError`]) rather than faults, so a formula that reads
//! a broken cell simply yields an error value of its own.

use std::fmt;
use thiserror::Error;

use super::format::format_number;

/// Evaluation error category, rendered as its sheet token.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
pub enum CellError {
    /// Reference to a position outside the grid or to a cleared cell.
    #[error("#REF!")]
    Ref,
    /// Operand cannot be interpreted as a number.
    #[error("#VALUE!")]
    Value,
    /// Non-finite arithmetic result, e.g. division by zero.
    #[error("#ARITHM!")]
    Arithmetic,
}

/// The result of reading a cell.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Error(CellError),
}

impl Value {
    /// Interpret the value as a formula operand.
    ///
    /// Empty text counts as zero; other text must be a complete, finite
    /// decimal number.
    pub fn to_operand(&self) -> Result<f64, CellError> {
        match self {
            Value::Number(n) => Ok(*n),
            Value::Error(e) => Err(*e),
            Value::Text(s) if s.is_empty() => Ok(0.0),
            Value::Text(s) => s
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite() && looks_numeric(s))
                .ok_or(CellError::Value),
        }
    }
}

// `f64::from_str` also accepts "inf" and "NaN"; sheet text never means those.
fn looks_numeric(s: &str) -> bool {
    s.bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
}

impl From<Result<f64, CellError>> for Value {
    fn from(result: Result<f64, CellError>) -> Self {
        match result {
            Ok(n) => Value::Number(n),
            Err(e) => Value::Error(e),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Text(s) => f.write_str(s),
            Value::Error(e) => write!(f, "{}", e),
        }
    }
}
