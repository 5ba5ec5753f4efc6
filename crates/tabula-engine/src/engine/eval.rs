//! Formula evaluation against a source of cell values.

use std::collections::HashMap;

use super::ast::{BinaryOperator, Expr, UnaryOperator};
use super::position::Position;
use super::value::{CellError, Value};

/// Read access to cell values, as seen by a formula.
///
/// Returning `None` means no cell exists at `pos`; formulas treat that as a
/// broken reference.
pub trait CellSource {
    fn cell_value(&self, pos: Position) -> Option<Value>;
}

impl CellSource for HashMap<Position, Value> {
    fn cell_value(&self, pos: Position) -> Option<Value> {
        self.get(&pos).cloned()
    }
}

impl Expr {
    /// Evaluate to a number, or the first error met in left-to-right order.
    pub fn evaluate(&self, source: &dyn CellSource) -> Result<f64, CellError> {
        match self {
            Expr::Number(n) => finite(*n),
            Expr::Cell(pos) => source
                .cell_value(*pos)
                .ok_or(CellError::Ref)?
                .to_operand(),
            Expr::InvalidCell(_) => Err(CellError::Ref),
            Expr::Unary { op, operand } => {
                let value = operand.evaluate(source)?;
                Ok(match op {
                    UnaryOperator::Plus => value,
                    UnaryOperator::Minus => -value,
                })
            }
            Expr::Binary { op, left, right } => {
                let lhs = left.evaluate(source)?;
                let rhs = right.evaluate(source)?;
                finite(match op {
                    BinaryOperator::Add => lhs + rhs,
                    BinaryOperator::Subtract => lhs - rhs,
                    BinaryOperator::Multiply => lhs * rhs,
                    BinaryOperator::Divide => lhs / rhs,
                })
            }
        }
    }
}

fn finite(n: f64) -> Result<f64, CellError> {
    if n.is_finite() {
        Ok(n)
    } else {
        Err(CellError::Arithmetic)
    }
}
