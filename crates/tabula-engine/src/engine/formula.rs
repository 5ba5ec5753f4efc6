//! Parsed formulas.
//!
//! [`Formula`] is the unit a formula cell owns: the expression tree plus the
//! set of cells it reads. It can be evaluated against any [`CellSource`] and
//! rendered back to canonical text.

use super::ast::Expr;
use super::eval::CellSource;
use super::parser::parse_expression;
use super::position::Position;
use super::value::Value;
use crate::error::ParseResult;

#[derive(Clone, Debug, PartialEq)]
pub struct Formula {
    expr: Expr,
    /// In-grid references, sorted and deduplicated.
    referenced: Vec<Position>,
}

/// Parse formula text without its leading `=`.
///
/// # Example
/// ```rust
/// use tabula_engine::engine::parse_formula;
///
/// let formula = parse_formula(" (A1 + B2) * 2 ").unwrap();
/// assert_eq!(formula.expression(), "(A1+B2)*2");
/// ```
pub fn parse_formula(text: &str) -> ParseResult<Formula> {
    Ok(Formula::new(parse_expression(text)?))
}

impl Formula {
    pub fn new(expr: Expr) -> Formula {
        let mut referenced = Vec::new();
        expr.for_each_cell(&mut |pos| referenced.push(pos));
        referenced.sort();
        referenced.dedup();
        Formula { expr, referenced }
    }

    /// Evaluate against `source`. Never fails: evaluation faults come back as
    /// [`Value::Error`].
    pub fn evaluate(&self, source: &dyn CellSource) -> Value {
        self.expr.evaluate(source).into()
    }

    pub fn referenced_cells(&self) -> &[Position] {
        &self.referenced
    }

    /// Canonical formula text, without the leading `=`.
    pub fn expression(&self) -> String {
        self.expr.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::CellError;
    use std::collections::HashMap;

    fn canonical(text: &str) -> String {
        parse_formula(text).unwrap().expression()
    }

    #[test]
    fn test_canonical_text_drops_redundant_parens() {
        assert_eq!(canonical("(1)"), "1");
        assert_eq!(canonical("((A1))+(B1)"), "A1+B1");
        assert_eq!(canonical("(A1+B1)+C1"), "A1+B1+C1");
        assert_eq!(canonical("A1+(B1+C1)"), "A1+B1+C1");
        assert_eq!(canonical("(A1*B1)+C1"), "A1*B1+C1");
        assert_eq!(canonical("(A1*B1)*C1"), "A1*B1*C1");
        assert_eq!(canonical("A1*(B1*C1)"), "A1*B1*C1");
    }

    #[test]
    fn test_canonical_text_keeps_needed_parens() {
        assert_eq!(canonical("A1-(B1+C1)"), "A1-(B1+C1)");
        assert_eq!(canonical("A1-(B1-C1)"), "A1-(B1-C1)");
        assert_eq!(canonical("(A1+B1)*C1"), "(A1+B1)*C1");
        assert_eq!(canonical("A1/(B1*C1)"), "A1/(B1*C1)");
        assert_eq!(canonical("A1/(B1/C1)"), "A1/(B1/C1)");
        assert_eq!(canonical("(A1/B1)/C1"), "A1/B1/C1");
        assert_eq!(canonical("-(A1+B1)"), "-(A1+B1)");
        assert_eq!(canonical("-(A1*B1)"), "-A1*B1");
    }

    #[test]
    fn test_canonical_numbers_and_invalid_refs() {
        assert_eq!(canonical(" 1.50 + 2e3 "), "1.5+2000");
        assert_eq!(canonical("ZZZZ1 * A0"), "ZZZZ1*A0");
    }

    #[test]
    fn test_canonical_text_reparses_to_same_tree() {
        for text in ["-(A1+B1)/-C3", "1-(2-3)-4", "+A1*(B2-C3)/(D4/E5)", "1e-7*ZZZZ9"] {
            let formula = parse_formula(text).unwrap();
            let again = parse_formula(&formula.expression()).unwrap();
            assert_eq!(formula, again, "round trip of {}", text);
        }
    }

    #[test]
    fn test_referenced_cells_sorted_unique_valid() {
        let formula = parse_formula("C1+A2+A1+C1+ZZZZ1+B1").unwrap();
        assert_eq!(
            formula.referenced_cells(),
            &[
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(0, 2),
                Position::new(1, 0),
            ]
        );
        assert!(parse_formula("1+2").unwrap().referenced_cells().is_empty());
    }

    #[test]
    fn test_evaluate_wraps_errors_as_values() {
        let cells: HashMap<Position, Value> = HashMap::new();
        let formula = parse_formula("1/0").unwrap();
        assert_eq!(formula.evaluate(&cells), Value::Error(CellError::Arithmetic));
        let formula = parse_formula("6/4").unwrap();
        assert_eq!(formula.evaluate(&cells), Value::Number(1.5));
    }
}
