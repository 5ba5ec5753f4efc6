//! tabula_engine - Positions, values and the formula language.

pub mod engine;
pub mod error;

pub use error::{ParseError, ParseResult};

#[cfg(test)]
mod tests {
    use crate::engine::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_a1_single_letter_columns() {
        let a1 = Position::from_a1("A1").unwrap();
        assert_eq!(a1.row, 0);
        assert_eq!(a1.col, 0);

        let b1 = Position::from_a1("B1").unwrap();
        assert_eq!(b1.row, 0);
        assert_eq!(b1.col, 1);

        let z1 = Position::from_a1("Z1").unwrap();
        assert_eq!(z1.row, 0);
        assert_eq!(z1.col, 25);
    }

    #[test]
    fn test_from_a1_multi_letter_columns() {
        assert_eq!(Position::from_a1("AA1").unwrap().col, 26);
        assert_eq!(Position::from_a1("AB1").unwrap().col, 27);
        assert_eq!(Position::from_a1("AZ1").unwrap().col, 51);
        assert_eq!(Position::from_a1("BA1").unwrap().col, 52);
    }

    #[test]
    fn test_from_a1_row_numbers() {
        assert_eq!(Position::from_a1("A1").unwrap().row, 0);
        assert_eq!(Position::from_a1("A10").unwrap().row, 9);
        assert_eq!(Position::from_a1("A100").unwrap().row, 99);
    }

    #[test]
    fn test_from_a1_case_insensitive() {
        let lower = Position::from_a1("a1").unwrap();
        assert_eq!(lower, Position::new(0, 0));

        let mixed = Position::from_a1("aA1").unwrap();
        assert_eq!(mixed.col, 26);
    }

    #[test]
    fn test_from_a1_invalid_inputs() {
        assert!(Position::from_a1("").is_none());
        assert!(Position::from_a1("123").is_none());
        assert!(Position::from_a1("ABC").is_none());
        assert!(Position::from_a1("A0").is_none());
        assert!(Position::from_a1("1A").is_none());
        assert!(Position::from_a1("A 1").is_none());
    }

    #[test]
    fn test_display_round_trip() {
        for name in ["A1", "Z9", "AA10", "XFD16384"] {
            assert_eq!(Position::from_a1(name).unwrap().to_string(), name);
        }
    }

    #[test]
    fn test_formula_reads_chain_of_values() {
        let mut cells = HashMap::new();
        cells.insert(Position::new(0, 0), Value::Number(5.0));
        let doubled = parse_formula("A1*2").unwrap();
        let value = doubled.evaluate(&cells);
        assert_eq!(value, Value::Number(10.0));

        cells.insert(Position::new(1, 0), value);
        let plus_one = parse_formula("A2+1").unwrap();
        assert_eq!(plus_one.evaluate(&cells).to_string(), "11");
    }

    #[test]
    fn test_formula_parse_error_is_reported() {
        let err = parse_formula("1+*2").unwrap_err();
        assert_eq!(err.offset, 2);
        assert!(err.to_string().contains("offset 2"));
    }
}
