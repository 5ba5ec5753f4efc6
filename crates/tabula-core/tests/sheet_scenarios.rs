//! End-to-end edit scenarios against the public sheet API.

use std::collections::HashSet;

use tabula_core::{CellError, Position, Sheet, Size, TabulaError, Value};
use tabula_engine::engine::MAX_ROWS;

fn pos(name: &str) -> Position {
    name.parse().unwrap()
}

fn value(sheet: &Sheet, name: &str) -> Value {
    sheet.get_value(pos(name)).unwrap().unwrap()
}

fn text(sheet: &Sheet, name: &str) -> String {
    sheet.get_cell(pos(name)).unwrap().unwrap().text()
}

#[test]
fn test_dependent_formula_sees_upstream_edit() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "5").unwrap();
    sheet.set_cell(pos("A2"), "=A1*2").unwrap();
    assert_eq!(value(&sheet, "A2"), Value::Number(10.0));

    sheet.set_cell(pos("A1"), "7").unwrap();
    assert_eq!(value(&sheet, "A2"), Value::Number(14.0));
}

#[test]
fn test_two_cell_cycle_rejected() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "=A2").unwrap();
    let err = sheet.set_cell(pos("A2"), "=A1").unwrap_err();
    assert!(matches!(err, TabulaError::CircularDependency(_)));
    assert!(err.to_string().contains("A2"));

    let a2 = sheet.get_cell(pos("A2")).unwrap().unwrap();
    assert!(a2.is_empty());
    assert_eq!(a2.text(), "");
    assert_eq!(value(&sheet, "A1"), Value::Number(0.0));
}

#[test]
fn test_escaped_text() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "'=5").unwrap();
    assert_eq!(text(&sheet, "A1"), "'=5");
    assert_eq!(value(&sheet, "A1"), Value::Text("=5".into()));
}

#[test]
fn test_diamond_is_accepted() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("C1"), "1").unwrap();
    sheet.set_cell(pos("A1"), "=C1").unwrap();
    sheet.set_cell(pos("B1"), "=C1").unwrap();
    sheet.set_cell(pos("D1"), "=A1+B1").unwrap();
    assert_eq!(value(&sheet, "D1"), Value::Number(2.0));

    sheet.set_cell(pos("C1"), "4").unwrap();
    assert_eq!(value(&sheet, "D1"), Value::Number(8.0));
}

#[test]
fn test_clear_referenced_cell() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "3").unwrap();
    sheet.set_cell(pos("B1"), "=A1").unwrap();
    assert_eq!(value(&sheet, "B1"), Value::Number(3.0));

    sheet.clear_cell(pos("A1")).unwrap();
    assert!(sheet.get_cell(pos("A1")).unwrap().is_none());
    let b1 = sheet.get_cell(pos("B1")).unwrap().unwrap();
    assert!(!b1.children().contains(&pos("A1")));
    assert_eq!(value(&sheet, "B1"), Value::Error(CellError::Ref));
    // text is unchanged, the reference is just broken
    assert_eq!(text(&sheet, "B1"), "=A1");
}

#[test]
fn test_clear_missing_cell_is_noop() {
    let mut sheet = Sheet::new();
    sheet.clear_cell(pos("Z99")).unwrap();
    assert!(sheet.is_empty());
    assert_eq!(sheet.printable_size(), Size::default());
}

#[test]
fn test_extent_tracks_non_empty_cells() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("C2"), "x").unwrap();
    assert_eq!(sheet.printable_size(), Size::new(2, 3));

    // placeholders do not count
    sheet.set_cell(pos("A1"), "=E9").unwrap();
    assert_eq!(sheet.printable_size(), Size::new(2, 3));

    sheet.set_cell(pos("D4"), "1").unwrap();
    assert_eq!(sheet.printable_size(), Size::new(4, 4));

    sheet.clear_cell(pos("D4")).unwrap();
    assert_eq!(sheet.printable_size(), Size::new(2, 3));

    // emptying a boundary cell shrinks too
    sheet.set_cell(pos("C2"), "").unwrap();
    assert_eq!(sheet.printable_size(), Size::new(1, 1));

    sheet.clear_cell(pos("A1")).unwrap();
    assert_eq!(sheet.printable_size(), Size::default());
}

#[test]
fn test_error_values_flow_through_formulas() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "hello").unwrap();
    sheet.set_cell(pos("A2"), "=A1+1").unwrap();
    sheet.set_cell(pos("A3"), "=A2*2").unwrap();
    sheet.set_cell(pos("B1"), "=1/0").unwrap();
    sheet.set_cell(pos("B2"), "=B1+A2").unwrap();
    sheet.set_cell(pos("C1"), "=ZZZZ1").unwrap();

    assert_eq!(value(&sheet, "A3"), Value::Error(CellError::Value));
    assert_eq!(value(&sheet, "B2"), Value::Error(CellError::Arithmetic));
    assert_eq!(value(&sheet, "C1"), Value::Error(CellError::Ref));
    assert_eq!(text(&sheet, "C1"), "=ZZZZ1");

    sheet.set_cell(pos("A1"), "41").unwrap();
    assert_eq!(value(&sheet, "A3"), Value::Number(84.0));
}

#[test]
fn test_numeric_text_is_usable_by_formulas() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "2.5").unwrap();
    sheet.set_cell(pos("A2"), "=A1*4").unwrap();
    assert_eq!(value(&sheet, "A1"), Value::Text("2.5".into()));
    assert_eq!(value(&sheet, "A2"), Value::Number(10.0));
}

#[test]
fn test_text_round_trip_reproduces_cells() {
    let mut sheet = Sheet::new();
    for (name, input) in [
        ("A1", "12"),
        ("B1", "'=quoted"),
        ("C1", "= ( A1 + B2 ) * ( 2 - -A1 )"),
        ("A2", "=A1/(C1/2)"),
        ("B2", "plain words"),
    ] {
        sheet.set_cell(pos(name), input).unwrap();
    }

    let before: Vec<(String, Value)> = ["A1", "B1", "C1", "A2", "B2"]
        .iter()
        .map(|name| (text(&sheet, name), value(&sheet, name)))
        .collect();

    for (name, (cell_text, _)) in ["A1", "B1", "C1", "A2", "B2"].iter().zip(&before) {
        sheet.set_cell(pos(name), cell_text).unwrap();
    }

    for (name, (cell_text, cell_value)) in ["A1", "B1", "C1", "A2", "B2"].iter().zip(&before) {
        assert_eq!(&text(&sheet, name), cell_text);
        assert_eq!(&value(&sheet, name), cell_value);
    }
    assert_eq!(text(&sheet, "C1"), "=(A1+B2)*(2--A1)");
}

#[test]
fn test_long_chain_invalidates_every_level() {
    let mut sheet = Sheet::new();
    sheet.set_cell(Position::new(0, 0), "1").unwrap();
    for row in 1..50 {
        let formula = format!("={}+1", Position::new(row - 1, 0));
        sheet.set_cell(Position::new(row, 0), &formula).unwrap();
    }
    assert_eq!(sheet.get_value(Position::new(49, 0)).unwrap(), Some(Value::Number(50.0)));

    sheet.set_cell(Position::new(0, 0), "101").unwrap();
    assert_eq!(sheet.get_value(Position::new(49, 0)).unwrap(), Some(Value::Number(150.0)));
}

#[test]
fn test_grid_deep_chain_built_top_down() {
    // A1 = A2 + 1, A2 = A3 + 1, ... down to the last row, filled in last.
    let mut sheet = Sheet::new();
    for row in 0..MAX_ROWS - 1 {
        let formula = format!("={}+1", Position::new(row + 1, 0));
        sheet.set_cell(Position::new(row, 0), &formula).unwrap();
    }
    let bottom = Position::new(MAX_ROWS - 1, 0);
    sheet.set_cell(bottom, "1").unwrap();

    let top = Position::new(0, 0);
    assert_eq!(sheet.get_value(top).unwrap(), Some(Value::Number(MAX_ROWS as f64)));

    sheet.set_cell(bottom, "=B1").unwrap();
    sheet.set_cell(Position::new(0, 1), "10").unwrap();
    assert_eq!(
        sheet.get_value(top).unwrap(),
        Some(Value::Number((MAX_ROWS + 9) as f64))
    );

    // Closing the loop from the bottom is still caught.
    assert!(sheet.set_cell(Position::new(0, 1), "=A1").is_err());
}

#[test]
fn test_parents_of_shared_input() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "=C1*2").unwrap();
    sheet.set_cell(pos("B1"), "=C1+C1").unwrap();
    let c1 = sheet.get_cell(pos("C1")).unwrap().unwrap();
    assert_eq!(c1.parents(), &HashSet::from([pos("A1"), pos("B1")]));
}
