//! Spreadsheet engine API.
//!
//! This module provides the value-level building blocks of a sheet:
//!
//! - [`Position`], [`Size`] - Cell coordinates (A1 notation ↔ row/col indices) and extents
//! - [`Value`], [`CellError`] - Computed results and evaluation error tokens
//! - [`Formula`], [`parse_formula`] - Parse, evaluate and re-render formula text
//! - [`CellSource`] - What a formula reads cell values from
//! - [`find_path`], [`reaches`] - Reachability search used for cycle rejection
//! - [`format_number`] - Format numbers for display

mod ast;
mod cycle;
mod eval;
mod format;
mod formula;
mod lexer;
mod parser;
mod position;
mod value;

pub use ast::{BinaryOperator, Expr, UnaryOperator};
pub use cycle::{find_path, reaches};
pub use eval::CellSource;
pub use format::format_number;
pub use formula::{Formula, parse_formula};
pub use parser::parse_expression;
pub use position::{MAX_COLS, MAX_ROWS, Position, Size};
pub use value::{CellError, Value};
