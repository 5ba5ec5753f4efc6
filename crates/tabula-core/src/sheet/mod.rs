//! Sheet state and logic.

mod cell;
mod eval;
mod ops;
mod print;
mod state;

pub use cell::{Cell, CellContent, ESCAPE_SIGN, FORMULA_SIGN};
pub use state::Sheet;
