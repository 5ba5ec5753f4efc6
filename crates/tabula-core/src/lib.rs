//! tabula-core - Sheet model: cell storage, dependency graph and cached evaluation.

pub mod error;
pub mod sheet;

pub use error::{Result, TabulaError};
pub use sheet::{Cell, CellContent, Sheet};

pub use tabula_engine::engine::{CellError, CellSource, Position, Size, Value};
