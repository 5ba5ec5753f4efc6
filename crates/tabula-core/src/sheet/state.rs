use std::collections::{HashMap, HashSet};

use log::debug;
use tabula_engine::engine::{Position, Size, Value};

use super::cell::Cell;
use crate::error::{Result, TabulaError};

/// A sheet of cells and the dependency graph between them.
///
/// The sheet is the only owner of cells. Graph edges (`Cell::children`,
/// `Cell::parents`) are positions into `cells` and are kept symmetric by every
/// edit.
#[derive(Clone, Debug, Default)]
pub struct Sheet {
    /// Sparse cell storage, including Empty placeholders that formulas point at
    pub(crate) cells: HashMap<Position, Cell>,
    /// Tight bounding box of all non-empty cells
    pub(crate) size: Size,
    /// Cleared position -> formula cells that still name it. Used to relink
    /// them when the position gets a cell again.
    pub(crate) detached: HashMap<Position, HashSet<Position>>,
}

impl Sheet {
    /// Create an empty sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the cell at `pos`. `None` for positions never populated or
    /// since cleared.
    pub fn get_cell(&self, pos: Position) -> Result<Option<&Cell>> {
        check_position(pos)?;
        Ok(self.cells.get(&pos))
    }

    /// Read the value of the cell at `pos`, evaluating it if needed.
    pub fn get_value(&self, pos: Position) -> Result<Option<Value>> {
        Ok(self.get_cell(pos)?.map(|cell| self.evaluate(pos, cell)))
    }

    /// Extent of the printable area.
    pub fn printable_size(&self) -> Size {
        self.size
    }

    /// Number of stored cells, placeholders included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over all stored cells in no particular order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, &Cell)> {
        self.cells.iter().map(|(pos, cell)| (*pos, cell))
    }

    /// Rescan storage for the bounding box of non-empty cells.
    pub(crate) fn recompute_size(&mut self) {
        let mut size = Size::default();
        for (pos, cell) in &self.cells {
            if !cell.is_empty() {
                size.include(*pos);
            }
        }
        if size != self.size {
            debug!(
                "extent {}x{} -> {}x{}",
                self.size.rows, self.size.cols, size.rows, size.cols
            );
        }
        self.size = size;
    }
}

pub(crate) fn check_position(pos: Position) -> Result<()> {
    if pos.is_valid() {
        Ok(())
    } else {
        Err(TabulaError::InvalidPosition(format!(
            "row {}, column {} is outside the sheet",
            pos.row, pos.col
        )))
    }
}
