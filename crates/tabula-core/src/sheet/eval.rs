//! Reading values out of the sheet.

use std::collections::HashSet;

use log::trace;
use tabula_engine::engine::{CellSource, Position, Value};

use super::Sheet;
use super::cell::{Cell, CellContent};

impl Sheet {
    /// Value of `cell`, which is stored at `pos`.
    pub(crate) fn evaluate(&self, pos: Position, cell: &Cell) -> Value {
        self.fill_caches(pos);
        cell.value(self)
    }

    /// Evaluate every uncached formula that `pos` depends on, deepest first.
    ///
    /// Once this returns, evaluating `pos` only reads cached results, so the
    /// call depth stays constant however long the dependency chain is.
    fn fill_caches(&self, pos: Position) {
        if !self.needs_evaluation(pos) {
            return;
        }

        // (position, children already pushed)
        let mut stack = vec![(pos, false)];
        let mut expanded = HashSet::new();
        let mut evaluated = 0usize;
        while let Some((current, ready)) = stack.pop() {
            let Some(cell) = self.cells.get(&current) else {
                continue;
            };
            if ready {
                cell.value(self);
                evaluated += 1;
                continue;
            }
            if cell.is_cached() || !expanded.insert(current) {
                continue;
            }
            stack.push((current, true));
            for &child in &cell.children {
                if !expanded.contains(&child) && self.needs_evaluation(child) {
                    stack.push((child, false));
                }
            }
        }
        trace!("filled {} caches for {}", evaluated, pos);
    }

    fn needs_evaluation(&self, pos: Position) -> bool {
        self.cells.get(&pos).is_some_and(|cell| {
            matches!(cell.content, CellContent::Formula { .. }) && !cell.is_cached()
        })
    }
}

impl CellSource for Sheet {
    fn cell_value(&self, pos: Position) -> Option<Value> {
        self.cells.get(&pos).map(|cell| self.evaluate(pos, cell))
    }
}
