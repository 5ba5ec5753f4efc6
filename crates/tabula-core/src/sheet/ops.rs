use std::collections::HashSet;

use log::{debug, trace, warn};
use tabula_engine::engine::{Position, find_path};

use super::Sheet;
use super::cell::{Cell, CellContent};
use super::state::check_position;
use crate::error::{Result, TabulaError};

impl Sheet {
    /// Set cell contents from input text.
    ///
    /// The edit is all-or-nothing: on an invalid position, a formula that
    /// fails to parse, or a formula that would make the cell depend on itself,
    /// the sheet is left untouched.
    pub fn set_cell(&mut self, pos: Position, text: &str) -> Result<()> {
        check_position(pos)?;
        let content = CellContent::from_input(text)?;
        self.check_cycle(pos, content.referenced_cells())?;

        let created = !self.cells.contains_key(&pos);
        if created {
            self.cells.insert(pos, Cell::new_empty());
        }

        self.detach_children(pos);
        if let Some(cell) = self.cells.get_mut(&pos) {
            cell.content = content;
        }
        self.attach_children(pos);
        if created {
            self.reattach_dependents(pos);
        }

        // Dependents may hold values computed from the old content.
        self.invalidate_dependents(pos);

        if !text.is_empty() {
            self.size.include(pos);
        } else if self.size.is_on_boundary(pos) {
            self.recompute_size();
        }

        debug!("set {} to {:?}", pos, text);
        Ok(())
    }

    /// Clear the specified cell.
    ///
    /// The cell is removed from storage and from the graph in both
    /// directions. Formulas that read it evaluate to `#REF!` until the
    /// position holds a cell again.
    pub fn clear_cell(&mut self, pos: Position) -> Result<()> {
        check_position(pos)?;
        if !self.cells.contains_key(&pos) {
            return Ok(());
        }

        self.invalidate_dependents(pos);
        self.detach_children(pos);

        if let Some(cell) = self.cells.remove(&pos) {
            for parent in &cell.parents {
                if let Some(parent_cell) = self.cells.get_mut(parent) {
                    parent_cell.children.remove(&pos);
                }
            }
            if !cell.parents.is_empty() {
                self.detached
                    .entry(pos)
                    .or_default()
                    .extend(cell.parents.iter().copied());
            }
        }

        if self.size.is_on_boundary(pos) {
            self.recompute_size();
        }

        debug!("cleared {}", pos);
        Ok(())
    }

    /// Reject `refs` for the cell at `pos` if any of them can reach `pos`.
    ///
    /// The walk follows each formula's references rather than live child
    /// edges, so references to cleared positions are covered too. The current
    /// edges of `pos` itself are never followed since `pos` is the target.
    fn check_cycle(&self, pos: Position, refs: &[Position]) -> Result<()> {
        // Any path back to `pos` ends at a formula naming it.
        let has_readers = self.cells.get(&pos).is_some_and(|cell| !cell.parents.is_empty())
            || self.detached.contains_key(&pos);
        if !has_readers && !refs.contains(&pos) {
            return Ok(());
        }

        let cells = &self.cells;
        let path = find_path(refs.iter().copied(), pos, move |current| {
            cells
                .get(&current)
                .map(|cell| cell.referenced_cells())
                .unwrap_or_default()
                .iter()
                .copied()
        });

        match path {
            None => Ok(()),
            Some(path) => {
                let chain = std::iter::once(pos)
                    .chain(path)
                    .map(|p| p.to_string())
                    .collect::<Vec<_>>()
                    .join(" -> ");
                warn!("rejected edit of {}: {}", pos, chain);
                Err(TabulaError::CircularDependency(format!(
                    "cell {} ({})",
                    pos, chain
                )))
            }
        }
    }

    /// Remove the outgoing edges of `pos` and the matching parent links.
    ///
    /// Cleared positions the old content named stop waiting for `pos`.
    fn detach_children(&mut self, pos: Position) {
        let Some(cell) = self.cells.get_mut(&pos) else {
            return;
        };
        let children = std::mem::take(&mut cell.children);
        let refs = cell.referenced_cells().to_vec();

        for child in children {
            if let Some(child_cell) = self.cells.get_mut(&child) {
                child_cell.parents.remove(&pos);
            }
        }
        for target in refs {
            if let Some(readers) = self.detached.get_mut(&target) {
                readers.remove(&pos);
                if readers.is_empty() {
                    self.detached.remove(&target);
                }
            }
        }
    }

    /// Create edges from `pos` to every cell its content references,
    /// materializing Empty placeholders where needed.
    fn attach_children(&mut self, pos: Position) {
        let refs = match self.cells.get(&pos) {
            Some(cell) => cell.referenced_cells().to_vec(),
            None => return,
        };
        for child in refs {
            if !self.cells.contains_key(&child) {
                self.cells.insert(child, Cell::new_empty());
                self.reattach_dependents(child);
                self.invalidate_dependents(child);
            }
            if let Some(child_cell) = self.cells.get_mut(&child) {
                child_cell.parents.insert(pos);
            }
            if let Some(cell) = self.cells.get_mut(&pos) {
                cell.children.insert(child);
            }
        }
    }

    /// Relink formula cells that lost `pos` to a clear, now that `pos` has a
    /// cell again.
    fn reattach_dependents(&mut self, pos: Position) {
        let Some(dependents) = self.detached.remove(&pos) else {
            return;
        };
        for dependent in dependents {
            let still_reads = self
                .cells
                .get(&dependent)
                .is_some_and(|cell| cell.referenced_cells().contains(&pos));
            if !still_reads {
                continue;
            }
            if let Some(cell) = self.cells.get_mut(&dependent) {
                cell.children.insert(pos);
            }
            if let Some(cell) = self.cells.get_mut(&pos) {
                cell.parents.insert(dependent);
            }
            trace!("relinked {} -> {}", dependent, pos);
        }
    }

    /// Drop cached results of every cell that transitively reads `pos`.
    /// Returns the number of cells visited.
    ///
    /// A cached formula only ever reads cached formulas, so the walk stops at
    /// dependents that hold no cache: everything above them is already empty.
    fn invalidate_dependents(&mut self, pos: Position) -> usize {
        let mut to_process: Vec<Position> = match self.cells.get(&pos) {
            Some(cell) => cell.parents.iter().copied().collect(),
            None => return 0,
        };
        let mut visited = HashSet::new();
        while let Some(current) = to_process.pop() {
            if !visited.insert(current) {
                continue;
            }
            if let Some(cell) = self.cells.get_mut(&current)
                && cell.content.invalidate()
            {
                trace!("invalidated {}", current);
                to_process.extend(cell.parents.iter().copied());
            }
        }
        visited.len()
    }
}
