//! Circular dependency detection for formula cells.
//!
//! Before a formula is accepted for a cell, we must verify that none of the
//! cells it reads can reach the cell itself (e.g., A1 reads B1, B1 reads C1,
//! C1 reads A1). This is a plain reachability search with a visited set, so
//! shared downstream cells (a diamond of references) are walked once and never
//! mistaken for a cycle.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use super::position::Position;

/// Search for `target` starting from each of `starts`, following `edges`.
///
/// Returns the path from the start it was reached from to `target`
/// (inclusive at both ends), or None when `target` is unreachable.
pub fn find_path<I, F, E>(starts: I, target: Position, mut edges: F) -> Option<Vec<Position>>
where
    I: IntoIterator<Item = Position>,
    F: FnMut(Position) -> E,
    E: IntoIterator<Item = Position>,
{
    let mut came_from: HashMap<Position, Option<Position>> = HashMap::new();
    let mut stack = Vec::new();

    for start in starts {
        if let Entry::Vacant(slot) = came_from.entry(start) {
            slot.insert(None);
            stack.push(start);
        }
    }

    while let Some(current) = stack.pop() {
        if current == target {
            let mut path = vec![current];
            let mut cursor = current;
            while let Some(Some(prev)) = came_from.get(&cursor) {
                path.push(*prev);
                cursor = *prev;
            }
            path.reverse();
            return Some(path);
        }

        for next in edges(current) {
            if let Entry::Vacant(slot) = came_from.entry(next) {
                slot.insert(Some(current));
                stack.push(next);
            }
        }
    }

    None
}

/// True iff `target` is one of `starts` or reachable from them via `edges`.
pub fn reaches<I, F, E>(starts: I, target: Position, edges: F) -> bool
where
    I: IntoIterator<Item = Position>,
    F: FnMut(Position) -> E,
    E: IntoIterator<Item = Position>,
{
    find_path(starts, target, edges).is_some()
}
