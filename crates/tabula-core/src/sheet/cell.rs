//! Cell data structures for the sheet.
//!
//! - [`CellContent`] - What a cell holds (empty, literal text, or formula + cache)
//! - [`Cell`] - Content plus the cell's edges in the dependency graph

use std::cell::OnceCell;
use std::collections::HashSet;

use log::trace;
use tabula_engine::ParseResult;
use tabula_engine::engine::{CellSource, Formula, Position, Value, parse_formula};

/// Leading character of formula input.
pub const FORMULA_SIGN: char = '=';
/// Leading character that keeps input literal; dropped from the value only.
pub const ESCAPE_SIGN: char = '\'';

/// The content of a cell.
#[derive(Clone, Debug)]
pub enum CellContent {
    Empty,
    Text(String),
    Formula {
        formula: Formula,
        /// Last computed value; filled on read, cleared by upstream edits.
        cache: OnceCell<Value>,
    },
}

impl CellContent {
    /// Classify user input.
    /// - Empty string -> Empty
    /// - `=` followed by anything -> Formula (remainder parsed)
    /// - Otherwise -> Text, verbatim
    pub fn from_input(text: &str) -> ParseResult<CellContent> {
        if text.is_empty() {
            return Ok(CellContent::Empty);
        }
        if let Some(expression) = text.strip_prefix(FORMULA_SIGN)
            && !expression.is_empty()
        {
            return Ok(CellContent::Formula {
                formula: parse_formula(expression)?,
                cache: OnceCell::new(),
            });
        }
        Ok(CellContent::Text(text.to_string()))
    }

    /// Editable text; feeding it back to [`CellContent::from_input`] gives
    /// equivalent content.
    pub fn text(&self) -> String {
        match self {
            CellContent::Empty => String::new(),
            CellContent::Text(s) => s.clone(),
            CellContent::Formula { formula, .. } => {
                format!("{}{}", FORMULA_SIGN, formula.expression())
            }
        }
    }

    pub fn referenced_cells(&self) -> &[Position] {
        match self {
            CellContent::Formula { formula, .. } => formula.referenced_cells(),
            _ => &[],
        }
    }

    pub fn is_cached(&self) -> bool {
        matches!(self, CellContent::Formula { cache, .. } if cache.get().is_some())
    }

    /// Drop a cached formula result. Returns whether one was present.
    pub(crate) fn invalidate(&mut self) -> bool {
        match self {
            CellContent::Formula { cache, .. } => cache.take().is_some(),
            _ => false,
        }
    }
}

/// A cell in the sheet.
///
/// `children` are the cells this one's formula reads; `parents` are the cells
/// whose formulas read this one. Both are positions into the owning sheet,
/// never ownership.
#[derive(Clone, Debug)]
pub struct Cell {
    pub(crate) content: CellContent,
    pub(crate) children: HashSet<Position>,
    pub(crate) parents: HashSet<Position>,
}

impl Cell {
    pub(crate) fn new_empty() -> Cell {
        Cell {
            content: CellContent::Empty,
            children: HashSet::new(),
            parents: HashSet::new(),
        }
    }

    pub fn content(&self) -> &CellContent {
        &self.content
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.content, CellContent::Empty)
    }

    pub fn text(&self) -> String {
        self.content.text()
    }

    /// Compute the cell's value, reading other cells through `sheet`.
    ///
    /// Formula results are cached until an upstream edit invalidates them.
    pub fn value(&self, sheet: &dyn CellSource) -> Value {
        match &self.content {
            CellContent::Empty => Value::Number(0.0),
            CellContent::Text(s) => {
                Value::Text(s.strip_prefix(ESCAPE_SIGN).unwrap_or(s).to_string())
            }
            CellContent::Formula { formula, cache } => cache
                .get_or_init(|| {
                    trace!("evaluating ={}", formula.expression());
                    formula.evaluate(sheet)
                })
                .clone(),
        }
    }

    pub fn referenced_cells(&self) -> &[Position] {
        self.content.referenced_cells()
    }

    pub fn children(&self) -> &HashSet<Position> {
        &self.children
    }

    pub fn parents(&self) -> &HashSet<Position> {
        &self.parents
    }

    pub fn is_cached(&self) -> bool {
        self.content.is_cached()
    }
}
