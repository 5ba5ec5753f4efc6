//! Formula expression tree and its canonical printing.

use std::fmt;

use super::format::format_number;
use super::position::Position;

/// Formula expression AST
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Number(f64),
    Cell(Position),
    /// Reference outside the grid, kept as written. Evaluates to `#REF!`.
    InvalidCell(String),
    Unary {
        op: UnaryOperator,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,
    Minus,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl UnaryOperator {
    fn symbol(self) -> char {
        match self {
            UnaryOperator::Plus => '+',
            UnaryOperator::Minus => '-',
        }
    }
}

impl BinaryOperator {
    fn symbol(self) -> char {
        match self {
            BinaryOperator::Add => '+',
            BinaryOperator::Subtract => '-',
            BinaryOperator::Multiply => '*',
            BinaryOperator::Divide => '/',
        }
    }
}

/// Printing precedence class of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Precedence {
    Add,
    Subtract,
    Multiply,
    Divide,
    Unary,
    Atom,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

fn needs_parens(parent: Precedence, child: Precedence, side: Side) -> bool {
    use Precedence::*;
    match (parent, child) {
        (Subtract, Add | Subtract) => side == Side::Right,
        (Multiply | Divide | Unary, Add | Subtract) => true,
        (Divide, Multiply | Divide) => side == Side::Right,
        _ => false,
    }
}

impl Expr {
    fn precedence(&self) -> Precedence {
        match self {
            Expr::Number(_) | Expr::Cell(_) | Expr::InvalidCell(_) => Precedence::Atom,
            Expr::Unary { .. } => Precedence::Unary,
            Expr::Binary { op, .. } => match op {
                BinaryOperator::Add => Precedence::Add,
                BinaryOperator::Subtract => Precedence::Subtract,
                BinaryOperator::Multiply => Precedence::Multiply,
                BinaryOperator::Divide => Precedence::Divide,
            },
        }
    }

    /// Visit every in-grid cell reference, in source order.
    pub fn for_each_cell(&self, visit: &mut impl FnMut(Position)) {
        match self {
            Expr::Cell(pos) => visit(*pos),
            Expr::Number(_) | Expr::InvalidCell(_) => {}
            Expr::Unary { operand, .. } => operand.for_each_cell(visit),
            Expr::Binary { left, right, .. } => {
                left.for_each_cell(visit);
                right.for_each_cell(visit);
            }
        }
    }

    fn write_child(
        &self,
        f: &mut fmt::Formatter<'_>,
        child: &Expr,
        side: Side,
    ) -> fmt::Result {
        if needs_parens(self.precedence(), child.precedence(), side) {
            write!(f, "({})", child)
        } else {
            write!(f, "{}", child)
        }
    }
}

/// Canonical text: no whitespace, only the parentheses the tree needs.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => f.write_str(&format_number(*n)),
            Expr::Cell(pos) => write!(f, "{}", pos),
            Expr::InvalidCell(text) => f.write_str(text),
            Expr::Unary { op, operand } => {
                write!(f, "{}", op.symbol())?;
                self.write_child(f, operand, Side::Right)
            }
            Expr::Binary { op, left, right } => {
                self.write_child(f, left, Side::Left)?;
                write!(f, "{}", op.symbol())?;
                self.write_child(f, right, Side::Right)
            }
        }
    }
}
