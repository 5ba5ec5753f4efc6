//! Formula parser
//!
//! A recursive descent parser with the usual arithmetic precedence:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | primary
//! primary := NUMBER | CELL | '(' expr ')'
//! ```

use super::ast::{BinaryOperator, Expr, UnaryOperator};
use super::lexer::{Lexer, Spanned, Token};
use crate::error::{ParseError, ParseResult};

/// Parse formula text (without the leading `=`) into an expression tree.
pub fn parse_expression(input: &str) -> ParseResult<Expr> {
    let tokens = Lexer::new(input).tokenize()?;
    let mut parser = Parser { tokens, index: 0 };

    let expr = parser.parse_expr()?;

    // Make sure we consumed all input
    let rest = parser.peek();
    if rest.token != Token::Eof {
        return Err(ParseError::new(
            rest.offset,
            format!("Unexpected characters after expression: '{}'", &input[rest.offset..]),
        ));
    }
    Ok(expr)
}

struct Parser {
    tokens: Vec<Spanned>,
    index: usize,
}

impl Parser {
    fn peek(&self) -> &Spanned {
        // tokenize() always ends with Eof, and advance() never moves past it
        &self.tokens[self.index.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Spanned {
        let spanned = self.peek().clone();
        if spanned.token != Token::Eof {
            self.index += 1;
        }
        spanned
    }

    fn parse_expr(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.peek().token {
                Token::Plus => BinaryOperator::Add,
                Token::Minus => BinaryOperator::Subtract,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.parse_term()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
    }

    fn parse_term(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek().token {
                Token::Star => BinaryOperator::Multiply,
                Token::Slash => BinaryOperator::Divide,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.parse_unary()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
    }

    fn parse_unary(&mut self) -> ParseResult<Expr> {
        let op = match self.peek().token {
            Token::Plus => UnaryOperator::Plus,
            Token::Minus => UnaryOperator::Minus,
            _ => return self.parse_primary(),
        };
        self.advance();
        let operand = self.parse_unary()?;
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let Spanned { token, offset } = self.advance();
        match token {
            Token::Number(n) => Ok(Expr::Number(n)),
            Token::Cell(pos) => Ok(Expr::Cell(pos)),
            Token::InvalidCell(text) => Ok(Expr::InvalidCell(text)),
            Token::LeftParen => {
                let inner = self.parse_expr()?;
                let close = self.advance();
                if close.token != Token::RightParen {
                    return Err(ParseError::new(close.offset, "Expected ')'"));
                }
                Ok(inner)
            }
            Token::Eof => Err(ParseError::new(offset, "Unexpected end of formula")),
            other => Err(ParseError::new(
                offset,
                format!("Unexpected token {:?}", other),
            )),
        }
    }
}
