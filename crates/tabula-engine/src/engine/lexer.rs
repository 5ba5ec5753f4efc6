//! Formula tokenizer.

use super::position::Position;
use crate::error::{ParseError, ParseResult};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Token {
    Number(f64),
    /// Cell reference inside the grid.
    Cell(Position),
    /// Well-formed reference outside the grid; keeps its source text.
    InvalidCell(String),
    Plus,
    Minus,
    Star,
    Slash,
    LeftParen,
    RightParen,
    Eof,
}

/// Token plus the byte offset it starts at.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Spanned {
    pub token: Token,
    pub offset: usize,
}

pub(crate) struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer { input, pos: 0 }
    }

    /// Scan the whole input. The last token is always `Eof`.
    pub fn tokenize(mut self) -> ParseResult<Vec<Spanned>> {
        let mut tokens = Vec::new();
        loop {
            let spanned = self.next_token()?;
            let done = spanned.token == Token::Eof;
            tokens.push(spanned);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn eat_while(&mut self, pred: impl Fn(u8) -> bool) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn next_token(&mut self) -> ParseResult<Spanned> {
        self.skip_whitespace();
        let offset = self.pos;

        let Some(c) = self.peek() else {
            return Ok(Spanned {
                token: Token::Eof,
                offset,
            });
        };

        let single = match c {
            b'+' => Some(Token::Plus),
            b'-' => Some(Token::Minus),
            b'*' => Some(Token::Star),
            b'/' => Some(Token::Slash),
            b'(' => Some(Token::LeftParen),
            b')' => Some(Token::RightParen),
            _ => None,
        };
        if let Some(token) = single {
            self.pos += 1;
            return Ok(Spanned { token, offset });
        }

        let token = if c.is_ascii_digit() || c == b'.' {
            self.scan_number()?
        } else if c.is_ascii_uppercase() {
            self.scan_cell()?
        } else {
            let ch = self.input[offset..].chars().next().unwrap_or('?');
            return Err(ParseError::new(
                offset,
                format!("Unexpected character '{}'", ch),
            ));
        };
        Ok(Spanned { token, offset })
    }

    fn scan_number(&mut self) -> ParseResult<Token> {
        let start = self.pos;
        let int_digits = self.eat_while(|b| b.is_ascii_digit());
        let mut frac_digits = 0;
        if self.peek() == Some(b'.') {
            self.pos += 1;
            frac_digits = self.eat_while(|b| b.is_ascii_digit());
        }
        if int_digits == 0 && frac_digits == 0 {
            return Err(ParseError::new(start, "Expected digits"));
        }

        if matches!(self.peek(), Some(b'e' | b'E')) {
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if self.eat_while(|b| b.is_ascii_digit()) == 0 {
                return Err(ParseError::new(self.pos, "Expected exponent digits"));
            }
        }

        let text = &self.input[start..self.pos];
        match text.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(Token::Number(n)),
            Ok(_) => Err(ParseError::new(start, format!("Number out of range '{}'", text))),
            Err(e) => Err(ParseError::new(
                start,
                format!("Invalid number '{}': {}", text, e),
            )),
        }
    }

    fn scan_cell(&mut self) -> ParseResult<Token> {
        let start = self.pos;
        self.eat_while(|b| b.is_ascii_uppercase());
        if self.eat_while(|b| b.is_ascii_digit()) == 0 {
            return Err(ParseError::new(
                start,
                format!("Expected row number after '{}'", &self.input[start..self.pos]),
            ));
        }
        let text = &self.input[start..self.pos];
        Ok(match Position::from_a1(text) {
            Some(pos) if pos.is_valid() => Token::Cell(pos),
            _ => Token::InvalidCell(text.to_string()),
        })
    }
}
