//! Recursive descent parser for LUT equations.
//!
//! Grammar:
//!
//! ```text
//! chain   := primary (op chain)?
//! primary := '~'? input | '0' | '1' | '(' chain ')'
//! op      := '*' | '+' | '@'
//! input   := 'A' [1-6]
//! ```
//!
//! Operators have no precedence. An unparenthesized chain nests to the
//! right, so `A1*A2+A3` parses as `(A1*(A2+A3))`.
//!
//! Every group and every chained operator adds a level to the tree. Input
//! nested deeper than [`MAX_NESTING`] levels is rejected.

use crate::ast::{Expression, OpType};
use crate::lexer::lex;
use crate::token::{Token, TokenKind};
use lutforge_common::{ParseError, ParseTarget};

/// Deepest tree the parser will build.
pub const MAX_NESTING: usize = 256;

/// Parses equation text into an [`Expression`].
pub fn parse_equation(text: &str) -> Result<Expression, ParseError> {
    let tokens = lex(text)?;
    let mut parser = Parser {
        text,
        tokens,
        pos: 0,
        depth: 0,
    };
    let expr = parser.parse_chain()?;
    parser.expect(TokenKind::Eof)?;
    Ok(expr)
}

struct Parser<'a> {
    text: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Token {
        // The lexer always terminates the stream with Eof.
        self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn error(&self, token: Token, reason: String) -> ParseError {
        ParseError::new(ParseTarget::Equation, self.text, token.offset, reason)
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        let token = self.peek();
        if token.kind == kind {
            Ok(self.advance())
        } else {
            Err(self.error(token, format!("expected {kind}, found {}", token.kind)))
        }
    }

    fn descend(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(self.error(self.peek(), "equation nested too deeply".to_string()));
        }
        Ok(())
    }

    fn parse_chain(&mut self) -> Result<Expression, ParseError> {
        let left = self.parse_primary()?;
        let op = match self.peek().kind {
            TokenKind::And => OpType::And,
            TokenKind::Or => OpType::Or,
            TokenKind::Xor => OpType::Xor,
            _ => return Ok(left),
        };
        self.advance();
        self.descend()?;
        let right = self.parse_chain()?;
        self.depth -= 1;
        Ok(Expression::binary(op, left, right))
    }

    fn parse_primary(&mut self) -> Result<Expression, ParseError> {
        let token = self.advance();
        match token.kind {
            TokenKind::Zero => Ok(Expression::ZERO),
            TokenKind::One => Ok(Expression::ONE),
            TokenKind::Input(index) => Ok(Expression::input(index)),
            TokenKind::Tilde => {
                let next = self.advance();
                match next.kind {
                    TokenKind::Input(index) => Ok(Expression::inverted_input(index)),
                    other => Err(self.error(next, format!("expected an input after '~', found {other}"))),
                }
            }
            TokenKind::LeftParen => {
                self.descend()?;
                let inner = self.parse_chain()?;
                self.expect(TokenKind::RightParen)?;
                self.depth -= 1;
                Ok(inner)
            }
            other => Err(self.error(token, format!("expected an operand, found {other}"))),
        }
    }
}
