//! Lexical analyzer for LUT equations.
//!
//! Converts equation text into a sequence of [`Token`]s. ASCII whitespace
//! between tokens is skipped. The returned vector always ends with a
//! [`TokenKind::Eof`] token.

use crate::token::{Token, TokenKind};
use lutforge_common::{ParseError, ParseTarget, MAX_SUPPORTED_INPUTS, MIN_SUPPORTED_INPUTS};

/// Lexes the given equation text into a vector of tokens.
pub fn lex(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut lexer = Lexer {
        text: source,
        source: source.as_bytes(),
        pos: 0,
    };
    lexer.lex_all()
}

struct Lexer<'a> {
    text: &'a str,
    source: &'a [u8],
    pos: usize,
}

impl Lexer<'_> {
    fn lex_all(&mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            while self.pos < self.source.len() && self.source[self.pos].is_ascii_whitespace() {
                self.pos += 1;
            }
            if self.pos >= self.source.len() {
                tokens.push(Token {
                    kind: TokenKind::Eof,
                    offset: self.pos,
                });
                return Ok(tokens);
            }
            tokens.push(self.next_token()?);
        }
    }

    fn error(&self, offset: usize, reason: &str) -> ParseError {
        ParseError::new(ParseTarget::Equation, self.text, offset, reason)
    }

    fn next_token(&mut self) -> Result<Token, ParseError> {
        let start = self.pos;
        let kind = match self.source[self.pos] {
            b'0' => TokenKind::Zero,
            b'1' => TokenKind::One,
            b'~' => TokenKind::Tilde,
            b'*' => TokenKind::And,
            b'+' => TokenKind::Or,
            b'@' => TokenKind::Xor,
            b'(' => TokenKind::LeftParen,
            b')' => TokenKind::RightParen,
            b'A' => {
                let index = self
                    .source
                    .get(self.pos + 1)
                    .filter(|b| b.is_ascii_digit())
                    .map(|b| u32::from(b - b'0'))
                    .filter(|i| (MIN_SUPPORTED_INPUTS..=MAX_SUPPORTED_INPUTS).contains(i))
                    .ok_or_else(|| self.error(start, "expected an input pin A1 through A6"))?;
                self.pos += 1;
                TokenKind::Input(index)
            }
            _ => return Err(self.error(start, "unrecognized character")),
        };
        self.pos += 1;
        Ok(Token {
            kind,
            offset: start,
        })
    }
}
