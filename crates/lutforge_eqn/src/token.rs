//! Token definitions for the LUT equation lexer.

use std::fmt;

/// The kind of a lexed equation token.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TokenKind {
    /// The constant `0`.
    Zero,
    /// The constant `1`.
    One,
    /// An input pin reference `A1`..`A6`, carrying the pin index.
    Input(u32),
    /// The inversion prefix `~`.
    Tilde,
    /// `*`
    And,
    /// `+`
    Or,
    /// `@`
    Xor,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// End of input.
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Zero => write!(f, "'0'"),
            TokenKind::One => write!(f, "'1'"),
            TokenKind::Input(index) => write!(f, "'A{index}'"),
            TokenKind::Tilde => write!(f, "'~'"),
            TokenKind::And => write!(f, "'*'"),
            TokenKind::Or => write!(f, "'+'"),
            TokenKind::Xor => write!(f, "'@'"),
            TokenKind::LeftParen => write!(f, "'('"),
            TokenKind::RightParen => write!(f, "')'"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

/// A token together with the byte offset where it starts.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Token {
    /// What was lexed.
    pub kind: TokenKind,
    /// Byte offset of the first character of the token.
    pub offset: usize,
}
