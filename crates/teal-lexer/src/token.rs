//! Token definitions for Teal.

use std::fmt;

use teal_common::Span;

/// A token with its kind and span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The kind of a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // Literals
    Int(i64),

    // Identifiers
    Ident(String),

    // Delimiters
    LParen, // (
    RParen, // )

    // Operators
    Plus, // +
    Bang, // !

    // Punctuation
    Colon, // :

    /// Definitions are separated by line breaks.
    Newline,

    // Special
    Eof,
    Error,
}

impl TokenKind {
    /// A short description used in "expected ..., found ..." messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Int(n) => format!("integer `{n}`"),
            TokenKind::Ident(name) => format!("identifier `{name}`"),
            TokenKind::Newline => "end of line".to_string(),
            TokenKind::Eof => "end of input".to_string(),
            TokenKind::Error => "invalid token".to_string(),
            other => format!("`{other}`"),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Int(n) => write!(f, "{n}"),
            TokenKind::Ident(name) => write!(f, "{name}"),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Bang => write!(f, "!"),
            TokenKind::Colon => write!(f, ":"),
            TokenKind::Newline => write!(f, "\\n"),
            TokenKind::Eof => write!(f, "<eof>"),
            TokenKind::Error => write!(f, "<error>"),
        }
    }
}
