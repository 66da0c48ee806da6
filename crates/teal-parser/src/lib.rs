//! Parser for Teal libraries.
//!
//! This crate provides a recursive descent parser that turns library source
//! into a [`Library`]:
//!
//! ```text
//! double(x): x + x
//! triple(x): !double(x) + x
//! answer(): 42
//! ```
//!
//! ## Error Recovery
//!
//! A malformed definition is skipped up to the end of its line, so every
//! broken definition in a file is reported in a single pass.

mod parser;

pub use parser::Parser;

use teal_common::LineIndex;
use teal_diagnostic::{Diagnostic, emit, render};
use teal_lexer::Lexer;
use teal_syntax::Library;
use thiserror::Error;

/// Source text that could not be turned into a library.
#[derive(Debug, Error)]
#[error("{}", summarize(.diagnostics))]
pub struct ParseError {
    diagnostics: Vec<Diagnostic>,
    lines: LineIndex,
}

impl ParseError {
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// `(line, column)` of the first problem, both 1-based.
    pub fn location(&self) -> Option<(usize, usize)> {
        self.diagnostics
            .first()
            .map(|d| self.lines.line_col(d.span.start))
    }

    /// Render every diagnostic as plain text.
    pub fn render(&self, source: &str, filename: &str) -> String {
        self.diagnostics
            .iter()
            .map(|d| render(source, filename, d))
            .collect()
    }

    /// Print every diagnostic to stderr.
    pub fn emit(&self, source: &str, filename: &str) -> std::io::Result<()> {
        for diagnostic in &self.diagnostics {
            emit(source, filename, diagnostic)?;
        }
        Ok(())
    }
}

fn summarize(diagnostics: &[Diagnostic]) -> String {
    match diagnostics {
        [] => "failed to parse library".to_string(),
        [only] => format!("failed to parse library: {}", only.message),
        [first, rest @ ..] => format!(
            "failed to parse library: {} (and {} more error{})",
            first.message,
            rest.len(),
            if rest.len() == 1 { "" } else { "s" }
        ),
    }
}

/// Parse library source, keeping whatever definitions parsed cleanly.
pub fn parse_partial(source: &str) -> (Library, Vec<Diagnostic>) {
    let lexer = Lexer::new(source);
    let (tokens, mut diagnostics) = lexer.tokenize();

    let mut parser = Parser::new(tokens);
    let library = parser.parse_library();

    diagnostics.extend(parser.diagnostics());
    (library, diagnostics)
}

/// Parse library source. Any lexer or parser diagnostic makes this fail.
pub fn parse(source: &str) -> Result<Library, ParseError> {
    let (library, diagnostics) = parse_partial(source);
    if diagnostics.is_empty() {
        Ok(library)
    } else {
        Err(ParseError {
            diagnostics,
            lines: LineIndex::new(source),
        })
    }
}
