//! The Teal parser.

use teal_common::{BytePos, Span};
use teal_diagnostic::{Diagnostic, DiagnosticKind, ErrorCode, Label};
use teal_lexer::{Token, TokenKind};
use teal_syntax::{Expr, FunctionDef, Ident, Library};

/// The Teal parser.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    diagnostics: Vec<Diagnostic>,
}

impl Parser {
    /// A token list that does not end with [`TokenKind::Eof`] gets one
    /// appended after its last token.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().is_none_or(|t| t.kind != TokenKind::Eof) {
            let end = tokens.last().map_or(BytePos::ZERO, |t| t.span.end);
            tokens.push(Token::new(TokenKind::Eof, Span::new(end, end)));
        }
        Self {
            tokens,
            pos: 0,
            diagnostics: Vec::new(),
        }
    }

    pub fn diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Parse a complete library.
    pub fn parse_library(&mut self) -> Library {
        let mut library = Library::new();

        self.skip_newlines();
        while !self.at_end() {
            match self.parse_definition() {
                Some(def) => {
                    if let Err(duplicate) = library.define(def) {
                        self.error_duplicate(&duplicate, &library);
                    }
                    if !self.at_end() && !self.check(&TokenKind::Newline) {
                        self.error_trailing_tokens();
                        self.synchronize();
                    }
                }
                // Error recovery: skip the rest of the line
                None => self.synchronize(),
            }
            self.skip_newlines();
        }

        library
    }

    // ========== Definitions ==========

    /// `name ( param? ) : expr`
    fn parse_definition(&mut self) -> Option<FunctionDef> {
        let start = self.current_span();

        let name = match self.current_kind() {
            TokenKind::Ident(_) => self.parse_ident()?,
            TokenKind::Error => return None,
            other => {
                let found = other.describe();
                self.error(
                    ErrorCode::ExpectedDefinition,
                    &format!("expected function definition, found {found}"),
                );
                return None;
            }
        };

        let open = self.expect(TokenKind::LParen)?;
        let param = if matches!(self.current_kind(), TokenKind::Ident(_)) {
            self.parse_ident()
        } else {
            None
        };
        self.expect_closing(open)?;
        self.expect(TokenKind::Colon)?;
        let body = self.parse_expr()?;

        let span = start.merge(body.span);
        Some(FunctionDef::new(name, param, body, span))
    }

    fn parse_ident(&mut self) -> Option<Ident> {
        let span = self.current_span();
        match self.current_kind() {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Some(Ident::new(name, span))
            }
            TokenKind::Error => None,
            other => {
                let found = other.describe();
                self.error(
                    ErrorCode::UnexpectedToken,
                    &format!("expected identifier, found {found}"),
                );
                None
            }
        }
    }

    // ========== Expression Parsing ==========

    /// `term ('+' term)*`, left-associative.
    fn parse_expr(&mut self) -> Option<Expr> {
        let mut left = self.parse_term()?;

        while self.eat(&TokenKind::Plus) {
            let right = self.parse_term()?;
            left = Expr::add(left, right);
        }

        Some(left)
    }

    fn parse_term(&mut self) -> Option<Expr> {
        let start = self.current_span();

        match self.current_kind().clone() {
            TokenKind::Int(n) => {
                self.advance();
                Some(Expr::literal(n, start))
            }
            TokenKind::Ident(_) => self.parse_ident().map(Expr::variable),
            TokenKind::Bang => {
                self.advance();
                self.parse_call(start)
            }
            TokenKind::LParen => {
                self.advance();
                // Keep the inner node; parentheses only widen its span.
                let mut inner = self.parse_expr()?;
                inner.span = start.merge(self.expect_closing(start)?);
                Some(inner)
            }
            // Already reported by the lexer
            TokenKind::Error => None,
            other => {
                let found = other.describe();
                self.error(
                    ErrorCode::ExpectedExpression,
                    &format!("expected expression, found {found}"),
                );
                None
            }
        }
    }

    /// The part of `!name(arg?)` after the bang.
    fn parse_call(&mut self, start: Span) -> Option<Expr> {
        let function = self.parse_ident()?;
        let open = self.expect(TokenKind::LParen)?;
        let argument = if self.check(&TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        let close = self.expect_closing(open)?;
        Some(Expr::call(function, argument, start.merge(close)))
    }

    // ========== Token Helpers ==========

    fn current(&self) -> &Token {
        // Never empty: `new` guarantees a trailing `Eof`.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    fn current_span(&self) -> Span {
        self.current().span
    }

    fn at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.current_kind()) == std::mem::discriminant(kind)
    }

    fn advance(&mut self) {
        if !self.at_end() {
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn skip_newlines(&mut self) {
        while self.eat(&TokenKind::Newline) {}
    }

    /// Consume `kind` and return its span, or report an error.
    fn expect(&mut self, kind: TokenKind) -> Option<Span> {
        let span = self.current_span();
        if self.eat(&kind) {
            return Some(span);
        }
        if !self.check(&TokenKind::Error) {
            let found = self.current_kind().describe();
            self.error(
                ErrorCode::UnexpectedToken,
                &format!("expected {}, found {found}", kind.describe()),
            );
        }
        None
    }

    /// Consume the `)` matching the `(` at `open`.
    fn expect_closing(&mut self, open: Span) -> Option<Span> {
        let span = self.current_span();
        if self.eat(&TokenKind::RParen) {
            return Some(span);
        }
        if !self.check(&TokenKind::Error) {
            let found = self.current_kind().describe();
            self.diagnostics.push(
                Diagnostic::error(
                    DiagnosticKind::Parser,
                    span,
                    format!("expected `)`, found {found}"),
                )
                .with_code(ErrorCode::UnclosedDelimiter)
                .with_label(Label::new(span, "expected `)` here"))
                .with_label(Label::new(open, "unclosed `(` opened here")),
            );
        }
        None
    }

    fn error(&mut self, code: ErrorCode, message: &str) {
        let span = self.current_span();
        self.diagnostics.push(
            Diagnostic::error(DiagnosticKind::Parser, span, message)
                .with_code(code)
                .with_label(Label::new(span, "here")),
        );
    }

    fn error_trailing_tokens(&mut self) {
        let span = self.current_span();
        let found = self.current_kind().describe();
        self.diagnostics.push(
            Diagnostic::error(
                DiagnosticKind::Parser,
                span,
                format!("expected end of line after definition, found {found}"),
            )
            .with_code(ErrorCode::UnexpectedToken)
            .with_label(Label::new(span, "here"))
            .with_help("each definition must be on its own line"),
        );
    }

    fn error_duplicate(&mut self, duplicate: &FunctionDef, library: &Library) {
        let span = duplicate.name.span;
        let mut diagnostic = Diagnostic::error(
            DiagnosticKind::Parser,
            span,
            format!("function `{}` is defined more than once", duplicate.name()),
        )
        .with_code(ErrorCode::DuplicateFunction)
        .with_label(Label::new(span, "redefined here"));

        if let Some(original) = library.get(duplicate.name()) {
            diagnostic =
                diagnostic.with_label(Label::new(original.name.span, "first defined here"));
        }
        self.diagnostics.push(diagnostic);
    }

    // ========== Error Recovery ==========

    /// Skip to the end of the current line. The newline itself is left for
    /// the caller so the next definition starts cleanly.
    fn synchronize(&mut self) {
        while !self.at_end() && !self.check(&TokenKind::Newline) {
            self.advance();
        }
    }
}
