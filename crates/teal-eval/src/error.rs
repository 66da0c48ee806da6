//! Evaluation errors.
//!
//! Two disjoint kinds: the caller broke a precondition of the public API
//! ([`EvalError::InvalidArgument`]), or the program being run is wrong for
//! this particular invocation ([`InterpretError`]).

use teal_common::Span;
use teal_diagnostic::{Diagnostic, DiagnosticKind, ErrorCode, Label};
use thiserror::Error;

/// Error returned by [`Interpreter::invoke`](crate::Interpreter::invoke)
/// and the interpreter constructors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error(transparent)]
    Interpretation(#[from] InterpretError),
}

impl EvalError {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, EvalError::InvalidArgument(_))
    }

    pub fn is_interpretation(&self) -> bool {
        matches!(self, EvalError::Interpretation(_))
    }

    pub fn as_interpretation(&self) -> Option<&InterpretError> {
        match self {
            EvalError::Interpretation(err) => Some(err),
            EvalError::InvalidArgument(_) => None,
        }
    }
}

/// A property of the program discovered while evaluating one invocation.
///
/// Raised where the problem occurs and passed through every enclosing call
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpretError {
    #[error("undefined function `{name}`")]
    UndefinedFunction { name: String },

    #[error("function `{function}` takes {expected} argument(s) but {given} were given")]
    ArityMismatch {
        function: String,
        expected: usize,
        given: usize,
    },

    #[error("undefined variable `{name}` in function `{function}`")]
    UndefinedVariable {
        name: String,
        function: String,
        span: Span,
    },

    #[error("integer overflow in function `{function}`")]
    Overflow { function: String, span: Span },

    #[error("maximum call depth of {limit} exceeded")]
    CallDepthExceeded { limit: usize },
}

impl InterpretError {
    pub fn code(&self) -> ErrorCode {
        match self {
            InterpretError::UndefinedFunction { .. } => ErrorCode::UndefinedFunction,
            InterpretError::ArityMismatch { .. } => ErrorCode::ArityMismatch,
            InterpretError::UndefinedVariable { .. } => ErrorCode::UndefinedVariable,
            InterpretError::Overflow { .. } => ErrorCode::IntegerOverflow,
            InterpretError::CallDepthExceeded { .. } => ErrorCode::CallDepthExceeded,
        }
    }

    /// Source location of the offending node, when there is one.
    pub fn span(&self) -> Option<Span> {
        match self {
            InterpretError::UndefinedVariable { span, .. } | InterpretError::Overflow { span, .. } => {
                Some(*span)
            }
            _ => None,
        }
    }

    /// Convert into a diagnostic that can be rendered against the library
    /// source.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let span = self.span().unwrap_or(Span::DUMMY);
        let mut diagnostic = Diagnostic::error(DiagnosticKind::Interpretation, span, self.to_string())
            .with_code(self.code());
        if let Some(span) = self.span() {
            diagnostic = diagnostic.with_label(Label::new(span, self.code().description()));
        }
        diagnostic
    }
}
