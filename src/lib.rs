//! Teal: a memoizing evaluator for small function libraries.
//! Teal：带记忆化的小型函数库求值器。
//!
//! A library is a list of one-line definitions, each taking at most one
//! integer parameter:
//!
//! ```
//! use teal::{Interpreter, cached_interpreter, parse};
//!
//! let source = "double(x): x + x\ntriple(x): !double(x) + x";
//! let library = parse(source).map(std::sync::Arc::new).unwrap();
//!
//! let interpreter = cached_interpreter(library).unwrap();
//! assert_eq!(interpreter.invoke(Some("triple"), Some(5)), Ok(15));
//! ```
//!
//! The individual stages live in their own crates and are re-exported
//! here:
//!
//! - [`lexer`]: source text to tokens
//! - [`parser`]: tokens to a [`Library`]
//! - [`eval`]: basic and cached interpreters
//! - [`diagnostic`]: error reports rendered with ariadne

pub use teal_common as common;
pub use teal_diagnostic as diagnostic;
pub use teal_eval as eval;
pub use teal_lexer as lexer;
pub use teal_parser as parser;
pub use teal_syntax as syntax;

pub use teal_eval::{
    BasicInterpreter, CachedInterpreter, EvalError, InterpretError, Interpreter, InterpreterMode,
    InterpreterOptions, basic_interpreter, cached_interpreter, interpreter,
};
pub use teal_parser::{ParseError, parse};
pub use teal_syntax::{Expr, ExprKind, FunctionDef, Library};
