//! Interpreter for Teal libraries.
//!
//! This crate implements a tree-walking interpreter over a parsed
//! [`Library`](teal_syntax::Library), with an optional memoizing layer:
//!
//! ```
//! use std::sync::Arc;
//! use teal_eval::{Interpreter, cached_interpreter};
//!
//! let library = Arc::new(teal_parser::parse("f(n): n + 1").unwrap());
//! let interpreter = cached_interpreter(library).unwrap();
//! assert_eq!(interpreter.invoke(Some("f"), Some(41)), Ok(42));
//! ```

mod cache;
mod env;
mod error;
mod eval;
mod factory;
mod interpreter;
mod options;

pub use cache::{CacheKey, CacheStats, CachedInterpreter};
pub use env::{CallStack, Frame};
pub use error::{EvalError, InterpretError};
pub use eval::Evaluator;
pub use factory::{
    basic_interpreter, basic_interpreter_with, cached_interpreter, cached_interpreter_with,
    interpreter,
};
pub use interpreter::{BasicInterpreter, Interpreter};
pub use options::{InterpreterMode, InterpreterOptions};
