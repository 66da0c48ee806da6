//! Interpreter construction.

use std::sync::Arc;

use teal_syntax::Library;

use crate::{
    BasicInterpreter, CachedInterpreter, EvalError, Interpreter, InterpreterMode,
    InterpreterOptions,
};

const NULL_LIBRARY: &str = "library must not be null";

/// Build an uncached interpreter.
///
/// Accepts an `Arc<Library>` directly or an `Option`; `None` is rejected
/// with [`EvalError::InvalidArgument`].
pub fn basic_interpreter(
    library: impl Into<Option<Arc<Library>>>,
) -> Result<BasicInterpreter, EvalError> {
    basic_interpreter_with(library, InterpreterOptions::default())
}

/// Build a memoizing interpreter. `None` is rejected like in
/// [`basic_interpreter`].
pub fn cached_interpreter(
    library: impl Into<Option<Arc<Library>>>,
) -> Result<CachedInterpreter, EvalError> {
    cached_interpreter_with(library, InterpreterOptions::default())
}

pub fn basic_interpreter_with(
    library: impl Into<Option<Arc<Library>>>,
    options: InterpreterOptions,
) -> Result<BasicInterpreter, EvalError> {
    let library = library.into().ok_or(EvalError::InvalidArgument(NULL_LIBRARY))?;
    Ok(BasicInterpreter::with_options(library, options))
}

pub fn cached_interpreter_with(
    library: impl Into<Option<Arc<Library>>>,
    options: InterpreterOptions,
) -> Result<CachedInterpreter, EvalError> {
    let library = library.into().ok_or(EvalError::InvalidArgument(NULL_LIBRARY))?;
    Ok(CachedInterpreter::with_options(library, options))
}

/// Build an interpreter chosen at runtime.
pub fn interpreter(
    library: impl Into<Option<Arc<Library>>>,
    mode: InterpreterMode,
    options: InterpreterOptions,
) -> Result<Box<dyn Interpreter>, EvalError> {
    Ok(match mode {
        InterpreterMode::Basic => Box::new(basic_interpreter_with(library, options)?),
        InterpreterMode::Cached => Box::new(cached_interpreter_with(library, options)?),
    })
}
