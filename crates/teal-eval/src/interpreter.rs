//! The interpreter interface and the plain, uncached interpreter.

use std::sync::Arc;

use teal_syntax::Library;
use tracing::{debug, trace};

use crate::env::CallStack;
use crate::{EvalError, Evaluator, InterpretError, InterpreterOptions};

/// Runs functions of a parsed library.
pub trait Interpreter: Send + Sync {
    /// The evaluator that walks function bodies for this interpreter.
    fn evaluator(&self) -> &Evaluator;

    /// Evaluate one call on an existing stack.
    ///
    /// Every nested call made while a body is evaluated comes back through
    /// this method of the outermost interpreter.
    fn call<'a>(
        &'a self,
        function: &str,
        argument: Option<i64>,
        stack: &mut CallStack<'a>,
    ) -> Result<i64, InterpretError>;

    /// Invoke `function` with `argument` (`None` for a nullary function).
    ///
    /// A missing function name is an [`EvalError::InvalidArgument`]; every
    /// problem with the program itself is an [`EvalError::Interpretation`].
    fn invoke(&self, function: Option<&str>, argument: Option<i64>) -> Result<i64, EvalError> {
        let Some(function) = function else {
            return Err(EvalError::InvalidArgument("function name must not be null"));
        };

        trace!(function, ?argument, "invoke");
        let mut stack = self.evaluator().call_stack();
        self.call(function, argument, &mut stack).map_err(|err| {
            debug!(function, ?argument, error = %err, "invocation failed");
            EvalError::from(err)
        })
    }

    fn library(&self) -> &Arc<Library> {
        self.evaluator().library()
    }
}

/// Evaluates every invocation from scratch.
#[derive(Debug)]
pub struct BasicInterpreter {
    evaluator: Evaluator,
}

impl BasicInterpreter {
    pub fn new(library: Arc<Library>) -> Self {
        Self::with_options(library, InterpreterOptions::default())
    }

    pub fn with_options(library: Arc<Library>, options: InterpreterOptions) -> Self {
        Self {
            evaluator: Evaluator::new(library, options),
        }
    }
}

impl Interpreter for BasicInterpreter {
    fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    fn call<'a>(
        &'a self,
        function: &str,
        argument: Option<i64>,
        stack: &mut CallStack<'a>,
    ) -> Result<i64, InterpretError> {
        self.evaluator.apply(function, argument, stack, self)
    }
}
