//! Expression evaluation.

use std::sync::Arc;

use teal_syntax::{Expr, ExprKind, Library};

use crate::env::{CallStack, Frame};
use crate::{InterpretError, Interpreter, InterpreterOptions};

/// Walks function bodies of one library.
///
/// The evaluator itself keeps no per-call state: frames live on the
/// [`CallStack`] handed in by the caller, and nested calls are routed back
/// through an [`Interpreter`] so a caching layer sees every call, not just
/// the outermost one.
#[derive(Debug)]
pub struct Evaluator {
    library: Arc<Library>,
    options: InterpreterOptions,
}

impl Evaluator {
    pub fn new(library: Arc<Library>, options: InterpreterOptions) -> Self {
        Self { library, options }
    }

    pub fn library(&self) -> &Arc<Library> {
        &self.library
    }

    pub fn options(&self) -> &InterpreterOptions {
        &self.options
    }

    /// A fresh stack for one top-level invocation.
    pub fn call_stack(&self) -> CallStack<'_> {
        CallStack::new(self.options.max_call_depth)
    }

    /// Evaluate `function` applied to `argument`.
    ///
    /// Resolves the function, checks arity, pushes a frame, evaluates the
    /// body and pops the frame again, whether or not the body succeeded.
    pub fn apply<'a>(
        &'a self,
        function: &str,
        argument: Option<i64>,
        stack: &mut CallStack<'a>,
        dispatch: &'a dyn Interpreter,
    ) -> Result<i64, InterpretError> {
        let def = self
            .library
            .get(function)
            .ok_or_else(|| InterpretError::UndefinedFunction {
                name: function.to_owned(),
            })?;

        stack.push(Frame::bind(def, argument)?)?;
        let result = self.eval(&def.body, stack, dispatch);
        stack.pop();
        result
    }

    fn eval<'a>(
        &'a self,
        expr: &'a Expr,
        stack: &mut CallStack<'a>,
        dispatch: &'a dyn Interpreter,
    ) -> Result<i64, InterpretError> {
        expr.record_visit();

        match &expr.kind {
            ExprKind::Literal(value) => Ok(*value),

            ExprKind::Variable(name) => {
                stack
                    .lookup(&name.name)
                    .ok_or_else(|| InterpretError::UndefinedVariable {
                        name: name.name.clone(),
                        function: stack.current_function().to_owned(),
                        span: name.span,
                    })
            }

            ExprKind::Add(left, right) => {
                let left = self.eval(left, stack, dispatch)?;
                let right = self.eval(right, stack, dispatch)?;
                left.checked_add(right)
                    .ok_or_else(|| InterpretError::Overflow {
                        function: stack.current_function().to_owned(),
                        span: expr.span,
                    })
            }

            ExprKind::Call { function, argument } => {
                // The argument belongs to the caller's frame, so it is
                // evaluated before the callee pushes its own.
                let value = match argument {
                    Some(argument) => Some(self.eval(argument, stack, dispatch)?),
                    None => None,
                };
                dispatch.call(&function.name, value, stack)
            }
        }
    }
}
