//! Call frames.

use teal_syntax::FunctionDef;

use crate::InterpretError;

/// The binding visible while one function body is evaluated: its own
/// parameter and nothing else.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    function: &'a FunctionDef,
    argument: Option<i64>,
}

impl<'a> Frame<'a> {
    /// Bind `argument` to the parameter of `function`. The argument must be
    /// present exactly when the function declares a parameter.
    pub fn bind(function: &'a FunctionDef, argument: Option<i64>) -> Result<Self, InterpretError> {
        if function.param.is_some() != argument.is_some() {
            return Err(InterpretError::ArityMismatch {
                function: function.name().to_owned(),
                expected: function.arity(),
                given: usize::from(argument.is_some()),
            });
        }
        Ok(Self { function, argument })
    }

    pub fn function(&self) -> &'a FunctionDef {
        self.function
    }

    /// The value bound to `name`, if `name` is this frame's parameter.
    pub fn lookup(&self, name: &str) -> Option<i64> {
        match self.function.param_name() {
            Some(param) if param == name => self.argument,
            _ => None,
        }
    }
}

/// Stack of active frames for one top-level invocation.
///
/// Nested calls push their own frame and pop it on the way out, so the
/// caller's binding is back on top as soon as the callee returns.
///
/// The stack also tracks its peak depth, so a memoizing interpreter can
/// learn how many frames a call needed and replay that requirement on a
/// cache hit.
#[derive(Debug)]
pub struct CallStack<'a> {
    frames: Vec<Frame<'a>>,
    limit: Option<usize>,
    peak: usize,
}

impl<'a> CallStack<'a> {
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            frames: Vec::new(),
            limit,
            peak: 0,
        }
    }

    pub fn push(&mut self, frame: Frame<'a>) -> Result<(), InterpretError> {
        self.reserve(1)?;
        self.frames.push(frame);
        Ok(())
    }

    /// Check that `frames` more frames fit on top of the current ones and
    /// count them towards the peak, without pushing anything.
    pub fn reserve(&mut self, frames: usize) -> Result<(), InterpretError> {
        let depth = self.frames.len() + frames;
        if let Some(limit) = self.limit
            && depth > limit
        {
            return Err(InterpretError::CallDepthExceeded { limit });
        }
        self.peak = self.peak.max(depth);
        Ok(())
    }

    /// Deepest depth reached since the last [`CallStack::reset_peak`].
    pub fn peak(&self) -> usize {
        self.peak
    }

    /// Restart peak tracking at the current depth. Returns the previous
    /// peak, to be handed back to [`CallStack::restore_peak`].
    pub fn reset_peak(&mut self) -> usize {
        std::mem::replace(&mut self.peak, self.frames.len())
    }

    pub fn restore_peak(&mut self, previous: usize) {
        self.peak = self.peak.max(previous);
    }

    pub fn pop(&mut self) -> Option<Frame<'a>> {
        self.frames.pop()
    }

    /// The innermost frame.
    pub fn current(&self) -> Option<&Frame<'a>> {
        self.frames.last()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Name of the function whose body is being evaluated.
    pub fn current_function(&self) -> &str {
        self.current().map_or("<top level>", |frame| frame.function().name())
    }

    /// Resolve a variable against the innermost frame only; outer frames
    /// belong to callers and are never consulted.
    pub fn lookup(&self, name: &str) -> Option<i64> {
        self.current().and_then(|frame| frame.lookup(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teal_common::Span;
    use teal_syntax::{Expr, Ident};

    fn def(name: &str, param: Option<&str>) -> FunctionDef {
        FunctionDef::new(
            Ident::new(name, Span::DUMMY),
            param.map(|p| Ident::new(p, Span::DUMMY)),
            Expr::literal(0, Span::DUMMY),
            Span::DUMMY,
        )
    }

    #[test]
    fn test_bind_checks_arity_both_ways() {
        let unary = def("f", Some("n"));
        let nullary = def("g", None);

        assert!(Frame::bind(&unary, Some(1)).is_ok());
        assert!(Frame::bind(&nullary, None).is_ok());
        assert!(matches!(
            Frame::bind(&unary, None),
            Err(InterpretError::ArityMismatch { expected: 1, given: 0, .. })
        ));
        assert!(matches!(
            Frame::bind(&nullary, Some(1)),
            Err(InterpretError::ArityMismatch { expected: 0, given: 1, .. })
        ));
    }

    #[test]
    fn test_lookup_sees_only_innermost_frame() {
        let outer = def("g", Some("x"));
        let inner = def("f", Some("n"));
        let mut stack = CallStack::new(None);

        stack.push(Frame::bind(&outer, Some(4)).unwrap()).unwrap();
        assert_eq!(stack.lookup("x"), Some(4));

        stack.push(Frame::bind(&inner, Some(3)).unwrap()).unwrap();
        assert_eq!(stack.lookup("n"), Some(3));
        assert_eq!(stack.lookup("x"), None);
        assert_eq!(stack.current_function(), "f");

        stack.pop();
        assert_eq!(stack.lookup("x"), Some(4));
        assert_eq!(stack.lookup("n"), None);
    }

    #[test]
    fn test_depth_limit() {
        let f = def("f", None);
        let mut stack = CallStack::new(Some(2));
        stack.push(Frame::bind(&f, None).unwrap()).unwrap();
        stack.push(Frame::bind(&f, None).unwrap()).unwrap();
        assert!(matches!(
            stack.push(Frame::bind(&f, None).unwrap()),
            Err(InterpretError::CallDepthExceeded { limit: 2 })
        ));
        assert_eq!(stack.depth(), 2);
    }

    #[test]
    fn test_reserve_counts_towards_peak() {
        let f = def("f", None);
        let mut stack = CallStack::new(Some(4));
        stack.push(Frame::bind(&f, None).unwrap()).unwrap();
        assert_eq!(stack.peak(), 1);

        let outer = stack.reset_peak();
        assert_eq!(stack.peak(), 1);
        stack.reserve(3).unwrap();
        assert_eq!(stack.peak(), 4);
        assert_eq!(stack.depth(), 1);
        assert_eq!(
            stack.reserve(4),
            Err(InterpretError::CallDepthExceeded { limit: 4 })
        );

        stack.restore_peak(outer);
        assert_eq!(stack.peak(), 4);
    }
}
