//! Interpreter configuration.

/// Runtime limits for an interpreter.
///
/// # Example
///
/// ```
/// use teal_eval::InterpreterOptions;
///
/// let options = InterpreterOptions::default().with_max_call_depth(500);
/// assert_eq!(options.max_call_depth, Some(500));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterpreterOptions {
    /// Maximum number of nested calls in one invocation.
    ///
    /// `None` (the default) means unlimited: a library that recurses forever
    /// will exhaust the native stack.
    pub max_call_depth: Option<usize>,
}

impl InterpreterOptions {
    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = Some(depth);
        self
    }
}

/// Which interpreter the factory builds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InterpreterMode {
    /// Evaluate every call from scratch.
    #[default]
    Basic,
    /// Memoize results per `(function, argument)`.
    Cached,
}
