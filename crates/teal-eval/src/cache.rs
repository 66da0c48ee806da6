//! Memoizing interpreter.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use teal_syntax::Library;
use tracing::debug;

use crate::env::CallStack;
use crate::{Evaluator, InterpretError, Interpreter, InterpreterOptions};

/// Identifies one memoizable computation.
///
/// `argument` is `None` for a nullary call, which never equals any integer
/// argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub function: String,
    pub argument: Option<i64>,
}

impl CacheKey {
    pub fn new(function: impl Into<String>, argument: Option<i64>) -> Self {
        Self {
            function: function.into(),
            argument,
        }
    }
}

/// A stored result together with the number of frames its evaluation
/// needed, counting the call's own frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CacheEntry {
    value: i64,
    depth: usize,
}

/// Snapshot of cache activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Interpreter that remembers the result of every successful call.
///
/// Results are stored per [`CacheKey`] for the lifetime of the interpreter
/// and never evicted: the library is immutable, so an entry can never go
/// stale. Failed calls are not stored and are evaluated again next time.
///
/// Nested calls go through the cache as well, so a function reached from
/// several call sites is evaluated once per distinct argument.
///
/// A hit replays the depth its evaluation needed against the call-depth
/// limit, so a hit fails exactly where an uncached evaluation would.
#[derive(Debug)]
pub struct CachedInterpreter {
    evaluator: Evaluator,
    entries: DashMap<CacheKey, CacheEntry>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CachedInterpreter {
    pub fn new(library: Arc<Library>) -> Self {
        Self::with_options(library, InterpreterOptions::default())
    }

    pub fn with_options(library: Arc<Library>, options: InterpreterOptions) -> Self {
        Self {
            evaluator: Evaluator::new(library, options),
            entries: DashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// The stored result for `function` applied to `argument`, if any.
    pub fn cached(&self, function: &str, argument: Option<i64>) -> Option<i64> {
        self.entries
            .get(&CacheKey::new(function, argument))
            .map(|entry| entry.value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.len(),
        }
    }
}

impl Interpreter for CachedInterpreter {
    fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    fn call<'a>(
        &'a self,
        function: &str,
        argument: Option<i64>,
        stack: &mut CallStack<'a>,
    ) -> Result<i64, InterpretError> {
        let key = CacheKey::new(function, argument);

        // The shard guard must be released before evaluating: the body may
        // call back into this map.
        let cached = self.entries.get(&key).map(|entry| *entry);
        if let Some(entry) = cached {
            stack.reserve(entry.depth)?;
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(function, ?argument, value = entry.value, "cache hit");
            return Ok(entry.value);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(function, ?argument, "cache miss");

        let base = stack.depth();
        let outer_peak = stack.reset_peak();
        let result = self.evaluator.apply(function, argument, stack, self);
        let depth = stack.peak() - base;
        stack.restore_peak(outer_peak);

        let value = result?;
        // Racing threads may both compute one key; their values agree.
        self.entries.insert(key, CacheEntry { value, depth });
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::library;
    use crate::EvalError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_nullary_key_differs_from_every_argument() {
        assert_ne!(CacheKey::new("f", None), CacheKey::new("f", Some(0)));
        assert_ne!(CacheKey::new("f", Some(1)), CacheKey::new("g", Some(1)));
        assert_eq!(CacheKey::new("f", Some(1)), CacheKey::new("f".to_string(), Some(1)));
    }

    #[test]
    fn test_hit_skips_evaluation() {
        let library = library("f(n): n + 1");
        let interpreter = CachedInterpreter::new(library.clone());
        let body = &library.get("f").unwrap().body;

        assert_eq!(interpreter.invoke(Some("f"), Some(1)), Ok(2));
        assert_eq!(interpreter.invoke(Some("f"), Some(1)), Ok(2));
        assert_eq!(body.total_visits(), 3);
        assert_eq!(interpreter.cached("f", Some(1)), Some(2));
        assert_eq!(
            interpreter.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                entries: 1
            }
        );
    }

    #[test]
    fn test_nested_calls_are_memoized() {
        let library = library("double(x): x + x\nquad(x): !double(x) + !double(x)");
        let interpreter = CachedInterpreter::new(library.clone());

        assert_eq!(interpreter.invoke(Some("quad"), Some(3)), Ok(12));
        assert_eq!(library.get("double").unwrap().body.visit_count(), 1);
        assert_eq!(interpreter.cached("double", Some(3)), Some(6));
        assert_eq!(interpreter.len(), 2);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let library = library("f(n): !g(n)\ng(): 1");
        let interpreter = CachedInterpreter::new(library.clone());
        let body = &library.get("f").unwrap().body;

        for attempt in 1..=3 {
            assert!(matches!(
                interpreter.invoke(Some("f"), Some(5)),
                Err(EvalError::Interpretation(InterpretError::ArityMismatch { .. }))
            ));
            assert_eq!(body.visit_count(), attempt);
        }
        assert!(interpreter.is_empty());
        assert_eq!(interpreter.stats().hits, 0);

        // A well-formed call afterwards still works and is stored.
        assert_eq!(interpreter.invoke(Some("g"), None), Ok(1));
        assert_eq!(interpreter.len(), 1);
    }

    #[test]
    fn test_hit_replays_recorded_depth() {
        let library = library("a(n): n\nb(n): !a(n)\nc(n): !b(n)");
        let options = InterpreterOptions::default().with_max_call_depth(3);
        let interpreter = CachedInterpreter::with_options(library, options);

        interpreter.invoke(Some("b"), Some(1)).unwrap();
        let mut stack = interpreter.evaluator().call_stack();
        assert_eq!(interpreter.call("b", Some(1), &mut stack), Ok(1));
        assert_eq!(stack.peak(), 2);

        // Two frames are already taken, so `b` would need four in total.
        let mut stack = interpreter.evaluator().call_stack();
        stack.reserve(2).unwrap();
        assert_eq!(
            interpreter.call("b", Some(1), &mut stack),
            Err(InterpretError::CallDepthExceeded { limit: 3 })
        );
    }

    #[test]
    fn test_shared_across_threads() {
        let library = library("double(x): x + x\nquad(x): !double(x) + !double(x)");
        let interpreter = Arc::new(CachedInterpreter::new(library.clone()));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let interpreter = Arc::clone(&interpreter);
                std::thread::spawn(move || {
                    (0..50)
                        .map(|n| interpreter.invoke(Some("quad"), Some(n)))
                        .collect::<Result<Vec<_>, _>>()
                })
            })
            .collect();

        for handle in handles {
            let results = handle.join().unwrap().unwrap();
            assert_eq!(results, (0..50).map(|n| 4 * n).collect::<Vec<_>>());
        }
        assert_eq!(interpreter.len(), 100);
    }
}
