//! Expression AST nodes.
//! 表达式 AST 节点。

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::Ident;
use teal_common::Span;

/// An expression node.
/// 表达式节点。
#[derive(Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    visits: VisitCounter,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self {
            kind,
            span,
            visits: VisitCounter::default(),
        }
    }

    pub fn literal(value: i64, span: Span) -> Self {
        Self::new(ExprKind::Literal(value), span)
    }

    pub fn variable(name: Ident) -> Self {
        let span = name.span;
        Self::new(ExprKind::Variable(name), span)
    }

    pub fn add(left: Expr, right: Expr) -> Self {
        let span = left.span.merge(right.span);
        Self::new(ExprKind::Add(Box::new(left), Box::new(right)), span)
    }

    pub fn call(function: Ident, argument: Option<Expr>, span: Span) -> Self {
        Self::new(
            ExprKind::Call {
                function,
                argument: argument.map(Box::new),
            },
            span,
        )
    }

    /// How many times this node has been evaluated.
    /// 此节点被求值的次数。
    pub fn visit_count(&self) -> u64 {
        self.visits.get()
    }

    /// Records one evaluation of this node. Only the evaluator calls this.
    pub fn record_visit(&self) {
        self.visits.increment();
    }

    /// Sum of the visit counters of this node and all of its descendants.
    pub fn total_visits(&self) -> u64 {
        let children = match &self.kind {
            ExprKind::Literal(_) | ExprKind::Variable(_) => 0,
            ExprKind::Add(left, right) => left.total_visits() + right.total_visits(),
            ExprKind::Call { argument, .. } => argument.as_ref().map_or(0, |a| a.total_visits()),
        };
        self.visit_count() + children
    }
}

/// Expression kind.
/// 表达式类型。
#[derive(Debug)]
pub enum ExprKind {
    /// Integer literal `42` / 整数字面量
    Literal(i64),

    /// Reference to the enclosing function's parameter / 参数引用
    Variable(Ident),

    /// Addition `a + b` / 加法
    Add(Box<Expr>, Box<Expr>),

    /// Function call `!f(x)` or `!f()` / 函数调用
    Call {
        function: Ident,
        argument: Option<Box<Expr>>,
    },
}

/// Per-node evaluation counter.
///
/// Atomic so that a library can be shared between threads; the count is
/// instrumentation only and never influences evaluation.
#[derive(Default)]
pub struct VisitCounter(AtomicU64);

impl VisitCounter {
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    pub fn increment(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}

impl fmt::Debug for VisitCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VisitCounter({})", self.get())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Literal(value) => write!(f, "{value}"),
            ExprKind::Variable(name) => write!(f, "{}", name.name),
            ExprKind::Add(left, right) => {
                write!(f, "{left} + ")?;
                // `+` is left-associative, so only a right-nested sum needs parentheses.
                if matches!(right.kind, ExprKind::Add(..)) {
                    write!(f, "({right})")
                } else {
                    write!(f, "{right}")
                }
            }
            ExprKind::Call { function, argument } => match argument {
                Some(argument) => write!(f, "!{}({argument})", function.name),
                None => write!(f, "!{}()", function.name),
            },
        }
    }
}
