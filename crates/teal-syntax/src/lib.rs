//! AST and library definitions for Teal.
//!
//! A [`Library`] is the immutable result of parsing: named function
//! definitions, each with at most one parameter and a single body [`Expr`].
//! Every expression node carries a visit counter that the evaluator bumps
//! when it walks the node.

mod expr;
mod library;

pub use expr::*;
pub use library::*;
