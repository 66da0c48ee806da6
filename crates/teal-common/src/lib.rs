//! Common utilities and data structures for Teal.
//!
//! This crate provides foundational types used across the Teal crates:
//! - `Span`: Source code location tracking
//! - `LineIndex`: Byte offset to line/column conversion

mod span;

pub use span::{BytePos, LineIndex, Span};
