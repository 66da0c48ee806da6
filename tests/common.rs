//! Integration tests for teal-common crate.

use teal_common::{BytePos, LineIndex, Span};

#[test]
fn test_span_merge() {
    let a = Span::from_usize(10, 20);
    let b = Span::from_usize(15, 30);
    let merged = a.merge(b);
    assert_eq!(merged.start.0, 10);
    assert_eq!(merged.end.0, 30);
}

#[test]
fn test_span_merge_is_order_independent() {
    let a = Span::from_usize(4, 6);
    let b = Span::from_usize(0, 2);
    assert_eq!(a.merge(b), b.merge(a));
}

#[test]
fn test_span_len_and_range() {
    let span = Span::from_usize(5, 15);
    assert_eq!(span.len(), 10);
    assert_eq!(span.range(), 5..15);
    assert!(!span.is_empty());
    assert!(Span::DUMMY.is_empty());
}

#[test]
fn test_byte_pos_conversions() {
    assert_eq!(BytePos::from(7usize), BytePos(7));
    assert_eq!(usize::from(BytePos(7)), 7);
}

#[test]
fn test_line_index_single_line() {
    let index = LineIndex::new("f(): 1");
    assert_eq!(index.line_count(), 1);
    assert_eq!(index.line_col(BytePos(0)), (1, 1));
    assert_eq!(index.line_col(BytePos(5)), (1, 6));
}

#[test]
fn test_line_index_multiple_lines() {
    let source = "f(): 1\ng(): 2\n\nh(): 3";
    let index = LineIndex::new(source);
    assert_eq!(index.line_count(), 4);

    let g = source.find('g').unwrap();
    assert_eq!(index.line_col(BytePos::from(g)), (2, 1));

    let h = source.find('h').unwrap();
    assert_eq!(index.line_col(BytePos::from(h)), (4, 1));

    // The newline itself belongs to the line it ends.
    assert_eq!(index.line_col(BytePos(6)), (1, 7));
}
