//! Comment association for list elements.
//!
//! The front end attaches comments to declarations and struct/interface
//! members, but not to individual parameters or results. For those, every
//! comment group lying between the list's delimiters is assigned to exactly
//! one element, scanning left to right:
//!
//! 1. strictly inside an element: that element's comment;
//! 2. starting on the line the previous element ends on: trails the previous element;
//! 3. otherwise: doc of the next element, or trails the previous one at the end of the list.
//!
//! A list without delimiters (a single unparenthesised result) only gets rule 1.

use crate::syntax::{CommentGroup, FieldList};
use crate::types::{LineIndex, Span};

/// Doc and trailing text gathered for one element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notes {
    pub doc: String,
    pub comment: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Association {
    /// One entry per element of the list, same order
    pub notes: Vec<Notes>,
    /// Comments inside a list with no elements
    pub dropped: Vec<Span>,
}

/// Assign the comment groups of `comments` (sorted by start) to the
/// elements of `list`.
pub fn associate(list: &FieldList, comments: &[CommentGroup], lines: &LineIndex) -> Association {
    let elements: Vec<Span> = list.list.iter().map(|field| field.span).collect();
    let mut association = Association {
        notes: vec![Notes::default(); elements.len()],
        dropped: Vec::new(),
    };

    let delimited = list.interior().is_some();
    let region = match list.interior() {
        Some(region) => region,
        None => match (elements.first(), elements.last()) {
            (Some(first), Some(last)) => first.cover(*last),
            _ => return association,
        },
    };
    let from = comments.partition_point(|group| group.span().start < region.start);

    for group in &comments[from..] {
        let span = group.span();
        if span.start >= region.end {
            break;
        }
        if !region.contains(span) {
            continue;
        }
        if elements.is_empty() {
            association.dropped.push(span);
            continue;
        }
        let Some((index, slot)) = place(&elements, span, lines, delimited) else {
            continue;
        };
        let notes = &mut association.notes[index];
        let text = group.text();
        match slot {
            Slot::Doc => notes.doc.push_str(&text),
            Slot::Comment => notes.comment.push_str(&text),
        }
    }

    association
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Doc,
    Comment,
}

fn place(
    elements: &[Span],
    comment: Span,
    lines: &LineIndex,
    delimited: bool,
) -> Option<(usize, Slot)> {
    if let Some(inside) = elements.iter().position(|x| x.strictly_contains(comment)) {
        return Some((inside, Slot::Comment));
    }
    if !delimited {
        return None;
    }

    // elements are disjoint and ordered, so `next` is the first one after the comment
    let next = elements.partition_point(|x| x.end <= comment.start);
    let prev = next.checked_sub(1);

    let comment_line = lines.line(comment.start);
    if let Some(prev) = prev.filter(|&prev| lines.last_line(elements[prev]) == comment_line) {
        return Some((prev, Slot::Comment));
    }
    if next < elements.len() && elements[next].start >= comment.end {
        return Some((next, Slot::Doc));
    }
    prev.map(|prev| (prev, Slot::Comment))
}
