//! Offset to line lookup for one source file.
//!
//! The collector never needs columns; lines are enough to tell whether a
//! comment trails the token before it or documents the token after it.

use serde::{Deserialize, Serialize};

use super::Span;

/// Byte offsets of every line start in a file, first entry always `0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineIndex {
    line_starts: Vec<u32>,
}

impl Default for LineIndex {
    fn default() -> Self {
        Self {
            line_starts: vec![0],
        }
    }
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i as u32 + 1),
        );
        Self { line_starts }
    }

    /// 0-based line containing `offset`. Offsets past the end map to the last line.
    pub fn line(&self, offset: u32) -> u32 {
        (self.line_starts.partition_point(|&start| start <= offset) - 1) as u32
    }

    /// Line holding the last byte of `span`; the start line for empty spans.
    pub fn last_line(&self, span: Span) -> u32 {
        self.line(span.end.saturating_sub(1).max(span.start))
    }
}
