//! Comment grouping and attachment for tree-sitter-go trees
//!
//! tree-sitter reports comments as extras wherever they happen to fall in
//! the tree, so attachment is recomputed from positions alone:
//!
//! - Comments on consecutive lines with no token between them form a group.
//! - A comment starting on the same line as the token before it opens a
//!   *line group*, which only extends along that line.
//! - A node's doc is the non-line group ending on the line directly above
//!   it with no token in between.
//! - A node's line comment is the group starting on the node's last line,
//!   after it, with at most `,` or `;` in between.

use tree_sitter::Node;

use crate::syntax::{Comment, CommentGroup};
use crate::types::{LineIndex, Span};

#[derive(Debug, Clone)]
struct Token {
    span: Span,
    separator: bool,
}

#[derive(Debug, Clone)]
struct Group {
    group: CommentGroup,
    span: Span,
    start_line: u32,
    end_line: u32,
    line_group: bool,
}

/// Position index over all tokens and comment groups of one file.
#[derive(Debug, Clone)]
pub struct CommentIndex {
    tokens: Vec<Token>,
    groups: Vec<Group>,
}

impl CommentIndex {
    /// Walk the whole tree once, splitting leaves into tokens and comments.
    pub fn build(root: Node, code: &str, lines: &LineIndex) -> Self {
        let mut tokens = Vec::new();
        let mut comments = Vec::new();

        let mut cursor = root.walk();
        'walk: loop {
            let node = cursor.node();
            let is_comment = node.kind() == "comment";
            if is_comment {
                comments.push(Comment::new(
                    &code[node.byte_range()],
                    Span::from_range(node.byte_range()),
                ));
            } else if node.child_count() == 0 && !node.is_missing() {
                let text = &code[node.byte_range()];
                // newline terminators are tokens to tree-sitter but not to us
                if !text.trim().is_empty() {
                    tokens.push(Token {
                        span: Span::from_range(node.byte_range()),
                        separator: text == "," || text == ";",
                    });
                }
            }

            if !is_comment && cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    break 'walk;
                }
            }
        }

        tokens.sort_by_key(|t| t.span.start);
        comments.sort_by_key(|c| c.span.start);

        let mut index = Self {
            tokens,
            groups: Vec::new(),
        };
        index.group_comments(comments, lines);
        index
    }

    fn group_comments(&mut self, comments: Vec<Comment>, lines: &LineIndex) {
        let mut groups: Vec<Group> = Vec::new();
        for comment in comments {
            let start_line = lines.line(comment.span.start);
            let end_line = lines.last_line(comment.span);

            if let Some(current) = groups.last_mut() {
                let adjacent = !self.token_between(current.span.end, comment.span.start);
                let extends = if current.line_group {
                    start_line == current.end_line
                } else {
                    start_line <= current.end_line + 1
                };
                if adjacent && extends {
                    current.span = current.span.cover(comment.span);
                    current.end_line = end_line;
                    current.group.comments.push(comment);
                    continue;
                }
            }

            let line_group = self
                .token_before(comment.span.start)
                .is_some_and(|token| lines.last_line(token.span) == start_line);
            groups.push(Group {
                span: comment.span,
                group: CommentGroup::new(vec![comment]),
                start_line,
                end_line,
                line_group,
            });
        }
        self.groups = groups;
    }

    fn token_before(&self, offset: u32) -> Option<&Token> {
        let idx = self.tokens.partition_point(|t| t.span.end <= offset);
        idx.checked_sub(1).map(|i| &self.tokens[i])
    }

    fn tokens_in(&self, start: u32, end: u32) -> &[Token] {
        let from = self.tokens.partition_point(|t| t.span.start < start);
        let to = self.tokens.partition_point(|t| t.span.start < end);
        &self.tokens[from..to.max(from)]
    }

    fn token_between(&self, start: u32, end: u32) -> bool {
        !self.tokens_in(start, end).is_empty()
    }

    /// Leading doc group for a node starting at `span.start`.
    pub fn doc_for(&self, span: Span, lines: &LineIndex) -> Option<CommentGroup> {
        let idx = self.groups.partition_point(|g| g.span.end <= span.start);
        let group = &self.groups[idx.checked_sub(1)?];
        let node_line = lines.line(span.start);
        if group.line_group
            || group.end_line + 1 != node_line
            || self.token_between(group.span.end, span.start)
        {
            return None;
        }
        Some(group.group.clone())
    }

    /// Same-line trailing group for a node ending at `span.end`.
    pub fn line_comment_for(&self, span: Span, lines: &LineIndex) -> Option<CommentGroup> {
        let idx = self.groups.partition_point(|g| g.span.start < span.end);
        let group = self.groups.get(idx)?;
        if group.start_line != lines.last_line(span) {
            return None;
        }
        if !self
            .tokens_in(span.end, group.span.start)
            .iter()
            .all(|t| t.separator)
        {
            return None;
        }
        Some(group.group.clone())
    }

    /// Every group in source order.
    pub fn groups(&self) -> Vec<CommentGroup> {
        self.groups.iter().map(|g| g.group.clone()).collect()
    }
}
