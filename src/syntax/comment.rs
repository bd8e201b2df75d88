//! Comments and comment groups.

use crate::types::Span;

/// A single `//` or `/* */` comment, markers included in `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub span: Span,
    pub text: String,
}

impl Comment {
    pub fn new(text: impl Into<String>, span: Span) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }
}

/// Run of adjacent comments with no token or blank line between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentGroup {
    pub comments: Vec<Comment>,
}

impl CommentGroup {
    pub fn new(comments: Vec<Comment>) -> Self {
        debug_assert!(!comments.is_empty(), "comment group must not be empty");
        Self { comments }
    }

    pub fn span(&self) -> Span {
        match (self.comments.first(), self.comments.last()) {
            (Some(first), Some(last)) => Span::new(first.span.start, last.span.end),
            _ => Span::default(),
        }
    }

    /// Text of the group with comment markers removed.
    ///
    /// Line comments lose `//` and one following space; tool directives
    /// (`//go:generate`, `//line ...`) are dropped. Trailing whitespace is
    /// trimmed per line, leading and trailing blank lines removed, runs of
    /// blank lines collapsed to one. A non-empty result ends with `\n`.
    pub fn text(&self) -> String {
        let mut lines: Vec<&str> = Vec::new();
        for comment in &self.comments {
            let raw = comment.text.as_str();
            if let Some(body) = raw.strip_prefix("//") {
                let body = match body.strip_prefix(' ') {
                    Some(rest) => rest,
                    None if is_directive(body) => continue,
                    None => body,
                };
                lines.push(body);
            } else if let Some(body) = raw.strip_prefix("/*") {
                let body = body.strip_suffix("*/").unwrap_or(body);
                lines.extend(body.split('\n'));
            } else {
                lines.push(raw);
            }
        }

        let mut out: Vec<&str> = Vec::with_capacity(lines.len());
        for line in lines {
            let line = line.trim_end_matches([' ', '\t', '\r', '\n']);
            let blank = line.is_empty();
            if blank && out.last().is_none_or(|prev| prev.is_empty()) {
                continue;
            }
            out.push(line);
        }
        while out.last().is_some_and(|line| line.is_empty()) {
            out.pop();
        }

        if out.is_empty() {
            return String::new();
        }
        let mut text = out.join("\n");
        text.push('\n');
        text
    }
}

/// Text of an optional group; empty when absent.
pub fn comment_text(group: Option<&CommentGroup>) -> String {
    group.map(CommentGroup::text).unwrap_or_default()
}

fn is_directive(body: &str) -> bool {
    if ["line ", "extern ", "export "]
        .iter()
        .any(|prefix| body.starts_with(prefix))
    {
        return true;
    }
    // `//tool:directive` form: lowercase alphanumeric word, colon, then lowercase or digit
    let Some(colon) = body.find(':') else {
        return false;
    };
    let (word, rest) = body.split_at(colon);
    !word.is_empty()
        && word
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        && rest[1..]
            .bytes()
            .next()
            .is_some_and(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
}
