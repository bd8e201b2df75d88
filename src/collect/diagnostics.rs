//! Non-fatal findings reported during collection.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Top-level declaration the front end could not classify
    UnsupportedDecl,
    /// Type expression the front end could not classify
    UnsupportedType,
    /// Embedded member or receiver whose type has no display name
    UnrenderableName,
    /// Comment inside an empty parameter or result list
    DroppedComment,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnsupportedDecl => "unsupported-decl",
            Self::UnsupportedType => "unsupported-type",
            Self::UnrenderableName => "unrenderable-name",
            Self::DroppedComment => "dropped-comment",
        }
    }
}

/// One finding, located by file and 1-based line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub path: String,
    pub line: u32,
    /// Declaration the finding belongs to, empty at top level
    pub context: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: [{}] ", self.path, self.line, self.kind.as_str())?;
        if !self.context.is_empty() {
            write!(f, "{}: ", self.context)?;
        }
        f.write_str(&self.message)
    }
}

/// Collector-scoped sink, returned to the caller with the model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finding and mirror it to the log.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.kind {
            DiagnosticKind::DroppedComment => tracing::debug!("{diagnostic}"),
            _ => tracing::warn!("{diagnostic}"),
        }
        self.items.push(diagnostic);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(move |d| d.kind == kind)
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }
}
