//! Syntax tree handed to the collector
//!
//! A closed, owned model of one Go source file: declarations, type
//! expressions, field lists and comment groups, each addressable by a byte
//! [`Span`]. The collector only reads this tree; building it is the job of a
//! front end such as [`crate::parsing::GoParser`].
//!
//! Doc and line comments are already attached to the nodes that Go's own
//! attachment rules cover (declarations, type specs, struct fields and
//! interface elements). Parameters and results carry none; the collector
//! associates those itself from [`SourceFile::comments`].

mod comment;

pub use comment::{Comment, CommentGroup, comment_text};

use crate::types::{LineIndex, Span};

/// Identifier with its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// One parsed source file.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    /// Path the file was read from, used as its key in the package model
    pub path: String,
    /// Package clause name
    pub package: Ident,
    /// Top-level declarations in source order
    pub decls: Vec<Decl>,
    /// Every comment group in the file, sorted by start offset
    pub comments: Vec<CommentGroup>,
    /// Offset to line lookup for this file
    pub lines: LineIndex,
}

/// Top-level declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Func(FuncDecl),
    Gen(GenDecl),
    /// Anything the front end could not classify; `kind` names what it saw
    Bad { span: Span, kind: String },
}

impl Decl {
    pub fn span(&self) -> Span {
        match self {
            Decl::Func(decl) => decl.span,
            Decl::Gen(decl) => decl.span,
            Decl::Bad { span, .. } => *span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenDeclKind {
    Import,
    Const,
    Type,
    Var,
}

/// `import`, `const`, `type` or `var` declaration, grouped or not.
#[derive(Debug, Clone, PartialEq)]
pub struct GenDecl {
    pub span: Span,
    pub kind: GenDeclKind,
    /// Comment group directly above the keyword
    pub doc: Option<CommentGroup>,
    pub specs: Vec<Spec>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Spec {
    Import(ImportSpec),
    Value(ValueSpec),
    Type(TypeSpec),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportSpec {
    pub span: Span,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueSpec {
    pub span: Span,
    pub names: Vec<Ident>,
}

/// `Name T` or `Name = T`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec {
    pub span: Span,
    pub name: Ident,
    pub alias: bool,
    pub typ: Expr,
    pub doc: Option<CommentGroup>,
    pub comment: Option<CommentGroup>,
}

/// Function or method declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub span: Span,
    pub doc: Option<CommentGroup>,
    /// Receiver list, present only for methods
    pub recv: Option<FieldList>,
    pub name: Ident,
    pub typ: FuncType,
}

/// Parameters and optional results of a function, method or function type.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncType {
    pub span: Span,
    pub params: FieldList,
    /// `None` for `func f()`; a single unparenthesised result has no delimiters
    pub results: Option<FieldList>,
}

/// Delimited list of fields: parameters, results, struct fields or
/// interface elements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldList {
    /// Opening `(` or `{`, absent for an unparenthesised single result
    pub opening: Option<Span>,
    pub list: Vec<Field>,
    pub closing: Option<Span>,
}

impl FieldList {
    /// Region strictly between the delimiters, if both exist.
    pub fn interior(&self) -> Option<Span> {
        match (self.opening, self.closing) {
            (Some(open), Some(close)) if open.end <= close.start => {
                Some(Span::new(open.end, close.start))
            }
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

/// One entry of a [`FieldList`].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub span: Span,
    /// Declared names; empty for embedded members and unnamed parameters
    pub names: Vec<Ident>,
    pub typ: Expr,
    pub tag: Option<String>,
    pub doc: Option<CommentGroup>,
    pub comment: Option<CommentGroup>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructType {
    pub span: Span,
    pub fields: FieldList,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceType {
    pub span: Span,
    /// Method signatures (named, with a [`Expr::Func`] type) and embedded elements
    pub methods: FieldList,
}

/// Type expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(Ident),
    /// `pkg.Name`
    Selector {
        span: Span,
        x: Box<Expr>,
        sel: Ident,
    },
    /// `*T`
    Star { span: Span, x: Box<Expr> },
    /// `T[A, B]`
    Index {
        span: Span,
        x: Box<Expr>,
        args: Vec<Expr>,
    },
    Struct(StructType),
    Interface(InterfaceType),
    Func(FuncType),
    /// `[]T` and `[N]T`
    Array { span: Span, elem: Box<Expr> },
    Map {
        span: Span,
        key: Box<Expr>,
        value: Box<Expr>,
    },
    Chan { span: Span, value: Box<Expr> },
    /// `...T` of a variadic parameter
    Ellipsis { span: Span, elt: Box<Expr> },
    Paren { span: Span, x: Box<Expr> },
    /// `A | B` inside an interface
    Union { span: Span, terms: Vec<Expr> },
    /// `~T`
    Tilde { span: Span, x: Box<Expr> },
    Bad { span: Span, kind: String },
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Ident(ident) => ident.span,
            Expr::Struct(s) => s.span,
            Expr::Interface(i) => i.span,
            Expr::Func(f) => f.span,
            Expr::Selector { span, .. }
            | Expr::Star { span, .. }
            | Expr::Index { span, .. }
            | Expr::Array { span, .. }
            | Expr::Map { span, .. }
            | Expr::Chan { span, .. }
            | Expr::Ellipsis { span, .. }
            | Expr::Paren { span, .. }
            | Expr::Union { span, .. }
            | Expr::Tilde { span, .. }
            | Expr::Bad { span, .. } => *span,
        }
    }

    /// Short tag naming the shape, used in diagnostics and placeholders.
    pub fn tag(&self) -> &str {
        match self {
            Expr::Ident(_) => "ident",
            Expr::Selector { .. } => "selector",
            Expr::Star { .. } => "pointer",
            Expr::Index { .. } => "instantiation",
            Expr::Struct(_) => "struct",
            Expr::Interface(_) => "interface",
            Expr::Func(_) => "func",
            Expr::Array { .. } => "array",
            Expr::Map { .. } => "map",
            Expr::Chan { .. } => "chan",
            Expr::Ellipsis { .. } => "ellipsis",
            Expr::Paren { .. } => "paren",
            Expr::Union { .. } => "union",
            Expr::Tilde { .. } => "tilde",
            Expr::Bad { kind, .. } => kind,
        }
    }

    pub fn ident(name: impl Into<String>, span: Span) -> Self {
        Expr::Ident(Ident::new(name, span))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_list_interior() {
        let list = FieldList {
            opening: Some(Span::new(4, 5)),
            list: Vec::new(),
            closing: Some(Span::new(20, 21)),
        };
        assert_eq!(list.interior(), Some(Span::new(5, 20)));
        assert!(list.is_empty());

        let bare = FieldList::default();
        assert_eq!(bare.interior(), None);
    }

    #[test]
    fn test_expr_tags() {
        let ident = Expr::ident("T", Span::new(0, 1));
        let star = Expr::Star {
            span: Span::new(0, 2),
            x: Box::new(ident.clone()),
        };
        assert_eq!(ident.tag(), "ident");
        assert_eq!(star.tag(), "pointer");
        assert_eq!(star.span(), Span::new(0, 2));

        let bad = Expr::Bad {
            span: Span::new(3, 4),
            kind: "ERROR".to_string(),
        };
        assert_eq!(bad.tag(), "ERROR");
    }
}
