//! Go parser implementation
//!
//! Uses tree-sitter-go crate's LANGUAGE constant (converted via .into()) and
//! lowers the concrete tree into the owned [`crate::syntax`] model.

use std::path::Path;

use tree_sitter::{Node, Parser};

use super::comments::CommentIndex;
use crate::error::{ParseError, ParseResult};
use crate::syntax::{
    CommentGroup, Decl, Expr, Field, FieldList, FuncDecl, FuncType, GenDecl, GenDeclKind, Ident,
    ImportSpec, InterfaceType, SourceFile, Spec, StructType, TypeSpec, ValueSpec,
};
use crate::types::{LineIndex, Span};

/// Go source parser producing [`SourceFile`] trees.
pub struct GoParser {
    parser: Parser,
}

impl GoParser {
    /// Create a new Go parser
    pub fn new() -> ParseResult<Self> {
        let mut parser = Parser::new();
        let lang = tree_sitter_go::LANGUAGE;
        parser
            .set_language(&lang.into())
            .map_err(|source| ParseError::LanguageSetup { source })?;
        Ok(Self { parser })
    }

    /// Parse Go source text that was read from `path`.
    ///
    /// Syntax errors do not fail the parse: unrecognised top-level
    /// constructs come back as [`Decl::Bad`] and nested ones as [`Expr::Bad`].
    pub fn parse(&mut self, code: &str, path: &str) -> ParseResult<SourceFile> {
        let tree = self
            .parser
            .parse(code, None)
            .ok_or_else(|| ParseError::ParseFailure {
                path: path.to_string(),
            })?;
        let root = tree.root_node();
        if root.has_error() {
            tracing::debug!("syntax errors in {path}, continuing with a partial tree");
        }

        let lines = LineIndex::new(code);
        let comments = CommentIndex::build(root, code, &lines);
        let lowering = Lowering {
            code,
            lines: &lines,
            comments: &comments,
        };
        let (package, decls) = lowering.source_file(root);

        Ok(SourceFile {
            path: path.to_string(),
            package,
            decls,
            comments: comments.groups(),
            lines,
        })
    }

    /// Read and parse a file from disk.
    pub fn parse_file(&mut self, path: &Path) -> ParseResult<SourceFile> {
        let code = std::fs::read_to_string(path).map_err(|source| ParseError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse(&code, &path.display().to_string())
    }
}

struct Lowering<'a> {
    code: &'a str,
    lines: &'a LineIndex,
    comments: &'a CommentIndex,
}

impl<'a> Lowering<'a> {
    fn text(&self, node: Node) -> &'a str {
        &self.code[node.byte_range()]
    }

    fn ident(&self, node: Node) -> Ident {
        Ident::new(self.text(node), span(node))
    }

    fn doc(&self, node: Node) -> Option<CommentGroup> {
        self.comments.doc_for(span(node), self.lines)
    }

    fn line_comment(&self, node: Node) -> Option<CommentGroup> {
        self.comments.line_comment_for(span(node), self.lines)
    }

    fn source_file(&self, root: Node) -> (Ident, Vec<Decl>) {
        let mut package = Ident::new("", Span::default());
        let mut decls = Vec::new();

        for child in root.named_children(&mut root.walk()) {
            match child.kind() {
                "package_clause" => {
                    if let Some(name) = child.named_child(0) {
                        package = self.ident(name);
                    }
                }
                "function_declaration" | "method_declaration" => match self.func_decl(child) {
                    Some(decl) => decls.push(Decl::Func(decl)),
                    None => decls.push(bad_decl(child)),
                },
                "type_declaration" => decls.push(Decl::Gen(self.type_decl(child))),
                "import_declaration" => {
                    decls.push(Decl::Gen(self.value_decl(child, GenDeclKind::Import)))
                }
                "const_declaration" => {
                    decls.push(Decl::Gen(self.value_decl(child, GenDeclKind::Const)))
                }
                "var_declaration" => decls.push(Decl::Gen(self.value_decl(child, GenDeclKind::Var))),
                "comment" => {}
                _ => decls.push(bad_decl(child)),
            }
        }

        (package, decls)
    }

    fn func_decl(&self, node: Node) -> Option<FuncDecl> {
        let name = self.ident(node.child_by_field_name("name")?);
        let params = node.child_by_field_name("parameters")?;
        let recv = node
            .child_by_field_name("receiver")
            .map(|recv| self.parameter_list(recv));

        Some(FuncDecl {
            span: span(node),
            doc: self.doc(node),
            recv,
            name,
            typ: self.func_type(params, node.child_by_field_name("result")),
        })
    }

    fn func_type(&self, params: Node, result: Option<Node>) -> FuncType {
        let end = result.unwrap_or(params);
        FuncType {
            span: Span::new(params.start_byte() as u32, end.end_byte() as u32),
            params: self.parameter_list(params),
            results: result.map(|result| self.results(result)),
        }
    }

    fn results(&self, node: Node) -> FieldList {
        if node.kind() == "parameter_list" {
            return self.parameter_list(node);
        }
        // single unparenthesised result type
        FieldList {
            opening: None,
            list: vec![Field {
                span: span(node),
                names: Vec::new(),
                typ: self.expr(node),
                tag: None,
                doc: None,
                comment: None,
            }],
            closing: None,
        }
    }

    fn parameter_list(&self, node: Node) -> FieldList {
        let mut list = FieldList {
            opening: delimiter(node, "("),
            list: Vec::new(),
            closing: delimiter_last(node, ")"),
        };

        for child in node.named_children(&mut node.walk()) {
            let typ = match child.kind() {
                "parameter_declaration" => self.field_type(child),
                "variadic_parameter_declaration" => Expr::Ellipsis {
                    span: span(child),
                    elt: Box::new(self.field_type(child)),
                },
                "comment" => continue,
                other => {
                    tracing::debug!("skipping {other} inside parameter list");
                    continue;
                }
            };
            list.list.push(Field {
                span: span(child),
                names: self.names(child),
                typ,
                tag: None,
                doc: None,
                comment: None,
            });
        }

        list
    }

    fn names(&self, node: Node) -> Vec<Ident> {
        node.children_by_field_name("name", &mut node.walk())
            .map(|name| self.ident(name))
            .collect()
    }

    fn field_type(&self, node: Node) -> Expr {
        match node.child_by_field_name("type") {
            Some(typ) => self.expr(typ),
            None => missing(node),
        }
    }

    fn type_decl(&self, node: Node) -> GenDecl {
        let grouped = delimiter(node, "(").is_some();
        let mut specs = Vec::new();

        for child in node.named_children(&mut node.walk()) {
            let alias = match child.kind() {
                "type_spec" => false,
                "type_alias" => true,
                _ => continue,
            };
            let Some(name) = child.child_by_field_name("name") else {
                continue;
            };
            specs.push(Spec::Type(TypeSpec {
                span: span(child),
                name: self.ident(name),
                alias,
                typ: self.field_type(child),
                doc: if grouped { self.doc(child) } else { None },
                comment: self.line_comment(child),
            }));
        }

        GenDecl {
            span: span(node),
            kind: GenDeclKind::Type,
            doc: self.doc(node),
            specs,
        }
    }

    fn value_decl(&self, node: Node, kind: GenDeclKind) -> GenDecl {
        let mut specs = Vec::new();
        let mut pending = vec![node];

        while let Some(current) = pending.pop() {
            for child in current.named_children(&mut current.walk()) {
                match child.kind() {
                    "import_spec" => specs.push(Spec::Import(ImportSpec {
                        span: span(child),
                        path: child
                            .child_by_field_name("path")
                            .map(|path| self.text(path).trim_matches(['"', '`']).to_string())
                            .unwrap_or_default(),
                    })),
                    "const_spec" | "var_spec" => specs.push(Spec::Value(ValueSpec {
                        span: span(child),
                        names: self.names(child),
                    })),
                    kind if kind.ends_with("_spec_list") => pending.push(child),
                    _ => {}
                }
            }
        }
        specs.sort_by_key(|spec| match spec {
            Spec::Import(s) => s.span.start,
            Spec::Value(s) => s.span.start,
            Spec::Type(s) => s.span.start,
        });

        GenDecl {
            span: span(node),
            kind,
            doc: self.doc(node),
            specs,
        }
    }

    fn expr(&self, node: Node) -> Expr {
        match node.kind() {
            "type_identifier" | "identifier" | "field_identifier" | "package_identifier" => {
                Expr::Ident(self.ident(node))
            }
            "qualified_type" => {
                match (
                    node.child_by_field_name("package"),
                    node.child_by_field_name("name"),
                ) {
                    (Some(package), Some(name)) => Expr::Selector {
                        span: span(node),
                        x: Box::new(Expr::Ident(self.ident(package))),
                        sel: self.ident(name),
                    },
                    _ => missing(node),
                }
            }
            "pointer_type" => match last_named_child(node) {
                Some(inner) => Expr::Star {
                    span: span(node),
                    x: Box::new(self.expr(inner)),
                },
                None => missing(node),
            },
            "generic_type" => match node.child_by_field_name("type") {
                Some(base) => Expr::Index {
                    span: span(node),
                    x: Box::new(self.expr(base)),
                    args: node
                        .child_by_field_name("type_arguments")
                        .map(|args| {
                            args.named_children(&mut args.walk())
                                .filter(|arg| arg.kind() != "comment")
                                .map(|arg| self.expr(arg))
                                .collect()
                        })
                        .unwrap_or_default(),
                },
                None => missing(node),
            },
            "struct_type" => Expr::Struct(self.struct_type(node)),
            "interface_type" => Expr::Interface(self.interface_type(node)),
            "function_type" => match node.child_by_field_name("parameters") {
                Some(params) => {
                    Expr::Func(self.func_type(params, node.child_by_field_name("result")))
                }
                None => missing(node),
            },
            "slice_type" | "array_type" | "implicit_length_array_type" => {
                match node.child_by_field_name("element") {
                    Some(elem) => Expr::Array {
                        span: span(node),
                        elem: Box::new(self.expr(elem)),
                    },
                    None => missing(node),
                }
            }
            "map_type" => match (
                node.child_by_field_name("key"),
                node.child_by_field_name("value"),
            ) {
                (Some(key), Some(value)) => Expr::Map {
                    span: span(node),
                    key: Box::new(self.expr(key)),
                    value: Box::new(self.expr(value)),
                },
                _ => missing(node),
            },
            "channel_type" => match node.child_by_field_name("value") {
                Some(value) => Expr::Chan {
                    span: span(node),
                    value: Box::new(self.expr(value)),
                },
                None => missing(node),
            },
            "parenthesized_type" => match last_named_child(node) {
                Some(inner) => Expr::Paren {
                    span: span(node),
                    x: Box::new(self.expr(inner)),
                },
                None => missing(node),
            },
            "negated_type" => match last_named_child(node) {
                Some(inner) => Expr::Tilde {
                    span: span(node),
                    x: Box::new(self.expr(inner)),
                },
                None => missing(node),
            },
            "type_elem" | "constraint_elem" | "interface_type_name" => {
                let mut terms: Vec<Expr> = node
                    .named_children(&mut node.walk())
                    .filter(|term| term.kind() != "comment")
                    .map(|term| self.expr(term))
                    .collect();
                match terms.len() {
                    0 => missing(node),
                    1 => terms.remove(0),
                    _ => Expr::Union {
                        span: span(node),
                        terms,
                    },
                }
            }
            other => Expr::Bad {
                span: span(node),
                kind: other.to_string(),
            },
        }
    }

    fn struct_type(&self, node: Node) -> StructType {
        let mut fields = FieldList::default();
        let body = node
            .named_children(&mut node.walk())
            .find(|child| child.kind() == "field_declaration_list");

        if let Some(body) = body {
            fields.opening = delimiter(body, "{");
            fields.closing = delimiter_last(body, "}");
            for child in body.named_children(&mut body.walk()) {
                if child.kind() == "field_declaration" {
                    fields.list.push(self.struct_field(child));
                }
            }
        }

        StructType {
            span: span(node),
            fields,
        }
    }

    fn struct_field(&self, node: Node) -> Field {
        let names = self.names(node);
        let mut typ = self.field_type(node);
        if names.is_empty() {
            // embedded `*T`: the star is a bare token on the field, not a pointer_type
            if let Some(star) = delimiter(node, "*") {
                typ = Expr::Star {
                    span: Span::new(star.start, typ.span().end),
                    x: Box::new(typ),
                };
            }
        }

        Field {
            span: span(node),
            names,
            typ,
            tag: node
                .child_by_field_name("tag")
                .map(|tag| self.text(tag).to_string()),
            doc: self.doc(node),
            comment: self.line_comment(node),
        }
    }

    fn interface_type(&self, node: Node) -> InterfaceType {
        let mut methods = FieldList {
            opening: delimiter(node, "{"),
            list: Vec::new(),
            closing: delimiter_last(node, "}"),
        };

        for child in node.named_children(&mut node.walk()) {
            let field = match child.kind() {
                "method_elem" | "method_spec" => {
                    let (Some(name), Some(params)) = (
                        child.child_by_field_name("name"),
                        child.child_by_field_name("parameters"),
                    ) else {
                        continue;
                    };
                    Field {
                        span: span(child),
                        names: vec![self.ident(name)],
                        typ: Expr::Func(
                            self.func_type(params, child.child_by_field_name("result")),
                        ),
                        tag: None,
                        doc: self.doc(child),
                        comment: self.line_comment(child),
                    }
                }
                "comment" => continue,
                _ => Field {
                    span: span(child),
                    names: Vec::new(),
                    typ: self.expr(child),
                    tag: None,
                    doc: self.doc(child),
                    comment: self.line_comment(child),
                },
            };
            methods.list.push(field);
        }

        InterfaceType {
            span: span(node),
            methods,
        }
    }
}

fn span(node: Node) -> Span {
    Span::from_range(node.byte_range())
}

fn bad_decl(node: Node) -> Decl {
    Decl::Bad {
        span: span(node),
        kind: node.kind().to_string(),
    }
}

fn missing(node: Node) -> Expr {
    Expr::Bad {
        span: span(node),
        kind: format!("incomplete {}", node.kind()),
    }
}

fn last_named_child(node: Node) -> Option<Node> {
    node.named_children(&mut node.walk())
        .filter(|child| child.kind() != "comment")
        .last()
}

/// First anonymous child token with the given text.
fn delimiter(node: Node, token: &str) -> Option<Span> {
    node.children(&mut node.walk())
        .find(|child| !child.is_named() && child.kind() == token)
        .map(span)
}

fn delimiter_last(node: Node, token: &str) -> Option<Span> {
    node.children(&mut node.walk())
        .filter(|child| !child.is_named() && child.kind() == token && !child.is_missing())
        .last()
        .map(span)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(code: &str) -> SourceFile {
        GoParser::new()
            .expect("go grammar loads")
            .parse(code, "test.go")
            .expect("parse succeeds")
    }

    fn type_spec(file: &SourceFile, index: usize) -> &TypeSpec {
        let Decl::Gen(decl) = &file.decls[index] else {
            panic!("expected a general declaration at {index}");
        };
        match &decl.specs[0] {
            Spec::Type(spec) => spec,
            other => panic!("expected a type spec, got {other:?}"),
        }
    }

    #[test]
    fn test_package_and_declaration_kinds() {
        let file = parse(
            r#"package demo

import "fmt"

const A = 1

var b = 2

type T int

func F() {}

func (t T) M() {}
"#,
        );

        assert_eq!(file.package.name, "demo");
        assert_eq!(file.decls.len(), 6);
        assert!(matches!(&file.decls[0], Decl::Gen(g) if g.kind == GenDeclKind::Import));
        assert!(matches!(&file.decls[1], Decl::Gen(g) if g.kind == GenDeclKind::Const));
        assert!(matches!(&file.decls[2], Decl::Gen(g) if g.kind == GenDeclKind::Var));
        assert!(matches!(&file.decls[3], Decl::Gen(g) if g.kind == GenDeclKind::Type));
        assert!(matches!(&file.decls[4], Decl::Func(f) if f.recv.is_none()));
        assert!(matches!(&file.decls[5], Decl::Func(f) if f.recv.is_some()));
    }

    #[test]
    fn test_doc_and_line_comment_attach_to_fields() {
        let file = parse(
            r#"package demo

// S is struct
type S struct {
	// Foo doc
	Foo string // Foo trailing

	Bar int // Bar trailing
} // S trailing
"#,
        );

        let Decl::Gen(decl) = &file.decls[0] else {
            panic!("expected type declaration");
        };
        assert_eq!(decl.doc.as_ref().map(|d| d.text()).as_deref(), Some("S is struct\n"));

        let spec = type_spec(&file, 0);
        assert!(spec.doc.is_none(), "ungrouped spec doc lives on the declaration");
        assert_eq!(
            spec.comment.as_ref().map(|c| c.text()).as_deref(),
            Some("S trailing\n")
        );

        let Expr::Struct(st) = &spec.typ else {
            panic!("expected struct literal");
        };
        let foo = &st.fields.list[0];
        assert_eq!(foo.doc.as_ref().map(|d| d.text()).as_deref(), Some("Foo doc\n"));
        assert_eq!(
            foo.comment.as_ref().map(|c| c.text()).as_deref(),
            Some("Foo trailing\n")
        );
        let bar = &st.fields.list[1];
        assert!(bar.doc.is_none());
        assert_eq!(
            bar.comment.as_ref().map(|c| c.text()).as_deref(),
            Some("Bar trailing\n")
        );
    }

    #[test]
    fn test_blank_line_detaches_doc() {
        let file = parse(
            r#"package demo

// floating comment

func F() {}
"#,
        );
        let Decl::Func(func) = &file.decls[0] else {
            panic!("expected function");
        };
        assert!(func.doc.is_none());
        assert_eq!(file.comments.len(), 1);
    }

    #[test]
    fn test_embedded_pointer_and_qualified_fields() {
        let file = parse(
            r#"package demo

type S struct {
	*Base
	io.Reader
	Named, Other int
}
"#,
        );
        let Expr::Struct(st) = &type_spec(&file, 0).typ else {
            panic!("expected struct literal");
        };
        assert!(matches!(&st.fields.list[0].typ, Expr::Star { x, .. } if matches!(x.as_ref(), Expr::Ident(i) if i.name == "Base")));
        assert!(matches!(&st.fields.list[1].typ, Expr::Selector { sel, .. } if sel.name == "Reader"));
        let names: Vec<_> = st.fields.list[2].names.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Named", "Other"]);
    }

    #[test]
    fn test_parameter_lists_and_results() {
        let file = parse(
            r#"package demo

func F(a, b int, rest ...string) (n int, err error) { return }

func G() string { return "" }
"#,
        );
        let Decl::Func(f) = &file.decls[0] else {
            panic!("expected function");
        };
        assert!(f.typ.params.opening.is_some() && f.typ.params.closing.is_some());
        assert_eq!(f.typ.params.list.len(), 2);
        assert!(matches!(f.typ.params.list[1].typ, Expr::Ellipsis { .. }));
        assert_eq!(f.typ.results.as_ref().map(|r| r.list.len()), Some(2));

        let Decl::Func(g) = &file.decls[1] else {
            panic!("expected function");
        };
        let results = g.typ.results.as_ref().expect("single result");
        assert!(results.opening.is_none());
        assert!(matches!(&results.list[0].typ, Expr::Ident(i) if i.name == "string"));
    }
}
