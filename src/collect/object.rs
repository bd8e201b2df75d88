//! Type declarations and the struct/interface literal flattener.

use super::render::type_string;
use super::{Collector, DiagnosticKind, Field, File, Object, ObjectKind};
use crate::error::{CollectError, CollectResult};
use crate::syntax::{self, Expr, FieldList, GenDecl, SourceFile, TypeSpec, comment_text};

impl Collector {
    pub(super) fn collect_from_type_spec(
        &mut self,
        file: &mut File,
        source: &SourceFile,
        decl: &GenDecl,
        spec: &TypeSpec,
    ) -> CollectResult<()> {
        let name = spec.name.name.clone();
        file.names.push(name.clone());

        let mut object = Object::new(name.clone());
        object.doc = comment_text(spec.doc.as_ref());
        if object.doc.is_empty() {
            object.doc = comment_text(decl.doc.as_ref());
        }
        object.comment = comment_text(spec.comment.as_ref());

        match &spec.typ {
            Expr::Struct(st) => {
                object.kind = Some(ObjectKind::Struct);
                self.flatten(file, source, &mut object, &st.fields, 1)?;
                file.types.insert(name, object);
            }
            Expr::Interface(it) => {
                object.kind = Some(ObjectKind::Interface);
                self.flatten(file, source, &mut object, &it.methods, 1)?;
                file.interfaces.insert(name, object);
            }
            Expr::Bad { span, kind } => {
                self.report(
                    source,
                    *span,
                    DiagnosticKind::UnsupportedType,
                    &name,
                    format!("unexpected type: {kind}"),
                );
                file.types.insert(name, object);
            }
            // `type T U`, `type T = U`, `type F func()`, ...: name only
            _ => {
                file.types.insert(name, object);
            }
        }
        Ok(())
    }

    /// Emit one Field per member of `members` into `object`, recursing into
    /// members whose type is itself a struct or interface literal.
    ///
    /// `depth` is the nesting level of `object`, 1 for a top-level type.
    fn flatten(
        &mut self,
        file: &mut File,
        source: &SourceFile,
        object: &mut Object,
        members: &FieldList,
        depth: usize,
    ) -> CollectResult<()> {
        for (index, member) in members.list.iter().enumerate() {
            let doc = comment_text(member.doc.as_ref());
            let comment = comment_text(member.comment.as_ref());

            let entries: Vec<(String, String, bool)> = if member.names.is_empty() {
                let (id, name) = self.embedded_id(source, object, member, index);
                vec![(id, name, true)]
            } else {
                member
                    .names
                    .iter()
                    .map(|ident| (ident.name.clone(), ident.name.clone(), false))
                    .collect()
            };

            for (id, name, embedded) in entries {
                let mut field = Field {
                    name,
                    embedded,
                    anonymous: None,
                    doc: doc.clone(),
                    comment: comment.clone(),
                };

                let literal = match &member.typ {
                    Expr::Struct(st) => Some((ObjectKind::Struct, &st.fields)),
                    Expr::Interface(it) => Some((ObjectKind::Interface, &it.methods)),
                    Expr::Bad { span, kind } => {
                        self.report(
                            source,
                            *span,
                            DiagnosticKind::UnsupportedType,
                            &object.name,
                            format!("unexpected type: {kind}, field={id}"),
                        );
                        None
                    }
                    _ => None,
                };

                if let Some((kind, nested_members)) = literal {
                    let nested_name = format!("{}{}{}", object.name, self.dot, id);
                    if depth + 1 > self.max_depth {
                        return Err(CollectError::NestingTooDeep {
                            name: nested_name,
                            depth: depth + 1,
                        });
                    }
                    file.names.push(nested_name.clone());

                    let mut nested = Object::new(nested_name.clone());
                    nested.kind = Some(kind);
                    nested.parent = Some(object.name.clone());
                    nested.doc = doc.clone();
                    nested.comment = comment.clone();
                    self.flatten(file, source, &mut nested, nested_members, depth + 1)?;

                    match kind {
                        ObjectKind::Struct => file.types.insert(nested_name, nested.clone()),
                        ObjectKind::Interface => {
                            file.interfaces.insert(nested_name, nested.clone())
                        }
                    };
                    field.anonymous = Some(Box::new(nested));
                }

                object.push_field(id, field);
            }
        }
        Ok(())
    }

    /// Map key and display name of an embedded member.
    fn embedded_id(
        &mut self,
        source: &SourceFile,
        object: &Object,
        member: &syntax::Field,
        index: usize,
    ) -> (String, String) {
        match type_string(&member.typ) {
            Some(name) if name.is_empty() => (format!("anon#{index}"), name),
            Some(name) => (name.clone(), name),
            None => {
                let placeholder = format!("??{}", member.typ.tag());
                self.report(
                    source,
                    member.span,
                    DiagnosticKind::UnrenderableName,
                    &object.name,
                    format!("unexpected embedded field type: {}", member.typ.tag()),
                );
                (placeholder.clone(), placeholder)
            }
        }
    }
}
