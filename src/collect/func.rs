//! Function and method signatures.

use std::collections::BTreeMap;

use super::associate::associate;
use super::render::receiver_name;
use super::{Collector, DiagnosticKind, Field, File, Func};
use crate::error::CollectResult;
use crate::syntax::{FieldList, FuncDecl, SourceFile, comment_text};

impl Collector {
    pub(super) fn collect_from_func_decl(
        &mut self,
        file: &mut File,
        source: &SourceFile,
        decl: &FuncDecl,
    ) -> CollectResult<()> {
        let name = decl.name.name.clone();

        let mut recv = String::new();
        if let Some(receiver) = decl.recv.as_ref().and_then(|list| list.list.first()) {
            match receiver_name(&receiver.typ) {
                Some(type_name) => recv = type_name,
                None => self.report(
                    source,
                    receiver.span,
                    DiagnosticKind::UnrenderableName,
                    &name,
                    format!("unexpected receiver type: {}", receiver.typ.tag()),
                ),
            }
        }

        let id = if recv.is_empty() {
            name.clone()
        } else {
            format!("{recv}{}{name}", self.sharp)
        };
        // several `func init()` may share one file; the name is listed once
        if !file.names.contains(&id) {
            file.names.push(id.clone());
        }

        let (params, param_names) = self.signature(source, &id, &decl.typ.params, "param");
        let (returns, return_names) = match &decl.typ.results {
            Some(results) => self.signature(source, &id, results, "ret"),
            None => (BTreeMap::new(), Vec::new()),
        };

        file.functions.insert(
            id,
            Func {
                name,
                recv,
                params,
                param_names,
                returns,
                return_names,
                doc: comment_text(decl.doc.as_ref()),
            },
        );
        Ok(())
    }

    /// Fields of one parameter or result list, keyed by name or `<prefix>#<i>`.
    fn signature(
        &mut self,
        source: &SourceFile,
        context: &str,
        list: &FieldList,
        prefix: &str,
    ) -> (BTreeMap<String, Field>, Vec<String>) {
        let association = associate(list, &source.comments, &source.lines);
        for span in &association.dropped {
            self.report(
                source,
                *span,
                DiagnosticKind::DroppedComment,
                context,
                "comment inside an empty list".to_string(),
            );
        }

        let mut fields = BTreeMap::new();
        let mut names = Vec::new();
        let elements = list.list.iter().zip(&association.notes);
        for (index, (element, notes)) in elements.enumerate() {
            let entries: Vec<(String, String)> = if element.names.is_empty() {
                vec![(format!("{prefix}#{index}"), String::new())]
            } else {
                element
                    .names
                    .iter()
                    .map(|ident| (ident.name.clone(), ident.name.clone()))
                    .collect()
            };

            for (id, name) in entries {
                let field = Field {
                    name,
                    embedded: false,
                    anonymous: None,
                    doc: notes.doc.clone(),
                    comment: notes.comment.clone(),
                };
                if fields.insert(id.clone(), field).is_none() {
                    names.push(id);
                }
            }
        }
        (fields, names)
    }
}
