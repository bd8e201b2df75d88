//! Collection of syntax trees into the documentation model
//!
//! [`Collector`] walks one file's declarations and fills a [`File`]:
//! type declarations go through the literal flattener (`object`), function
//! and method declarations through the signature collector (`func`).
//! [`PackageBuilder`] then unions files into a [`Package`] and applies the
//! method merge and the visibility filter.

mod associate;
mod builder;
mod diagnostics;
mod func;
mod model;
mod object;
mod render;

pub use associate::{Association, Notes, associate};
pub use builder::{PackageBuilder, is_exported};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use model::{Field, File, Func, Object, ObjectKind, Package};
pub use render::type_string;

use crate::config::CollectConfig;
use crate::error::CollectResult;
use crate::syntax::{Decl, GenDecl, SourceFile, Spec};
use crate::types::Span;

/// Walks syntax trees and records findings in a [`Diagnostics`] sink.
#[derive(Debug, Clone)]
pub struct Collector {
    dot: String,
    sharp: String,
    max_depth: usize,
    diagnostics: Diagnostics,
}

impl Default for Collector {
    fn default() -> Self {
        Self::new(&CollectConfig::default())
    }
}

impl Collector {
    pub fn new(config: &CollectConfig) -> Self {
        Self {
            dot: config.nested_separator.clone(),
            sharp: config.receiver_separator.clone(),
            max_depth: config.max_nesting_depth,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Collect every file of one package into `package`, in path order.
    ///
    /// Stops at the first file that fails; files collected before it stay
    /// in `package`. The error names the failing file.
    pub fn collect_from_package(
        &mut self,
        package: &mut Package,
        files: &[SourceFile],
    ) -> CollectResult<()> {
        let mut ordered: Vec<&SourceFile> = files.iter().collect();
        ordered.sort_by(|a, b| a.path.cmp(&b.path));

        for source in ordered {
            let mut file = File::new();
            self.collect_from_file(&mut file, source)
                .map_err(|e| e.in_file(source.path.as_str()))?;
            package.add_file(source.path.as_str(), file);
        }
        Ok(())
    }

    /// Collect one file's top-level declarations into `file`.
    pub fn collect_from_file(&mut self, file: &mut File, source: &SourceFile) -> CollectResult<()> {
        tracing::debug!(
            "collecting {} ({} declarations)",
            source.path,
            source.decls.len()
        );
        for decl in &source.decls {
            match decl {
                Decl::Func(func) => self.collect_from_func_decl(file, source, func)?,
                Decl::Gen(gen_decl) => self.collect_from_gen_decl(file, source, gen_decl)?,
                Decl::Bad { span, kind } => self.report(
                    source,
                    *span,
                    DiagnosticKind::UnsupportedDecl,
                    "",
                    format!("unexpected declaration: {kind}"),
                ),
            }
        }
        Ok(())
    }

    fn collect_from_gen_decl(
        &mut self,
        file: &mut File,
        source: &SourceFile,
        decl: &GenDecl,
    ) -> CollectResult<()> {
        for spec in &decl.specs {
            match spec {
                Spec::Import(_) | Spec::Value(_) => {}
                Spec::Type(spec) => self.collect_from_type_spec(file, source, decl, spec)?,
            }
        }
        Ok(())
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    fn report(
        &mut self,
        source: &SourceFile,
        span: Span,
        kind: DiagnosticKind,
        context: &str,
        message: String,
    ) {
        self.diagnostics.report(Diagnostic {
            kind,
            path: source.path.clone(),
            line: source.lines.line(span.start) + 1,
            context: context.to_string(),
            message,
        });
    }
}
