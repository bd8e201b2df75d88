/// The main library module for commentof
pub mod collect;
pub mod config;
pub mod error;
pub mod extract;
pub mod io;
pub mod parsing;
pub mod syntax;
pub mod types;

// Explicit exports for better API clarity
pub use collect::{
    Collector, Diagnostic, DiagnosticKind, Diagnostics, Field, File, Func, Object, ObjectKind,
    Package, PackageBuilder,
};
pub use config::{CollectConfig, Settings};
pub use error::{
    CollectError, CollectResult, ParseError, ParseResult, SourceError, SourceResult,
};
pub use extract::{Extraction, Incomplete};
pub use parsing::GoParser;
pub use types::{LineIndex, Span};
