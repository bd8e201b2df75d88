//! Go language front end
//!
//! Parses Go source with tree-sitter-go and lowers the concrete tree into the
//! owned [`crate::syntax`] model the collector consumes.
//!
//! ## Module Components
//!
//! - [`parser`]: tree-sitter integration and node lowering
//! - `comments`: position-based comment grouping and doc/line comment attachment
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use commentof::parsing::GoParser;
//!
//! let mut parser = GoParser::new().unwrap();
//! let file = parser.parse("package demo\n", "demo.go").unwrap();
//! assert_eq!(file.package.name, "demo");
//! ```

mod comments;
pub mod parser;

pub use parser::GoParser;
