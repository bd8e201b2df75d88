//! Source front ends producing [`crate::syntax`] trees.

pub mod go;

pub use go::GoParser;
