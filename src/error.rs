//! Error types for comment extraction
//!
//! This module provides structured error types using thiserror so that
//! library callers get typed failures and the CLI can map them to exit codes.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while collecting one syntax tree into the model
#[derive(Error, Debug)]
pub enum CollectError {
    /// Nested struct/interface literals deeper than the configured limit
    #[error("Nested literal '{name}' is {depth} levels deep, exceeding the configured maximum")]
    NestingTooDeep { name: String, depth: usize },

    /// Any collection failure, wrapped with the file it happened in
    #[error("collect file: {path}: {source}")]
    File {
        path: String,
        #[source]
        source: Box<CollectError>,
    },
}

impl CollectError {
    /// Get a stable status code for this error type.
    ///
    /// Returns a string identifier that can be used in JSON responses
    /// for programmatic error handling.
    pub fn status_code(&self) -> String {
        match self {
            Self::NestingTooDeep { .. } => "NESTING_TOO_DEEP",
            Self::File { .. } => "COLLECT_FILE_ERROR",
        }
        .to_string()
    }

    /// Wrap this error with the path of the file being collected.
    ///
    /// Already wrapped errors are returned unchanged.
    pub fn in_file(self, path: impl Into<String>) -> Self {
        match self {
            Self::File { .. } => self,
            other => Self::File {
                path: path.into(),
                source: Box::new(other),
            },
        }
    }

    /// Innermost error, skipping file wrappers
    pub fn root(&self) -> &CollectError {
        match self {
            Self::File { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Errors specific to parsing operations
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to set Go language for parser: {source}")]
    LanguageSetup {
        #[source]
        source: tree_sitter::LanguageError,
    },

    #[error(
        "Failed to parse '{path}'\nSuggestion: Check that the file is Go source and not truncated"
    )]
    ParseFailure { path: String },

    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ParseError {
    pub fn status_code(&self) -> String {
        match self {
            Self::LanguageSetup { .. } => "LANGUAGE_SETUP_ERROR",
            Self::ParseFailure { .. } => "PARSE_ERROR",
            Self::FileRead { .. } => "FILE_READ_ERROR",
        }
        .to_string()
    }
}

/// Errors raised while locating, reading and encoding Go packages
#[derive(Error, Debug)]
pub enum SourceError {
    #[error(
        "package {path} is not found\nSuggestion: Pass a file, a directory, or a standard library path with GOROOT set"
    )]
    NotFound { path: String },

    #[error("Failed to read directory '{path}': {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("encode json: {source}")]
    Encode {
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Collect(#[from] CollectError),
}

impl SourceError {
    pub fn status_code(&self) -> String {
        match self {
            Self::NotFound { .. } => "NOT_FOUND".to_string(),
            Self::ReadDir { .. } => "READ_DIR_ERROR".to_string(),
            Self::Encode { .. } => "ENCODE_ERROR".to_string(),
            Self::Parse(e) => e.status_code(),
            Self::Collect(e) => e.status_code(),
        }
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            Self::NotFound { .. } => vec![
                "Check the path for typos",
                "Set GOROOT or discovery.goroot to resolve standard library packages",
            ],
            Self::ReadDir { .. } => vec!["Check that the directory exists and is readable"],
            Self::Collect(CollectError::File { source, .. })
                if matches!(source.as_ref(), CollectError::NestingTooDeep { .. }) =>
            {
                vec!["Raise collect.max_nesting_depth in .commentof/settings.toml"]
            }
            _ => vec![],
        }
    }
}

/// Result type alias for collection
pub type CollectResult<T> = Result<T, CollectError>;

/// Result type alias for parse operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type alias for package loading and output
pub type SourceResult<T> = Result<T, SourceError>;
